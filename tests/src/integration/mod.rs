//! # Integration Tests
//!
//! Parent components and frame loaders running against one
//! `InMemoryPage` and one `InMemoryDispatcher`.

pub mod handshake;
pub mod integrations;
pub mod isolation;
pub mod telemetry;
