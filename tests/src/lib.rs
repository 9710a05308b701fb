//! # Secure-Frames Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # A checkout page with every loader registered
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── origin_spoofing.rs
//! │   └── frame_snooping.rs
//! │
//! └── integration/      # Cross-crate flows
//!     ├── handshake.rs
//!     ├── isolation.rs
//!     ├── integrations.rs
//!     └── telemetry.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sf-tests
//!
//! # By category
//! cargo test -p sf-tests integration::
//! cargo test -p sf-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p sf-tests
//! ```

#![allow(dead_code)]

pub mod exploits;
pub mod fixtures;
pub mod integration;
