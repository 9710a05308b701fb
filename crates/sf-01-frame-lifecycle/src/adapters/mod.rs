//! Adapters Layer
//!
//! - `InMemoryPage`: an in-process `FrameHost` that runs frame code on attach

pub mod in_memory_page;

pub use in_memory_page::{FrameLoader, InMemoryPage};
