//! Service Layer
//!
//! - `FrameLifecycleController`: the parent side, implements `FrameLifecycleApi`
//! - `FrameBootstrap`: the child side of the configuration handshake

pub mod bootstrap;
pub mod controller;

pub use bootstrap::{BootstrappedFrame, FrameBootstrap, FrameContext};
pub use controller::{FrameHandle, FrameLifecycleController};
