//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for parent components
//! - Driven Ports (outbound) - The page that hosts frame elements

pub mod inbound;
pub mod outbound;

pub use inbound::{CreateFrame, FrameLifecycleApi};
pub use outbound::{FrameElementId, FrameGlobals, FrameHost, FrameSpec, LiveObject};
