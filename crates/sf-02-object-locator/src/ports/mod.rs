//! Ports Layer
//!
//! - Driving Port (inbound): `ObjectLocator`
//! - Driven Ports (outbound): `SiblingFrames` / `SiblingFrame`

pub mod inbound;
pub mod outbound;

pub use inbound::ObjectLocator;
pub use outbound::{SiblingFrame, SiblingFrames};
