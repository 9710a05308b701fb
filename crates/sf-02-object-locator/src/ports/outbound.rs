//! Outbound Ports (Driven Ports)
//!
//! Read access to the frames next to the caller, as the platform allows it.

use sf_01_frame_lifecycle::LiveObject;

use crate::error::FrameAccessError;

/// One sibling frame.
pub trait SiblingFrame: Send + Sync {
    /// Label for logs.
    fn label(&self) -> String;

    /// The frame's current location.
    fn location(&self) -> Result<String, FrameAccessError>;

    /// A global exposed by the frame.
    fn property(&self, name: &str) -> Result<Option<LiveObject>, FrameAccessError>;
}

/// Enumerates the caller's sibling frames.
pub trait SiblingFrames: Send + Sync {
    fn siblings(&self) -> Vec<Box<dyn SiblingFrame>>;
}
