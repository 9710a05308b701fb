//! Error types for the object locator.

use shared_bus::BusError;
use std::time::Duration;
use thiserror::Error;

/// Failure to read from a sibling frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameAccessError {
    /// The frame belongs to another origin. A scan skips it.
    #[error("Cross-origin access to frame {frame} denied")]
    CrossOriginAccess { frame: String },

    /// The frame went away while it was being read. A scan skips it.
    #[error("Frame {frame} is no longer available")]
    Detached { frame: String },
}

/// Errors returned by an `ObjectLocator`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("Target URL '{0}' carries no channel fragment")]
    NoChannel(String),

    #[error("Bus error: {0}")]
    Bus(#[from] BusError),

    #[error("Owning frame did not answer within {after:?}")]
    TimedOut { after: Duration },

    #[error("Lookup bus was torn down")]
    Closed,

    #[error("Malformed lookup reply: {0}")]
    MalformedReply(String),
}
