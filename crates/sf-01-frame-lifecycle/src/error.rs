//! Error types for the frame lifecycle.

use shared_bus::{BusError, ChannelError, ReplyError};
use shared_types::ChannelIdError;
use std::time::Duration;
use thiserror::Error;

use crate::ports::FrameElementId;

/// Errors raised by the lifecycle controller and the child bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Invalid lifecycle configuration: {0}")]
    InvalidConfig(String),

    #[error("Frame name '{name}' does not carry a valid channel: {source}")]
    InvalidFrameName {
        name: String,
        #[source]
        source: ChannelIdError,
    },

    #[error("Bus error: {0}")]
    Bus(#[from] BusError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Frame host error: {0}")]
    Host(#[from] HostError),

    #[error("Configuration handshake failed: {0}")]
    Handshake(#[from] HandshakeError),

    #[error("Frame was not ready within {after:?}")]
    NotReady { after: Duration },

    #[error("Frame was torn down")]
    TornDown,
}

/// Errors reported by a `FrameHost`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Unknown frame element {0}")]
    UnknownFrame(FrameElementId),

    #[error("Frame element {0} is already attached")]
    AlreadyAttached(FrameElementId),

    #[error("Frame element {id} could not be attached: {reason}")]
    AttachRejected { id: FrameElementId, reason: String },

    #[error("Blocked a frame with origin {accessor} from accessing frame {id} ({frame_origin})")]
    CrossOrigin {
        id: FrameElementId,
        accessor: String,
        frame_origin: String,
    },
}

/// Ways the child's configuration request can fail to complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandshakeError {
    #[error("Parent did not answer the configuration request within {after:?}")]
    TimedOut { after: Duration },

    #[error("No parent answered the configuration request")]
    Unanswered,

    #[error("Child bus was torn down before the configuration request was sent")]
    Closed,
}

impl HandshakeError {
    /// Label used for the handshake outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::TimedOut { .. } => "timed_out",
            Self::Unanswered => "unanswered",
            Self::Closed => "closed",
        }
    }
}

impl From<ReplyError> for HandshakeError {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::TimedOut { after } => Self::TimedOut { after },
            ReplyError::Unanswered => Self::Unanswered,
            ReplyError::Closed => Self::Closed,
        }
    }
}
