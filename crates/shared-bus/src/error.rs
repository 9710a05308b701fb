//! Error types for the shared bus.

use shared_types::{ChannelId, ChannelIdError};
use std::time::Duration;
use thiserror::Error;

/// Errors raised when constructing a bus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// No channel, a null channel, or an empty channel was supplied.
    #[error("Channel id must be provided")]
    MissingChannel,

    /// The channel id contains reserved characters.
    #[error("Invalid channel id: {0}")]
    InvalidChannel(#[from] ChannelIdError),
}

/// Errors observed while waiting for a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    /// The request was made on a torn-down bus and never left it.
    #[error("Bus was torn down before the request was sent")]
    Closed,

    /// Every listener released the reply slot without answering.
    #[error("No listener answered the request")]
    Unanswered,

    /// No reply arrived within the allotted time.
    #[error("No reply within {after:?}")]
    TimedOut { after: Duration },
}

/// Errors from the channel registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The channel is already bound in this context.
    #[error("Channel {0} is already bound")]
    AlreadyActive(ChannelId),

    /// The channel was released earlier and may not be reused.
    #[error("Channel {0} was retired and cannot be reused")]
    Retired(ChannelId),
}
