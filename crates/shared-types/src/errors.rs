//! # Error Types
//!
//! Errors shared across the frame components.

use thiserror::Error;

/// Errors raised when building a `ChannelId`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelIdError {
    /// The id was empty.
    #[error("Channel id must not be empty")]
    Empty,

    /// The id contains a character reserved by the key or frame name format.
    #[error("Channel id {id:?} contains reserved character {reserved:?}")]
    ReservedCharacter { id: String, reserved: char },
}

/// Errors raised when building a `Configuration`.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The value could not be represented as JSON.
    #[error("Configuration is not JSON-serializable: {0}")]
    NotSerializable(#[from] serde_json::Error),
}

/// Errors reported by a gateway client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The client does not support network requests.
    #[error("Gateway requests are not supported by this client")]
    Unsupported,

    /// The request failed.
    #[error("Gateway request failed: {0}")]
    RequestFailed(String),
}
