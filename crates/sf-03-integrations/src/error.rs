//! Error types for the integrations.

use sf_01_frame_lifecycle::LifecycleError;
use sf_02_object_locator::LocatorError;
use shared_bus::ReplyError;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by integration components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrationError {
    #[error("Frame lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Object lookup failed: {0}")]
    Locator(#[from] LocatorError),

    #[error("No answer within {after:?}")]
    TimedOut { after: Duration },

    #[error("Frame did not answer")]
    Unanswered,

    #[error("Frame was torn down")]
    Closed,

    #[error("Unknown issuer: {0}")]
    UnknownIssuer(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Result was already taken")]
    AlreadyTaken,
}

impl From<ReplyError> for IntegrationError {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::TimedOut { after } => Self::TimedOut { after },
            ReplyError::Unanswered => Self::Unanswered,
            ReplyError::Closed => Self::Closed,
        }
    }
}

impl From<serde_json::Error> for IntegrationError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

/// Await `future`, giving up after `timeout` when one is set.
pub(crate) async fn within<F: std::future::Future>(
    timeout: Option<Duration>,
    future: F,
) -> Result<F::Output, IntegrationError> {
    match timeout {
        Some(after) => tokio::time::timeout(after, future)
            .await
            .map_err(|_| IntegrationError::TimedOut { after }),
        None => Ok(future.await),
    }
}
