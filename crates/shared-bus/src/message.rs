//! # Messages and Replies
//!
//! A `Message` is what a listener sees: the sender's origin, a JSON payload,
//! and optionally a one-shot reply slot. Request/reply exchanges (such as the
//! configuration handshake) use the slot; plain events leave it empty.

use crate::error::ReplyError;
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// A listener callback.
///
/// Handler identity is the identity of the `Arc`: `off` must be given a
/// clone of the same `Arc` that was passed to `on`.
pub type Handler = Arc<dyn Fn(&Message) + Send + Sync>;

/// Wrap a closure as a `Handler`.
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Message) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Address of the closure behind a handler, used as its identity.
pub(crate) fn handler_identity(handler: &Handler) -> *const () {
    Arc::as_ptr(handler) as *const ()
}

/// Whether two handlers are the same registration target.
pub(crate) fn same_handler(a: &Handler, b: &Handler) -> bool {
    std::ptr::eq(handler_identity(a), handler_identity(b))
}

// =============================================================================
// REPLY SLOT
// =============================================================================

/// One-shot reply slot shared by every copy of a request message.
///
/// The first `send` wins. When the last copy is dropped without an answer,
/// the waiting side observes `ReplyError::Unanswered`.
#[derive(Clone)]
pub struct ReplySlot {
    sender: Arc<Mutex<Option<oneshot::Sender<Value>>>>,
}

impl ReplySlot {
    /// Create a slot and the receiver that waits on it.
    #[must_use]
    pub fn channel() -> (Self, oneshot::Receiver<Value>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// Answer the request. Returns `false` if it was already answered or the
    /// requester stopped waiting.
    pub fn send(&self, value: Value) -> bool {
        match self.sender.lock().take() {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }

    /// Whether someone already answered.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.sender.lock().is_none()
    }
}

impl fmt::Debug for ReplySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplySlot")
            .field("answered", &self.is_answered())
            .finish()
    }
}

// =============================================================================
// MESSAGE
// =============================================================================

/// A message as delivered to a listener.
#[derive(Debug, Clone)]
pub struct Message {
    origin: String,
    payload: Value,
    reply: Option<ReplySlot>,
}

impl Message {
    /// Create a message sent from `origin`.
    #[must_use]
    pub fn new(origin: impl Into<String>, payload: Value) -> Self {
        Self {
            origin: origin.into(),
            payload,
            reply: None,
        }
    }

    /// Attach a reply slot.
    #[must_use]
    pub fn with_reply(mut self, slot: ReplySlot) -> Self {
        self.reply = Some(slot);
        self
    }

    /// Origin of the sending context, as reported by the platform.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Whether the sender is waiting for a reply.
    #[must_use]
    pub fn expects_reply(&self) -> bool {
        self.reply.is_some()
    }

    /// Reply to the sender. Returns `false` when the message carries no slot
    /// or another listener already replied.
    pub fn reply(&self, value: Value) -> bool {
        self.reply.as_ref().is_some_and(|slot| slot.send(value))
    }
}

// =============================================================================
// PENDING REPLY
// =============================================================================

/// The requesting side of a request/reply exchange.
#[derive(Debug)]
pub struct PendingReply {
    receiver: Option<oneshot::Receiver<Value>>,
}

impl PendingReply {
    pub(crate) fn new(receiver: oneshot::Receiver<Value>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// A reply that can never arrive because the request was never sent.
    pub(crate) fn closed() -> Self {
        Self { receiver: None }
    }

    /// Wait for the reply.
    ///
    /// With `timeout = None` this waits for as long as some listener still
    /// holds the reply slot.
    ///
    /// # Errors
    ///
    /// - `ReplyError::Closed` if the request was made on a torn-down bus
    /// - `ReplyError::Unanswered` if every listener dropped the slot
    /// - `ReplyError::TimedOut` if `timeout` elapsed first
    pub async fn wait(self, timeout: Option<Duration>) -> Result<Value, ReplyError> {
        let Some(receiver) = self.receiver else {
            return Err(ReplyError::Closed);
        };

        match timeout {
            Some(after) => match tokio::time::timeout(after, receiver).await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(_)) => Err(ReplyError::Unanswered),
                Err(_) => Err(ReplyError::TimedOut { after }),
            },
            None => receiver.await.map_err(|_| ReplyError::Unanswered),
        }
    }
}
