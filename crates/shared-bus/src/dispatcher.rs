//! # Message Dispatcher
//!
//! The page-wide messaging primitive every bus sits on. It knows nothing
//! about channels or origins: it maps plain string keys to listeners.

use crate::message::{same_handler, Handler, Message};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

/// The raw cross-frame messaging primitive.
///
/// Implementations must never deliver a message synchronously from inside
/// `publish`: listeners observe a message on a later turn.
pub trait MessageDispatcher: Send + Sync {
    /// Register `handler` for `key`.
    fn subscribe(&self, key: &str, handler: Handler);

    /// Remove the most recent registration of `handler` for `key`.
    ///
    /// Returns whether a registration was removed.
    fn unsubscribe(&self, key: &str, handler: &Handler) -> bool;

    /// Queue `message` for every listener of `key`.
    fn publish(&self, key: &str, message: Message);
}

type ListenerTable = Arc<RwLock<HashMap<String, Vec<Handler>>>>;

enum Delivery {
    Message { key: String, message: Message },
    Barrier(oneshot::Sender<()>),
}

/// Counters kept by the in-memory dispatcher.
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Messages accepted by `publish`.
    pub published: AtomicU64,
    /// Handler invocations.
    pub delivered: AtomicU64,
    /// Messages that found no listener.
    pub undelivered: AtomicU64,
}

/// In-process dispatcher shared by every bus of a page and its frames.
///
/// `publish` only enqueues. A pump task drains the queue and calls the
/// listeners registered for each key at delivery time, each with its own
/// copy of the message, outside of any lock.
pub struct InMemoryDispatcher {
    listeners: ListenerTable,
    queue: mpsc::UnboundedSender<Delivery>,
    stats: Arc<DispatchStats>,
}

impl InMemoryDispatcher {
    /// Create a dispatcher and spawn its pump on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    #[must_use]
    pub fn spawn() -> Arc<Self> {
        let (queue, receiver) = mpsc::unbounded_channel();
        let listeners = ListenerTable::default();
        let stats = Arc::new(DispatchStats::default());

        tokio::spawn(pump(receiver, listeners.clone(), stats.clone()));

        Arc::new(Self {
            listeners,
            queue,
            stats,
        })
    }

    /// Wait until every message published before this call was delivered.
    ///
    /// Messages published by listeners during that delivery are not covered.
    pub async fn settle(&self) {
        let (done, wait) = oneshot::channel();
        if self.queue.send(Delivery::Barrier(done)).is_ok() {
            let _ = wait.await;
        }
    }

    /// Number of listeners currently registered for `key`.
    #[must_use]
    pub fn listener_count(&self, key: &str) -> usize {
        self.listeners.read().get(key).map_or(0, Vec::len)
    }

    /// Number of listeners across all keys.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.listeners.read().values().map(Vec::len).sum()
    }

    /// Dispatch counters.
    #[must_use]
    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }
}

impl MessageDispatcher for InMemoryDispatcher {
    fn subscribe(&self, key: &str, handler: Handler) {
        self.listeners
            .write()
            .entry(key.to_string())
            .or_default()
            .push(handler);
        trace!(key, "Listener subscribed");
    }

    fn unsubscribe(&self, key: &str, handler: &Handler) -> bool {
        let mut listeners = self.listeners.write();
        let Some(handlers) = listeners.get_mut(key) else {
            return false;
        };
        let Some(position) = handlers.iter().rposition(|h| same_handler(h, handler)) else {
            return false;
        };

        handlers.remove(position);
        if handlers.is_empty() {
            listeners.remove(key);
        }
        trace!(key, "Listener unsubscribed");
        true
    }

    fn publish(&self, key: &str, message: Message) {
        self.stats.published.fetch_add(1, Ordering::Relaxed);

        let delivery = Delivery::Message {
            key: key.to_string(),
            message,
        };
        if self.queue.send(delivery).is_err() {
            debug!(key, "Dispatcher pump stopped, message dropped");
        }
    }
}

async fn pump(
    mut receiver: mpsc::UnboundedReceiver<Delivery>,
    listeners: ListenerTable,
    stats: Arc<DispatchStats>,
) {
    while let Some(delivery) = receiver.recv().await {
        let (key, message) = match delivery {
            Delivery::Barrier(done) => {
                let _ = done.send(());
                continue;
            }
            Delivery::Message { key, message } => (key, message),
        };

        // Snapshot so handlers can subscribe or publish re-entrantly.
        let handlers = listeners.read().get(&key).cloned().unwrap_or_default();
        if handlers.is_empty() {
            stats.undelivered.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "No listeners for message");
            continue;
        }

        for handler in handlers {
            let copy = message.clone();
            handler(&copy);
            stats.delivered.fetch_add(1, Ordering::Relaxed);
        }
    }

    debug!("Dispatcher queue closed");
}
