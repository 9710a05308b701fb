//! # Bus
//!
//! Channel-scoped publish/subscribe over a shared `MessageDispatcher`.
//!
//! One bus exists per component instance on each side of a channel. Every
//! event name is namespaced with the channel before it reaches the
//! dispatcher, so buses on different channels are isolated by construction.

use crate::dispatcher::MessageDispatcher;
use crate::error::BusError;
use crate::listeners::{ListenerList, ListenerRecord};
use crate::message::{Handler, Message, PendingReply, ReplySlot};
use crate::namespace::namespaced_key;
use crate::origin::OriginValidator;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::ChannelId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Origin stamped on messages from a context that did not declare one.
pub const OPAQUE_ORIGIN: &str = "null";

/// Options accepted by `Bus::new`.
///
/// Deserializable, so option objects coming from configuration can be fed
/// in directly; a missing or `null` channel is reported by `Bus::new`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusOptions {
    /// Channel the bus is bound to. Required.
    #[serde(default)]
    pub channel: Option<String>,

    /// Merchant page URL. When set, inbound messages are origin-checked.
    #[serde(default)]
    pub merchant_url: Option<String>,

    /// Origin of the context this bus lives in, stamped on outbound messages.
    #[serde(default)]
    pub origin: Option<String>,
}

impl BusOptions {
    /// Options for `channel` with no origin enforcement.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: Some(channel.into()),
            ..Self::default()
        }
    }

    /// Enable origin enforcement against `merchant_url`.
    #[must_use]
    pub fn with_merchant_url(mut self, merchant_url: impl Into<String>) -> Self {
        self.merchant_url = Some(merchant_url.into());
        self
    }

    /// Declare the origin of the context the bus lives in.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

struct BusState {
    listeners: ListenerList,
    torn_down: bool,
}

/// Channel-scoped bus.
pub struct Bus {
    channel: ChannelId,
    merchant_url: Option<Arc<str>>,
    origin: String,
    dispatcher: Arc<dyn MessageDispatcher>,
    state: Mutex<BusState>,
    dropped: Arc<AtomicU64>,
}

impl Bus {
    /// Create a bus bound to `options.channel`.
    ///
    /// # Errors
    ///
    /// - `BusError::MissingChannel` if the channel is absent, null or empty
    /// - `BusError::InvalidChannel` if it contains reserved characters
    pub fn new(
        dispatcher: Arc<dyn MessageDispatcher>,
        options: BusOptions,
    ) -> Result<Self, BusError> {
        let channel = options
            .channel
            .filter(|channel| !channel.is_empty())
            .ok_or(BusError::MissingChannel)?;
        let channel = ChannelId::new(channel)?;

        let merchant_url = options
            .merchant_url
            .filter(|url| !url.is_empty())
            .map(Arc::from);

        Ok(Self {
            channel,
            merchant_url,
            origin: options.origin.unwrap_or_else(|| OPAQUE_ORIGIN.to_string()),
            dispatcher,
            state: Mutex::new(BusState {
                listeners: ListenerList::default(),
                torn_down: false,
            }),
            dropped: Arc::new(AtomicU64::new(0)),
        })
    }

    /// The channel this bus is bound to.
    #[must_use]
    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    /// Origin stamped on outbound messages.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Whether inbound messages are origin-checked.
    #[must_use]
    pub fn is_origin_enforcing(&self) -> bool {
        self.merchant_url.is_some()
    }

    /// Whether `teardown` has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.state.lock().torn_down
    }

    /// Number of live registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }

    /// Messages withheld from handlers because of their origin.
    #[must_use]
    pub fn dropped_messages(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Listen for `event` on this channel. Ignored after teardown.
    pub fn on(&self, event: &str, handler: Handler) {
        let mut state = self.state.lock();
        if state.torn_down {
            return;
        }

        let key = namespaced_key(&self.channel, event);
        let wrapped = self.wrap(&key, &handler);

        self.dispatcher.subscribe(&key, wrapped.clone());
        state.listeners.push(ListenerRecord {
            event: event.to_string(),
            wrapped,
            original: handler,
        });
    }

    /// Stop the most recent `on(event, handler)` registration. Ignored after
    /// teardown or when no such registration exists.
    pub fn off(&self, event: &str, handler: &Handler) {
        let mut state = self.state.lock();
        if state.torn_down {
            return;
        }

        let Some(record) = state.listeners.take_latest(event, handler) else {
            return;
        };
        let key = namespaced_key(&self.channel, event);
        self.dispatcher.unsubscribe(&key, &record.wrapped);
    }

    /// Publish `event` on this channel. Ignored after teardown.
    pub fn emit(&self, event: &str, payload: Value) {
        if self.is_torn_down() {
            return;
        }
        let key = namespaced_key(&self.channel, event);
        self.dispatcher
            .publish(&key, Message::new(self.origin.clone(), payload));
    }

    /// Publish `event` with a reply slot and return the pending reply.
    ///
    /// After teardown nothing is published and the reply resolves to
    /// `ReplyError::Closed`.
    pub fn request(&self, event: &str, payload: Value) -> PendingReply {
        if self.is_torn_down() {
            return PendingReply::closed();
        }
        let key = namespaced_key(&self.channel, event);
        let (slot, receiver) = ReplySlot::channel();
        self.dispatcher.publish(
            &key,
            Message::new(self.origin.clone(), payload).with_reply(slot),
        );
        PendingReply::new(receiver)
    }

    /// Unsubscribe every registration once and disable the bus.
    ///
    /// Safe to call any number of times.
    pub fn teardown(&self) {
        let records = {
            let mut state = self.state.lock();
            if state.torn_down {
                return;
            }
            state.torn_down = true;
            state.listeners.drain()
        };

        let count = records.len();
        for record in records {
            let key = namespaced_key(&self.channel, &record.event);
            self.dispatcher.unsubscribe(&key, &record.wrapped);
        }
        debug!(channel = %self.channel, listeners = count, "Bus torn down");
    }

    fn wrap(&self, key: &str, handler: &Handler) -> Handler {
        let Some(merchant_url) = self.merchant_url.clone() else {
            return handler.clone();
        };

        let original = handler.clone();
        let dropped = self.dropped.clone();
        let key = key.to_string();
        Arc::new(move |message: &Message| {
            if OriginValidator::is_trusted(message.origin(), &merchant_url) {
                original(message);
            } else {
                dropped.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, origin = message.origin(), "Dropped message from untrusted origin");
            }
        })
    }
}

impl Drop for Bus {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("channel", &self.channel)
            .field("origin", &self.origin)
            .field("origin_enforcing", &self.is_origin_enforcing())
            .finish_non_exhaustive()
    }
}
