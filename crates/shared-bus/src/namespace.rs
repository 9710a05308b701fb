//! # Event Namespacing
//!
//! Every bus key is `"<realm>:<channel>:<event>"`. Channel isolation is a
//! property of this key space: two buses on different channels never share
//! a key, so there is nothing to filter after delivery.

use shared_types::events::REALM;
use shared_types::ChannelId;
use std::fmt;

/// An event name scoped to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespacedEvent {
    channel: ChannelId,
    event: String,
}

impl NamespacedEvent {
    /// Scope `event` to `channel`.
    #[must_use]
    pub fn new(channel: &ChannelId, event: impl Into<String>) -> Self {
        Self {
            channel: channel.clone(),
            event: event.into(),
        }
    }

    /// The channel part.
    #[must_use]
    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    /// The event part.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The flattened dispatcher key.
    #[must_use]
    pub fn key(&self) -> String {
        namespaced_key(&self.channel, &self.event)
    }
}

impl fmt::Display for NamespacedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Flatten `(realm, channel, event)` into a dispatcher key.
#[must_use]
pub fn namespaced_key(channel: &ChannelId, event: &str) -> String {
    [REALM, channel.as_str(), event].join(":")
}
