//! Frame names.
//!
//! The parent tells a frame its channel through the frame's name:
//!
//! ```text
//! <prefix>_<channel>[?noise]     e.g. braintree-hosted-field_4f1c...
//! <channel>[?noise]              e.g. 4f1c...?v=3.97.0
//! ```
//!
//! Channel ids never contain `_` or `?`, so the channel is whatever follows
//! the last `_` once the `?` suffix is stripped.

use shared_types::ChannelId;
use std::fmt;

use crate::error::LifecycleError;

/// A parsed or to-be-encoded frame name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameName {
    prefix: Option<String>,
    channel: ChannelId,
    suffix: Option<String>,
}

impl FrameName {
    /// Name for `channel` with an optional integration prefix.
    pub fn new(prefix: Option<&str>, channel: ChannelId) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
            channel,
            suffix: None,
        }
    }

    /// Append `?<noise>` to the encoded name.
    pub fn with_suffix(mut self, noise: impl Into<String>) -> Self {
        self.suffix = Some(noise.into());
        self
    }

    /// Parse a frame name.
    pub fn parse(name: &str) -> Result<Self, LifecycleError> {
        let (base, suffix) = match name.split_once('?') {
            Some((base, noise)) => (base, Some(noise.to_string())),
            None => (name, None),
        };

        let (prefix, channel) = match base.rsplit_once('_') {
            Some((prefix, channel)) => (Some(prefix), channel),
            None => (None, base),
        };

        let channel =
            ChannelId::new(channel).map_err(|source| LifecycleError::InvalidFrameName {
                name: name.to_string(),
                source,
            })?;

        Ok(Self {
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
            channel,
            suffix,
        })
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    pub fn into_channel(self) -> ChannelId {
        self.channel
    }

    /// The noise after `?`, if any.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// The name attribute to put on the frame element.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FrameName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}_")?;
        }
        write!(f, "{}", self.channel)?;
        if let Some(noise) = &self.suffix {
            write!(f, "?{noise}")?;
        }
        Ok(())
    }
}
