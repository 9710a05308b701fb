//! Lookup targets.

use sf_01_frame_lifecycle::{FrameProfile, LifecycleConfig};
use shared_types::ChannelId;

/// A frame URL and the global property to read from the matching frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatorTarget {
    url: String,
    property: String,
    channel: Option<ChannelId>,
}

impl LocatorTarget {
    /// Target an arbitrary URL. The channel is taken from the `#fragment`
    /// when it holds a valid channel id.
    pub fn new(url: impl Into<String>, property: impl Into<String>) -> Self {
        let url = url.into();
        let channel = url
            .split_once('#')
            .and_then(|(_, fragment)| ChannelId::new(fragment).ok());
        Self {
            url,
            property: property.into(),
            channel,
        }
    }

    /// Target the frame `profile` creates for `channel` under `config`.
    pub fn for_frame(
        config: &LifecycleConfig,
        profile: &FrameProfile,
        channel: &ChannelId,
        property: impl Into<String>,
    ) -> Self {
        Self {
            url: profile.frame_src(channel, config),
            property: property.into(),
            channel: Some(channel.clone()),
        }
    }

    /// The synthesized frame URL a sibling's location must equal.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Name of the global to read.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Channel of the owning frame, if known.
    pub fn channel(&self) -> Option<&ChannelId> {
        self.channel.as_ref()
    }
}
