//! Frame profiles.
//!
//! Each integration differs from the others only in how its frame is named,
//! which document it loads and which event announces readiness.

use shared_types::ChannelId;

use crate::config::LifecycleConfig;
use crate::domain::FrameName;

/// Noise appended to a frame name after `?`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameSuffix {
    None,
    /// `?v=<sdk_version>`
    SdkVersion,
}

/// How one integration names, sources and readies its frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameProfile {
    /// Integration label used in logs and metrics.
    pub integration: &'static str,
    /// Frame name prefix, if the integration uses one.
    pub name_prefix: Option<&'static str>,
    /// HTML document the frame loads.
    pub document: &'static str,
    /// Event the child emits once configured.
    pub ready_event: &'static str,
    pub name_suffix: NameSuffix,
}

impl FrameProfile {
    /// The name of the frame bound to `channel`.
    pub fn frame_name(&self, channel: &ChannelId, config: &LifecycleConfig) -> FrameName {
        let name = FrameName::new(self.name_prefix, channel.clone());
        match self.name_suffix {
            NameSuffix::None => name,
            NameSuffix::SdkVersion => name.with_suffix(format!("v={}", config.sdk_version)),
        }
    }

    /// `<assets_url>/web/<sdk_version>/html/<document>#<channel>`
    pub fn frame_src(&self, channel: &ChannelId, config: &LifecycleConfig) -> String {
        format!("{}#{channel}", self.document_url(config))
    }

    /// The document URL without the channel fragment.
    pub fn document_url(&self, config: &LifecycleConfig) -> String {
        format!(
            "{}/web/{}/html/{}",
            config.assets_url, config.sdk_version, self.document
        )
    }
}
