//! Lifecycle configuration.
//!
//! # Example
//!
//! ```ignore
//! use sf_01_frame_lifecycle::LifecycleConfig;
//! use std::time::Duration;
//!
//! let config = LifecycleConfig::new("https://assets.braintreegateway.com", "3.97.0")
//!     .with_merchant_url("https://shop.example.com/checkout")
//!     .with_handshake_timeout(Duration::from_secs(10));
//! config.validate()?;
//! ```

use serde::{Deserialize, Serialize};
use shared_bus::merchant_origin;
use std::env;
use std::time::Duration;

use crate::error::LifecycleError;

/// Settings shared by every frame a page creates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Base URL frame documents are served from, without trailing slash.
    pub assets_url: String,
    /// SDK version segment of frame URLs.
    pub sdk_version: String,
    /// Merchant page URL. When set, parent buses only deliver messages from
    /// the merchant origin and the processor domains.
    pub merchant_url: Option<String>,
    /// How long a child waits for its configuration. `None` waits forever.
    #[serde(with = "optional_millis")]
    pub handshake_timeout: Option<Duration>,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            assets_url: "https://assets.braintreegateway.com".to_string(),
            sdk_version: env!("CARGO_PKG_VERSION").to_string(),
            merchant_url: None,
            handshake_timeout: None,
        }
    }
}

impl LifecycleConfig {
    /// Configuration for frames served from `assets_url` at `sdk_version`.
    pub fn new(assets_url: impl Into<String>, sdk_version: impl Into<String>) -> Self {
        Self {
            assets_url: assets_url.into(),
            sdk_version: sdk_version.into(),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SF_ASSETS_URL`: Frame asset base URL
    /// - `SF_SDK_VERSION`: SDK version segment
    /// - `SF_MERCHANT_URL`: Merchant page URL (enables parent origin checks)
    /// - `SF_HANDSHAKE_TIMEOUT_MS`: Handshake timeout in milliseconds
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            assets_url: env::var("SF_ASSETS_URL").unwrap_or(defaults.assets_url),
            sdk_version: env::var("SF_SDK_VERSION").unwrap_or(defaults.sdk_version),
            merchant_url: env::var("SF_MERCHANT_URL").ok().filter(|v| !v.is_empty()),
            handshake_timeout: env::var("SF_HANDSHAKE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis),
        }
    }

    /// Builder-style method to enable parent origin checks
    pub fn with_merchant_url(mut self, merchant_url: impl Into<String>) -> Self {
        self.merchant_url = Some(merchant_url.into());
        self
    }

    /// Builder-style method to bound the configuration handshake
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = Some(timeout);
        self
    }

    /// Validate before any frame is created.
    pub fn validate(&self) -> Result<(), LifecycleError> {
        if merchant_origin(&self.assets_url).is_none() {
            return Err(LifecycleError::InvalidConfig(format!(
                "assets_url '{}' is not an absolute URL",
                self.assets_url
            )));
        }

        if self.assets_url.ends_with('/') {
            return Err(LifecycleError::InvalidConfig(
                "assets_url must not end with '/'".to_string(),
            ));
        }

        if self.sdk_version.is_empty() || self.sdk_version.contains(['/', '#', '?']) {
            return Err(LifecycleError::InvalidConfig(format!(
                "sdk_version '{}' is not a valid path segment",
                self.sdk_version
            )));
        }

        if self.handshake_timeout == Some(Duration::ZERO) {
            return Err(LifecycleError::InvalidConfig(
                "handshake_timeout must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Origin frames are served from.
    pub fn assets_origin(&self) -> Option<String> {
        merchant_origin(&self.assets_url)
    }
}

mod optional_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}
