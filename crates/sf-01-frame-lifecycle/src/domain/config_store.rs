//! Child-side configuration store.
//!
//! Each frame context owns one store. It is written once, by the bootstrap,
//! and every read hands out a fresh clone.

use shared_types::Configuration;
use std::sync::OnceLock;

/// Configuration delivered to a frame by its parent.
#[derive(Debug, Default)]
pub struct ConfigurationStore {
    configuration: OnceLock<Configuration>,
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the configuration. Returns `false` if one was already stored;
    /// the first one is kept.
    pub fn set(&self, configuration: Configuration) -> bool {
        self.configuration.set(configuration).is_ok()
    }

    /// A clone of the stored configuration.
    pub fn get(&self) -> Option<Configuration> {
        self.configuration.get().cloned()
    }

    pub fn is_configured(&self) -> bool {
        self.configuration.get().is_some()
    }
}
