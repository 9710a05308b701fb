//! # Core Entities
//!
//! - **Channel**: `ChannelId`, the opaque id binding one parent bus to one
//!   child bus.
//! - **Configuration**: the JSON value a parent hands to its frame.

use crate::errors::{ChannelIdError, ConfigurationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// CHANNEL
// =============================================================================

/// Unique identifier of a parent/child channel.
///
/// The characters `:`, `_` and `?` are reserved: `:` separates the parts of a
/// bus key, `_` separates an integration prefix from the channel in a frame
/// name, and `?` starts the noise some integrations append to frame names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelId(String);

impl ChannelId {
    /// Characters that may not appear in a channel id.
    pub const RESERVED: [char; 3] = [':', '_', '?'];

    /// Build a channel id from an existing string.
    ///
    /// # Errors
    ///
    /// - `ChannelIdError::Empty` for an empty string
    /// - `ChannelIdError::ReservedCharacter` if a reserved character is present
    pub fn new(id: impl Into<String>) -> Result<Self, ChannelIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ChannelIdError::Empty);
        }
        if let Some(reserved) = id.chars().find(|c| Self::RESERVED.contains(c)) {
            return Err(ChannelIdError::ReservedCharacter { id, reserved });
        }
        Ok(Self(id))
    }

    /// Generate a fresh, unguessable channel id (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChannelId {
    type Err = ChannelIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChannelId {
    type Error = ChannelIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChannelId> for String {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration owned by a parent component and cloned into its frame.
///
/// Wraps a JSON value. Cloning is always structural, so a frame holding a
/// copy can never observe or cause mutation of the parent's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(Value);

impl Configuration {
    /// Wrap an existing JSON value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Build a configuration from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NotSerializable` if serde cannot
    /// represent the value as JSON.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, ConfigurationError> {
        Ok(Self(serde_json::to_value(value)?))
    }

    /// Borrow the underlying JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Mutably borrow the underlying JSON value.
    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    /// Consume into the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Look up a value by JSON pointer (e.g. `/gatewayConfiguration/assetsUrl`).
    #[must_use]
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    /// Look up a string by JSON pointer.
    #[must_use]
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.get(pointer).and_then(Value::as_str)
    }

    /// Set a top-level key, turning a non-object configuration into an object.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.0 {
            map.insert(key.into(), value.into());
        }
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl From<Value> for Configuration {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Configuration> for Value {
    fn from(config: Configuration) -> Self {
        config.0
    }
}
