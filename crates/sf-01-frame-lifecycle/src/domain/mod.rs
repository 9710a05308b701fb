//! Domain Layer - Pure lifecycle logic
//!
//! This layer contains:
//! - Frame name encoding and parsing
//! - Per-integration frame profiles
//! - The child-side configuration store
//! - The parent-side frame record
//!
//! RULES:
//! - No host or dispatcher calls
//! - No async code

pub mod config_store;
pub mod frame_name;
pub mod frame_profile;
pub mod frame_record;

pub use config_store::ConfigurationStore;
pub use frame_name::FrameName;
pub use frame_profile::{FrameProfile, NameSuffix};
pub use frame_record::{mark_ready, state_channel, FrameRecord, FrameState, StateSender};
