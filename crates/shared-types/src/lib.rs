//! # Shared Types Crate
//!
//! Types shared by every frame component: channel identifiers, the
//! configuration value handed from parent to child, the well-known event
//! names, and the gateway client interface consumed from the surrounding SDK.
//!
//! ## Design Principles
//!
//! - **Channel ids are opaque**: a `ChannelId` is never parsed for meaning,
//!   only compared, embedded in frame names and used in bus keys.
//! - **Configuration is a value**: `Configuration` wraps a JSON value, so
//!   every clone is structural and never aliases the owner's copy.

pub mod client;
pub mod entities;
pub mod errors;
pub mod events;

pub use client::{GatewayClient, GatewayRequest, StaticGatewayClient};
pub use entities::{ChannelId, Configuration};
pub use errors::*;
