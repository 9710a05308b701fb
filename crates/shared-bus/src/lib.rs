//! # Shared Bus - Channel-Scoped Messaging Between Frames
//!
//! A parent component and the frame it owns share nothing but a message
//! channel. This crate provides that channel.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────┐                          ┌──────────────┐
//! │ Parent Bus   │  emit("EVENT")           │ Child Bus    │
//! │ channel = c  │ ──────┐          ┌────── │ channel = c  │
//! └──────────────┘       │          │       └──────────────┘
//!                        ▼          ▼
//!              "braintree:c:EVENT"  (namespaced key)
//!                  ┌──────────────────────┐
//!                  │  MessageDispatcher   │  page-wide, shared by
//!                  │  (injectable)        │  every bus on the page
//!                  └──────────────────────┘
//! ```
//!
//! ## Security
//!
//! - **Isolation by key**: the channel is part of every key, so buses on
//!   different channels never see each other's events.
//! - **Origin enforcement**: a bus built with a merchant URL only delivers
//!   messages whose sender origin passes `OriginValidator`; anything else is
//!   dropped silently.
//! - **Teardown**: a torn-down bus unsubscribes everything once and then
//!   ignores every call.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod bus;
pub mod channel;
pub mod dispatcher;
pub mod error;
pub mod listeners;
pub mod message;
pub mod namespace;
pub mod origin;

// Re-export main types
pub use bus::{Bus, BusOptions, OPAQUE_ORIGIN};
pub use channel::ChannelRegistry;
pub use dispatcher::{DispatchStats, InMemoryDispatcher, MessageDispatcher};
pub use error::{BusError, ChannelError, ReplyError};
pub use message::{handler, Handler, Message, PendingReply, ReplySlot};
pub use namespace::{namespaced_key, NamespacedEvent};
pub use origin::{is_processor_origin, merchant_origin, OriginValidator};
