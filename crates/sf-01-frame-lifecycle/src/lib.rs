//! # SF-01 Frame Lifecycle
//!
//! Creates an isolated child frame bound to a fresh channel, drives the
//! configuration handshake between parent and child, tracks readiness and
//! tears everything down again.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure lifecycle logic
//!   - `FrameName`: channel encoding in frame names
//!   - `FrameProfile`: per-integration naming, document and readiness event
//!   - `ConfigurationStore`: child-side, clone-on-read configuration
//!   - `FrameRecord`: parent-side `{element, bus, state}`
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `FrameLifecycleApi`: Driving port (inbound API)
//!   - `FrameHost`: Driven port (the page)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `FrameLifecycleController`: Implements `FrameLifecycleApi`
//!   - `FrameBootstrap`: the child side of the handshake
//!
//! - **Adapters Layer** (`adapters/`): In-process implementations
//!   - `InMemoryPage`: a `FrameHost` that runs frame loaders on attach
//!
//! ## Handshake
//!
//! ```text
//! Parent                                   Child
//!   │ on(CONFIGURATION_REQUEST)              │
//!   │ on(<ready event>)                      │
//!   │ attach ──────────── loads ───────────► │ parse channel from name
//!   │                                        │ request(CONFIGURATION_REQUEST)
//!   │ ◄──────────────────────────────────────│
//!   │ reply(client configuration) ──────────►│ store
//!   │                                        │ register handlers
//!   │ ◄──────────── <ready event> ───────────│
//!   │ Ready                                  │
//! ```
//!
//! ## Invariants
//!
//! - Parent handlers are registered before the frame is attached
//! - The child only ever holds a structural clone of the configuration
//! - Teardown removes the element, tears down the bus and retires the channel

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{FrameLoader, InMemoryPage};
pub use config::LifecycleConfig;
pub use domain::{ConfigurationStore, FrameName, FrameProfile, FrameState, NameSuffix};
pub use error::{HandshakeError, HostError, LifecycleError};
pub use ports::{
    CreateFrame, FrameElementId, FrameGlobals, FrameHost, FrameLifecycleApi, FrameSpec, LiveObject,
};
pub use service::{BootstrappedFrame, FrameBootstrap, FrameContext, FrameHandle, FrameLifecycleController};
