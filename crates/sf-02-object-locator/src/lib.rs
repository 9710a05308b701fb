//! # SF-02 Object Locator
//!
//! Lets one component reach an object owned by another component's frame.
//!
//! ## Strategies
//!
//! - **Frame scan** (`FrameScanLocator`): enumerate sibling frames, compare
//!   each location with a synthesized frame URL and read a global from the
//!   first match. Frames of another origin deny access and frames torn
//!   down mid-scan are gone; both count as "not a match". Returns the live
//!   object.
//! - **Bus** (`BusLocator`): send `OBJECT_LOOKUP` on the owning frame's
//!   channel and wait for a snapshot. Works across origins.
//!
//! Both implement `ObjectLocator`, so callers can swap one for the other.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `LocatorTarget`, `LocatedObject`
//! - **Ports Layer** (`ports/`): `ObjectLocator` (inbound), `SiblingFrames` (outbound)
//! - **Service Layer** (`service/`): the two strategies
//! - **Adapters Layer** (`adapters/`): `StaticFrames`

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{StaticFrame, StaticFrames};
pub use domain::{LocatedObject, LocatorTarget};
pub use error::{FrameAccessError, LocatorError};
pub use ports::{ObjectLocator, SiblingFrame, SiblingFrames};
pub use service::{answer_lookups, BusLocator, FrameScanLocator};
