//! Service Layer
//!
//! Two `ObjectLocator` strategies:
//! - `FrameScanLocator`: reads sibling frames directly, returns live objects
//! - `BusLocator`: asks the owning frame over its channel, returns snapshots

pub mod bus_locator;
pub mod frame_scan;

pub use bus_locator::{answer_lookups, BusLocator};
pub use frame_scan::FrameScanLocator;
