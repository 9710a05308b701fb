//! Domain Layer
//!
//! - `LocatorTarget`: the URL and global property a lookup matches on
//! - `LocatedObject`: what a lookup returns

pub mod located;
pub mod target;

pub use located::LocatedObject;
pub use target::LocatorTarget;
