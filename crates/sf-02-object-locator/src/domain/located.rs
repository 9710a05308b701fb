//! Lookup results.

use serde_json::Value;
use sf_01_frame_lifecycle::LiveObject;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An object found in a sibling frame.
#[derive(Clone)]
pub enum LocatedObject {
    /// The live object itself, shared with the owning frame.
    Live(LiveObject),
    /// A serialized snapshot sent by the owning frame.
    Snapshot(Value),
}

impl LocatedObject {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// The live object as `T`, if it is live and of that type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Self::Live(object) => object.clone().downcast::<T>().ok(),
            Self::Snapshot(_) => None,
        }
    }

    pub fn snapshot(&self) -> Option<&Value> {
        match self {
            Self::Snapshot(value) => Some(value),
            Self::Live(_) => None,
        }
    }
}

impl fmt::Debug for LocatedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live(_) => f.write_str("Live(..)"),
            Self::Snapshot(value) => f.debug_tuple("Snapshot").field(value).finish(),
        }
    }
}
