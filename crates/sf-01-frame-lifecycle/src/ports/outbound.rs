//! Outbound Ports (Driven Ports)
//!
//! What the lifecycle needs from the page it runs in.

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::HostError;

/// A live object exposed on a frame's global scope.
pub type LiveObject = Arc<dyn Any + Send + Sync>;

/// Handle of a frame element created by a `FrameHost`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameElementId(u64);

impl FrameElementId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Attributes of a frame element to create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSpec {
    /// The `name` attribute; encodes the channel.
    pub name: String,
    /// The `src` attribute.
    pub src: String,
}

/// The page frame elements live in (Driven Port)
///
/// Creating an element does not load it; loading starts on `attach`. A
/// host may run the frame's code synchronously from inside `attach`.
pub trait FrameHost: Send + Sync {
    /// Origin of the page itself.
    fn origin(&self) -> String;

    /// Create a detached frame element.
    fn create_frame(&self, spec: FrameSpec) -> Result<FrameElementId, HostError>;

    /// Insert the element into the page, which starts loading it.
    fn attach(&self, id: FrameElementId) -> Result<(), HostError>;

    /// Remove the element from the page.
    fn remove(&self, id: FrameElementId) -> Result<(), HostError>;
}

/// The global scope of one frame.
///
/// Code running in the frame exposes objects here; same-origin siblings may
/// read them through the host.
#[derive(Clone, Default)]
pub struct FrameGlobals {
    values: Arc<RwLock<HashMap<String, LiveObject>>>,
}

impl FrameGlobals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose `value` under `name`, replacing any previous value.
    pub fn expose(&self, name: impl Into<String>, value: LiveObject) {
        self.values.write().insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<LiveObject> {
        self.values.read().get(name).cloned()
    }

    pub fn remove(&self, name: &str) -> Option<LiveObject> {
        self.values.write().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.read().contains_key(name)
    }
}

impl fmt::Debug for FrameGlobals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.values.read().keys().cloned().collect();
        names.sort();
        f.debug_struct("FrameGlobals").field("names", &names).finish()
    }
}
