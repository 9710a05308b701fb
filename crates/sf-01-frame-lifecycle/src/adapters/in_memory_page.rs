//! In-process page.
//!
//! Stands in for a browser page: it owns frame elements, "navigates" them on
//! attach by calling the loader registered for their document, and applies
//! the same-origin rule when one frame reads another's location or globals.

use parking_lot::{Mutex, RwLock};
use shared_bus::{merchant_origin, OPAQUE_ORIGIN};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::HostError;
use crate::ports::{FrameElementId, FrameGlobals, FrameHost, FrameSpec, LiveObject};
use crate::service::FrameContext;

/// Code run when a frame for a given document is attached.
pub type FrameLoader = Arc<dyn Fn(FrameContext) + Send + Sync>;

struct FrameEntry {
    spec: FrameSpec,
    origin: String,
    attached: bool,
    globals: FrameGlobals,
}

/// A page that hosts frames in-process.
pub struct InMemoryPage {
    url: String,
    origin: String,
    frames: RwLock<BTreeMap<FrameElementId, FrameEntry>>,
    loaders: RwLock<HashMap<String, FrameLoader>>,
    rejected_attach: Mutex<Option<String>>,
    next_id: AtomicU64,
}

impl InMemoryPage {
    /// A page loaded from `url`.
    pub fn new(url: impl Into<String>) -> Arc<Self> {
        let url = url.into();
        let origin = merchant_origin(&url).unwrap_or_else(|| OPAQUE_ORIGIN.to_string());
        Arc::new(Self {
            url,
            origin,
            frames: RwLock::new(BTreeMap::new()),
            loaders: RwLock::new(HashMap::new()),
            rejected_attach: Mutex::new(None),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run `loader` whenever a frame whose URL path ends in `document` is
    /// attached. Replaces any loader registered for the same document.
    pub fn register_loader(&self, document: &str, loader: FrameLoader) {
        self.loaders.write().insert(document.to_string(), loader);
    }

    /// Make the next `attach` fail with `reason`.
    pub fn reject_attach(&self, reason: impl Into<String>) {
        *self.rejected_attach.lock() = Some(reason.into());
    }

    /// Attached frames in creation order.
    pub fn attached_frames(&self) -> Vec<FrameElementId> {
        self.frames
            .read()
            .iter()
            .filter(|(_, entry)| entry.attached)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of elements, attached or not.
    pub fn frame_count(&self) -> usize {
        self.frames.read().len()
    }

    pub fn contains(&self, id: FrameElementId) -> bool {
        self.frames.read().contains_key(&id)
    }

    pub fn is_attached(&self, id: FrameElementId) -> bool {
        self.frames.read().get(&id).is_some_and(|e| e.attached)
    }

    pub fn frame_name(&self, id: FrameElementId) -> Option<String> {
        self.frames.read().get(&id).map(|e| e.spec.name.clone())
    }

    pub fn frame_src(&self, id: FrameElementId) -> Option<String> {
        self.frames.read().get(&id).map(|e| e.spec.src.clone())
    }

    /// The frame's own globals, as seen from inside the frame.
    pub fn frame_globals(&self, id: FrameElementId) -> Option<FrameGlobals> {
        self.frames.read().get(&id).map(|e| e.globals.clone())
    }

    /// Read a frame's location from a context with origin `accessor`.
    pub fn read_location(&self, id: FrameElementId, accessor: &str) -> Result<String, HostError> {
        let frames = self.frames.read();
        let entry = Self::accessible(&frames, id, accessor)?;
        Ok(entry.spec.src.clone())
    }

    /// Read a global of a frame from a context with origin `accessor`.
    pub fn read_global(
        &self,
        id: FrameElementId,
        name: &str,
        accessor: &str,
    ) -> Result<Option<LiveObject>, HostError> {
        let frames = self.frames.read();
        let entry = Self::accessible(&frames, id, accessor)?;
        Ok(entry.globals.get(name))
    }

    fn accessible<'a>(
        frames: &'a BTreeMap<FrameElementId, FrameEntry>,
        id: FrameElementId,
        accessor: &str,
    ) -> Result<&'a FrameEntry, HostError> {
        let entry = frames.get(&id).ok_or(HostError::UnknownFrame(id))?;
        if entry.origin == OPAQUE_ORIGIN || entry.origin != accessor {
            return Err(HostError::CrossOrigin {
                id,
                accessor: accessor.to_string(),
                frame_origin: entry.origin.clone(),
            });
        }
        Ok(entry)
    }

    fn loader_for(&self, src: &str) -> Option<FrameLoader> {
        let path = src.split(['#', '?']).next().unwrap_or_default();
        self.loaders
            .read()
            .iter()
            .find(|(document, _)| path.ends_with(&format!("/{document}")))
            .map(|(_, loader)| loader.clone())
    }
}

impl FrameHost for InMemoryPage {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn create_frame(&self, spec: FrameSpec) -> Result<FrameElementId, HostError> {
        let id = FrameElementId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let origin = merchant_origin(&spec.src).unwrap_or_else(|| OPAQUE_ORIGIN.to_string());
        trace!(element = %id, name = %spec.name, "Frame element created");

        self.frames.write().insert(
            id,
            FrameEntry {
                spec,
                origin,
                attached: false,
                globals: FrameGlobals::new(),
            },
        );
        Ok(id)
    }

    fn attach(&self, id: FrameElementId) -> Result<(), HostError> {
        if let Some(reason) = self.rejected_attach.lock().take() {
            return Err(HostError::AttachRejected { id, reason });
        }

        let context = {
            let mut frames = self.frames.write();
            let entry = frames.get_mut(&id).ok_or(HostError::UnknownFrame(id))?;
            if entry.attached {
                return Err(HostError::AlreadyAttached(id));
            }
            entry.attached = true;

            FrameContext {
                element: id,
                name: entry.spec.name.clone(),
                location: entry.spec.src.clone(),
                origin: entry.origin.clone(),
                parent_url: Some(self.url.clone()),
                globals: entry.globals.clone(),
            }
        };

        // Loaders may call back into the page.
        match self.loader_for(&context.location) {
            Some(loader) => {
                debug!(element = %id, location = %context.location, "Loading frame");
                loader(context);
            }
            None => trace!(element = %id, "No loader for frame document"),
        }
        Ok(())
    }

    fn remove(&self, id: FrameElementId) -> Result<(), HostError> {
        self.frames
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(HostError::UnknownFrame(id))
    }
}
