//! `InMemoryPage` as seen from inside one of its frames.
//!
//! Adapts the page to the locator's `SiblingFrames` port. Reads are made
//! with the origin of the frame doing the scan, so the page's same-origin
//! rule decides what is visible.

use sf_01_frame_lifecycle::{FrameContext, FrameElementId, HostError, InMemoryPage, LiveObject};
use sf_02_object_locator::{FrameAccessError, SiblingFrame, SiblingFrames};
use std::sync::{Arc, Weak};

/// Builds the sibling view of the frame a context belongs to.
pub type SiblingsFactory = Arc<dyn Fn(&FrameContext) -> Arc<dyn SiblingFrames> + Send + Sync>;

/// Sibling view over an `InMemoryPage`.
pub fn page_siblings(page: &Arc<InMemoryPage>) -> SiblingsFactory {
    let page = Arc::downgrade(page);
    Arc::new(move |context: &FrameContext| {
        Arc::new(PageSiblings {
            page: page.clone(),
            accessor: context.origin.clone(),
            own: Some(context.element),
        }) as Arc<dyn SiblingFrames>
    })
}

/// The attached frames of a page other than the caller's own.
pub struct PageSiblings {
    page: Weak<InMemoryPage>,
    accessor: String,
    own: Option<FrameElementId>,
}

impl PageSiblings {
    /// Siblings seen from a context with origin `accessor` that is not itself a frame.
    pub fn new(page: &Arc<InMemoryPage>, accessor: impl Into<String>) -> Self {
        Self {
            page: Arc::downgrade(page),
            accessor: accessor.into(),
            own: None,
        }
    }
}

impl SiblingFrames for PageSiblings {
    fn siblings(&self) -> Vec<Box<dyn SiblingFrame>> {
        let Some(page) = self.page.upgrade() else {
            return Vec::new();
        };
        page.attached_frames()
            .into_iter()
            .filter(|id| Some(*id) != self.own)
            .map(|id| {
                Box::new(PageFrame {
                    page: page.clone(),
                    id,
                    accessor: self.accessor.clone(),
                }) as Box<dyn SiblingFrame>
            })
            .collect()
    }
}

struct PageFrame {
    page: Arc<InMemoryPage>,
    id: FrameElementId,
    accessor: String,
}

impl PageFrame {
    fn map_error(&self, err: HostError) -> FrameAccessError {
        match err {
            HostError::CrossOrigin { .. } => FrameAccessError::CrossOriginAccess {
                frame: self.id.to_string(),
            },
            _ => FrameAccessError::Detached {
                frame: self.id.to_string(),
            },
        }
    }
}

impl SiblingFrame for PageFrame {
    fn label(&self) -> String {
        self.id.to_string()
    }

    fn location(&self) -> Result<String, FrameAccessError> {
        self.page
            .read_location(self.id, &self.accessor)
            .map_err(|e| self.map_error(e))
    }

    fn property(&self, name: &str) -> Result<Option<LiveObject>, FrameAccessError> {
        self.page
            .read_global(self.id, name, &self.accessor)
            .map_err(|e| self.map_error(e))
    }
}
