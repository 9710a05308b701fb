//! Sibling frame scan.
//!
//! Walks the sibling frames in order and returns the global `property` of
//! the first one whose location equals the target URL. Frames of another
//! origin throw on access, and frames torn down mid-scan are gone; both
//! are skipped and the scan moves on to the next sibling.

use async_trait::async_trait;
use frame_telemetry::{LOCATOR_CROSS_ORIGIN_SKIPS, LOCATOR_DETACHED_SKIPS, LOCATOR_LOOKUPS};
use sf_01_frame_lifecycle::LiveObject;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::domain::{LocatedObject, LocatorTarget};
use crate::error::{FrameAccessError, LocatorError};
use crate::ports::{ObjectLocator, SiblingFrames};

const STRATEGY: &str = "frame_scan";

/// Locator that reads sibling frames directly.
#[derive(Clone)]
pub struct FrameScanLocator {
    frames: Arc<dyn SiblingFrames>,
}

impl FrameScanLocator {
    pub fn new(frames: Arc<dyn SiblingFrames>) -> Self {
        Self { frames }
    }

    /// Scan synchronously. `None` when no reachable sibling matched.
    pub fn scan(&self, target: &LocatorTarget) -> Option<LiveObject> {
        let found = self.scan_siblings(target);
        let outcome = if found.is_some() { "found" } else { "not_found" };
        LOCATOR_LOOKUPS.with_label_values(&[STRATEGY, outcome]).inc();
        debug!(url = target.url(), property = target.property(), outcome, "Frame scan finished");
        found
    }

    fn scan_siblings(&self, target: &LocatorTarget) -> Option<LiveObject> {
        for frame in self.frames.siblings() {
            let label = frame.label();
            let Some(location) = skip_unreachable(&label, frame.location()) else {
                continue;
            };
            if location != target.url() {
                continue;
            }

            if let Some(Some(object)) = skip_unreachable(&label, frame.property(target.property())) {
                return Some(object);
            }
        }
        None
    }
}

/// `None` for a sibling that cannot be read: another origin, or gone.
fn skip_unreachable<T>(frame: &str, result: Result<T, FrameAccessError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(FrameAccessError::CrossOriginAccess { .. }) => {
            LOCATOR_CROSS_ORIGIN_SKIPS.with_label_values(&[STRATEGY]).inc();
            trace!(frame, "Skipped cross-origin frame");
            None
        }
        Err(FrameAccessError::Detached { .. }) => {
            LOCATOR_DETACHED_SKIPS.with_label_values(&[STRATEGY]).inc();
            trace!(frame, "Skipped detached frame");
            None
        }
    }
}

#[async_trait]
impl ObjectLocator for FrameScanLocator {
    async fn locate(&self, target: &LocatorTarget) -> Result<Option<LocatedObject>, LocatorError> {
        Ok(self.scan(target).map(LocatedObject::Live))
    }

    fn strategy(&self) -> &'static str {
        STRATEGY
    }
}
