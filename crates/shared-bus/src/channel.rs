//! # Channel Registry
//!
//! Allocates channel ids for the frames of one page and keeps track of which
//! ones are bound. An id that was released is retired for good: a new frame
//! always gets a fresh channel, so a stale listener can never hear it.

use crate::error::ChannelError;
use parking_lot::Mutex;
use shared_types::ChannelId;
use std::collections::HashSet;
use tracing::trace;

#[derive(Default)]
struct RegistryState {
    active: HashSet<ChannelId>,
    retired: HashSet<ChannelId>,
}

/// Channel ids in use by one context.
#[derive(Default)]
pub struct ChannelRegistry {
    state: Mutex<RegistryState>,
}

impl ChannelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a channel id that was never handed out by this registry and
    /// mark it active.
    pub fn allocate(&self) -> ChannelId {
        let mut state = self.state.lock();
        loop {
            let id = ChannelId::generate();
            if state.active.contains(&id) || state.retired.contains(&id) {
                continue;
            }
            state.active.insert(id.clone());
            trace!(channel = %id, "Channel allocated");
            return id;
        }
    }

    /// Bind an id chosen elsewhere, e.g. one read from a frame name.
    ///
    /// # Errors
    ///
    /// - `ChannelError::AlreadyActive` if the id is bound
    /// - `ChannelError::Retired` if the id was released earlier
    pub fn claim(&self, id: ChannelId) -> Result<(), ChannelError> {
        let mut state = self.state.lock();
        if state.retired.contains(&id) {
            return Err(ChannelError::Retired(id));
        }
        if state.active.contains(&id) {
            return Err(ChannelError::AlreadyActive(id));
        }
        trace!(channel = %id, "Channel claimed");
        state.active.insert(id);
        Ok(())
    }

    /// Retire an id. Returns whether it was active.
    pub fn release(&self, id: &ChannelId) -> bool {
        let mut state = self.state.lock();
        if !state.active.remove(id) {
            return false;
        }
        state.retired.insert(id.clone());
        trace!(channel = %id, "Channel retired");
        true
    }

    #[must_use]
    pub fn is_active(&self, id: &ChannelId) -> bool {
        self.state.lock().active.contains(id)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.state.lock().active.len()
    }
}
