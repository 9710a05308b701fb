//! Parent-side frame record.
//!
//! A record ties a frame element to the bus of its channel and tracks where
//! the frame is in its life. The state moves `Loading -> Ready -> TornDown`
//! or `Loading -> TornDown`, never backwards.

use shared_bus::Bus;
use shared_types::ChannelId;
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::FrameProfile;
use crate::ports::FrameElementId;

/// Where a frame is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    Loading,
    Ready,
    TornDown,
}

/// Shared sender of a record's state. The readiness handler holds a clone
/// before the record exists.
pub type StateSender = Arc<watch::Sender<FrameState>>;

/// Create a state sender starting at `Loading`.
pub fn state_channel() -> StateSender {
    let (tx, _rx) = watch::channel(FrameState::Loading);
    Arc::new(tx)
}

/// Move `Loading -> Ready`. Returns whether the state changed.
pub fn mark_ready(state: &StateSender) -> bool {
    state.send_if_modified(|current| {
        if *current == FrameState::Loading {
            *current = FrameState::Ready;
            true
        } else {
            false
        }
    })
}

/// `{element, bus, ready}` for one created frame.
pub struct FrameRecord {
    profile: FrameProfile,
    channel: ChannelId,
    element: FrameElementId,
    bus: Arc<Bus>,
    state: StateSender,
}

impl FrameRecord {
    pub fn new(
        profile: FrameProfile,
        element: FrameElementId,
        bus: Arc<Bus>,
        state: StateSender,
    ) -> Self {
        Self {
            profile,
            channel: bus.channel().clone(),
            element,
            bus,
            state,
        }
    }

    pub fn profile(&self) -> &FrameProfile {
        &self.profile
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    pub fn element(&self) -> FrameElementId {
        self.element
    }

    pub fn bus(&self) -> &Arc<Bus> {
        &self.bus
    }

    pub fn state(&self) -> FrameState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<FrameState> {
        self.state.subscribe()
    }

    /// Move to `TornDown`. Returns `false` if it already was.
    pub fn mark_torn_down(&self) -> bool {
        self.state.send_if_modified(|current| {
            if *current == FrameState::TornDown {
                false
            } else {
                *current = FrameState::TornDown;
                true
            }
        })
    }
}
