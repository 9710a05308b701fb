//! Inbound Ports (Driving Ports)
//!
//! The API parent components use to own frames.

use shared_bus::Handler;
use shared_types::GatewayClient;
use std::sync::Arc;

use crate::domain::FrameProfile;
use crate::error::LifecycleError;
use crate::service::FrameHandle;

/// Everything needed to create one frame.
#[derive(Clone)]
pub struct CreateFrame {
    pub profile: FrameProfile,
    /// Source of the configuration handed to the child, read on every
    /// request.
    pub client: Arc<dyn GatewayClient>,
    /// Extra parent listeners, registered before the frame is attached.
    pub listeners: Vec<(String, Handler)>,
}

impl CreateFrame {
    pub fn new(profile: FrameProfile, client: Arc<dyn GatewayClient>) -> Self {
        Self {
            profile,
            client,
            listeners: Vec::new(),
        }
    }

    /// Listen for `event` from the child from the moment the frame exists.
    pub fn listen(mut self, event: impl Into<String>, handler: Handler) -> Self {
        self.listeners.push((event.into(), handler));
        self
    }
}

/// Frame lifecycle API (Driving Port)
pub trait FrameLifecycleApi: Send + Sync {
    /// Allocate a channel, wire the parent bus and attach the frame.
    ///
    /// Handlers are registered before the frame is attached, so a frame
    /// that loads synchronously still has its request answered.
    fn create(&self, request: CreateFrame) -> Result<FrameHandle, LifecycleError>;

    /// Remove the frame, tear down its bus and retire its channel.
    ///
    /// Idempotent. Never fails; host errors are logged.
    fn teardown(&self, handle: &FrameHandle);

    /// Tear down every frame created by this API.
    fn teardown_all(&self);

    /// Number of frames created and not yet torn down.
    fn active_frames(&self) -> usize;
}
