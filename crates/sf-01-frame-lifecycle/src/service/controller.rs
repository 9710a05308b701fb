//! Parent-side frame lifecycle.
//!
//! ```text
//! allocate channel ─► parent bus ─► CONFIGURATION_REQUEST + ready handlers
//!                                        │
//!        record ◄─ create element ◄──────┘
//!          │
//!          └─► attach (frame starts loading)
//! ```

use frame_telemetry::{log_frame_event, FRAMES_ACTIVE, FRAMES_CREATED, FRAMES_TORN_DOWN};
use parking_lot::Mutex;
use shared_bus::{handler, Bus, BusOptions, ChannelRegistry, MessageDispatcher};
use shared_types::events::CONFIGURATION_REQUEST;
use shared_types::ChannelId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::LifecycleConfig;
use crate::domain::{mark_ready, state_channel, FrameRecord, FrameState};
use crate::error::LifecycleError;
use crate::ports::{CreateFrame, FrameElementId, FrameHost, FrameLifecycleApi, FrameSpec};

const COMPONENT: &str = "frame-lifecycle";

/// Parent's view of one created frame.
#[derive(Clone)]
pub struct FrameHandle {
    record: Arc<FrameRecord>,
}

impl FrameHandle {
    pub fn channel(&self) -> &ChannelId {
        self.record.channel()
    }

    pub fn element(&self) -> FrameElementId {
        self.record.element()
    }

    /// The parent bus of the frame's channel.
    pub fn bus(&self) -> &Arc<Bus> {
        self.record.bus()
    }

    pub fn integration(&self) -> &'static str {
        self.record.profile().integration
    }

    pub fn state(&self) -> FrameState {
        self.record.state()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == FrameState::Ready
    }

    /// Wait until the child announced readiness.
    ///
    /// # Errors
    ///
    /// - `LifecycleError::TornDown` if the frame is or gets torn down first
    /// - `LifecycleError::NotReady` if `timeout` elapsed first
    pub async fn wait_ready(&self, timeout: Option<Duration>) -> Result<(), LifecycleError> {
        let mut state = self.record.subscribe();
        let settled = state.wait_for(|s| *s != FrameState::Loading);

        let outcome = match timeout {
            Some(after) => tokio::time::timeout(after, settled)
                .await
                .map_err(|_| LifecycleError::NotReady { after })?
                .map(|s| *s),
            None => settled.await.map(|s| *s),
        };

        match outcome {
            Ok(FrameState::Ready) => Ok(()),
            _ => Err(LifecycleError::TornDown),
        }
    }
}

impl std::fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameHandle")
            .field("integration", &self.integration())
            .field("channel", self.channel())
            .field("element", &self.element())
            .field("state", &self.state())
            .finish()
    }
}

/// Creates, tracks and tears down the frames of one page.
pub struct FrameLifecycleController {
    config: LifecycleConfig,
    host: Arc<dyn FrameHost>,
    dispatcher: Arc<dyn MessageDispatcher>,
    channels: Arc<ChannelRegistry>,
    frames: Mutex<HashMap<ChannelId, Arc<FrameRecord>>>,
}

impl FrameLifecycleController {
    /// # Errors
    ///
    /// `LifecycleError::InvalidConfig` if `config` does not validate.
    pub fn new(
        config: LifecycleConfig,
        host: Arc<dyn FrameHost>,
        dispatcher: Arc<dyn MessageDispatcher>,
    ) -> Result<Self, LifecycleError> {
        config.validate()?;
        Ok(Self {
            config,
            host,
            dispatcher,
            channels: Arc::new(ChannelRegistry::new()),
            frames: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<dyn MessageDispatcher> {
        &self.dispatcher
    }

    /// Registry the controller allocates channels from.
    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    fn parent_bus(&self, channel: &ChannelId) -> Result<Bus, LifecycleError> {
        let mut options = BusOptions::new(channel.as_str()).with_origin(self.host.origin());
        if let Some(merchant_url) = &self.config.merchant_url {
            options = options.with_merchant_url(merchant_url.clone());
        }
        Ok(Bus::new(self.dispatcher.clone(), options)?)
    }

    fn release(&self, record: &FrameRecord) -> bool {
        if !record.mark_torn_down() {
            return false;
        }
        if let Err(e) = self.host.remove(record.element()) {
            warn!(
                channel = %record.channel(),
                element = %record.element(),
                error = %e,
                "Failed to remove frame element"
            );
        }
        record.bus().teardown();
        self.channels.release(record.channel());
        true
    }
}

impl FrameLifecycleApi for FrameLifecycleController {
    fn create(&self, request: CreateFrame) -> Result<FrameHandle, LifecycleError> {
        let CreateFrame {
            profile,
            client,
            listeners,
        } = request;

        let channel = self.channels.allocate();
        let bus = match self.parent_bus(&channel) {
            Ok(bus) => Arc::new(bus),
            Err(e) => {
                self.channels.release(&channel);
                return Err(e);
            }
        };

        bus.on(
            CONFIGURATION_REQUEST,
            handler(move |message| {
                message.reply(client.get_configuration().into_value());
            }),
        );

        let state = state_channel();
        let ready_state = state.clone();
        let ready_channel = channel.clone();
        bus.on(
            profile.ready_event,
            handler(move |_| {
                if mark_ready(&ready_state) {
                    debug!(channel = %ready_channel, "Frame ready");
                }
            }),
        );

        for (event, listener) in listeners {
            bus.on(&event, listener);
        }

        let spec = FrameSpec {
            name: profile.frame_name(&channel, &self.config).encode(),
            src: profile.frame_src(&channel, &self.config),
        };
        let element = match self.host.create_frame(spec) {
            Ok(element) => element,
            Err(e) => {
                bus.teardown();
                self.channels.release(&channel);
                return Err(e.into());
            }
        };

        let record = Arc::new(FrameRecord::new(profile, element, bus, state));
        self.frames.lock().insert(channel.clone(), record.clone());

        if let Err(e) = self.host.attach(element) {
            self.frames.lock().remove(&channel);
            self.release(&record);
            log_frame_event!(warn, COMPONENT, "Frame attach failed", channel, error = %e);
            return Err(e.into());
        }

        FRAMES_CREATED.with_label_values(&[profile.integration]).inc();
        FRAMES_ACTIVE.inc();
        log_frame_event!(
            info,
            COMPONENT,
            "Frame created",
            channel,
            integration = profile.integration,
            element = %element
        );

        Ok(FrameHandle { record })
    }

    fn teardown(&self, handle: &FrameHandle) {
        let tracked = self.frames.lock().remove(handle.channel()).is_some();
        if self.release(&handle.record) && tracked {
            FRAMES_TORN_DOWN
                .with_label_values(&[handle.integration()])
                .inc();
            FRAMES_ACTIVE.dec();
            log_frame_event!(info, COMPONENT, "Frame torn down", handle.channel());
        }
    }

    fn teardown_all(&self) {
        let records: Vec<_> = self.frames.lock().drain().map(|(_, r)| r).collect();
        for record in records {
            let integration = record.profile().integration;
            if self.release(&record) {
                FRAMES_TORN_DOWN.with_label_values(&[integration]).inc();
                FRAMES_ACTIVE.dec();
            }
        }
    }

    fn active_frames(&self) -> usize {
        self.frames.lock().len()
    }
}

impl Drop for FrameLifecycleController {
    fn drop(&mut self) {
        self.teardown_all();
    }
}
