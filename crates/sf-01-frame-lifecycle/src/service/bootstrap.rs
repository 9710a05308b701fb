//! Child-side bootstrap.
//!
//! Runs inside a freshly loaded frame: read the channel from the frame name,
//! bind a child bus to it, ask the parent for configuration, store it, let
//! the integration register its handlers, then announce readiness.

use frame_telemetry::{frame_span, log_frame_event, time_histogram, HANDSHAKES, HANDSHAKE_DURATION};
use serde_json::Value;
use shared_bus::{Bus, BusOptions, MessageDispatcher};
use shared_types::events::CONFIGURATION_REQUEST;
use shared_types::{ChannelId, Configuration};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

use crate::config::LifecycleConfig;
use crate::domain::{ConfigurationStore, FrameName, FrameProfile};
use crate::error::{HandshakeError, LifecycleError};
use crate::ports::{FrameElementId, FrameGlobals};

const COMPONENT: &str = "frame-bootstrap";

/// What a frame knows about itself when its code starts.
#[derive(Clone, Debug)]
pub struct FrameContext {
    pub element: FrameElementId,
    /// The frame's `name` attribute.
    pub name: String,
    /// The URL the frame loaded.
    pub location: String,
    /// Origin of `location`.
    pub origin: String,
    /// URL of the page embedding the frame.
    pub parent_url: Option<String>,
    pub globals: FrameGlobals,
}

impl FrameContext {
    /// The channel encoded in the frame name.
    pub fn channel(&self) -> Result<ChannelId, LifecycleError> {
        FrameName::parse(&self.name).map(FrameName::into_channel)
    }
}

/// A frame that completed its configuration handshake.
pub struct BootstrappedFrame {
    profile: FrameProfile,
    context: FrameContext,
    bus: Arc<Bus>,
    store: Arc<ConfigurationStore>,
}

impl BootstrappedFrame {
    pub fn channel(&self) -> &ChannelId {
        self.bus.channel()
    }

    /// The child bus.
    pub fn bus(&self) -> &Arc<Bus> {
        &self.bus
    }

    pub fn context(&self) -> &FrameContext {
        &self.context
    }

    pub fn profile(&self) -> &FrameProfile {
        &self.profile
    }

    pub fn store(&self) -> &Arc<ConfigurationStore> {
        &self.store
    }

    /// A fresh clone of the configuration received from the parent.
    pub fn configuration(&self) -> Option<Configuration> {
        self.store.get()
    }

    /// Stop listening on the child bus.
    pub fn teardown(&self) {
        self.bus.teardown();
    }
}

impl std::fmt::Debug for BootstrappedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrappedFrame")
            .field("integration", &self.profile.integration)
            .field("channel", self.channel())
            .field("element", &self.context.element)
            .finish()
    }
}

/// Runs the child side of the configuration handshake.
pub struct FrameBootstrap {
    dispatcher: Arc<dyn MessageDispatcher>,
    timeout: Option<Duration>,
}

impl FrameBootstrap {
    pub fn new(dispatcher: Arc<dyn MessageDispatcher>, config: &LifecycleConfig) -> Self {
        Self {
            dispatcher,
            timeout: config.handshake_timeout,
        }
    }

    /// Override the handshake timeout. `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bind the child bus, fetch configuration and announce readiness.
    ///
    /// # Errors
    ///
    /// - `LifecycleError::InvalidFrameName` if the name carries no channel
    /// - `LifecycleError::Handshake` if the parent never answered
    pub async fn run(
        &self,
        context: &FrameContext,
        profile: &FrameProfile,
    ) -> Result<BootstrappedFrame, LifecycleError> {
        self.run_with(context, profile, |_| {}).await
    }

    /// Like `run`, with `setup` called on the configured frame before the
    /// ready event goes out. Handlers the parent may call as soon as the
    /// frame is ready belong in `setup`.
    ///
    /// # Errors
    ///
    /// Same as `run`. `setup` is not called on failure.
    pub async fn run_with<F>(
        &self,
        context: &FrameContext,
        profile: &FrameProfile,
        setup: F,
    ) -> Result<BootstrappedFrame, LifecycleError>
    where
        F: FnOnce(&BootstrappedFrame),
    {
        let channel = context.channel()?;

        let mut options = BusOptions::new(channel.as_str()).with_origin(context.origin.clone());
        if let Some(parent_url) = &context.parent_url {
            options = options.with_merchant_url(parent_url.clone());
        }
        let bus = Arc::new(Bus::new(self.dispatcher.clone(), options)?);

        let span = frame_span!(
            "frame_bootstrap",
            integration = profile.integration,
            channel = %channel
        );
        let configuration = self.handshake(&bus, profile).instrument(span).await?;

        let store = Arc::new(ConfigurationStore::new());
        store.set(configuration);
        let frame = BootstrappedFrame {
            profile: *profile,
            context: context.clone(),
            bus,
            store,
        };

        setup(&frame);
        frame.bus.emit(profile.ready_event, Value::Null);

        log_frame_event!(
            info,
            COMPONENT,
            "Frame configured",
            channel,
            integration = profile.integration
        );

        Ok(frame)
    }

    async fn handshake(
        &self,
        bus: &Bus,
        profile: &FrameProfile,
    ) -> Result<Configuration, LifecycleError> {
        let _timer = time_histogram!(HANDSHAKE_DURATION, &[profile.integration]);

        match bus
            .request(CONFIGURATION_REQUEST, Value::Null)
            .wait(self.timeout)
            .await
        {
            Ok(value) => {
                HANDSHAKES
                    .with_label_values(&[profile.integration, "completed"])
                    .inc();
                Ok(Configuration::from(value))
            }
            Err(e) => {
                let error = HandshakeError::from(e);
                HANDSHAKES
                    .with_label_values(&[profile.integration, error.outcome()])
                    .inc();
                log_frame_event!(
                    warn,
                    COMPONENT,
                    "Configuration handshake failed",
                    bus.channel(),
                    error = %error
                );
                bus.teardown();
                Err(error.into())
            }
        }
    }
}
