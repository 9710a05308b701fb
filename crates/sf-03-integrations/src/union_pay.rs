//! # UnionPay proxy frame
//!
//! UnionPay needs the card BIN to tell which capabilities a card has, but
//! the card number only exists inside the hosted fields frame. The proxy
//! frame is served from the same origin, so it can reach the hosted fields
//! form state directly and hand the parent nothing but the first six
//! digits.
//!
//! The parent passes the hosted fields channel in the configuration under
//! `hostedFieldsChannel`; the proxy synthesizes the hosted fields frame URL
//! from it and scans its siblings for that frame.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sf_01_frame_lifecycle::{
    CreateFrame, FrameBootstrap, FrameContext, FrameHandle, FrameLifecycleApi,
    FrameLifecycleController, FrameLoader, LifecycleConfig,
};
use sf_02_object_locator::{FrameScanLocator, LocatorTarget};
use shared_bus::{handler, Bus};
use shared_types::events::UNION_PAY_FETCH_CAPABILITIES;
use shared_types::{
    ChannelId, Configuration, GatewayClient, GatewayError, GatewayRequest,
};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::debug;

use crate::child::{publish_child, spawn_child, ChildReady};
use crate::error::IntegrationError;
use crate::hosted_fields::{FormState, FORM_STATE_GLOBAL};
use crate::page_frames::SiblingsFactory;
use crate::profiles::{HOSTED_FIELDS, UNION_PAY};

/// Global under which the frame keeps its `UnionPayProxy`.
pub const FRAME_GLOBAL: &str = "unionPayProxy";

/// Configuration key carrying the hosted fields channel.
pub const HOSTED_FIELDS_CHANNEL_KEY: &str = "hostedFieldsChannel";

/// Reply to `UNION_PAY_FETCH_CAPABILITIES`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Whether the hosted fields form state was reachable.
    pub found: bool,
    /// First six digits of the card number, when six were typed.
    pub bin: Option<String>,
}

impl Capabilities {
    fn not_found() -> Self {
        Self {
            found: false,
            bin: None,
        }
    }
}

// =============================================================================
// PARENT
// =============================================================================

/// Merchant-side owner of the UnionPay proxy frame.
pub struct UnionPay {
    controller: Arc<FrameLifecycleController>,
    handle: FrameHandle,
}

impl UnionPay {
    /// Create the proxy frame for the hosted fields instance on
    /// `hosted_fields_channel`.
    pub fn open(
        controller: Arc<FrameLifecycleController>,
        hosted_fields_channel: &ChannelId,
        client: Arc<dyn GatewayClient>,
    ) -> Result<Self, IntegrationError> {
        let client = Arc::new(ProxyClient {
            inner: client,
            hosted_fields_channel: hosted_fields_channel.clone(),
        });
        let handle = controller.create(CreateFrame::new(UNION_PAY, client))?;
        Ok(Self { controller, handle })
    }

    pub fn handle(&self) -> &FrameHandle {
        &self.handle
    }

    pub async fn wait_ready(&self, timeout: Option<Duration>) -> Result<(), IntegrationError> {
        Ok(self.handle.wait_ready(timeout).await?)
    }

    /// Ask the proxy for the card's BIN.
    ///
    /// # Errors
    ///
    /// - `IntegrationError::TimedOut` if the proxy did not answer in time
    /// - `IntegrationError::Unanswered` if no proxy is listening
    /// - `IntegrationError::MalformedPayload` for an unreadable reply
    pub async fn fetch_capabilities(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Capabilities, IntegrationError> {
        let reply = self
            .handle
            .bus()
            .request(UNION_PAY_FETCH_CAPABILITIES, json!({}))
            .wait(timeout)
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    pub fn teardown(&self) {
        self.controller.teardown(&self.handle);
    }
}

/// Merchant client with the hosted fields channel stamped onto every
/// configuration it serves.
struct ProxyClient {
    inner: Arc<dyn GatewayClient>,
    hosted_fields_channel: ChannelId,
}

#[async_trait]
impl GatewayClient for ProxyClient {
    fn get_configuration(&self) -> Configuration {
        self.inner
            .get_configuration()
            .with(HOSTED_FIELDS_CHANNEL_KEY, self.hosted_fields_channel.as_str())
    }

    async fn request(&self, request: GatewayRequest) -> Result<Value, GatewayError> {
        self.inner.request(request).await
    }
}

// =============================================================================
// FRAME
// =============================================================================

/// Code running inside the UnionPay proxy frame.
pub struct UnionPayProxy {
    bus: Arc<Bus>,
    configuration: Option<Configuration>,
    target: Option<LocatorTarget>,
    locator: FrameScanLocator,
}

impl UnionPayProxy {
    pub fn bus(&self) -> &Arc<Bus> {
        &self.bus
    }

    /// A fresh clone of the configuration the proxy was started with.
    pub fn configuration(&self) -> Option<Configuration> {
        self.configuration.clone()
    }

    /// Where the hosted fields form state is expected, if the configuration
    /// named a hosted fields channel.
    pub fn target(&self) -> Option<&LocatorTarget> {
        self.target.as_ref()
    }

    /// Read the BIN straight from the hosted fields form state.
    pub fn capabilities(&self) -> Capabilities {
        let Some(target) = &self.target else {
            debug!("No hosted fields channel configured");
            return Capabilities::not_found();
        };

        let form = self
            .locator
            .scan(target)
            .and_then(|object| object.downcast::<FormState>().ok());

        match form {
            Some(form) => Capabilities {
                found: true,
                bin: form.bin(),
            },
            None => Capabilities::not_found(),
        }
    }
}

fn answer_capabilities(bus: &Bus, proxy: Weak<UnionPayProxy>) {
    bus.on(
        UNION_PAY_FETCH_CAPABILITIES,
        handler(move |message| {
            let Some(proxy) = proxy.upgrade() else {
                return;
            };
            match serde_json::to_value(proxy.capabilities()) {
                Ok(reply) => {
                    message.reply(reply);
                }
                Err(e) => debug!(error = %e, "Failed to encode capabilities"),
            }
        }),
    );
}

fn hosted_fields_target(
    config: &LifecycleConfig,
    configuration: Option<&Configuration>,
) -> Option<LocatorTarget> {
    let channel = configuration?
        .get(&format!("/{HOSTED_FIELDS_CHANNEL_KEY}"))
        .and_then(Value::as_str)
        .and_then(|id| ChannelId::new(id).ok())?;
    Some(LocatorTarget::for_frame(
        config,
        &HOSTED_FIELDS,
        &channel,
        FORM_STATE_GLOBAL,
    ))
}

/// Loader for `union-pay-proxy-frame.html`.
///
/// `config` must match the configuration the hosted fields frame was
/// created with, or the synthesized URL will not match its location.
pub fn union_pay_loader(
    bootstrap: Arc<FrameBootstrap>,
    config: LifecycleConfig,
    siblings: SiblingsFactory,
    on_ready: Option<ChildReady<UnionPayProxy>>,
) -> FrameLoader {
    Arc::new(move |context: FrameContext| {
        let on_ready = on_ready.clone();
        let config = config.clone();
        let frames = siblings(&context);
        spawn_child(bootstrap.clone(), context, UNION_PAY, move |frame| {
            let configuration = frame.configuration();
            let proxy = Arc::new(UnionPayProxy {
                bus: frame.bus().clone(),
                target: hosted_fields_target(&config, configuration.as_ref()),
                configuration,
                locator: FrameScanLocator::new(frames),
            });
            answer_capabilities(frame.bus(), Arc::downgrade(&proxy));
            publish_child(frame, FRAME_GLOBAL, proxy, on_ready.as_ref());
        });
    })
}
