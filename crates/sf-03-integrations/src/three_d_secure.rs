//! # 3-D Secure bank frame
//!
//! After the cardholder finishes the bank challenge, the bank redirects the
//! frame to a landing document on the processor's domain. That document
//! posts the redirect parameters back to the parent once.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use sf_01_frame_lifecycle::{
    CreateFrame, FrameBootstrap, FrameContext, FrameHandle, FrameLifecycleApi,
    FrameLifecycleController, FrameLoader,
};
use shared_bus::{handler, Bus};
use shared_types::events::AUTHENTICATION_COMPLETE;
use shared_types::GatewayClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::child::{publish_child, spawn_child, ChildReady};
use crate::error::{within, IntegrationError};
use crate::profiles::THREE_D_SECURE;

/// Global under which the frame keeps its `BankFrameChild`.
pub const FRAME_GLOBAL: &str = "threeDSecureBankFrame";

/// Redirect parameters posted by the bank frame.
pub type AuthenticationParams = Map<String, Value>;

/// Merchant-side owner of one bank frame.
pub struct BankFrame {
    controller: Arc<FrameLifecycleController>,
    handle: FrameHandle,
    result: Mutex<Option<oneshot::Receiver<AuthenticationParams>>>,
}

impl BankFrame {
    /// Create the bank frame and wait for its authentication result.
    pub fn open(
        controller: Arc<FrameLifecycleController>,
        client: Arc<dyn GatewayClient>,
    ) -> Result<Self, IntegrationError> {
        let (sender, receiver) = oneshot::channel();
        let sender = Arc::new(Mutex::new(Some(sender)));

        let on_complete = handler(move |message| {
            let Value::Object(params) = message.payload().clone() else {
                debug!("Ignored non-object authentication payload");
                return;
            };
            // Only the first completion counts.
            if let Some(sender) = sender.lock().take() {
                let _ = sender.send(params);
            }
        });

        let handle = controller.create(
            CreateFrame::new(THREE_D_SECURE, client)
                .listen(AUTHENTICATION_COMPLETE, on_complete),
        )?;

        Ok(Self {
            controller,
            handle,
            result: Mutex::new(Some(receiver)),
        })
    }

    pub fn handle(&self) -> &FrameHandle {
        &self.handle
    }

    /// Wait for the bank frame to complete, then remove it.
    ///
    /// # Errors
    ///
    /// - `IntegrationError::TimedOut` if nothing arrived within `timeout`
    /// - `IntegrationError::Closed` if the frame was torn down first
    /// - `IntegrationError::AlreadyTaken` on a second call
    pub async fn authentication_result(
        &self,
        timeout: Option<Duration>,
    ) -> Result<AuthenticationParams, IntegrationError> {
        let receiver = self
            .result
            .lock()
            .take()
            .ok_or(IntegrationError::AlreadyTaken)?;

        let outcome = within(timeout, receiver).await;
        self.teardown();

        let params = outcome?.map_err(|_| IntegrationError::Closed)?;
        info!(channel = %self.handle.channel(), "3-D Secure authentication completed");
        Ok(params)
    }

    pub fn teardown(&self) {
        self.controller.teardown(&self.handle);
    }
}

/// Code running inside the bank landing frame.
pub struct BankFrameChild {
    bus: Arc<Bus>,
}

impl BankFrameChild {
    /// Post the redirect parameters to the parent.
    pub fn complete(&self, params: AuthenticationParams) {
        self.bus.emit(AUTHENTICATION_COMPLETE, Value::Object(params));
    }

    pub fn bus(&self) -> &Arc<Bus> {
        &self.bus
    }
}

/// Loader for `three-d-secure-bank-frame.html`.
pub fn three_d_secure_loader(
    bootstrap: Arc<FrameBootstrap>,
    on_ready: Option<ChildReady<BankFrameChild>>,
) -> FrameLoader {
    Arc::new(move |context: FrameContext| {
        let on_ready = on_ready.clone();
        spawn_child(bootstrap.clone(), context, THREE_D_SECURE, move |frame| {
            let child = Arc::new(BankFrameChild {
                bus: frame.bus().clone(),
            });
            publish_child(frame, FRAME_GLOBAL, child, on_ready.as_ref());
        });
    })
}
