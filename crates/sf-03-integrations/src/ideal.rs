//! # iDEAL issuer selection
//!
//! The shopper picks a bank inside a processor-hosted frame. The frame
//! reports the choice with `BANK_SELECTED {issuerId}`.
//!
//! The issuer list travels in the configuration:
//!
//! ```json
//! {"issuers": [{"id": "INGBNL2A", "name": "ING"}]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sf_01_frame_lifecycle::{
    CreateFrame, FrameBootstrap, FrameContext, FrameHandle, FrameLifecycleApi,
    FrameLifecycleController, FrameLoader,
};
use shared_bus::{handler, Bus};
use shared_types::events::BANK_SELECTED;
use shared_types::{Configuration, GatewayClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::child::{publish_child, spawn_child, ChildReady};
use crate::error::{within, IntegrationError};
use crate::profiles::IDEAL;

/// Global under which the frame keeps its `IssuerFrameChild`.
pub const FRAME_GLOBAL: &str = "idealIssuerFrame";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BankSelected {
    issuer_id: String,
}

/// Merchant-side owner of the issuer selection frame.
pub struct IssuerSelection {
    controller: Arc<FrameLifecycleController>,
    handle: FrameHandle,
    selected: watch::Receiver<Option<String>>,
}

impl IssuerSelection {
    pub fn open(
        controller: Arc<FrameLifecycleController>,
        client: Arc<dyn GatewayClient>,
    ) -> Result<Self, IntegrationError> {
        let (sender, selected) = watch::channel(None);

        let on_selected = handler(move |message| {
            match serde_json::from_value::<BankSelected>(message.payload().clone()) {
                Ok(BankSelected { issuer_id }) => {
                    info!(issuer = %issuer_id, "iDEAL issuer selected");
                    sender.send_replace(Some(issuer_id));
                }
                Err(e) => debug!(error = %e, "Ignored malformed bank selection"),
            }
        });

        let handle = controller
            .create(CreateFrame::new(IDEAL, client).listen(BANK_SELECTED, on_selected))?;

        Ok(Self {
            controller,
            handle,
            selected,
        })
    }

    pub fn handle(&self) -> &FrameHandle {
        &self.handle
    }

    /// The most recent selection, if any.
    pub fn selected_issuer(&self) -> Option<String> {
        self.selected.borrow().clone()
    }

    /// Wait until the shopper selected an issuer.
    ///
    /// # Errors
    ///
    /// - `IntegrationError::TimedOut` if no selection arrived within `timeout`
    /// - `IntegrationError::Closed` if the frame was torn down first
    pub async fn wait_for_selection(
        &self,
        timeout: Option<Duration>,
    ) -> Result<String, IntegrationError> {
        let mut selected = self.selected.clone();
        let wait = async move {
            let issuer = match selected.wait_for(Option::is_some).await {
                Ok(issuer) => issuer.clone(),
                Err(_) => None,
            };
            issuer
        };
        within(timeout, wait).await?.ok_or(IntegrationError::Closed)
    }

    pub fn teardown(&self) {
        self.controller.teardown(&self.handle);
    }
}

/// Code running inside the issuer selection frame.
pub struct IssuerFrameChild {
    bus: Arc<Bus>,
    issuers: Vec<String>,
}

impl IssuerFrameChild {
    fn new(bus: Arc<Bus>, configuration: Option<Configuration>) -> Self {
        let issuers = configuration
            .as_ref()
            .and_then(|c| c.get("/issuers"))
            .and_then(Value::as_array)
            .map(|issuers| {
                issuers
                    .iter()
                    .filter_map(|issuer| issuer.get("id").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { bus, issuers }
    }

    /// Issuer ids offered by the configuration.
    pub fn issuers(&self) -> &[String] {
        &self.issuers
    }

    /// Report the shopper's choice to the parent.
    ///
    /// # Errors
    ///
    /// `IntegrationError::UnknownIssuer` if `issuer_id` was not offered.
    pub fn select(&self, issuer_id: &str) -> Result<(), IntegrationError> {
        if !self.issuers.iter().any(|id| id == issuer_id) {
            return Err(IntegrationError::UnknownIssuer(issuer_id.to_string()));
        }
        let payload = serde_json::to_value(BankSelected {
            issuer_id: issuer_id.to_string(),
        })?;
        self.bus.emit(BANK_SELECTED, payload);
        Ok(())
    }
}

/// Loader for `ideal-issuer-frame.html`.
pub fn ideal_loader(
    bootstrap: Arc<FrameBootstrap>,
    on_ready: Option<ChildReady<IssuerFrameChild>>,
) -> FrameLoader {
    Arc::new(move |context: FrameContext| {
        let on_ready = on_ready.clone();
        spawn_child(bootstrap.clone(), context, IDEAL, move |frame| {
            let child = Arc::new(IssuerFrameChild::new(
                frame.bus().clone(),
                frame.configuration(),
            ));
            publish_child(frame, FRAME_GLOBAL, child, on_ready.as_ref());
        });
    })
}
