//! # Test Fixtures
//!
//! A merchant checkout page with every integration's loader registered, and
//! observers that hand each frame's child object to the test.

use sf_01_frame_lifecycle::{FrameBootstrap, FrameLifecycleController, InMemoryPage, LifecycleConfig};
use sf_03_integrations::{
    hosted_fields_loader, ideal_loader, page_siblings, profiles, three_d_secure_loader,
    union_pay_loader, BankFrameChild, ChildReady, HostedFieldsFrame, IssuerFrameChild,
    UnionPayProxy,
};
use shared_bus::InMemoryDispatcher;
use shared_types::{Configuration, GatewayClient, StaticGatewayClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const MERCHANT_URL: &str = "https://shop.example.com/checkout";
pub const ASSETS_URL: &str = "https://assets.braintreegateway.com";
pub const SDK_VERSION: &str = "3.97.0";
pub const WAIT: Duration = Duration::from_secs(2);

/// Merchant gateway client serving `configuration`.
pub fn merchant_client(configuration: Configuration) -> Arc<dyn GatewayClient> {
    Arc::new(StaticGatewayClient::new(configuration))
}

/// Merchant gateway client serving an empty configuration.
pub fn static_client() -> Arc<dyn GatewayClient> {
    Arc::new(StaticGatewayClient::default())
}

/// Receives child objects as their frames finish the handshake.
pub struct Children<C> {
    receiver: mpsc::UnboundedReceiver<Arc<C>>,
}

impl<C> Children<C> {
    /// The next frame to become ready.
    ///
    /// # Panics
    ///
    /// Panics if no frame became ready within `WAIT`.
    pub async fn next(&mut self) -> Arc<C> {
        tokio::time::timeout(WAIT, self.receiver.recv())
            .await
            .expect("timeout waiting for frame")
            .expect("observer dropped")
    }

    /// A frame that is already ready, without waiting.
    pub fn try_next(&mut self) -> Option<Arc<C>> {
        self.receiver.try_recv().ok()
    }
}

fn observer<C: Send + Sync + 'static>() -> (ChildReady<C>, Children<C>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let observer: ChildReady<C> = Arc::new(move |child: Arc<C>| {
        let _ = sender.send(child);
    });
    (observer, Children { receiver })
}

/// One merchant page, its dispatcher and a lifecycle controller.
pub struct Checkout {
    pub dispatcher: Arc<InMemoryDispatcher>,
    pub page: Arc<InMemoryPage>,
    pub config: LifecycleConfig,
    pub controller: Arc<FrameLifecycleController>,
    pub hosted_fields: Children<HostedFieldsFrame>,
    pub bank_frames: Children<BankFrameChild>,
    pub issuer_frames: Children<IssuerFrameChild>,
    pub union_pay: Children<UnionPayProxy>,
}

impl Checkout {
    /// A checkout whose parent buses enforce the merchant origin.
    pub fn new() -> Self {
        Self::with_config(
            LifecycleConfig::new(ASSETS_URL, SDK_VERSION).with_merchant_url(MERCHANT_URL),
        )
    }

    /// # Panics
    ///
    /// Panics outside a Tokio runtime or for an invalid `config`.
    pub fn with_config(config: LifecycleConfig) -> Self {
        let dispatcher = InMemoryDispatcher::spawn();
        let page = InMemoryPage::new(MERCHANT_URL);
        let bootstrap = Arc::new(FrameBootstrap::new(dispatcher.clone(), &config));

        let (on_hosted_fields, hosted_fields) = observer();
        let (on_bank_frame, bank_frames) = observer();
        let (on_issuer_frame, issuer_frames) = observer();
        let (on_union_pay, union_pay) = observer();

        page.register_loader(
            profiles::HOSTED_FIELDS.document,
            hosted_fields_loader(bootstrap.clone(), Some(on_hosted_fields)),
        );
        page.register_loader(
            profiles::THREE_D_SECURE.document,
            three_d_secure_loader(bootstrap.clone(), Some(on_bank_frame)),
        );
        page.register_loader(
            profiles::IDEAL.document,
            ideal_loader(bootstrap.clone(), Some(on_issuer_frame)),
        );
        page.register_loader(
            profiles::UNION_PAY.document,
            union_pay_loader(
                bootstrap,
                config.clone(),
                page_siblings(&page),
                Some(on_union_pay),
            ),
        );

        let controller = Arc::new(
            FrameLifecycleController::new(config.clone(), page.clone(), dispatcher.clone())
                .expect("valid lifecycle config"),
        );

        Self {
            dispatcher,
            page,
            config,
            controller,
            hosted_fields,
            bank_frames,
            issuer_frames,
            union_pay,
        }
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new()
    }
}
