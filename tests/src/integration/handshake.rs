//! # Handshake Flows
//!
//! The configuration handshake between a parent component and the frame it
//! creates, end to end on one page:
//!
//! ```text
//! HostedFields::create ──► controller ──► InMemoryPage::attach
//!                                              │ hosted_fields_loader
//!                                              ▼
//!                          CONFIGURATION_REQUEST ◄── FrameBootstrap
//!                          reply(clone) ──────────► ConfigurationStore
//!                          FRAME_READY ◄──────────── child
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{merchant_client, static_client, Checkout, ASSETS_URL, WAIT};
    use serde_json::json;
    use sf_01_frame_lifecycle::{
        FrameBootstrap, FrameContext, FrameElementId, FrameGlobals, FrameLifecycleApi,
        FrameState, HandshakeError, LifecycleConfig, LifecycleError,
    };
    use sf_03_integrations::{profiles, HostedFields};
    use shared_bus::{namespaced_key, Bus, BusOptions};
    use shared_types::events::CONFIGURATION_REQUEST;
    use shared_types::{ChannelId, Configuration};
    use std::time::Duration;

    // =========================================================================
    // CONFIGURATION ROUND TRIP
    // =========================================================================

    #[tokio::test]
    async fn test_child_receives_deep_equal_clone() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(
            checkout.controller.clone(),
            merchant_client(Configuration::new(json!({"foo": "bar"}))),
        )?;

        let frame = checkout.hosted_fields.next().await;
        let mut copy = frame.configuration().expect("configured frame");
        assert_eq!(copy.as_value(), &json!({"foo": "bar"}));

        // Mutating the child's copy touches neither the store nor the parent.
        copy.as_value_mut()["foo"] = json!("mutated");
        assert_eq!(
            frame.configuration().map(Configuration::into_value),
            Some(json!({"foo": "bar"}))
        );

        let second_child = Bus::new(
            checkout.dispatcher.clone(),
            BusOptions::new(fields.channel().as_str()).with_origin(ASSETS_URL),
        )?;
        let again = second_child
            .request(CONFIGURATION_REQUEST, json!({}))
            .wait(Some(WAIT))
            .await?;
        assert_eq!(again, json!({"foo": "bar"}));
        Ok(())
    }

    #[tokio::test]
    async fn test_parent_observes_readiness() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;

        fields.wait_ready(Some(WAIT)).await?;
        assert_eq!(fields.handle().state(), FrameState::Ready);

        let frame = checkout.hosted_fields.next().await;
        assert_eq!(frame.bus().channel(), fields.channel());
        Ok(())
    }

    #[tokio::test]
    async fn test_frame_name_and_src_carry_channel() -> anyhow::Result<()> {
        let checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        let element = fields.handle().element();

        let name = checkout.page.frame_name(element).expect("frame exists");
        let src = checkout.page.frame_src(element).expect("frame exists");

        assert_eq!(name, format!("braintree-hosted-field_{}", fields.channel()));
        assert_eq!(
            src,
            format!(
                "{ASSETS_URL}/web/3.97.0/html/hosted-fields-frame.html#{}",
                fields.channel()
            )
        );
        Ok(())
    }

    // =========================================================================
    // NON-COMPLETION
    // =========================================================================

    fn orphan_context(channel: &ChannelId) -> FrameContext {
        FrameContext {
            element: FrameElementId::new(99),
            name: format!("braintree-hosted-field_{channel}"),
            location: format!("{ASSETS_URL}/web/3.97.0/html/hosted-fields-frame.html#{channel}"),
            origin: ASSETS_URL.to_string(),
            parent_url: None,
            globals: FrameGlobals::new(),
        }
    }

    #[tokio::test]
    async fn test_bootstrap_without_parent_fails_instead_of_hanging() {
        let checkout = Checkout::new();
        let bootstrap = FrameBootstrap::new(checkout.dispatcher.clone(), &checkout.config)
            .with_timeout(Some(Duration::from_millis(50)));

        let result = tokio::time::timeout(
            WAIT,
            bootstrap.run(&orphan_context(&ChannelId::generate()), &profiles::HOSTED_FIELDS),
        )
        .await
        .expect("bootstrap must not hang");

        assert!(matches!(
            result,
            Err(LifecycleError::Handshake(
                HandshakeError::TimedOut { .. } | HandshakeError::Unanswered
            ))
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_unparseable_name() {
        let checkout = Checkout::new();
        let bootstrap = FrameBootstrap::new(checkout.dispatcher.clone(), &checkout.config);
        let mut context = orphan_context(&ChannelId::generate());
        context.name = "braintree-hosted-field_".to_string();

        let result = bootstrap.run(&context, &profiles::HOSTED_FIELDS).await;
        assert!(matches!(result, Err(LifecycleError::InvalidFrameName { .. })));
    }

    #[tokio::test]
    async fn test_handshake_timeout_from_config() -> anyhow::Result<()> {
        let config = LifecycleConfig::new(ASSETS_URL, "3.97.0")
            .with_handshake_timeout(Duration::from_millis(250));
        let mut checkout = Checkout::with_config(config);

        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        fields.wait_ready(Some(WAIT)).await?;
        assert!(checkout.hosted_fields.next().await.configuration().is_some());
        Ok(())
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    #[tokio::test]
    async fn test_teardown_releases_element_bus_and_channel() -> anyhow::Result<()> {
        let checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        fields.wait_ready(Some(WAIT)).await?;

        let channel = fields.channel().clone();
        let element = fields.handle().element();
        let request_key = namespaced_key(&channel, CONFIGURATION_REQUEST);
        assert_eq!(checkout.dispatcher.listener_count(&request_key), 1);

        fields.teardown();
        fields.teardown();

        assert!(!checkout.page.contains(element));
        assert!(fields.handle().bus().is_torn_down());
        assert!(!checkout.controller.channels().is_active(&channel));
        assert_eq!(checkout.dispatcher.listener_count(&request_key), 0);
        assert_eq!(checkout.controller.active_frames(), 0);
        assert_eq!(fields.handle().state(), FrameState::TornDown);
        Ok(())
    }

    #[tokio::test]
    async fn test_new_frames_never_reuse_channels() -> anyhow::Result<()> {
        let checkout = Checkout::new();
        let first = HostedFields::create(checkout.controller.clone(), static_client())?;
        let retired = first.channel().clone();
        first.teardown();

        for _ in 0..16 {
            let next = HostedFields::create(checkout.controller.clone(), static_client())?;
            assert_ne!(next.channel(), &retired);
            next.teardown();
        }
        Ok(())
    }
}
