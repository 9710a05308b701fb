//! # Origin Spoofing
//!
//! Attack: a script on the page (or in another frame) learns a channel id
//! and publishes on it, hoping to be mistaken for the frame or the merchant.
//!
//! Defense: buses bound to a merchant URL drop every message whose sender
//! origin is neither the merchant's nor the processor's. Dropped messages
//! are never delivered and never answered.

#[cfg(test)]
mod tests {
    use crate::fixtures::{merchant_client, static_client, Checkout, WAIT};
    use serde_json::json;
    use sf_03_integrations::{HostedFields, UnionPay};
    use shared_bus::{Bus, BusOptions, ReplyError};
    use shared_types::events::{CONFIGURATION_REQUEST, INPUT_EVENT, UNION_PAY_FETCH_CAPABILITIES};
    use shared_types::{ChannelId, Configuration};
    use std::time::Duration;

    const EVIL: &str = "https://evil.example.com";

    fn attacker(checkout: &Checkout, channel: &ChannelId, origin: &str) -> Bus {
        Bus::new(
            checkout.dispatcher.clone(),
            BusOptions::new(channel.as_str()).with_origin(origin),
        )
        .expect("channel is set")
    }

    #[tokio::test]
    async fn test_foreign_origin_cannot_fetch_configuration() {
        let checkout = Checkout::new();
        let fields = HostedFields::create(
            checkout.controller.clone(),
            merchant_client(Configuration::new(json!({"clientToken": "secret"}))),
        )
        .unwrap();

        let evil = attacker(&checkout, fields.channel(), EVIL);
        let result = evil
            .request(CONFIGURATION_REQUEST, json!({}))
            .wait(Some(WAIT))
            .await;

        assert_eq!(result, Err(ReplyError::Unanswered));
    }

    #[tokio::test]
    async fn test_lookalike_processor_domains_rejected() {
        let checkout = Checkout::new();
        let fields =
            HostedFields::create(checkout.controller.clone(), static_client()).unwrap();

        for origin in [
            "https://braintreegateway.com.evil.com",
            "http://assets.braintreegateway.com",
            "https://evilbraintreegateway.com",
        ] {
            let evil = attacker(&checkout, fields.channel(), origin);
            let result = evil
                .request(CONFIGURATION_REQUEST, json!({}))
                .wait(Some(WAIT))
                .await;
            assert_eq!(result, Err(ReplyError::Unanswered), "{origin} was answered");
        }
    }

    #[tokio::test]
    async fn test_processor_subdomain_is_trusted() {
        let checkout = Checkout::new();
        let fields = HostedFields::create(
            checkout.controller.clone(),
            merchant_client(Configuration::new(json!({"foo": "bar"}))),
        )
        .unwrap();

        let processor = attacker(&checkout, fields.channel(), "https://sub.braintreepayments.com");
        let reply = processor
            .request(CONFIGURATION_REQUEST, json!({}))
            .wait(Some(WAIT))
            .await
            .unwrap();
        assert_eq!(reply, json!({"foo": "bar"}));
    }

    #[tokio::test]
    async fn test_forged_input_events_are_dropped() {
        let checkout = Checkout::new();
        let fields =
            HostedFields::create(checkout.controller.clone(), static_client()).unwrap();

        let evil = attacker(&checkout, fields.channel(), EVIL);
        evil.emit(
            INPUT_EVENT,
            json!({"field": "number", "isEmpty": false, "length": 16}),
        );
        checkout.dispatcher.settle().await;

        assert!(fields.field_state("number").is_none());
        assert!(fields.handle().bus().dropped_messages() >= 1);
    }

    #[tokio::test]
    async fn test_frame_ignores_foreign_capability_requests() {
        let mut checkout = Checkout::new();
        let fields =
            HostedFields::create(checkout.controller.clone(), static_client()).unwrap();
        checkout
            .hosted_fields
            .next()
            .await
            .form()
            .set_value("number", "6221261234567890");

        let union_pay = UnionPay::open(
            checkout.controller.clone(),
            fields.channel(),
            static_client(),
        )
        .unwrap();
        checkout.union_pay.next().await;

        // The proxy frame only trusts the page it was loaded into.
        let evil = attacker(&checkout, union_pay.handle().channel(), EVIL);
        let result = evil
            .request(UNION_PAY_FETCH_CAPABILITIES, json!({}))
            .wait(Some(Duration::from_millis(200)))
            .await;
        assert_eq!(result, Err(ReplyError::Unanswered));

        let genuine = union_pay.fetch_capabilities(Some(WAIT)).await.unwrap();
        assert_eq!(genuine.bin.as_deref(), Some("622126"));
    }
}
