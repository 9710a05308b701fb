//! # Channel Isolation
//!
//! Several components share one page and one dispatcher. Each owns a
//! channel, and traffic on one channel never reaches another.

#[cfg(test)]
mod tests {
    use crate::fixtures::{merchant_client, static_client, Checkout, WAIT};
    use serde_json::json;
    use sf_01_frame_lifecycle::FrameLifecycleApi;
    use sf_03_integrations::{HostedFields, IssuerSelection};
    use shared_bus::{handler, Bus, BusOptions};
    use shared_types::events::INPUT_EVENT;
    use shared_types::{ChannelId, Configuration};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_input_reaches_only_its_own_parent() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let first = HostedFields::create(checkout.controller.clone(), static_client())?;
        let second = HostedFields::create(checkout.controller.clone(), static_client())?;
        assert_ne!(first.channel(), second.channel());

        let mut frames = vec![
            checkout.hosted_fields.next().await,
            checkout.hosted_fields.next().await,
        ];
        frames.sort_by_key(|frame| frame.bus().channel() != first.channel());
        let (first_frame, second_frame) = (&frames[0], &frames[1]);
        assert_eq!(first_frame.bus().channel(), first.channel());

        first_frame.form().set_value("number", "4111");
        second_frame.form().set_value("cvv", "123");
        checkout.dispatcher.settle().await;

        assert_eq!(first.fields().len(), 1);
        assert_eq!(first.field_state("number").map(|s| s.length), Some(4));
        assert!(first.field_state("cvv").is_none());

        assert_eq!(second.fields().len(), 1);
        assert_eq!(second.field_state("cvv").map(|s| s.length), Some(3));
        assert!(second.field_state("number").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_same_event_name_on_different_channels() -> anyhow::Result<()> {
        let checkout = Checkout::new();
        let c1 = ChannelId::generate();
        let c2 = ChannelId::generate();
        let on_c1 = Bus::new(checkout.dispatcher.clone(), BusOptions::new(c1.as_str()))?;
        let on_c2 = Bus::new(checkout.dispatcher.clone(), BusOptions::new(c2.as_str()))?;

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        on_c1.on(
            INPUT_EVENT,
            handler(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        on_c2.emit(INPUT_EVENT, json!({"field": "number"}));
        checkout.dispatcher.settle().await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        on_c1.emit(INPUT_EVENT, json!({"field": "number"}));
        checkout.dispatcher.settle().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_teardown_of_one_component_leaves_others_working() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        let issuers = IssuerSelection::open(
            checkout.controller.clone(),
            merchant_client(Configuration::new(json!({"issuers": [{"id": "INGBNL2A"}]}))),
        )?;
        let form_frame = checkout.hosted_fields.next().await;
        let issuer_frame = checkout.issuer_frames.next().await;

        fields.teardown();
        form_frame.form().set_value("number", "4111");
        issuer_frame.select("INGBNL2A")?;

        let issuer = issuers.wait_for_selection(Some(WAIT)).await?;
        assert_eq!(issuer, "INGBNL2A");
        assert!(fields.fields().is_empty());
        assert_eq!(checkout.controller.active_frames(), 1);
        Ok(())
    }
}
