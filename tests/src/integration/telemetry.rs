//! # Telemetry
//!
//! Frame lifecycle and locator activity shows up in the metrics registry.

#[cfg(test)]
mod tests {
    use crate::fixtures::{static_client, Checkout, WAIT};
    use frame_telemetry::{encode_metrics, register_metrics, FRAMES_CREATED, HANDSHAKES};
    use sf_03_integrations::HostedFields;

    #[tokio::test]
    async fn test_frame_lifecycle_is_counted() -> anyhow::Result<()> {
        register_metrics()?;
        let created = FRAMES_CREATED.with_label_values(&["hosted-fields"]).get();
        let completed = HANDSHAKES
            .with_label_values(&["hosted-fields", "completed"])
            .get();

        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        fields.wait_ready(Some(WAIT)).await?;
        checkout.hosted_fields.next().await;

        assert!(FRAMES_CREATED.with_label_values(&["hosted-fields"]).get() > created);
        assert!(
            HANDSHAKES
                .with_label_values(&["hosted-fields", "completed"])
                .get()
                > completed
        );

        let text = encode_metrics()?;
        assert!(text.contains("sf_lifecycle_frames_created_total"));
        assert!(text.contains("sf_lifecycle_handshake_duration_seconds"));
        Ok(())
    }
}
