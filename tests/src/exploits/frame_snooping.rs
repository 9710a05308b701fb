//! # Frame Snooping
//!
//! Attack: the merchant page, or a script running in it, tries to read the
//! card number out of the hosted fields frame.
//!
//! Defense: the page cannot touch a frame served from another origin, and
//! the only thing the frame will answer over the bus is a redacted snapshot.

#[cfg(test)]
mod tests {
    use crate::fixtures::{static_client, Checkout, MERCHANT_URL, WAIT};
    use sf_02_object_locator::{BusLocator, FrameScanLocator, LocatorTarget, ObjectLocator};
    use sf_03_integrations::{profiles, HostedFields, PageSiblings, FORM_STATE_GLOBAL};
    use shared_bus::merchant_origin;
    use std::sync::Arc;

    const CARD: &str = "4111111111111111";

    fn merchant() -> String {
        merchant_origin(MERCHANT_URL).expect("valid merchant url")
    }

    #[tokio::test]
    async fn test_page_cannot_scan_into_hosted_fields() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        checkout.hosted_fields.next().await.form().set_value("number", CARD);

        let siblings = Arc::new(PageSiblings::new(&checkout.page, merchant()));
        let locator = FrameScanLocator::new(siblings);
        let target = LocatorTarget::for_frame(
            &checkout.config,
            &profiles::HOSTED_FIELDS,
            fields.channel(),
            FORM_STATE_GLOBAL,
        );

        assert!(locator.locate(&target).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_bus_lookup_returns_redacted_snapshot() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        checkout.hosted_fields.next().await.form().set_value("number", CARD);

        let locator = BusLocator::new(checkout.dispatcher.clone())
            .with_origin(merchant())
            .with_timeout(WAIT);
        let target = LocatorTarget::for_frame(
            &checkout.config,
            &profiles::HOSTED_FIELDS,
            fields.channel(),
            FORM_STATE_GLOBAL,
        );

        let found = locator.locate(&target).await?.expect("frame answers lookups");
        assert!(!found.is_live());

        let snapshot = found.snapshot().expect("bus lookups return snapshots");
        assert_eq!(snapshot["number"]["length"], 16);
        assert!(!snapshot.to_string().contains("4111"));
        Ok(())
    }

    #[tokio::test]
    async fn test_bus_lookup_from_opaque_origin_is_ignored() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        checkout.hosted_fields.next().await;

        // Default origin is the opaque "null" origin.
        let locator = BusLocator::new(checkout.dispatcher.clone()).with_timeout(WAIT);
        let target = LocatorTarget::for_frame(
            &checkout.config,
            &profiles::HOSTED_FIELDS,
            fields.channel(),
            FORM_STATE_GLOBAL,
        );

        assert!(locator.locate(&target).await?.is_none());
        Ok(())
    }
}
