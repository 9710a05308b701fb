//! # Integration Flows
//!
//! Every payment-method component against the same checkout page.
//!
//! ## Flows Tested:
//!
//! 1. **Hosted fields**: typed input reaches the parent as field state only
//! 2. **UnionPay**: the proxy frame reads the BIN from the hosted fields frame
//! 3. **3-D Secure**: the bank frame posts its result once
//! 4. **iDEAL**: the issuer frame reports the shopper's bank

#[cfg(test)]
mod tests {
    use crate::fixtures::{merchant_client, static_client, Checkout, WAIT};
    use serde_json::{json, Value};
    use sf_01_frame_lifecycle::{FrameHost, FrameLifecycleApi, FrameSpec};
    use sf_03_integrations::{
        BankFrame, HostedFields, IntegrationError, IssuerSelection, UnionPay,
    };
    use shared_types::{ChannelId, Configuration};

    // =========================================================================
    // HOSTED FIELDS
    // =========================================================================

    #[tokio::test]
    async fn test_parent_sees_field_state_not_values() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        let frame = checkout.hosted_fields.next().await;

        frame.form().set_value("number", "4111 1111 1111 1111");
        frame.form().set_value("cvv", "");
        checkout.dispatcher.settle().await;

        let number = fields.field_state("number").expect("number reported");
        assert!(!number.is_empty);
        assert_eq!(number.length, 19);
        assert!(fields.field_state("cvv").expect("cvv reported").is_empty);
        assert_eq!(
            frame.form().value("number").as_deref(),
            Some("4111 1111 1111 1111")
        );
        Ok(())
    }

    // =========================================================================
    // UNION PAY
    // =========================================================================

    async fn union_pay_for(
        checkout: &mut Checkout,
        hosted_fields_channel: &ChannelId,
    ) -> anyhow::Result<UnionPay> {
        let union_pay = UnionPay::open(
            checkout.controller.clone(),
            hosted_fields_channel,
            static_client(),
        )?;
        union_pay.wait_ready(Some(WAIT)).await?;
        checkout.union_pay.next().await;
        Ok(union_pay)
    }

    #[tokio::test]
    async fn test_union_pay_reads_bin_from_hosted_fields() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        let frame = checkout.hosted_fields.next().await;
        frame.form().set_value("number", "6221 2612 3456 7890");

        let union_pay = union_pay_for(&mut checkout, fields.channel()).await?;
        let capabilities = union_pay.fetch_capabilities(Some(WAIT)).await?;

        assert!(capabilities.found);
        assert_eq!(capabilities.bin.as_deref(), Some("622126"));
        Ok(())
    }

    #[tokio::test]
    async fn test_union_pay_without_enough_digits() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        let frame = checkout.hosted_fields.next().await;
        frame.form().set_value("number", "622");

        let union_pay = union_pay_for(&mut checkout, fields.channel()).await?;
        let capabilities = union_pay.fetch_capabilities(Some(WAIT)).await?;

        assert!(capabilities.found);
        assert_eq!(capabilities.bin, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_union_pay_with_unknown_hosted_fields_channel() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let _fields = HostedFields::create(checkout.controller.clone(), static_client())?;

        let union_pay = union_pay_for(&mut checkout, &ChannelId::generate()).await?;
        let capabilities = union_pay.fetch_capabilities(Some(WAIT)).await?;

        assert!(!capabilities.found);
        assert_eq!(capabilities.bin, None);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_union_pay_answers_as_soon_as_ready() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        let frame = checkout.hosted_fields.next().await;
        frame.form().set_value("number", "6221261234567890");

        for _ in 0..25 {
            let union_pay = UnionPay::open(
                checkout.controller.clone(),
                fields.channel(),
                static_client(),
            )?;
            union_pay.wait_ready(Some(WAIT)).await?;
            let capabilities = union_pay.fetch_capabilities(Some(WAIT)).await?;
            assert_eq!(capabilities.bin.as_deref(), Some("622126"));
            union_pay.teardown();
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_union_pay_frame_sees_merchant_configuration() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        checkout.hosted_fields.next().await;

        let _union_pay = UnionPay::open(
            checkout.controller.clone(),
            fields.channel(),
            merchant_client(Configuration::new(json!({"merchantId": "m-1"}))),
        )?;
        let proxy = checkout.union_pay.next().await;

        let configuration = proxy.configuration().expect("configured proxy");
        assert_eq!(configuration.get_str("/merchantId"), Some("m-1"));
        assert_eq!(
            configuration.get_str("/hostedFieldsChannel"),
            Some(fields.channel().as_str())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_union_pay_skips_cross_origin_sibling() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();

        // A wallet frame from another origin, attached before everything else.
        let wallet = checkout.page.create_frame(FrameSpec {
            name: "wallet".to_string(),
            src: "https://www.wallet.example/button.html".to_string(),
        })?;
        checkout.page.attach(wallet)?;

        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        let frame = checkout.hosted_fields.next().await;
        frame.form().set_value("number", "6250941006528599");

        let union_pay = union_pay_for(&mut checkout, fields.channel()).await?;
        let capabilities = union_pay.fetch_capabilities(Some(WAIT)).await?;

        assert!(capabilities.found);
        assert_eq!(capabilities.bin.as_deref(), Some("625094"));
        Ok(())
    }

    #[tokio::test]
    async fn test_union_pay_after_hosted_fields_teardown() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        checkout.hosted_fields.next().await.form().set_value("number", "6221261234");

        let union_pay = union_pay_for(&mut checkout, fields.channel()).await?;
        fields.teardown();

        let capabilities = union_pay.fetch_capabilities(Some(WAIT)).await?;
        assert!(!capabilities.found);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_after_union_pay_teardown() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let fields = HostedFields::create(checkout.controller.clone(), static_client())?;
        let union_pay = union_pay_for(&mut checkout, fields.channel()).await?;

        union_pay.teardown();
        let result = union_pay.fetch_capabilities(Some(WAIT)).await;
        assert_eq!(result, Err(IntegrationError::Closed));
        Ok(())
    }

    // =========================================================================
    // 3-D SECURE
    // =========================================================================

    #[tokio::test]
    async fn test_bank_frame_result_reaches_parent() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let bank = BankFrame::open(checkout.controller.clone(), static_client())?;
        let child = checkout.bank_frames.next().await;

        let Value::Object(params) = json!({"auth_response": "{\"paymentMethod\":{}}"}) else {
            unreachable!()
        };
        child.complete(params.clone());

        let result = bank.authentication_result(Some(WAIT)).await?;
        assert_eq!(result, params);
        assert_eq!(checkout.controller.active_frames(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_bank_frame_uses_dispatch_ready_event() -> anyhow::Result<()> {
        let checkout = Checkout::new();
        let bank = BankFrame::open(checkout.controller.clone(), static_client())?;
        bank.handle().wait_ready(Some(WAIT)).await?;

        let name = checkout
            .page
            .frame_name(bank.handle().element())
            .expect("frame exists");
        assert_eq!(name, bank.handle().channel().as_str());
        Ok(())
    }

    // =========================================================================
    // IDEAL
    // =========================================================================

    #[tokio::test]
    async fn test_issuer_selection_round_trip() -> anyhow::Result<()> {
        let mut checkout = Checkout::new();
        let selection = IssuerSelection::open(
            checkout.controller.clone(),
            merchant_client(Configuration::new(json!({
                "issuers": [{"id": "ABNANL2A"}, {"id": "INGBNL2A"}]
            }))),
        )?;
        let child = checkout.issuer_frames.next().await;

        assert!(child.select("UNKNOWN").is_err());
        child.select("ABNANL2A")?;

        assert_eq!(selection.wait_for_selection(Some(WAIT)).await?, "ABNANL2A");
        Ok(())
    }
}
