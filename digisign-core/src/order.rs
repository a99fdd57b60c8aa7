//! Order construction and validation.

use bon::Builder;

use crate::{
    config::ClientConfig,
    errors::{Error, Result},
    notify::Verifier,
    types::{Fee, OrderParameters, TradeType, fields},
};

/// Maximum length of a merchant trade number accepted by the gateway.
pub const MAX_TRADE_NO_LEN: usize = 32;

/// A payment order before signing.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Merchant trade number, at most [`MAX_TRADE_NO_LEN`] characters.
    #[builder(into)]
    pub out_trade_no: String,
    /// Order title shown to the payer.
    #[builder(into)]
    pub body: String,
    /// Amount in fen. Must be positive.
    #[builder(into)]
    pub total_fee: Fee,
    pub trade_type: TradeType,
    /// Where the payer is sent after an H5 checkout. Only sent for [`TradeType::Mweb`].
    #[builder(into)]
    pub redirect_url: Option<String>,
}

impl Order {
    /// In-store QR code order.
    pub fn native(
        out_trade_no: impl Into<String>,
        body: impl Into<String>,
        total_fee: impl Into<Fee>,
    ) -> Self {
        Order::builder()
            .out_trade_no(out_trade_no)
            .body(body)
            .total_fee(total_fee)
            .trade_type(TradeType::Native)
            .build()
    }

    /// Mobile web (H5) order.
    pub fn mweb(
        out_trade_no: impl Into<String>,
        body: impl Into<String>,
        redirect_url: impl Into<String>,
        total_fee: impl Into<Fee>,
    ) -> Self {
        Order::builder()
            .out_trade_no(out_trade_no)
            .body(body)
            .total_fee(total_fee)
            .trade_type(TradeType::Mweb)
            .redirect_url(redirect_url)
            .build()
    }

    /// Mini-program order.
    pub fn mini_app(
        out_trade_no: impl Into<String>,
        body: impl Into<String>,
        total_fee: impl Into<Fee>,
    ) -> Self {
        Order::builder()
            .out_trade_no(out_trade_no)
            .body(body)
            .total_fee(total_fee)
            .trade_type(TradeType::MiniApp)
            .build()
    }

    /// Check the order against the gateway's constraints.
    pub fn validate(&self) -> Result<()> {
        if self.out_trade_no.is_empty() {
            return Err(Error::params_invalid("out_trade_no must not be empty"));
        }
        if self.out_trade_no.chars().count() > MAX_TRADE_NO_LEN {
            return Err(Error::params_invalid(format!(
                "out_trade_no must not exceed {MAX_TRADE_NO_LEN} characters"
            )));
        }

        self.total_fee.validate()?;

        if self.trade_type == TradeType::Mweb
            && self.redirect_url.as_deref().is_none_or(str::is_empty)
        {
            return Err(Error::params_invalid("MWEB orders require a redirect_url"));
        }

        Ok(())
    }

    /// Validate and lay the order out as unsigned request parameters.
    pub fn into_parameters<V: Verifier>(self, config: &ClientConfig<V>) -> Result<OrderParameters> {
        self.validate()?;

        let mut params = OrderParameters::new();
        params
            .set(fields::OUT_TRADE_NO, self.out_trade_no)
            .set(fields::TOTAL_FEE, self.total_fee.to_string())
            .set(fields::BODY, self.body)
            .set(fields::ACCESS_KEY_ID, config.access_key.as_str())
            .set(fields::TRADE_TYPE, self.trade_type.as_str())
            .set(fields::NOTIFY_URL, config.notify_url.as_str());

        if let (TradeType::Mweb, Some(redirect_url)) = (self.trade_type, self.redirect_url) {
            params.set(fields::REDIRECT_URL, redirect_url);
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use crate::notify::AlwaysVerified;

    use super::*;

    fn config() -> ClientConfig<AlwaysVerified> {
        ClientConfig::builder()
            .access_key("ak-test")
            .secret("s3cr3t")
            .notify_url("http://example.com")
            .verifier(AlwaysVerified)
            .build()
    }

    #[test]
    fn test_native_parameters() {
        let params = Order::native("testorder-123", "测试商品", 1u64)
            .into_parameters(&config())
            .unwrap();

        assert_eq!(params.get("out_trade_no"), Some("testorder-123"));
        assert_eq!(params.get("total_fee"), Some("1"));
        assert_eq!(params.get("body"), Some("测试商品"));
        assert_eq!(params.get("accessKeyId"), Some("ak-test"));
        assert_eq!(params.get("trade_type"), Some("NATIVE"));
        assert_eq!(params.get("notify_url"), Some("http://example.com"));
        assert!(!params.contains("redirect_url"));
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn test_mweb_includes_redirect_url() {
        let params = Order::mweb("h5-1", "title", "https://shop.example.com/done", 100u32)
            .into_parameters(&config())
            .unwrap();

        assert_eq!(params.get("trade_type"), Some("MWEB"));
        assert_eq!(params.get("redirect_url"), Some("https://shop.example.com/done"));
    }

    #[test]
    fn test_redirect_url_dropped_for_other_trade_types() {
        let order = Order::builder()
            .out_trade_no("mini-1")
            .body("title")
            .total_fee(5u64)
            .trade_type(TradeType::MiniApp)
            .redirect_url("https://ignored.example.com")
            .build();
        let params = order.into_parameters(&config()).unwrap();

        assert_eq!(params.get("trade_type"), Some("MINIAPP"));
        assert!(!params.contains("redirect_url"));
    }

    #[test]
    fn test_zero_fee_is_amount_invalid() {
        for order in [
            Order::native("t-1", "title", 0u64),
            Order::mweb("t-2", "title", "https://r.example.com", 0u64),
            Order::mini_app("t-3", "title", 0u64),
        ] {
            assert!(matches!(order.validate(), Err(Error::AmountInvalid)));
        }
    }

    #[test]
    fn test_trade_no_constraints() {
        assert!(matches!(
            Order::native("", "title", 1u64).validate(),
            Err(Error::ParamsInvalid(_))
        ));

        let limit = "a".repeat(MAX_TRADE_NO_LEN);
        assert!(Order::native(limit.as_str(), "title", 1u64).validate().is_ok());

        let too_long = "a".repeat(MAX_TRADE_NO_LEN + 1);
        assert!(matches!(
            Order::mini_app(too_long, "title", 1u64).validate(),
            Err(Error::ParamsInvalid(_))
        ));
    }

    #[test]
    fn test_mweb_without_redirect_is_invalid() {
        let order = Order::builder()
            .out_trade_no("h5-2")
            .body("title")
            .total_fee(1u64)
            .trade_type(TradeType::Mweb)
            .build();
        assert!(matches!(order.validate(), Err(Error::ParamsInvalid(_))));

        let empty = Order::mweb("h5-3", "title", "", 1u64);
        assert!(matches!(empty.validate(), Err(Error::ParamsInvalid(_))));
    }
}
