use std::fmt::Debug;

use bon::Builder;

use crate::{notify::Verifier, signer::RequestSigner, types::Secret};

/// Gateway base URL.
pub const DEFAULT_HOST: &str = "https://pay.digital-sign.cn";

/// Path of the unified order endpoint. Also the path that is signed.
pub const UNIFIED_ORDER_PATH: &str = "/api/pay/wechat";

/// Static client configuration, fixed at startup.
///
/// ```
/// use digisign_core::{config::ClientConfig, notify::VerifyFn, types::CallbackPayload};
///
/// let config = ClientConfig::builder()
///     .access_key("ak-123")
///     .secret("s3cr3t")
///     .notify_url("https://shop.example.com/pay/notify")
///     .verifier(VerifyFn(|p: &CallbackPayload| p.get("result_code") == Some("SUCCESS")))
///     .build();
///
/// assert!(!format!("{config:?}").contains("s3cr3t"));
/// ```
#[derive(Builder, Clone)]
pub struct ClientConfig<V: Verifier> {
    /// Access key identifying the merchant (`accessKeyId`).
    #[builder(into)]
    pub access_key: String,
    /// Signing secret. Never logged or serialized.
    #[builder(into)]
    secret: Secret,
    /// URL the gateway posts payment notifications to.
    #[builder(into)]
    pub notify_url: String,
    /// Notification verifier. See [`AlwaysVerified`](crate::notify::AlwaysVerified)
    /// for why the permissive one is only for testing.
    pub verifier: V,
}

impl<V: Verifier> ClientConfig<V> {
    pub fn signer(&self) -> RequestSigner<'_> {
        RequestSigner::new(&self.secret)
    }
}

impl<V: Verifier> Debug for ClientConfig<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_key", &self.access_key)
            .field("secret", &self.secret)
            .field("notify_url", &self.notify_url)
            .finish_non_exhaustive()
    }
}
