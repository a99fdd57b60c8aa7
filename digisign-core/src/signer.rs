//! Request signing for outbound gateway calls.
//!
//! Every request carries a fresh `nonce` and `timestamp`, and a `sign` field computed as
//!
//! ```text
//! base64(HMAC-SHA256(secret, "<endpoint>?<canonical form encoding without sign>"))
//! ```
//!
//! Two signatures of the same logical request therefore never match, which is what the
//! gateway relies on for replay protection.

use base64::{Engine, prelude::BASE64_STANDARD};
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;

use crate::{
    errors::{Error, Result},
    types::{OrderParameters, Secret, fields},
};

type HmacSha256 = Hmac<Sha256>;

/// Length of the generated nonce.
pub const NONCE_LEN: usize = 32;

/// The gateway reads timestamps in Asia/Shanghai wall-clock time (UTC+08:00, no DST).
const GATEWAY_UTC_OFFSET_SECS: i64 = 8 * 60 * 60;

/// Gateway-local time followed by a literal `Z`. The suffix is wrong for the zone,
/// but it is what the gateway parses.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Random alphanumeric nonce of [`NONCE_LEN`] characters from the thread-local CSPRNG.
pub fn generate_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Render `now` as the gateway expects it in the `timestamp` field.
pub fn gateway_timestamp(now: DateTime<Utc>) -> String {
    let local = now.naive_utc() + TimeDelta::seconds(GATEWAY_UTC_OFFSET_SECS);
    local.format(TIMESTAMP_FORMAT).to_string()
}

/// Signs request parameters with the shared secret.
///
/// The signer only borrows the secret; obtain one from
/// [`ClientConfig::signer`](crate::config::ClientConfig::signer).
#[derive(Debug, Clone, Copy)]
pub struct RequestSigner<'a> {
    secret: &'a Secret,
}

impl<'a> RequestSigner<'a> {
    pub fn new(secret: &'a Secret) -> Self {
        RequestSigner { secret }
    }

    /// Insert a fresh `nonce`, the current `timestamp` and the resulting `sign`.
    pub fn sign(&self, endpoint: &str, params: &mut OrderParameters) -> Result<()> {
        self.sign_with(endpoint, params, generate_nonce(), Utc::now())
    }

    /// Same as [`sign`](Self::sign) with caller-provided nonce and clock reading.
    pub fn sign_with(
        &self,
        endpoint: &str,
        params: &mut OrderParameters,
        nonce: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if endpoint.is_empty() {
            return Err(Error::params_invalid("endpoint path must not be empty"));
        }

        params.set(fields::NONCE, nonce);
        params.set(fields::TIMESTAMP, gateway_timestamp(now));

        let signature = self.signature(endpoint, params)?;
        params.set(fields::SIGN, signature);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Signed request: endpoint='{}', out_trade_no='{}', nonce='{}'",
            endpoint,
            params.get(fields::OUT_TRADE_NO).unwrap_or_default(),
            params.get(fields::NONCE).unwrap_or_default(),
        );

        Ok(())
    }

    /// Compute the signature over `params`, ignoring any `sign` entry already present.
    pub fn signature(&self, endpoint: &str, params: &OrderParameters) -> Result<String> {
        let mac = self.mac(endpoint, params)?;
        Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Check the `sign` field of `params` against a recomputed signature.
    ///
    /// Comparison is constant time. Missing or non-base64 signatures fail.
    pub fn verify(&self, endpoint: &str, params: &OrderParameters) -> bool {
        let Some(expected) = params
            .get(fields::SIGN)
            .and_then(|sign| BASE64_STANDARD.decode(sign).ok())
        else {
            return false;
        };

        self.mac(endpoint, params)
            .map(|mac| mac.verify_slice(&expected).is_ok())
            .unwrap_or(false)
    }

    fn mac(&self, endpoint: &str, params: &OrderParameters) -> Result<HmacSha256> {
        if endpoint.is_empty() {
            return Err(Error::params_invalid("endpoint path must not be empty"));
        }

        let mut mac = HmacSha256::new_from_slice(self.secret.expose())?;
        mac.update(endpoint.as_bytes());
        mac.update(b"?");
        mac.update(params.encode_unsigned().as_bytes());
        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine, prelude::BASE64_STANDARD};
    use chrono::{TimeZone, Utc};
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    use super::*;

    fn business_params() -> OrderParameters {
        OrderParameters::from_iter([
            ("out_trade_no", "testorder-123"),
            ("total_fee", "1"),
            ("body", "测试商品"),
            ("accessKeyId", "ak-test"),
            ("trade_type", "NATIVE"),
            ("notify_url", "http://example.com"),
        ])
    }

    #[test]
    fn test_gateway_timestamp_is_shanghai_time_with_z_suffix() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 20, 30, 5).unwrap();
        assert_eq!(gateway_timestamp(now), "2024-01-02T04:30:05Z");
    }

    #[test]
    fn test_nonce_is_alphanumeric_and_fresh() {
        let a = generate_nonce();
        let b = generate_nonce();
        assert_eq!(a.len(), NONCE_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_sign_with_matches_manual_hmac() {
        let secret = Secret::new("s3cr3t");
        let signer = RequestSigner::new(&secret);
        let mut params = business_params();
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();

        signer
            .sign_with("/api/pay/wechat", &mut params, "n0nce", now)
            .unwrap();

        assert_eq!(params.get("nonce"), Some("n0nce"));
        assert_eq!(params.get("timestamp"), Some("2024-05-06T15:08:09Z"));

        let mut unsigned = params.clone();
        unsigned.remove("sign");
        let message = format!("/api/pay/wechat?{}", unsigned.encode());
        let mut mac = Hmac::<Sha256>::new_from_slice(b"s3cr3t").unwrap();
        mac.update(message.as_bytes());
        let expected = BASE64_STANDARD.encode(mac.finalize().into_bytes());

        assert_eq!(params.get("sign"), Some(expected.as_str()));
    }

    #[test]
    fn test_sign_twice_yields_fresh_values() {
        let secret = Secret::new("s3cr3t");
        let signer = RequestSigner::new(&secret);

        let mut first = business_params();
        let mut second = business_params();
        signer.sign("/api/pay/wechat", &mut first).unwrap();
        signer
            .sign_with(
                "/api/pay/wechat",
                &mut second,
                generate_nonce(),
                Utc::now() + TimeDelta::seconds(1),
            )
            .unwrap();

        assert_ne!(first.get("nonce"), second.get("nonce"));
        assert_ne!(first.get("timestamp"), second.get("timestamp"));
        assert_ne!(first.get("sign"), second.get("sign"));
    }

    #[test]
    fn test_signature_is_self_consistent() {
        let secret = Secret::new("s3cr3t");
        let signer = RequestSigner::new(&secret);
        let mut params = business_params();
        signer.sign("/api/pay/wechat", &mut params).unwrap();

        let recomputed = signer.signature("/api/pay/wechat", &params).unwrap();
        assert_eq!(params.get("sign"), Some(recomputed.as_str()));
        assert!(signer.verify("/api/pay/wechat", &params));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let secret = Secret::new("s3cr3t");
        let signer = RequestSigner::new(&secret);
        let mut params = business_params();
        signer.sign("/api/pay/wechat", &mut params).unwrap();

        let mut tampered = params.clone();
        tampered.set("total_fee", "100");
        assert!(!signer.verify("/api/pay/wechat", &tampered));

        assert!(!signer.verify("/api/pay/other", &params));

        let other_secret = Secret::new("another");
        assert!(!RequestSigner::new(&other_secret).verify("/api/pay/wechat", &params));

        let mut unsigned = params.clone();
        unsigned.remove("sign");
        assert!(!signer.verify("/api/pay/wechat", &unsigned));
    }

    #[test]
    fn test_empty_endpoint_is_rejected() {
        let secret = Secret::new("s3cr3t");
        let mut params = business_params();
        let result = RequestSigner::new(&secret).sign("", &mut params);
        assert!(matches!(result, Err(Error::ParamsInvalid(_))));
    }
}
