//! Miscellaneous common types used throughout the Digital Sign codebase.

use std::fmt::Debug;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Represents a key-value pair in the gateway protocol. The key is a `String`.
pub type Record<V> = std::collections::HashMap<String, V>;

/// Wire names of the order request fields.
pub mod fields {
    pub const OUT_TRADE_NO: &str = "out_trade_no";
    pub const TOTAL_FEE: &str = "total_fee";
    pub const BODY: &str = "body";
    pub const ACCESS_KEY_ID: &str = "accessKeyId";
    pub const TRADE_TYPE: &str = "trade_type";
    pub const NOTIFY_URL: &str = "notify_url";
    pub const REDIRECT_URL: &str = "redirect_url";
    pub const NONCE: &str = "nonce";
    pub const TIMESTAMP: &str = "timestamp";
    pub const SIGN: &str = "sign";
}

/// The symmetric secret shared with the gateway.
///
/// `Secret` never appears in `Debug` output, cannot be serialized and is wiped
/// from memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Self {
        Secret(secret.into())
    }

    /// Raw key bytes, for feeding the HMAC.
    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret(value.to_owned())
    }
}
