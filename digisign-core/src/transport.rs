//! JSON schema of the gateway's unified order response.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    errors::{Error, Result},
    types::Record,
};

/// Reads `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnifiedOrderResponse {
    /// Whether the gateway accepted the order.
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// Validation errors, field name to messages.
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Record<Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub data: OrderData,
}

impl UnifiedOrderResponse {
    /// Order data on success, otherwise [`Error::GatewayRejected`] with the gateway's reasons.
    pub fn into_result(self) -> Result<OrderData> {
        if self.success {
            Ok(self.data)
        } else {
            Err(Error::GatewayRejected {
                message: self.message,
                errors: self.errors,
            })
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderData {
    #[serde(deserialize_with = "null_as_default")]
    pub access_key_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub applyment_business_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub notify_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub out_trade_no: String,
    /// The provider payload relayed by the gateway.
    #[serde(deserialize_with = "null_as_default")]
    pub request_data: RequestData,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_mch_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_fee: String,
    #[serde(deserialize_with = "null_as_default")]
    pub trade_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

/// Provider fields of a created order, e.g. the QR code URL or prepay ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestData {
    #[serde(deserialize_with = "null_as_default")]
    pub appid: String,
    /// QR code content for `NATIVE` orders.
    #[serde(deserialize_with = "null_as_default")]
    pub code_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mch_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nonce_str: String,
    /// Prepay ID for `MINIAPP` orders.
    #[serde(deserialize_with = "null_as_default")]
    pub prepay_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub result_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub return_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub return_msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sign: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_mch_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub trade_type: String,
}
