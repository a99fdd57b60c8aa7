use crate::types::Record;

/// Error types for Digital Sign core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field is missing or malformed.
    #[error("params is invalid: {0}")]
    ParamsInvalid(String),

    /// The order amount is zero.
    #[error("total amount must be greater than zero")]
    AmountInvalid,

    /// The HMAC key could not be initialised from the secret.
    #[error("invalid signing secret: {0}")]
    InvalidSecret(#[from] hmac::digest::InvalidLength),

    /// The gateway answered but refused the order.
    #[error("gateway rejected the order: {message}")]
    GatewayRejected {
        message: String,
        errors: Record<Vec<String>>,
    },
}

impl Error {
    pub(crate) fn params_invalid(reason: impl Into<String>) -> Self {
        Error::ParamsInvalid(reason.into())
    }
}

/// A specialized `Result` type for Digital Sign core operations.
pub type Result<T> = std::result::Result<T, Error>;
