use digisign_core::xml::DecodeError;

/// Why a notification was answered with the failure acknowledgment.
///
/// These never reach the gateway; [`NotifyHandler`](crate::handler::NotifyHandler)
/// logs them and responds with `FAIL`.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notifications must be POSTed, got {0}")]
    MethodNotAllowed(String),

    #[error("failed to read notification body: {0}")]
    BodyRead(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("notification rejected by verifier")]
    VerificationRejected,
}
