//! Notification verification and acknowledgment payloads.
//!
//! The decoder output is untrusted. Whether a notification is accepted is decided
//! entirely by the [`Verifier`] an integrator supplies.

use std::{fmt::Display, sync::Arc};

use crate::types::CallbackPayload;

/// Acknowledgment body for a rejected or unprocessable notification.
pub const FAILURE_ACK: &str = "<xml>\n<return_code><![CDATA[FAIL]]></return_code>\n</xml>";

/// Acknowledgment body for an accepted notification.
pub const SUCCESS_ACK: &str = "<xml>\n<return_code><![CDATA[SUCCESS]]></return_code>\n<return_msg><![CDATA[OK]]></return_msg>\n</xml>";

/// Decides whether a decoded notification is genuine and acceptable.
///
/// Implementations should check the notification signature and the business fields
/// (trade number, amount, status) against the merchant's own records.
pub trait Verifier {
    fn verify(&self, payload: &CallbackPayload) -> bool;

    /// Whether this verifier accepts notifications without checking them.
    fn is_permissive(&self) -> bool {
        false
    }
}

/// A verifier that accepts every notification.
///
/// **This is not secure.** It exists so the plumbing can be exercised before real
/// verification is wired in. With it, anyone who can reach the notify URL can mark
/// orders as paid. Production integrations must supply their own [`Verifier`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysVerified;

impl Verifier for AlwaysVerified {
    fn verify(&self, _payload: &CallbackPayload) -> bool {
        true
    }

    fn is_permissive(&self) -> bool {
        true
    }
}

/// Adapts a closure into a [`Verifier`].
///
/// ```
/// use digisign_core::notify::{Verifier, VerifyFn};
/// use digisign_core::types::CallbackPayload;
///
/// let verifier = VerifyFn(|payload: &CallbackPayload| payload.get("result_code") == Some("SUCCESS"));
///
/// let payload = CallbackPayload::from_iter([("result_code", "SUCCESS")]);
/// assert!(verifier.verify(&payload));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VerifyFn<F>(pub F);

impl<F> Verifier for VerifyFn<F>
where
    F: Fn(&CallbackPayload) -> bool,
{
    fn verify(&self, payload: &CallbackPayload) -> bool {
        (self.0)(payload)
    }
}

impl<V: Verifier + ?Sized> Verifier for &V {
    fn verify(&self, payload: &CallbackPayload) -> bool {
        (**self).verify(payload)
    }

    fn is_permissive(&self) -> bool {
        (**self).is_permissive()
    }
}

impl<V: Verifier + ?Sized> Verifier for Arc<V> {
    fn verify(&self, payload: &CallbackPayload) -> bool {
        (**self).verify(payload)
    }

    fn is_permissive(&self) -> bool {
        (**self).is_permissive()
    }
}

impl<V: Verifier + ?Sized> Verifier for Box<V> {
    fn verify(&self, payload: &CallbackPayload) -> bool {
        (**self).verify(payload)
    }

    fn is_permissive(&self) -> bool {
        (**self).is_permissive()
    }
}

/// The body returned to the gateway after a notification.
///
/// The protocol has no error channel: every notification is answered with exactly one
/// of these, always with a successful HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgment {
    Success,
    Failure,
}

impl Acknowledgment {
    pub fn from_verified(verified: bool) -> Self {
        if verified {
            Acknowledgment::Success
        } else {
            Acknowledgment::Failure
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Acknowledgment::Success)
    }

    /// The exact body bytes sent to the gateway.
    pub fn as_str(&self) -> &'static str {
        match self {
            Acknowledgment::Success => SUCCESS_ACK,
            Acknowledgment::Failure => FAILURE_ACK,
        }
    }
}

impl Display for Acknowledgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_acknowledgment_bodies_are_exact() {
        assert_eq!(
            Acknowledgment::Failure.as_str(),
            "<xml>\n<return_code><![CDATA[FAIL]]></return_code>\n</xml>"
        );
        assert_eq!(
            Acknowledgment::Success.to_string(),
            "<xml>\n<return_code><![CDATA[SUCCESS]]></return_code>\n<return_msg><![CDATA[OK]]></return_msg>\n</xml>"
        );
    }

    #[test]
    fn test_verifier_adapters() {
        let payload = CallbackPayload::from_iter([("out_trade_no", "abc")]);
        let known = VerifyFn(|p: &CallbackPayload| p.get("out_trade_no") == Some("known"));

        assert!(AlwaysVerified.verify(&payload));
        assert!(!known.verify(&payload));
        assert!(!(&known).verify(&payload));

        let shared: Arc<dyn Verifier + Send + Sync> = Arc::new(AlwaysVerified);
        assert!(shared.verify(&payload));

        let boxed: Box<dyn Verifier> = Box::new(known);
        assert!(!boxed.verify(&payload));

        assert!(shared.is_permissive());
        assert!(!boxed.is_permissive());
    }

    #[test]
    fn test_from_verified() {
        assert_eq!(Acknowledgment::from_verified(true), Acknowledgment::Success);
        assert_eq!(Acknowledgment::from_verified(false), Acknowledgment::Failure);
        assert!(!Acknowledgment::Failure.is_success());
    }
}
