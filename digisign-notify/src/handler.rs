//! Payment notification handling.
//!
//! For details, see the [`NotifyHandler`] struct documentation.

use std::fmt::Display;

use bytes::Bytes;
use digisign_core::{
    notify::{Acknowledgment, Verifier},
    types::CallbackPayload,
    xml,
};
use http::{Method, Request};
use http_body::Body;
use http_body_util::BodyExt;

use crate::errors::NotifyError;

/// Handles payment notifications posted by the gateway.
///
/// ## Type Parameters
///
/// - `V`: The [`Verifier`] deciding whether a decoded notification is accepted.
///
/// ## Step-by-Step API
///
/// [`handle`](NotifyHandler::handle) runs the standard flow, which is built from these steps:
///
/// 1. **Check Method** ([`check_method`](NotifyHandler::check_method)): only `POST` is accepted.
/// 2. **Read Body** ([`read_body`](NotifyHandler::read_body)): collect the request body.
/// 3. **Decode** ([`decode`](NotifyHandler::decode)): flatten the XML body into a [`CallbackPayload`].
/// 4. **Verify** ([`verify`](NotifyHandler::verify)): ask the verifier.
/// 5. **Respond** ([`respond`](NotifyHandler::respond)): turn the outcome into an [`Acknowledgment`].
///
/// Any failing step short-circuits to [`Acknowledgment::Failure`]. `handle` itself cannot fail.
#[derive(Debug, Clone)]
pub struct NotifyHandler<V: Verifier> {
    pub verifier: V,
}

impl<V: Verifier> NotifyHandler<V> {
    pub fn new(verifier: V) -> Self {
        #[cfg(feature = "tracing")]
        if verifier.is_permissive() {
            tracing::warn!(
                "Notification handler built with a permissive verifier; every notification will be accepted"
            );
        }

        NotifyHandler { verifier }
    }

    /// Standard notification flow. Always produces exactly one acknowledgment.
    pub async fn handle<B>(&self, request: Request<B>) -> Acknowledgment
    where
        B: Body,
        B::Error: Display,
    {
        let result = self.process_request(request).await;
        self.respond(result)
    }

    /// Run every step up to verification, returning the accepted payload.
    pub async fn process_request<B>(
        &self,
        request: Request<B>,
    ) -> Result<CallbackPayload, NotifyError>
    where
        B: Body,
        B::Error: Display,
    {
        let (parts, body) = request.into_parts();
        self.check_method(parts.method.as_str())?;
        let bytes = self.read_body(body).await?;
        self.accept(&bytes)
    }

    /// Flow for frameworks that hand over the method and an already-read body.
    pub fn acknowledge<B, E>(&self, method: &str, body: Result<B, E>) -> Acknowledgment
    where
        B: AsRef<[u8]>,
        E: Display,
    {
        let result = self
            .check_method(method)
            .and_then(|()| body.map_err(|err| NotifyError::BodyRead(err.to_string())))
            .and_then(|bytes| self.accept(bytes.as_ref()));
        self.respond(result)
    }

    /// Only `POST` notifications are processed.
    pub fn check_method(&self, method: &str) -> Result<(), NotifyError> {
        if method == Method::POST.as_str() {
            Ok(())
        } else {
            Err(NotifyError::MethodNotAllowed(method.to_owned()))
        }
    }

    /// Collect the whole request body.
    pub async fn read_body<B>(&self, body: B) -> Result<Bytes, NotifyError>
    where
        B: Body,
        B::Error: Display,
    {
        body.collect()
            .await
            .map(|collected| collected.to_bytes())
            .map_err(|err| NotifyError::BodyRead(err.to_string()))
    }

    pub fn decode(&self, body: &[u8]) -> Result<CallbackPayload, NotifyError> {
        Ok(xml::decode_bytes(body)?)
    }

    pub fn verify(&self, payload: &CallbackPayload) -> Result<(), NotifyError> {
        if self.verifier.verify(payload) {
            Ok(())
        } else {
            Err(NotifyError::VerificationRejected)
        }
    }

    /// Map the outcome of the flow onto an acknowledgment, logging rejections.
    pub fn respond(&self, result: Result<CallbackPayload, NotifyError>) -> Acknowledgment {
        match result {
            Ok(_payload) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "Notification accepted: out_trade_no='{}', transaction_id='{}'",
                    _payload.get("out_trade_no").unwrap_or_default(),
                    _payload.get("transaction_id").unwrap_or_default(),
                );

                Acknowledgment::Success
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Notification rejected: {_err}");

                Acknowledgment::Failure
            }
        }
    }

    fn accept(&self, body: &[u8]) -> Result<CallbackPayload, NotifyError> {
        let payload = self.decode(body)?;
        self.verify(&payload)?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use digisign_core::{
        notify::{Acknowledgment, AlwaysVerified, VerifyFn},
        types::CallbackPayload,
    };

    use crate::errors::NotifyError;

    use super::NotifyHandler;

    const PAID: &str = "<xml><return_code>SUCCESS</return_code><out_trade_no>abc</out_trade_no></xml>";

    #[test]
    fn test_acknowledge_accepts_verified_post() {
        let handler = NotifyHandler::new(AlwaysVerified);
        let ack = handler.acknowledge("POST", Ok::<_, std::io::Error>(PAID));
        assert_eq!(ack, Acknowledgment::Success);
    }

    #[test]
    fn test_acknowledge_skips_decoding_for_other_methods() {
        let calls = AtomicUsize::new(0);
        let handler = NotifyHandler::new(VerifyFn(|_: &CallbackPayload| {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        }));

        for method in ["GET", "PUT", "post"] {
            let ack = handler.acknowledge(method, Ok::<_, std::io::Error>(PAID));
            assert_eq!(ack, Acknowledgment::Failure);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_acknowledge_absorbs_body_errors() {
        let handler = NotifyHandler::new(AlwaysVerified);
        let ack = handler.acknowledge(
            "POST",
            Err::<&str, _>(std::io::Error::other("connection reset")),
        );
        assert_eq!(ack, Acknowledgment::Failure);
    }

    #[test]
    fn test_acknowledge_rejects_malformed_xml() {
        let handler = NotifyHandler::new(AlwaysVerified);
        let ack = handler.acknowledge("POST", Ok::<_, std::io::Error>("<xml><return_code>"));
        assert_eq!(ack, Acknowledgment::Failure);
    }

    #[test]
    fn test_verifier_sees_decoded_payload() {
        let handler = NotifyHandler::new(VerifyFn(|p: &CallbackPayload| {
            p.get("out_trade_no") == Some("abc") && p.get("return_code") == Some("SUCCESS")
        }));

        assert_eq!(
            handler.acknowledge("POST", Ok::<_, std::io::Error>(PAID)),
            Acknowledgment::Success
        );
        assert!(matches!(
            handler.accept(b"<xml><out_trade_no>other</out_trade_no></xml>"),
            Err(NotifyError::VerificationRejected)
        ));
    }
}
