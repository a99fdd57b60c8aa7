use actix_web::{
    HttpRequest, HttpResponse, Responder, body::BoxBody, http::StatusCode, web::Bytes,
};
use digisign_core::notify::Verifier;

use crate::{
    handler::NotifyHandler,
    response::{AckResponse, CONTENT_TYPE_XML},
};

impl Responder for AckResponse {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(StatusCode::OK)
            .content_type(CONTENT_TYPE_XML)
            .body(self.0.as_str())
    }
}

impl<V: Verifier> NotifyHandler<V> {
    /// Handle a notification inside an actix-web route.
    ///
    /// Extract the body as `Result<web::Bytes, actix_web::Error>` so that read failures
    /// are acknowledged instead of turned into an error status:
    ///
    /// ```rust,ignore
    /// async fn notify(
    ///     handler: web::Data<NotifyHandler<MyVerifier>>,
    ///     req: HttpRequest,
    ///     body: Result<web::Bytes, actix_web::Error>,
    /// ) -> AckResponse {
    ///     handler.handle_actix(&req, body)
    /// }
    /// ```
    pub fn handle_actix(
        &self,
        request: &HttpRequest,
        body: Result<Bytes, actix_web::Error>,
    ) -> AckResponse {
        AckResponse(self.acknowledge(request.method().as_str(), body))
    }
}
