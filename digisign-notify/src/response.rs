use digisign_core::notify::Acknowledgment;
use http::{HeaderValue, Response, header::CONTENT_TYPE};

/// Content type of acknowledgment bodies.
pub const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

/// HTTP response carrying an [`Acknowledgment`].
///
/// Always `200 OK`; the outcome is in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckResponse(pub Acknowledgment);

impl AckResponse {
    pub fn acknowledgment(&self) -> Acknowledgment {
        self.0
    }

    pub fn into_http_response(self) -> Response<String> {
        let mut response = Response::new(self.0.as_str().to_owned());
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_XML));
        response
    }
}

impl From<Acknowledgment> for AckResponse {
    fn from(acknowledgment: Acknowledgment) -> Self {
        AckResponse(acknowledgment)
    }
}
