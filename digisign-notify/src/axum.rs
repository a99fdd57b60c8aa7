use std::{
    convert::Infallible,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use digisign_core::notify::Verifier;
use tower::Service;

use crate::{handler::NotifyHandler, response::AckResponse};

impl IntoResponse for AckResponse {
    fn into_response(self) -> Response {
        self.into_http_response().into_response()
    }
}

impl<V> Service<Request> for NotifyHandler<V>
where
    V: Verifier + Clone + Send + Sync + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let handler = self.clone();
        Box::pin(async move {
            let acknowledgment = handler.handle(request).await;
            Ok(AckResponse(acknowledgment).into_response())
        })
    }
}
