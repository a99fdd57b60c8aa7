use axum::Router;
use digisign_core::{notify::VerifyFn, types::CallbackPayload};
use digisign_notify::handler::NotifyHandler;

/// Stand-in for a lookup against the merchant's order store.
fn is_known_order(out_trade_no: &str) -> bool {
    out_trade_no.starts_with("testorder-")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let handler = NotifyHandler::new(VerifyFn(|payload: &CallbackPayload| {
        payload.get("return_code") == Some("SUCCESS")
            && payload.get("result_code") == Some("SUCCESS")
            && payload.get("out_trade_no").is_some_and(is_known_order)
    }));

    let app = Router::new().route_service("/pay/notify", handler);

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16 integer");
    let addr: std::net::SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Starting notify server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app).await.expect("Server failed");
}
