use digisign_kit::{config::ClientConfig, notify::AlwaysVerified, order_client::OrderClient};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let access_key = std::env::var("DIGISIGN_ACCESS_KEY")
        .expect("Please set `DIGISIGN_ACCESS_KEY` in environment variables");
    let secret = std::env::var("DIGISIGN_SECRET")
        .expect("Please set `DIGISIGN_SECRET` in environment variables");
    let notify_url = std::env::var("DIGISIGN_NOTIFY_URL")
        .unwrap_or_else(|_| "https://example.com/pay/notify".to_string());

    // Orders only; notifications are not handled in this example.
    let config = ClientConfig::builder()
        .access_key(access_key)
        .secret(secret)
        .notify_url(notify_url)
        .verifier(AlwaysVerified)
        .build();

    let client = OrderClient::new(config).expect("default gateway URL must be valid");
    let response = client
        .native_order("testorder-123", "测试商品", 1u64)
        .await
        .expect("Failed to create order");

    match response.into_result() {
        Ok(data) => tracing::info!("Scan to pay: {}", data.request_data.code_url),
        Err(err) => tracing::error!("Order rejected: {err}"),
    }
}
