use digisign_core::{
    config::{ClientConfig, DEFAULT_HOST, UNIFIED_ORDER_PATH},
    notify::Verifier,
    order::Order,
    transport::UnifiedOrderResponse,
    types::Fee,
};
use http::{HeaderMap, HeaderName, HeaderValue, header::CONTENT_TYPE};
use url::Url;

/// Content type of order requests.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Creates orders on the gateway over HTTP.
///
/// Every call validates the order, signs it with the configured secret and posts the
/// exact signed bytes as a form body to [`UNIFIED_ORDER_PATH`].
///
/// # Type Parameters
///
/// - `V`: The notification verifier carried by the configuration. The client itself
///   never calls it; it is handed to [`notify_handler`](OrderClient::notify_handler).
#[derive(Debug, Clone)]
pub struct OrderClient<V: Verifier> {
    pub base_url: Url,
    pub client: reqwest::Client,
    pub headers: HeaderMap,
    pub config: ClientConfig<V>,
}

#[derive(Debug, thiserror::Error)]
pub enum OrderClientError {
    #[error("invalid order: {0}")]
    InvalidOrder(#[from] digisign_core::errors::Error),
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("Serialization/Deserialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl<V: Verifier> OrderClient<V> {
    /// Client for the production gateway.
    pub fn new(config: ClientConfig<V>) -> Result<Self, OrderClientError> {
        Ok(OrderClient::from_url(config, Url::parse(DEFAULT_HOST)?))
    }

    /// Client for a gateway at `base_url`, e.g. a staging host.
    ///
    /// Only the scheme, host and port of `base_url` are used: the order path is absolute,
    /// so a path prefix such as `http://host/prefix/` is replaced, not extended.
    pub fn from_url(config: ClientConfig<V>, base_url: Url) -> Self {
        OrderClient {
            base_url,
            client: reqwest::Client::new(),
            headers: HeaderMap::new(),
            config,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Add a header to every order request.
    pub fn header(mut self, key: &HeaderName, value: &HeaderValue) -> Self {
        self.headers.insert(key, value.to_owned());
        self
    }

    /// Create an in-store QR code order.
    pub async fn native_order(
        &self,
        trade_id: impl Into<String>,
        title: impl Into<String>,
        fee: impl Into<Fee>,
    ) -> Result<UnifiedOrderResponse, OrderClientError> {
        self.unified_order(Order::native(trade_id, title, fee)).await
    }

    /// Create a mobile web (H5) order; the payer returns to `redirect_url` afterwards.
    pub async fn mweb_order(
        &self,
        trade_id: impl Into<String>,
        title: impl Into<String>,
        redirect_url: impl Into<String>,
        fee: impl Into<Fee>,
    ) -> Result<UnifiedOrderResponse, OrderClientError> {
        self.unified_order(Order::mweb(trade_id, title, redirect_url, fee))
            .await
    }

    /// Create a mini-program order.
    pub async fn mini_app_order(
        &self,
        trade_id: impl Into<String>,
        title: impl Into<String>,
        fee: impl Into<Fee>,
    ) -> Result<UnifiedOrderResponse, OrderClientError> {
        self.unified_order(Order::mini_app(trade_id, title, fee))
            .await
    }

    /// Validate, sign and submit an order.
    ///
    /// Validation failures return before any request is made. The response is returned
    /// as parsed, whether or not the gateway accepted the order; see
    /// [`UnifiedOrderResponse::into_result`].
    pub async fn unified_order(
        &self,
        order: Order,
    ) -> Result<UnifiedOrderResponse, OrderClientError> {
        let mut params = order.into_parameters(&self.config)?;
        self.config.signer().sign(UNIFIED_ORDER_PATH, &mut params)?;

        let raw = self
            .client
            .post(self.base_url.join(UNIFIED_ORDER_PATH)?)
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(params.encode())
            .send()
            .await?
            .bytes()
            .await?;

        let response: UnifiedOrderResponse = serde_json::from_slice(&raw)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Unified order response: success={}, out_trade_no='{}', message='{}'",
            response.success,
            response.data.out_trade_no,
            response.message
        );

        Ok(response)
    }
}

#[cfg(feature = "notify")]
impl<V: Verifier + Clone> OrderClient<V> {
    /// Notification handler sharing this client's verifier.
    pub fn notify_handler(&self) -> digisign_notify::handler::NotifyHandler<V> {
        digisign_notify::handler::NotifyHandler::new(self.config.verifier.clone())
    }
}
