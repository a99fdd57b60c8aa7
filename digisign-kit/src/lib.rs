//! # Digital Sign Kit
//!
//! Client SDK for creating WeChat Pay orders through the Digital Sign gateway and for
//! answering its payment notifications.
//!
//! ## Related Crates
//!
//! - **`digisign-core`**: protocol types, request signing and the notification decoder.
//!   Re-exported here as [`config`], [`errors`], [`notify`], [`order`], [`signer`],
//!   [`transport`], [`types`] and [`xml`].
//! - **`digisign-notify`**: the notification handler, re-exported as [`notify_handler`]
//!   with the `notify` feature (on by default).
//!
//! ## Creating Orders
//!
//! ```no_run
//! # async fn run() -> Result<(), digisign_kit::order_client::OrderClientError> {
//! use digisign_kit::{config::ClientConfig, notify::AlwaysVerified, order_client::OrderClient};
//!
//! let config = ClientConfig::builder()
//!     .access_key("ak-123")
//!     .secret("s3cr3t")
//!     .notify_url("https://shop.example.com/pay/notify")
//!     .verifier(AlwaysVerified)
//!     .build();
//!
//! let client = OrderClient::new(config)?;
//! let response = client.native_order("order-20240101-0001", "Coffee", 1250u64).await?;
//!
//! if response.success {
//!     println!("QR code: {}", response.data.request_data.code_url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Orders are validated before anything is sent: an empty or over-long trade number
//! fails with `ParamsInvalid`, a zero fee with `AmountInvalid`.
//!
//! ## Receiving Notifications
//!
//! [`OrderClient::notify_handler`](order_client::OrderClient::notify_handler) returns a
//! handler that shares the client's verifier. Replace `AlwaysVerified` with a real
//! [`Verifier`](notify::Verifier) before going live.

pub mod config {
    pub use digisign_core::config::*;
}

pub mod errors {
    pub use digisign_core::errors::*;
}

pub mod notify {
    pub use digisign_core::notify::*;
}

pub mod order {
    pub use digisign_core::order::*;
}

pub mod signer {
    pub use digisign_core::signer::*;
}

pub mod transport {
    pub use digisign_core::transport::*;
}

pub mod types {
    pub use digisign_core::types::*;
}

pub mod xml {
    pub use digisign_core::xml::*;
}

pub mod order_client;

#[cfg(feature = "notify")]
pub mod notify_handler {
    pub use digisign_notify::*;
}
