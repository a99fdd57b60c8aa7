//! Digital Sign core library.
//!
//! This library provides the protocol types and the two pieces of logic every
//! integration with the Digital Sign WeChat Pay gateway needs:
//!
//! - [`signer`]: deterministic HMAC-SHA256 signing of outbound order parameters.
//! - [`xml`]: the flat XML decoder used for inbound payment notifications.
//!
//! Nothing in this crate performs I/O. The order client lives in `digisign-kit`
//! and the notification handler in `digisign-notify`.

pub mod config;
pub mod errors;
pub mod notify;
pub mod order;
pub mod signer;
pub mod transport;
pub mod types;
pub mod xml;
