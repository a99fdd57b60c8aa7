//! # Digital Sign Notify
//!
//! A framework-agnostic handler for the payment notifications the Digital Sign gateway
//! posts to a merchant's `notify_url`.
//!
//! [`NotifyHandler`](handler::NotifyHandler) takes a notification through
//! `Received → Decoded → Verified | Rejected → Responded` and always answers with exactly
//! one acknowledgment body. Internal failures never surface as HTTP errors because the
//! gateway has no way to receive them.
//!
//! ## Quick Start
//!
//! ```rust
//! use digisign_core::{notify::VerifyFn, types::CallbackPayload};
//! use digisign_notify::handler::NotifyHandler;
//!
//! let handler = NotifyHandler::new(VerifyFn(|payload: &CallbackPayload| {
//!     // Check the notification signature and the order against your own records here.
//!     payload.get("result_code") == Some("SUCCESS")
//! }));
//! ```
//!
//! ## Verification
//!
//! The decoded payload is untrusted. The [`Verifier`](digisign_core::notify::Verifier)
//! you pass in is the only thing standing between the notify URL and your order
//! state. [`AlwaysVerified`](digisign_core::notify::AlwaysVerified) accepts everything
//! and must not be used in production.
//!
//! ## Framework Integration
//!
//! With the `axum` feature, `NotifyHandler` is a `tower::Service` and can be mounted directly:
//!
//! ```rust,ignore
//! let app = Router::new().route_service("/pay/notify", handler);
//! ```
//!
//! With the `actix-web` feature, use
//! [`NotifyHandler::handle_actix`](handler::NotifyHandler::handle_actix) from a route
//! that extracts `Result<web::Bytes, actix_web::Error>`.
//!
//! ## Modules
//!
//! - [`handler`]: The [`NotifyHandler`](handler::NotifyHandler) and its step-by-step API.
//! - [`response`]: [`AckResponse`](response::AckResponse), the HTTP rendering of an acknowledgment.
//! - [`errors`]: [`NotifyError`](errors::NotifyError), the reasons a notification is rejected.

pub mod errors;
pub mod handler;
pub mod response;

#[cfg(feature = "axum")]
mod axum;

#[cfg(feature = "actix-web")]
mod actix;
