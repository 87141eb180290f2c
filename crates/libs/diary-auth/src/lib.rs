//! Authentication primitives for the diary service.
//!
//! Password hashing lives in [`secret_hash`], token signing in [`jwt`].
//! Neither module knows about HTTP or the store.

pub mod auth_body;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret_hash;

/// Scheme expected in the `Authorization` header.
pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";
/// Header carrying the bearer token.
pub const AUTH_HEADER: &str = "authorization";
/// Prefix stripped from the header value before decoding.
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
/// Issuer claim written into and required from every token.
pub const ISS: &str = "diary";
