//! Core rules of the diary service.
//!
//! - [`credentials`]: registration, password verification and password change.
//! - [`auth_token`]: issuing and verifying the signed one-hour bearer tokens.
//! - [`ctx`] and [`mw_auth`]: the guard that turns a bearer token into a
//!   request [`ctx::Ctx`] and rejects requests without one.
//! - [`diary_entry`]: owner-scoped entry operations and the one entry per
//!   user per day rule.

pub mod auth_token;
pub mod calendar;
pub mod credentials;
pub mod ctx;
pub mod diary_entry;
pub mod error;
pub mod extract;
pub mod mw_auth;
pub mod prelude;
pub mod state;
