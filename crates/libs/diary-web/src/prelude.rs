//! Common types and utilities.

pub use crate::error::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Newtype for conversions between foreign types.
pub struct W<T>(pub T);
