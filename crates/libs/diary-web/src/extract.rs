//! Request extractors.

use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::prelude::*;

/// `axum::Json` whose rejection is a [`Error::Validation`] (400) instead of
/// axum's plain-text 4xx.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        Error::Validation(value.body_text())
    }
}
