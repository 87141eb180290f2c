//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{debug, error};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] diary_models::error::Error),

    #[error(transparent)]
    Auth(#[from] diary_auth::error::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Entry already exists for this date")]
    DuplicateDate,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Diary entry not found")]
    NotFound,

    #[error("Auth Token Creation")]
    AuthTokenCreation,

    #[error("Context Missing")]
    CtxMissing,
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        let (status, message) = match self {
            Error::Validation(message) => return (StatusCode::BAD_REQUEST, message.clone()),
            Error::DuplicateUsername => (StatusCode::BAD_REQUEST, "Username already exists"),
            Error::DuplicateDate => (StatusCode::BAD_REQUEST, "Entry already exists for this date"),
            Error::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            Error::CtxMissing => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Error::NotFound => (StatusCode::NOT_FOUND, "Diary entry not found"),
            Error::Auth(err) => match err {
                diary_auth::error::Error::InvalidToken => {
                    (StatusCode::UNAUTHORIZED, "Invalid authentication token")
                }
                diary_auth::error::Error::TokenMissing => {
                    (StatusCode::UNAUTHORIZED, "Authentication required")
                }
                diary_auth::error::Error::TokenExpired => {
                    (StatusCode::UNAUTHORIZED, "Authentication token expired")
                }
                diary_auth::error::Error::TokenCreation(_)
                | diary_auth::error::Error::PasswordHash(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            Error::AuthTokenCreation | Error::Models(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        (status, message.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            debug!("Rejecting request: {}", self);
        }

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status() {
        let cases = [
            (Error::validation("bad"), StatusCode::BAD_REQUEST),
            (Error::DuplicateUsername, StatusCode::BAD_REQUEST),
            (Error::DuplicateDate, StatusCode::BAD_REQUEST),
            (Error::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (Error::CtxMissing, StatusCode::UNAUTHORIZED),
            (
                Error::Auth(diary_auth::error::Error::TokenExpired),
                StatusCode::UNAUTHORIZED,
            ),
            (Error::NotFound, StatusCode::NOT_FOUND),
            (
                Error::Models(diary_models::error::Error::UniqueViolation("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = Error::Models(diary_models::error::Error::Migration(
            "relation diary_entry does not exist".into(),
        ));
        let (_, message) = err.status_and_message();
        assert_eq!(message, "Internal server error");
    }
}
