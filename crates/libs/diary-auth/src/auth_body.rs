//! Login response structure.

use serde::{Deserialize, Serialize};

use super::CONNECTION_TOKEN_TYPE;

/// Signed token handed back after a successful login.
///
/// # JSON Format
///
/// ```json
/// {
///   "message": "Login successful",
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "Bearer"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthBody {
    /// Human readable outcome.
    pub message: String,
    /// The signed token.
    pub token: String,
    /// The token type (always "Bearer").
    pub token_type: String,
}

impl AuthBody {
    /// Wraps a freshly signed token.
    ///
    /// ```rust
    /// use diary_auth::auth_body::AuthBody;
    ///
    /// let response = AuthBody::new("some_token".to_string());
    /// assert_eq!(response.token_type, "Bearer");
    /// ```
    pub fn new(token: String) -> Self {
        Self {
            message: String::from("Login successful"),
            token,
            token_type: String::from(CONNECTION_TOKEN_TYPE),
        }
    }
}
