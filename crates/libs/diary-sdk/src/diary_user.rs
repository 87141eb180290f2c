use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/users`. Unknown keys are rejected.
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiaryUserPost {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/users/login`. Unknown keys are rejected.
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiaryUserLoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiaryUserApi {
    pub message: String,
    pub id: Uuid,
    pub username: String,
}

/// Body of `PUT /api/users/password`.
#[derive(Deserialize, Serialize)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

impl DiaryUserPost {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl DiaryUserLoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for DiaryUserPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiaryUserPost")
            .field("username", &self.username)
            .field("password", &"REDACTED")
            .finish()
    }
}

impl fmt::Debug for DiaryUserLoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiaryUserLoginRequest")
            .field("username", &self.username)
            .field("password", &"REDACTED")
            .finish()
    }
}

impl fmt::Debug for PasswordChangeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChangeRequest(REDACTED)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_passwords() {
        let post = DiaryUserPost::new("alice", "secret1");
        let login = DiaryUserLoginRequest::new("alice", "secret1");
        assert!(!format!("{post:?}").contains("secret1"));
        assert!(!format!("{login:?}").contains("secret1"));
        assert!(format!("{login:?}").contains("alice"));
    }

    #[test]
    fn credentials_reject_unknown_keys() {
        let body = r#"{"username":"alice","password":"secret1","admin":true}"#;
        assert!(serde_json::from_str::<DiaryUserPost>(body).is_err());
        assert!(serde_json::from_str::<DiaryUserLoginRequest>(body).is_err());

        let body = r#"{"username":"alice","password":"secret1"}"#;
        assert!(serde_json::from_str::<DiaryUserPost>(body).is_ok());
    }
}
