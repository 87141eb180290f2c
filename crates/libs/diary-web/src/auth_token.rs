//! Authentication token management for web requests.

use chrono::{TimeDelta, Utc};
use diary_auth::{
    ISS,
    auth_body::AuthBody,
    jwt::{JwtKeys, jwt_decode, jwt_encode},
};
use diary_models::user::diary_user::DiaryUser;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::prelude::*;

/// Lifetime of every issued token. There is no refresh.
pub const USER_TOKEN_EXPIRATION_TIME: TimeDelta = TimeDelta::hours(1);

/// JWT claims identifying a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Login name at issue time.
    pub username: String,
    /// Issuer.
    pub iss: String,
    /// Expiration time.
    pub exp: i64,
    /// Issued at time.
    pub iat: i64,
    /// Not before time.
    pub nbf: i64,
    /// JWT ID.
    pub jti: Uuid,
}

impl AuthToken {
    /// Creates claims for `id` valid for `token_duration` from now.
    ///
    /// ```rust
    /// use diary_web::auth_token::{AuthToken, USER_TOKEN_EXPIRATION_TIME};
    /// use uuid::Uuid;
    ///
    /// let token = AuthToken::new_user(&Uuid::new_v4(), "alice", USER_TOKEN_EXPIRATION_TIME).unwrap();
    /// assert_eq!(token.exp - token.iat, 3600);
    /// ```
    pub fn new_user(id: &Uuid, username: &str, token_duration: TimeDelta) -> Result<Self> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(token_duration)
            .ok_or(Error::AuthTokenCreation)?;

        Ok(Self {
            sub: *id,
            username: username.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            iss: String::from(ISS),
            jti: Uuid::new_v4(),
        })
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Issues the login token for `user`.
pub fn issue_token(keys: &JwtKeys, user: &DiaryUser) -> Result<AuthBody> {
    let claims = AuthToken::new_user(&user.id, &user.username, USER_TOKEN_EXPIRATION_TIME)?;
    encode_token(keys, &claims)
}

/// Encodes an authentication token into a JWT string.
pub fn encode_token(keys: &JwtKeys, token: &AuthToken) -> Result<AuthBody> {
    let token = jwt_encode(keys, token).map_err(|err| {
        error!("Failed to encode JWT {err}");
        err
    })?;

    Ok(AuthBody::new(token))
}

/// Verifies a JWT string and returns its claims.
///
/// Signature, structure and issuer failures are `InvalidToken`; a token whose
/// `exp` is not in the future is `TokenExpired`.
pub fn decode_token(keys: &JwtKeys, token: &str) -> diary_auth::prelude::Result<AuthToken> {
    let claims = jwt_decode::<AuthToken>(keys, token)?.claims;
    if claims.is_expired() {
        return Err(diary_auth::error::Error::TokenExpired);
    }
    Ok(claims)
}
