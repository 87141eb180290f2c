//! JWT signing and verification.
//!
//! Tokens are HS256-signed with a single process-wide secret held in
//! [`JwtKeys`]. The keys are built once at startup and shared with whoever
//! issues or verifies tokens.
//!
//! Every token must carry an `iss` claim equal to [`crate::ISS`] and an `exp`
//! claim. Expiry itself is left to the caller, which owns the clock policy.
//!
//! ```rust
//! use diary_auth::jwt::{JwtKeys, jwt_decode, jwt_encode};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
//! struct Claims {
//!     sub: String,
//!     iss: String,
//!     exp: i64,
//! }
//!
//! let keys = JwtKeys::new(b"MySuperSecret");
//! let claims = Claims {
//!     sub: "alice".to_string(),
//!     iss: diary_auth::ISS.to_string(),
//!     exp: 4118335200,
//! };
//!
//! let token = jwt_encode(&keys, &claims).unwrap();
//! let decoded = jwt_decode::<Claims>(&keys, &token).unwrap();
//! assert_eq!(claims, decoded.claims);
//! ```

use std::fmt;

use crate::{ISS, prelude::*};

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Serialize, de::DeserializeOwned};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Key pair derived from the signing secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Creates a new key pair from the raw secret bytes.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JwtKeys(REDACTED)")
    }
}

/// Signs `body` into a compact JWT.
pub fn jwt_encode<T>(keys: &JwtKeys, body: &T) -> Result<String>
where
    T: Serialize,
{
    let header = Header::new(ALGORITHM);
    Ok(encode(&header, body, &keys.encoding)?)
}

/// Verifies the signature, algorithm and issuer of `token` and extracts its claims.
///
/// Any structural or signature problem comes back as [`Error::InvalidToken`];
/// nothing in here panics on attacker-controlled input.
pub fn jwt_decode<T>(keys: &JwtKeys, token: &str) -> Result<TokenData<T>>
where
    T: DeserializeOwned,
{
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_issuer(&[ISS]);

    decode(token, &keys.decoding, &validation).map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        _ => Error::InvalidToken,
    })
}
