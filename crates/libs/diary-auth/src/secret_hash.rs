//! Password hashing and verification using Argon2.
//!
//! Hashes are PHC strings, so the salt and parameters travel with the hash
//! and verification needs nothing but the stored string.
//!
//! ```rust
//! use diary_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let hash = generate_secret_hash("user_password_123").unwrap();
//! assert!(is_secret_valid("user_password_123", &hash).unwrap());
//! assert!(!is_secret_valid("wrong_password", &hash).unwrap());
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Hashes `pw` with Argon2id and a fresh random salt.
///
/// The caller is responsible for any normalisation (such as trimming)
/// before the secret reaches this function.
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Verifies a password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch and `Err` only when the stored hash cannot
/// be parsed. The comparison itself is argon2's constant-time check.
pub fn is_secret_valid(pw: &str, hash: &str) -> Result<bool> {
    let hash = PasswordHashString::new(hash)?;

    Ok(Argon2::default()
        .verify_password(pw.as_bytes(), &hash.password_hash())
        .is_ok())
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
