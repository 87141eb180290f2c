//! Credential checks and password storage.
//!
//! Length rules apply to the password as sent. It is trimmed only right
//! before hashing on every write path ([`register_user`], [`change_password`]),
//! and verification trims the supplied password the same way. Unknown usernames and wrong passwords both end in
//! [`Error::InvalidCredentials`].

use std::sync::LazyLock;

use diary_auth::secret_hash::{generate_secret_hash, is_secret_valid};
use diary_models::{
    error::Error as ModelError,
    store::UserStore,
    user::diary_user::{DiaryUser, DiaryUserCreate},
};
use diary_sdk::diary_user::{DiaryUserApi, DiaryUserLoginRequest, DiaryUserPost};
use tracing::{debug, info};
use uuid::Uuid;

use crate::prelude::*;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 3;

// Verified against when the username is unknown so both rejections cost the same.
static DECOY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| generate_secret_hash("decoy-password").ok());

/// Checks the username and password length rules shared by registration and login.
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    let username_len = username.chars().count();
    if username_len < USERNAME_MIN_LEN {
        return Err(Error::validation(format!(
            "\"username\" length must be at least {USERNAME_MIN_LEN} characters long"
        )));
    }
    if username_len > USERNAME_MAX_LEN {
        return Err(Error::validation(format!(
            "\"username\" length must be less than or equal to {USERNAME_MAX_LEN} characters long"
        )));
    }
    validate_password(password)
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(Error::validation(format!(
            "\"password\" length must be at least {PASSWORD_MIN_LEN} characters long"
        )));
    }
    Ok(())
}

/// One-way hash of the trimmed password.
pub fn hash_password(plaintext: &str) -> Result<String> {
    Ok(generate_secret_hash(plaintext.trim())?)
}

fn password_matches(plaintext: &str, user: &DiaryUser) -> Result<bool> {
    Ok(is_secret_valid(plaintext.trim(), &user.hash)?)
}

/// Registers a new user.
///
/// The username check ahead of the insert only gives an early answer; the
/// store's unique index decides, and its violation maps to the same error.
pub fn register_user(payload: DiaryUserPost, users: &dyn UserStore) -> Result<DiaryUserApi> {
    validate_credentials(&payload.username, &payload.password)?;

    if users.fetch_user_by_name(&payload.username)?.is_some() {
        return Err(Error::DuplicateUsername);
    }

    let hash = hash_password(&payload.password)?;
    let user = users
        .create_user(DiaryUserCreate::new(payload.username, hash))
        .map_err(|err| match err {
            ModelError::UniqueViolation(_) => Error::DuplicateUsername,
            other => other.into(),
        })?;

    info!("Registered user {}", user.id);
    Ok(DiaryUserApi {
        message: String::from("User registered successfully"),
        id: user.id,
        username: user.username,
    })
}

/// Resolves login credentials to a user.
pub fn authenticate(auth: &DiaryUserLoginRequest, users: &dyn UserStore) -> Result<DiaryUser> {
    validate_credentials(&auth.username, &auth.password)?;

    let Some(user) = users.fetch_user_by_name(&auth.username)? else {
        if let Some(decoy) = DECOY_HASH.as_deref() {
            let _ = is_secret_valid(auth.password.trim(), decoy);
        }
        debug!("Login rejected for '{}': unknown user", auth.username);
        return Err(Error::InvalidCredentials);
    };

    if !password_matches(&auth.password, &user)? {
        debug!("Login rejected for '{}': password mismatch", auth.username);
        return Err(Error::InvalidCredentials);
    }
    Ok(user)
}

/// Replaces the password of `user_id` after checking the current one.
pub fn change_password(
    user_id: &Uuid,
    current_password: &str,
    new_password: &str,
    users: &dyn UserStore,
) -> Result<()> {
    let user = users
        .fetch_user_by_id(user_id)?
        .ok_or(Error::InvalidCredentials)?;
    if !password_matches(current_password, &user)? {
        debug!("Password change rejected for {}: password mismatch", user.id);
        return Err(Error::InvalidCredentials);
    }
    validate_password(new_password)?;

    let hash = hash_password(new_password)?;
    users
        .update_user_hash(&user.id, &hash)?
        .ok_or(Error::InvalidCredentials)?;
    info!("Password changed for user {}", user.id);
    Ok(())
}
