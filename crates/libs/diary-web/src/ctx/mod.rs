//! Request context management for web handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth_token::AuthToken;

pub mod resolver;

/// The user a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtxUser {
    /// The unique user ID.
    pub id: Uuid,
    /// Login name carried by the token.
    pub username: String,
}

/// Identity resolved from a verified bearer token.
#[derive(Clone, Debug)]
pub struct Ctx {
    /// The authenticated user.
    pub user: CtxUser,
}

impl Ctx {
    /// Creates a new request context.
    ///
    /// ```rust
    /// use diary_web::ctx::Ctx;
    /// use uuid::Uuid;
    ///
    /// let id = Uuid::new_v4();
    /// let ctx = Ctx::new(id, "alice");
    /// assert_eq!(ctx.user.id, id);
    /// ```
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            user: CtxUser {
                id,
                username: username.into(),
            },
        }
    }
}

impl From<AuthToken> for Ctx {
    fn from(value: AuthToken) -> Self {
        Self::new(value.sub, value.username)
    }
}
