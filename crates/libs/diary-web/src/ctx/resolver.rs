//! Context resolver for extracting the caller from HTTP requests.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use diary_auth::{AUTH_HEADER, AUTH_HEADER_PREFIX, auth_body::AuthBody, jwt::JwtKeys};
use diary_sdk::diary_user::DiaryUserLoginRequest;

use crate::{
    auth_token::{decode_token, issue_token},
    credentials::authenticate,
    ctx::Ctx,
    prelude::*,
    state::AppState,
};

type CtxResult = core::result::Result<Ctx, diary_auth::error::Error>;

/// Middleware resolving the request context from the bearer token.
///
/// Never rejects on its own: the outcome, good or bad, is stored in the
/// request extensions and acted upon by [`Ctx`] extraction or
/// [`crate::mw_auth::mw_require_auth`].
pub async fn mw_ctx_resolver(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = resolve_ctx(&state.keys, &headers);
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Turns the `Authorization` header into a context.
///
/// A missing header is `TokenMissing`; a header that is not a `Bearer`
/// credential or does not verify is `InvalidToken` or `TokenExpired`.
pub fn resolve_ctx(keys: &JwtKeys, headers: &HeaderMap) -> CtxResult {
    let header = headers
        .get(AUTH_HEADER)
        .ok_or(diary_auth::error::Error::TokenMissing)?;
    let token = header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(diary_auth::error::Error::InvalidToken)?;

    Ok(decode_token(keys, token)?.into())
}

/// Checks the credentials and issues a token.
pub fn login_user(auth: &DiaryUserLoginRequest, state: &AppState) -> Result<AuthBody> {
    let user = authenticate(auth, state.users.as_ref())?;
    issue_token(&state.keys, &user)
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<CtxResult>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use chrono::TimeDelta;
    use diary_auth::error::Error as AuthError;
    use uuid::Uuid;

    use super::*;
    use crate::auth_token::{AuthToken, USER_TOKEN_EXPIRATION_TIME, encode_token};

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn bearer(keys: &JwtKeys, id: &Uuid, duration: TimeDelta) -> String {
        let claims = AuthToken::new_user(id, "alice", duration).unwrap();
        format!("Bearer {}", encode_token(keys, &claims).unwrap().token)
    }

    #[test]
    fn resolves_valid_bearer() {
        let keys = JwtKeys::new(b"secret");
        let id = Uuid::new_v4();
        let ctx = resolve_ctx(&keys, &headers(&bearer(&keys, &id, USER_TOKEN_EXPIRATION_TIME)))
            .unwrap();
        assert_eq!(ctx.user.id, id);
        assert_eq!(ctx.user.username, "alice");
    }

    #[test]
    fn missing_header() {
        let keys = JwtKeys::new(b"secret");
        assert!(matches!(
            resolve_ctx(&keys, &HeaderMap::new()),
            Err(AuthError::TokenMissing)
        ));
    }

    #[test]
    fn malformed_headers() {
        let keys = JwtKeys::new(b"secret");
        for value in ["", "Bearer", "Bearer ", "Basic YWxpY2U6c2VjcmV0", "token"] {
            assert!(matches!(
                resolve_ctx(&keys, &headers(value)),
                Err(AuthError::InvalidToken)
            ));
        }
    }

    #[test]
    fn expired_bearer() {
        let keys = JwtKeys::new(b"secret");
        let value = bearer(&keys, &Uuid::new_v4(), TimeDelta::seconds(-1));
        assert!(matches!(
            resolve_ctx(&keys, &headers(&value)),
            Err(AuthError::TokenExpired)
        ));
    }
}
