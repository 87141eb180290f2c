use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware,
    routing::{get, post, put},
};
use diary_auth::auth_body::AuthBody;
use diary_sdk::{
    MessageApi,
    diary_entry::{DiaryEntryApi, DiaryEntryPost},
    diary_user::{DiaryUserApi, DiaryUserLoginRequest, DiaryUserPost, PasswordChangeRequest},
};
use diary_web::{
    credentials::{change_password, register_user},
    ctx::{
        Ctx,
        resolver::{login_user, mw_ctx_resolver},
    },
    diary_entry::{
        create_entry, fetch_entry, fetch_entry_by_date, list_entries, parse_entry_id, update_entry,
    },
    extract::ApiJson,
    mw_auth::mw_require_auth,
    prelude::Result as DiaryWebResult,
    state::AppState,
};
use tower_http::{
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Hardening headers added to every response that does not already set them.
pub const SECURITY_HEADERS: [(&str, &str); 8] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("referrer-policy", "no-referrer"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-permitted-cross-domain-policies", "none"),
    ("cross-origin-resource-policy", "same-origin"),
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    ),
];

fn api(path: &str) -> String {
    format!("/api/{path}")
}

/// Builds the HTTP surface around `state`.
pub fn router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route(&api("users"), post(register))
        .route(&api("users/login"), post(login));

    let account_routes = Router::new()
        .route(&api("users/password"), put(put_password))
        .route_layer(middleware::from_fn(mw_require_auth));

    let diary_routes = Router::new()
        .route(&api("diary"), get(get_entries).post(post_entry))
        .route(&api("diary/{id}"), get(get_entry).put(put_entry))
        .route(&api("diary/date/{date}"), get(get_entry_by_date))
        .route_layer(middleware::from_fn(mw_require_auth));

    let mut router = Router::new()
        .merge(user_routes)
        .merge(account_routes)
        .merge(diary_routes);
    for (name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    router
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(state.clone(), mw_ctx_resolver))
        .with_state(state)
}

async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DiaryUserPost>,
) -> DiaryWebResult<(StatusCode, Json<DiaryUserApi>)> {
    let user = register_user(payload, state.users.as_ref())?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DiaryUserLoginRequest>,
) -> DiaryWebResult<Json<AuthBody>> {
    Ok(Json(login_user(&payload, &state)?))
}

async fn put_password(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiJson(payload): ApiJson<PasswordChangeRequest>,
) -> DiaryWebResult<Json<MessageApi>> {
    change_password(
        &ctx.user.id,
        &payload.current_password,
        &payload.new_password,
        state.users.as_ref(),
    )?;
    Ok(Json(MessageApi::new("Password changed successfully")))
}

async fn get_entries(
    State(state): State<AppState>,
    ctx: Ctx,
) -> DiaryWebResult<Json<Vec<DiaryEntryApi>>> {
    Ok(Json(list_entries(&ctx, state.entries.as_ref())?))
}

async fn get_entry(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(id): Path<String>,
) -> DiaryWebResult<Json<DiaryEntryApi>> {
    let id = parse_entry_id(&id)?;
    Ok(Json(fetch_entry(&ctx, &id, state.entries.as_ref())?))
}

async fn get_entry_by_date(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(date): Path<String>,
) -> DiaryWebResult<Json<DiaryEntryApi>> {
    Ok(Json(fetch_entry_by_date(
        &ctx,
        &date,
        state.entries.as_ref(),
    )?))
}

async fn post_entry(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiJson(payload): ApiJson<DiaryEntryPost>,
) -> DiaryWebResult<(StatusCode, Json<DiaryEntryApi>)> {
    let entry = create_entry(&ctx, payload, state.entries.as_ref())?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn put_entry(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<DiaryEntryPost>,
) -> DiaryWebResult<Json<DiaryEntryApi>> {
    let id = parse_entry_id(&id)?;
    Ok(Json(update_entry(&ctx, &id, payload, state.entries.as_ref())?))
}
