use axum::http::StatusCode;
use chrono::TimeDelta;
use common::{JWT_SECRET, TestContext};
use diary_auth::jwt::JwtKeys;
use diary_web::auth_token::{AuthToken, USER_TOKEN_EXPIRATION_TIME, encode_token};
use serde_json::json;
use uuid::Uuid;

mod common;

#[tokio::test]
async fn diary_walkthrough() {
    let ctx = TestContext::new();
    let token = ctx.token_for("alice", "secret1").await;

    let created = ctx
        .send(
            "POST",
            "/api/diary",
            Some(&token),
            Some(json!({ "date": "2024-01-01", "content": "hi" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["content"], "hi");

    let duplicate = ctx
        .send(
            "POST",
            "/api/diary",
            Some(&token),
            Some(json!({ "date": "2024-01-01", "content": "again" })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        duplicate.body["error"]["message"],
        "Entry already exists for this date"
    );

    let by_date = ctx
        .send("GET", "/api/diary/date/2024-01-01", Some(&token), None)
        .await;
    assert_eq!(by_date.status, StatusCode::OK);
    assert_eq!(by_date.body, created.body);

    let other_day = ctx
        .send("GET", "/api/diary/date/2024-01-02", Some(&token), None)
        .await;
    assert_eq!(other_day.status, StatusCode::NOT_FOUND);

    let all = ctx.send("GET", "/api/diary", Some(&token), None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_then_fetch_returns_new_values() {
    let ctx = TestContext::new();
    let token = ctx.token_for("alice", "secret1").await;

    let created = ctx
        .send(
            "POST",
            "/api/diary",
            Some(&token),
            Some(json!({ "date": "2024-01-01", "content": "hi" })),
        )
        .await;
    let id = created.body["id"].as_str().unwrap().to_string();

    let updated = ctx
        .send(
            "PUT",
            &format!("/api/diary/{id}"),
            Some(&token),
            Some(json!({ "date": "2024-01-05", "content": "edited" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);

    let fetched = ctx
        .send("GET", &format!("/api/diary/{id}"), Some(&token), None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["content"], "edited");
    assert_eq!(fetched.body["date"], updated.body["date"]);
    assert_ne!(fetched.body["date"], created.body["date"]);
}

#[tokio::test]
async fn tokens_never_cross_owners() {
    let ctx = TestContext::new();
    let alice = ctx.token_for("alice", "secret1").await;
    let bob = ctx.token_for("bob", "secret1").await;

    let bobs = ctx
        .send(
            "POST",
            "/api/diary",
            Some(&bob),
            Some(json!({ "date": "2024-01-01", "content": "bob's" })),
        )
        .await;
    let id = bobs.body["id"].as_str().unwrap().to_string();

    let read = ctx
        .send("GET", &format!("/api/diary/{id}"), Some(&alice), None)
        .await;
    let missing = ctx
        .send(
            "GET",
            &format!("/api/diary/{}", Uuid::new_v4()),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(read.status, StatusCode::NOT_FOUND);
    assert_eq!(read.body, missing.body);

    let write = ctx
        .send(
            "PUT",
            &format!("/api/diary/{id}"),
            Some(&alice),
            Some(json!({ "date": "2024-01-01", "content": "alice's now" })),
        )
        .await;
    assert_eq!(write.status, StatusCode::NOT_FOUND);

    let by_date = ctx
        .send("GET", "/api/diary/date/2024-01-01", Some(&alice), None)
        .await;
    assert_eq!(by_date.status, StatusCode::NOT_FOUND);

    let still_bobs = ctx
        .send("GET", &format!("/api/diary/{id}"), Some(&bob), None)
        .await;
    assert_eq!(still_bobs.body["content"], "bob's");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_for_same_day() {
    let ctx = TestContext::new();
    let token = ctx.token_for("alice", "secret1").await;

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let ctx = ctx.clone();
            let token = token.clone();
            tokio::spawn(async move {
                ctx.send(
                    "POST",
                    "/api/diary",
                    Some(&token),
                    Some(json!({ "date": "2024-06-01", "content": format!("try {i}") })),
                )
                .await
                .status
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let rejected = statuses
        .iter()
        .filter(|s| **s == StatusCode::BAD_REQUEST)
        .count();
    assert_eq!(created, 1);
    assert_eq!(rejected, 5);
}

#[tokio::test]
async fn diary_requires_a_valid_token() {
    let ctx = TestContext::new();
    ctx.token_for("alice", "secret1").await;

    let missing = ctx.send("GET", "/api/diary", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = ctx.send("GET", "/api/diary", Some("garbage"), None).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let foreign = AuthToken::new_user(&Uuid::new_v4(), "alice", USER_TOKEN_EXPIRATION_TIME).unwrap();
    let foreign = encode_token(&JwtKeys::new(b"another-secret"), &foreign)
        .unwrap()
        .token;
    let forged = ctx.send("GET", "/api/diary", Some(&foreign), None).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let expired = AuthToken::new_user(&Uuid::new_v4(), "alice", TimeDelta::seconds(-10)).unwrap();
    let expired = encode_token(&JwtKeys::new(JWT_SECRET), &expired)
        .unwrap()
        .token;
    let stale = ctx.send("GET", "/api/diary", Some(&expired), None).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        stale.body["error"]["message"],
        "Authentication token expired"
    );
}

#[tokio::test]
async fn entry_validation() {
    let ctx = TestContext::new();
    let token = ctx.token_for("alice", "secret1").await;

    for body in [
        json!({ "content": "no date" }),
        json!({ "date": "2024-01-01" }),
        json!({ "date": "not a date", "content": "hi" }),
        json!({ "date": "2024-01-01", "content": "" }),
    ] {
        let response = ctx.send("POST", "/api/diary", Some(&token), Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    let bad_id = ctx
        .send("GET", "/api/diary/not-an-id", Some(&token), None)
        .await;
    assert_eq!(bad_id.status, StatusCode::NOT_FOUND);
}
