//! HTTP-level integration tests for the public and admin content endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, get_auth, post_json, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn public_content_is_readable_without_auth() {
    let app = build_test_app();
    let token = app.admin_token();
    put_json(app.app(), "/api/v1/admin/content/home_title", &token, json!({ "value": "Hi" })).await;

    let response = get(app.app(), "/api/v1/public/content").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["key"], "home_title");
    assert_eq!(json["data"][0]["value"], "Hi");

    let response = get(app.app(), "/api/v1/public/content/home_title").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["value"], "Hi");
}

#[tokio::test]
async fn public_missing_key_returns_404() {
    let app = build_test_app();
    let response = get(app.app(), "/api/v1/public/content/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn public_page_returns_only_page_keys() {
    let app = build_test_app();
    let token = app.admin_token();
    put_json(app.app(), "/api/v1/admin/content/faq_items", &token, json!({ "value": "[]" })).await;
    put_json(app.app(), "/api/v1/admin/content/home_title", &token, json!({ "value": "Hi" })).await;

    let response = get(app.app(), "/api/v1/public/pages/faq").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!({ "faq_items": "[]" }));

    let response = get(app.app(), "/api/v1/public/pages/guestbook").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Admin access control
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_routes_require_a_token() {
    let app = build_test_app();
    let response = get(app.app(), "/api/v1/admin/content").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn admin_routes_reject_invalid_tokens() {
    let app = build_test_app();
    let response = get_auth(app.app(), "/api/v1/admin/content", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_require_admin_role() {
    let app = build_test_app();
    let token = app.token_with_role("guest-1", "guest");
    let response = get_auth(app.app(), "/api/v1/admin/content", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Admin writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upsert_stores_structured_values_as_json_text() {
    let app = build_test_app();
    let token = app.admin_token();

    let response = put_json(
        app.app(),
        "/api/v1/admin/content/faq_items",
        &token,
        json!({ "value": [{ "question": "Q", "answer": "A" }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["value"],
        r#"[{"question":"Q","answer":"A"}]"#
    );
}

#[tokio::test]
async fn upsert_rejects_malformed_structured_text() {
    let app = build_test_app();
    let token = app.admin_token();

    let response = put_json(
        app.app(),
        "/api/v1/admin/content/faq_items",
        &token,
        json!({ "value": "{invalid" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn upsert_rejects_bad_keys() {
    let app = build_test_app();
    let token = app.admin_token();

    let response = put_json(
        app.app(),
        "/api/v1/admin/content/Home-Title",
        &token,
        json!({ "value": "Hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = build_test_app();
    let token = app.admin_token();
    put_json(app.app(), "/api/v1/admin/content/dress_code", &token, json!({ "value": "Formal" })).await;

    let response = delete(app.app(), "/api/v1/admin/content/dress_code", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app.app(), "/api/v1/admin/content/dress_code", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.app(), "/api/v1/admin/content/dress_code", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validate_reports_each_field() {
    let app = build_test_app();
    let token = app.admin_token();

    let response = post_json(
        app.app(),
        "/api/v1/admin/content/validate",
        &token,
        json!({ "values": { "faq_items": "{invalid", "faq_intro": "Hello", "hotels": "[]" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["faq_items"]["is_valid"], false);
    assert!(data["faq_items"]["error_message"].is_string());
    assert_eq!(data["faq_intro"]["is_valid"], true);
    assert_eq!(data["hotels"]["is_valid"], true);
    assert_eq!(app.content.calls(), 0);
}

#[tokio::test]
async fn store_outage_returns_503() {
    let app = build_test_app();
    let token = app.admin_token();
    app.content.set_offline(true);

    let response = get_auth(app.app(), "/api/v1/admin/content", &token).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
