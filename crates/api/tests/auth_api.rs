//! HTTP-level integration tests for login, logout and the session endpoint.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::{Method, StatusCode};
use common::{
    body_json, get, get_with_cookie, login_owner, login_viewer, post_json, send_raw,
    session_cookie_pair,
};
use tempfile::TempDir;

#[tokio::test]
async fn owner_login_sets_session_cookie() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let body = serde_json::json!({ "username": common::OWNER_USER, "password": common::OWNER_PASSWORD });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("session_token="));
    assert!(set_cookie.contains("Max-Age=28800"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(!set_cookie.contains("Secure"));

    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["user"]["username"], common::OWNER_USER);
    assert_eq!(json["user"]["role"], "owner");
}

#[tokio::test]
async fn viewer_login_gets_viewer_role() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let cookie = login_viewer(app.clone()).await;
    let response = get_with_cookie(app, "/api/session", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["username"], common::VIEWER_USER);
    assert_eq!(json["user"]["role"], "viewer");
    assert!(json["exp"].is_i64());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let body = serde_json::json!({ "username": common::OWNER_USER, "password": "nope" });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());

    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid credentials");
}

#[tokio::test]
async fn malformed_login_body_gets_json_error() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let response =
        send_raw(app.clone(), Method::POST, "/api/login", None, true, r#"{"username":"owner"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(SET_COOKIE).is_none());
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["code"], "BAD_REQUEST");

    let response = send_raw(app, Method::POST, "/api/login", None, true, "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn viewer_password_does_not_unlock_owner() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let body = serde_json::json!({ "username": common::OWNER_USER, "password": common::VIEWER_PASSWORD });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_requires_cookie() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let response = get(app, "/api/session").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Not logged in");
}

#[tokio::test]
async fn tampered_cookie_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let cookie = login_owner(app.clone()).await;
    let mut tampered = cookie.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = get_with_cookie(app, "/api/session", &tampered).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cookie_from_another_secret_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);
    let cookie = login_owner(app).await;

    let mut config = common::test_config(&dir);
    config.auth.token_secret = "rotated-secret".into();
    let rotated = common::build_app(config);

    let response = get_with_cookie(rotated, "/api/session", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_expires_cookie_without_session() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let response = post_json(app, "/api/logout", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(session_cookie_pair(&response), "session_token=");

    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
}

#[tokio::test]
async fn production_cookie_is_secure() {
    let dir = TempDir::new().unwrap();
    let mut config = common::test_config(&dir);
    config.auth.is_production = true;
    let app = common::build_app(config);

    let body = serde_json::json!({ "username": common::OWNER_USER, "password": common::OWNER_PASSWORD });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.ends_with("; Secure"));
}
