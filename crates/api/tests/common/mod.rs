#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use dossier_api::config::{ServerConfig, StorageConfig};
use dossier_api::router::build_app_router;
use dossier_api::state::AppState;
use dossier_core::credentials::{AuthConfig, Credential};

pub const OWNER_USER: &str = "owner";
pub const OWNER_PASSWORD: &str = "owner-pw";
pub const VIEWER_USER: &str = "recruiter";
pub const VIEWER_PASSWORD: &str = "viewer-pw";
pub const SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` whose files all live inside `dir`.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageConfig {
            data_file: dir.path().join("data").join("projects.json"),
            secondary_data_file: None,
            seed_file: dir.path().join("seed.json"),
            upload_dir: dir.path().join("uploads"),
            max_upload_bytes: 1024 * 1024,
        },
        auth: AuthConfig {
            owner: Credential::new(OWNER_USER, OWNER_PASSWORD),
            viewer: Some(Credential::new(VIEWER_USER, VIEWER_PASSWORD)),
            token_secret: SECRET.to_string(),
            is_production: false,
        },
    }
}

/// Build the full application router for a config, the same way `main.rs` does.
pub fn build_app(config: ServerConfig) -> Router {
    let store = config.storage.project_store();
    let state = AppState {
        config: Arc::new(config.clone()),
        store: Arc::new(store),
    };
    build_app_router(state, &config)
}

/// Build the application over a fresh data directory.
pub fn build_test_app(dir: &TempDir) -> Router {
    build_app(test_config(dir))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(cookie) => builder.header(COOKIE, cookie),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = builder(Method::GET, uri, None).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = builder(Method::GET, uri, Some(cookie))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Value,
) -> Response<Body> {
    let request = builder(method, uri, cookie)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, Method::POST, uri, None, body).await
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    cookie: &str,
    body: Value,
) -> Response<Body> {
    json_request(app, Method::POST, uri, Some(cookie), body).await
}

pub async fn patch_json_with_cookie(
    app: Router,
    uri: &str,
    cookie: &str,
    body: Value,
) -> Response<Body> {
    json_request(app, Method::PATCH, uri, Some(cookie), body).await
}

/// Send `body` verbatim, with a JSON content type only when `json` is set.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    json: bool,
    body: &'static str,
) -> Response<Body> {
    let mut builder = builder(method, uri, cookie);
    if json {
        builder = builder.header(CONTENT_TYPE, "application/json");
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}

pub async fn delete_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = builder(Method::DELETE, uri, Some(cookie))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "dossier-test-boundary";

/// Encode one multipart part. `filename` turns the part into a file part.
pub fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, cookie: Option<&str>, body: Vec<u8>) -> Response<Body> {
    let request = builder(Method::POST, uri, cookie)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// The `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie_pair(response: &Response<Body>) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("response must set a cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().trim().to_string()
}

/// Log in and return the cookie pair to send on later requests.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie_pair(&response)
}

pub async fn login_owner(app: Router) -> String {
    login(app, OWNER_USER, OWNER_PASSWORD).await
}

pub async fn login_viewer(app: Router) -> String {
    login(app, VIEWER_USER, VIEWER_PASSWORD).await
}
