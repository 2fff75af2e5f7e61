//! Session cookie reading and `Set-Cookie` construction.

use std::time::Duration;

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use dossier_core::token::SESSION_TTL_MILLIS;

use crate::error::AppError;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Extract a cookie value by name from every `Cookie` header on the request.
pub fn get_cookie<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name.trim() == cookie_name).then(|| value.trim())
        })
}

/// Build a `Set-Cookie` value: HTTP-only, `SameSite=Lax`, path `/`.
pub fn set_cookie(
    name: &str,
    value: &str,
    max_age: Duration,
    secure: bool,
) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{name}={value}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid cookie value for {name}: {e}")))
}

/// Cookie carrying a freshly signed token for the full session lifetime.
pub fn session_cookie(token: &str, secure: bool) -> Result<HeaderValue, AppError> {
    let max_age = Duration::from_millis(SESSION_TTL_MILLIS.unsigned_abs());
    set_cookie(SESSION_COOKIE, token, max_age, secure)
}

/// Cookie that overwrites the session with an immediately expired, empty one.
pub fn expired_session_cookie(secure: bool) -> Result<HeaderValue, AppError> {
    set_cookie(SESSION_COOKIE, "", Duration::ZERO, secure)
}
