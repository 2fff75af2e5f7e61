//! Handlers for login, logout and the current session.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use dossier_core::error::CoreError;
use dossier_core::roles::Role;
use dossier_core::token::{self, SessionClaims};
use dossier_core::types::{now_millis, Timestamp};
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{expired_session_cookie, session_cookie};
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::rbac::RequireViewer;
use crate::response::{Empty, OkResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public identity of the logged-in principal.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct SessionBody {
    pub user: UserInfo,
    /// Session expiry, milliseconds since the epoch.
    pub exp: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Check the credentials against the configured owner and viewer pairs and,
/// on success, set a signed session cookie. The owner pair wins if both match.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let auth = &state.config.auth;
    let Some(role) = auth.resolve_role(&input.username, &input.password) else {
        tracing::warn!(username = %input.username, "Login failed");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    };

    let claims = SessionClaims::issue(input.username, role, now_millis());
    let token = token::sign(&claims, &auth.token_secret)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = session_cookie(&token, auth.is_production)?;

    tracing::info!(username = %claims.username, %role, "Login succeeded");

    let body = OkResponse::new(LoginBody {
        user: UserInfo {
            username: claims.username,
            role,
        },
    });
    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/logout
///
/// Overwrite the session cookie with an expired one. Idempotent, needs no
/// session.
pub async fn logout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cookie = expired_session_cookie(state.config.auth.is_production)?;
    Ok(([(SET_COOKIE, cookie)], Json(OkResponse::new(Empty {}))))
}

/// GET /api/session
///
/// Current username, role and expiry.
pub async fn session(RequireViewer(user): RequireViewer) -> Json<OkResponse<SessionBody>> {
    let session = user.session;
    Json(OkResponse::new(SessionBody {
        user: UserInfo {
            username: session.username,
            role: session.role,
        },
        exp: session.expires_at,
    }))
}
