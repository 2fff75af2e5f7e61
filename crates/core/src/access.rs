//! Access gate: maps (session, required standing) to a permission decision.
//!
//! The policy is a pure function. It has no per-user overrides and keeps no
//! state; the HTTP layer supplies the already-verified session (if any).

use crate::error::CoreError;
use crate::roles::Role;
use crate::token::SessionClaims;

/// Paths reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &[
    "/login",
    "/api/login",
    "/api/logout",
    "/health",
    "/favicon.ico",
    "/robots.txt",
];

/// Whether `path` is on the unauthenticated allowlist.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Minimum standing a route demands.
///
/// | Requirement | Operations |
/// |---|---|
/// | `Public` | login, logout, health |
/// | `Viewer` | get session, list records, read uploaded files |
/// | `Owner` | create, update, delete records, upload files |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Viewer,
    Owner,
}

/// Why the gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// No session, or the token did not verify.
    #[error("Not logged in")]
    Unauthenticated,

    /// Logged in, but the role is too low for the operation.
    #[error("{required:?} role required, session has {actual}")]
    Forbidden { required: Requirement, actual: Role },
}

impl From<AccessError> for CoreError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => CoreError::Unauthorized("Not logged in".into()),
            AccessError::Forbidden { .. } => CoreError::Forbidden("Owner role required".into()),
        }
    }
}

/// Decide whether `session` meets `required`.
///
/// Returns the caller's role when a session is present (and `None` for a
/// public operation reached without one).
pub fn authorize(
    session: Option<&SessionClaims>,
    required: Requirement,
) -> Result<Option<Role>, AccessError> {
    let Some(session) = session else {
        return match required {
            Requirement::Public => Ok(None),
            _ => Err(AccessError::Unauthenticated),
        };
    };

    let role = session.role;
    match required {
        Requirement::Public | Requirement::Viewer => Ok(Some(role)),
        Requirement::Owner if role.can_write() => Ok(Some(role)),
        Requirement::Owner => Err(AccessError::Forbidden {
            required,
            actual: role,
        }),
    }
}
