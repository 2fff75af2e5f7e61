//! Configured login credentials and session-signing settings.

use crate::roles::Role;

/// A username/password pair granting one role.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Everything the login handler and the access gate need to know.
///
/// Built once at startup and passed down; nothing below `main` reads the
/// process environment.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub owner: Credential,
    /// Optional read-only login.
    pub viewer: Option<Credential>,
    /// HMAC key for session tokens.
    pub token_secret: String,
    /// Marks the session cookie `Secure`.
    pub is_production: bool,
}

impl AuthConfig {
    /// Resolve the role granted by a username/password pair.
    ///
    /// The owner pair is checked first, so if both pairs happen to match the
    /// caller becomes `Owner`.
    pub fn resolve_role(&self, username: &str, password: &str) -> Option<Role> {
        if self.owner.matches(username, password) {
            return Some(Role::Owner);
        }
        match &self.viewer {
            Some(viewer) if viewer.matches(username, password) => Some(Role::Viewer),
            _ => None,
        }
    }
}
