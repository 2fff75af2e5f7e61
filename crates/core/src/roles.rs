//! Well-known role names and the [`Role`] enum carried in session tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_VIEWER: &str = "viewer";

/// Authorization level of an authenticated principal.
///
/// `Owner` may read and write project records and upload files; `Viewer`
/// is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => ROLE_OWNER,
            Role::Viewer => ROLE_VIEWER,
        }
    }

    pub fn can_write(self) -> bool {
        matches!(self, Role::Owner)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
