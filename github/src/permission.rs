use crate::User;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Repository permission levels, from highest to lowest capability.
///
/// GitHub API docs: https://developer.github.com/v3/repos/collaborators/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Admin,
    Maintain,
    Write,
    Triage,
    Read,
    None,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Admin => "admin",
            Permission::Maintain => "maintain",
            Permission::Write => "write",
            Permission::Triage => "triage",
            Permission::Read => "read",
            Permission::None => "none",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Permission::Admin),
            "maintain" => Ok(Permission::Maintain),
            "write" => Ok(Permission::Write),
            "triage" => Ok(Permission::Triage),
            "read" => Ok(Permission::Read),
            "none" => Ok(Permission::None),
            _ => Err(format!("unknown permission level '{}'", s)),
        }
    }
}

/// Response body of the collaborator permission endpoint.
///
/// GitHub API docs: https://developer.github.com/v3/repos/collaborators/#review-a-users-permission-level
#[derive(Clone, Debug, Deserialize)]
pub struct CollaboratorPermission {
    pub permission: Permission,
    pub user: Option<User>,
}
