use crate::{Organization, User};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Permissions of the requesting token on a repository.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RepoPermissions {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub maintain: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub triage: bool,
    #[serde(default)]
    pub pull: bool,
}

/// A repository, as returned by the list-organization-repositories endpoint.
///
/// `full_name` (`owner/name`) is the primary key for follow-up API calls and
/// is always present on well-formed records; decoding fails rather than
/// synthesizing a missing key.
#[derive(Clone, Debug, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: User,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    pub description: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub clone_url: Option<String>,
    pub git_url: Option<String>,
    pub ssh_url: Option<String>,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub forks_count: Option<u64>,
    pub stargazers_count: Option<u64>,
    pub watchers_count: Option<u64>,
    pub open_issues_count: Option<u64>,
    pub size: Option<u64>,
    pub default_branch: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub permissions: Option<RepoPermissions>,
    pub organization: Option<Organization>,
}

impl Repository {
    /// Splits `full_name` into its `(owner, name)` components, or `None` if
    /// the record's full name is not of the form `owner/name`.
    pub fn owner_and_name(&self) -> Option<(&str, &str)> {
        let mut parts = self.full_name.splitn(2, '/');
        match (parts.next(), parts.next()) {
            (Some(owner), Some(name)) if !owner.is_empty() && !name.is_empty() => {
                Some((owner, name))
            }
            _ => None,
        }
    }
}
