use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An organization, as embedded in repository records.
#[derive(Clone, Debug, Deserialize)]
pub struct Organization {
    pub login: String,
    pub id: u64,
    pub node_id: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub avatar_url: Option<String>,
    pub repos_url: Option<String>,
    pub members_url: Option<String>,
    pub events_url: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub public_repos: Option<u64>,
    pub public_gists: Option<u64>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    // Only populated for tokens with owner-level access to the org
    pub total_private_repos: Option<u64>,
    pub owned_private_repos: Option<u64>,
    pub private_gists: Option<u64>,
    pub disk_usage: Option<u64>,
    pub collaborators: Option<u64>,
    pub billing_email: Option<String>,
    pub plan: Option<Plan>,
}

/// An organization's billing plan.
#[derive(Clone, Debug, Deserialize)]
pub struct Plan {
    pub name: String,
    pub space: Option<u64>,
    pub private_repos: Option<u64>,
}
