use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum UserType {
    Bot,
    Organization,
    User,
}

/// A user account, as returned by the user and collaborator endpoints.
///
/// `login` is the primary key for follow-up API calls and is always present
/// on well-formed records; everything else is passthrough profile metadata.
#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    pub node_id: Option<String>,
    pub avatar_url: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub site_admin: bool,
    pub name: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
}
