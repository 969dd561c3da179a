use crate::{
    client::{Client, PaginationOptions, Response, Result},
    Repository,
};
use serde::Serialize;

mod collaborators;

pub use collaborators::ListCollaboratorsOptions;

/// Filter for the organization repositories listing.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    All,
    Public,
    Private,
    Forks,
    Sources,
    Member,
}

#[derive(Debug, Default, Serialize)]
pub struct ListReposOptions {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<RepoType>,

    #[serde(flatten)]
    pub pagination_options: PaginationOptions,
}

/// `RepositoryClient` handles communication with the repository related
/// methods of the GitHub API.
///
/// GitHub API docs: https://developer.github.com/v3/repos/
pub struct RepositoryClient<'a> {
    inner: &'a Client,
}

impl<'a> RepositoryClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }
}

// Implementation for the organization repositories endpoint
// https://developer.github.com/v3/repos/#list-organization-repositories
impl RepositoryClient<'_> {
    /// List one page of an organization's repositories.
    ///
    /// GitHub API docs: https://developer.github.com/v3/repos/#list-organization-repositories
    pub async fn list_for_org(
        &self,
        org: &str,
        options: &ListReposOptions,
    ) -> Result<Response<Vec<Repository>>> {
        let url = format!("orgs/{}/repos", org);
        let response = self.inner.get(&url).query(options).send().await?;

        self.inner.json(response).await
    }

    /// List every repository of an organization, following pagination links
    /// until the listing is exhausted.
    pub async fn list_all_for_org(&self, org: &str) -> Result<Vec<Repository>> {
        let mut repos = Vec::new();
        let mut options = ListReposOptions::default();

        loop {
            let (pagination, _, page) = self.list_for_org(org, &options).await?.into_parts();
            repos.extend(page);

            match pagination.next_page {
                Some(next) => options.pagination_options.page = Some(next),
                None => return Ok(repos),
            }
        }
    }
}
