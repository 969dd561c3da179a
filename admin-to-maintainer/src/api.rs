use async_trait::async_trait;
use github::{
    client::{Client, Result},
    Permission, Repository, User,
};

/// The subset of the GitHub API consumed by the downgrade traversal.
///
/// The traversal is written against this trait so its behavior can be
/// exercised without a network.
#[async_trait]
pub trait OrgApi {
    /// List every repository of an organization.
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>>;

    /// List every collaborator of a repository.
    async fn list_collaborators(&self, owner: &str, repo: &str) -> Result<Vec<User>>;

    /// Look up a collaborator's effective permission level.
    async fn permission_level(&self, owner: &str, repo: &str, user: &str) -> Result<Permission>;

    /// Grant a collaborator the given permission level.
    async fn set_permission(
        &self,
        owner: &str,
        repo: &str,
        user: &str,
        permission: Permission,
    ) -> Result<()>;
}

/// `OrgApi` backed by a real `github::Client`.
pub struct LiveApi {
    client: Client,
}

impl LiveApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrgApi for LiveApi {
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        self.client.repos().list_all_for_org(org).await
    }

    async fn list_collaborators(&self, owner: &str, repo: &str) -> Result<Vec<User>> {
        self.client.repos().list_all_collaborators(owner, repo).await
    }

    async fn permission_level(&self, owner: &str, repo: &str, user: &str) -> Result<Permission> {
        let response = self
            .client
            .repos()
            .get_collaborator_permission_level(owner, repo, user)
            .await?;

        Ok(response.into_inner())
    }

    async fn set_permission(
        &self,
        owner: &str,
        repo: &str,
        user: &str,
        permission: Permission,
    ) -> Result<()> {
        self.client
            .repos()
            .add_collaborator(owner, repo, user, permission)
            .await
            .map(|_| ())
    }
}
