use super::RepositoryClient;
use crate::{
    client::{PaginationOptions, Response, Result},
    CollaboratorPermission, Permission, User,
};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct ListCollaboratorsOptions {
    /// Filter by affiliation: "outside", "direct" or "all"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,

    #[serde(flatten)]
    pub pagination_options: PaginationOptions,
}

// Implementation for the collaborators endpoint
// https://developer.github.com/v3/repos/collaborators/
impl RepositoryClient<'_> {
    /// List one page of a repository's collaborators.
    ///
    /// GitHub API docs: https://developer.github.com/v3/repos/collaborators/#list-collaborators
    pub async fn list_collaborators(
        &self,
        owner: &str,
        repo: &str,
        options: &ListCollaboratorsOptions,
    ) -> Result<Response<Vec<User>>> {
        let url = format!("repos/{}/{}/collaborators", owner, repo);
        let response = self.inner.get(&url).query(options).send().await?;

        self.inner.json(response).await
    }

    /// List every collaborator of a repository, following pagination links
    /// until the listing is exhausted.
    pub async fn list_all_collaborators(&self, owner: &str, repo: &str) -> Result<Vec<User>> {
        let mut collaborators = Vec::new();
        let mut options = ListCollaboratorsOptions::default();

        loop {
            let (pagination, _, page) = self
                .list_collaborators(owner, repo, &options)
                .await?
                .into_parts();
            collaborators.extend(page);

            match pagination.next_page {
                Some(next) => options.pagination_options.page = Some(next),
                None => return Ok(collaborators),
            }
        }
    }

    /// Check a collaborator's permission level on a repository.
    ///
    /// GitHub API docs: https://developer.github.com/v3/repos/collaborators/#review-a-users-permission-level
    pub async fn get_collaborator_permission_level(
        &self,
        owner: &str,
        repo: &str,
        user: &str,
    ) -> Result<Response<Permission>> {
        let url = format!("repos/{}/{}/collaborators/{}/permission", owner, repo, user);
        let response = self.inner.get(&url).send().await?;

        let (pagination, rate, permission_response) = self
            .inner
            .json::<CollaboratorPermission>(response)
            .await?
            .into_parts();

        Ok(Response::new(
            pagination,
            rate,
            permission_response.permission,
        ))
    }

    /// Add a user as a collaborator with the given permission level. If the
    /// user already is a collaborator, their permission is updated in place.
    ///
    /// GitHub API docs: https://developer.github.com/v3/repos/collaborators/#add-user-as-a-collaborator
    pub async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        user: &str,
        permission: Permission,
    ) -> Result<Response<()>> {
        #[derive(Debug, Serialize)]
        struct AddCollaboratorRequest {
            permission: Permission,
        }

        let request = AddCollaboratorRequest { permission };
        let url = format!("repos/{}/{}/collaborators/{}", owner, repo, user);
        let response = self.inner.put(&url).json(&request).send().await?;

        self.inner.empty(response).await
    }
}
