use crate::api::OrgApi;
use anyhow::Context;
use github::Permission;
use log::{error, info};

/// Outcome counters for one full traversal.
#[derive(Debug, Default, PartialEq)]
pub struct RunReport {
    /// Repositories returned by the organization listing
    pub repositories: usize,
    /// Repositories skipped because their collaborator listing failed
    pub repositories_skipped: usize,
    /// Collaborators whose permission level was inspected
    pub collaborators: usize,
    /// Collaborators whose permission was (or, under dry run, would be) downgraded
    pub downgraded: usize,
    /// Per-item failures that were logged and skipped
    pub failures: usize,
}

/// Walk every repository of `org` and re-grant `target` to any collaborator
/// currently holding admin.
///
/// Failure to list the organization's repositories aborts the run; every
/// other failure is logged, counted, and the affected repository or
/// collaborator is skipped while the traversal continues.
pub async fn run<A: OrgApi>(
    api: &A,
    org: &str,
    target: Permission,
    dry_run: bool,
) -> crate::Result<RunReport> {
    let mut report = RunReport::default();

    let repos = api
        .list_repositories(org)
        .await
        .with_context(|| format!("failed to list repositories for org {}", org))?;

    info!("org {}: {} repositories", org, repos.len());

    for repo in &repos {
        report.repositories += 1;

        let (owner, name) = match repo.owner_and_name() {
            Some(parts) => parts,
            None => {
                error!("repo {}: malformed full name, skipping", repo.full_name);
                report.repositories_skipped += 1;
                report.failures += 1;
                continue;
            }
        };

        let collaborators = match api.list_collaborators(owner, name).await {
            Ok(collaborators) => collaborators,
            Err(err) => {
                error!(
                    "failed to list collaborators for repo {}: {}",
                    repo.full_name, err
                );
                report.repositories_skipped += 1;
                report.failures += 1;
                continue;
            }
        };

        for collaborator in &collaborators {
            report.collaborators += 1;

            let permission = match api.permission_level(owner, name, &collaborator.login).await {
                Ok(permission) => permission,
                Err(err) => {
                    error!(
                        "failed to get permission on repo {} for user {}: {}",
                        repo.full_name, collaborator.login, err
                    );
                    report.failures += 1;
                    continue;
                }
            };

            if permission != Permission::Admin {
                continue;
            }

            info!(
                "user {} has {} on repo {}, setting to {}{}",
                collaborator.login,
                permission,
                repo.full_name,
                target,
                if dry_run { " (dry run)" } else { "" }
            );

            if dry_run {
                report.downgraded += 1;
                continue;
            }

            match api
                .set_permission(owner, name, &collaborator.login, target)
                .await
            {
                Ok(()) => report.downgraded += 1,
                Err(err) => {
                    error!(
                        "failed to set permission on repo {} for user {}: {}",
                        repo.full_name, collaborator.login, err
                    );
                    report.failures += 1;
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod test {
    use super::{run, RunReport};
    use crate::api::OrgApi;
    use async_trait::async_trait;
    use github::{
        client::{Error, Result},
        Permission, Repository, User,
    };
    use std::{collections::HashMap, sync::Mutex};

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        ListRepositories(String),
        ListCollaborators(String),
        PermissionLevel(String, String),
        SetPermission(String, String, Permission),
    }

    fn repo(full_name: &str) -> Repository {
        let mut parts = full_name.splitn(2, '/');
        let owner = parts.next().unwrap();
        let name = parts.next().unwrap_or("");

        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": name,
            "full_name": full_name,
            "owner": { "login": owner, "id": 1 },
        }))
        .unwrap()
    }

    fn user(login: &str) -> User {
        serde_json::from_value(serde_json::json!({ "login": login, "id": 1 })).unwrap()
    }

    fn fail(msg: &str) -> Error {
        Error::Message(msg.to_owned().into())
    }

    /// Scripted in-memory `OrgApi` that records every call it receives.
    #[derive(Default)]
    struct FakeApi {
        /// Repository full names returned by the org listing
        repos: Vec<String>,
        /// If set, the org listing fails with this message
        fail_repo_listing: Option<String>,
        /// full_name -> collaborator logins (or a scripted failure)
        collaborators: HashMap<String, std::result::Result<Vec<String>, String>>,
        /// (full_name, login) -> permission level (or a scripted failure)
        permissions: HashMap<(String, String), std::result::Result<Permission, String>>,
        /// (full_name, login) -> scripted mutation failure
        set_failures: HashMap<(String, String), String>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeApi {
        fn with_repos(repos: &[&str]) -> Self {
            Self {
                repos: repos.iter().map(|r| r.to_string()).collect(),
                ..Self::default()
            }
        }

        fn collaborators(mut self, repo: &str, logins: &[&str]) -> Self {
            self.collaborators.insert(
                repo.to_owned(),
                Ok(logins.iter().map(|l| l.to_string()).collect()),
            );
            self
        }

        fn fail_collaborators(mut self, repo: &str, msg: &str) -> Self {
            self.collaborators
                .insert(repo.to_owned(), Err(msg.to_owned()));
            self
        }

        fn permission(mut self, repo: &str, login: &str, permission: Permission) -> Self {
            self.permissions
                .insert((repo.to_owned(), login.to_owned()), Ok(permission));
            self
        }

        fn fail_permission(mut self, repo: &str, login: &str, msg: &str) -> Self {
            self.permissions
                .insert((repo.to_owned(), login.to_owned()), Err(msg.to_owned()));
            self
        }

        fn fail_set(mut self, repo: &str, login: &str, msg: &str) -> Self {
            self.set_failures
                .insert((repo.to_owned(), login.to_owned()), msg.to_owned());
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl OrgApi for FakeApi {
        async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>> {
            self.record(Call::ListRepositories(org.to_owned()));

            if let Some(msg) = &self.fail_repo_listing {
                return Err(fail(msg));
            }
            Ok(self.repos.iter().map(|r| repo(r)).collect())
        }

        async fn list_collaborators(&self, owner: &str, name: &str) -> Result<Vec<User>> {
            let full_name = format!("{}/{}", owner, name);
            self.record(Call::ListCollaborators(full_name.clone()));

            match self.collaborators.get(&full_name) {
                Some(Ok(logins)) => Ok(logins.iter().map(|l| user(l)).collect()),
                Some(Err(msg)) => Err(fail(msg)),
                None => Ok(Vec::new()),
            }
        }

        async fn permission_level(&self, owner: &str, name: &str, login: &str) -> Result<Permission> {
            let full_name = format!("{}/{}", owner, name);
            self.record(Call::PermissionLevel(full_name.clone(), login.to_owned()));

            match self.permissions.get(&(full_name, login.to_owned())) {
                Some(Ok(permission)) => Ok(*permission),
                Some(Err(msg)) => Err(fail(msg)),
                None => Ok(Permission::None),
            }
        }

        async fn set_permission(
            &self,
            owner: &str,
            name: &str,
            login: &str,
            permission: Permission,
        ) -> Result<()> {
            let full_name = format!("{}/{}", owner, name);
            self.record(Call::SetPermission(
                full_name.clone(),
                login.to_owned(),
                permission,
            ));

            match self.set_failures.get(&(full_name, login.to_owned())) {
                Some(msg) => Err(fail(msg)),
                None => Ok(()),
            }
        }
    }

    fn set_permission_calls(calls: &[Call]) -> Vec<&Call> {
        calls
            .iter()
            .filter(|c| matches!(c, Call::SetPermission(..)))
            .collect()
    }

    #[tokio::test]
    async fn end_to_end_scenario() {
        let api = FakeApi::with_repos(&["org/a", "org/b"])
            .collaborators("org/a", &["alice", "bob"])
            .collaborators("org/b", &["carol"])
            .permission("org/a", "alice", Permission::Admin)
            .permission("org/a", "bob", Permission::Write)
            .permission("org/b", "carol", Permission::Admin);

        let report = run(&api, "org", Permission::Maintain, false).await.unwrap();

        assert_eq!(
            report,
            RunReport {
                repositories: 2,
                repositories_skipped: 0,
                collaborators: 3,
                downgraded: 2,
                failures: 0,
            }
        );

        assert_eq!(
            api.calls(),
            vec![
                Call::ListRepositories("org".to_owned()),
                Call::ListCollaborators("org/a".to_owned()),
                Call::PermissionLevel("org/a".to_owned(), "alice".to_owned()),
                Call::SetPermission("org/a".to_owned(), "alice".to_owned(), Permission::Maintain),
                Call::PermissionLevel("org/a".to_owned(), "bob".to_owned()),
                Call::ListCollaborators("org/b".to_owned()),
                Call::PermissionLevel("org/b".to_owned(), "carol".to_owned()),
                Call::SetPermission("org/b".to_owned(), "carol".to_owned(), Permission::Maintain),
            ]
        );
    }

    #[tokio::test]
    async fn only_admins_are_mutated() {
        let api = FakeApi::with_repos(&["org/a"])
            .collaborators("org/a", &["u1", "u2", "u3", "u4", "u5"])
            .permission("org/a", "u1", Permission::Admin)
            .permission("org/a", "u2", Permission::Maintain)
            .permission("org/a", "u3", Permission::Write)
            .permission("org/a", "u4", Permission::Triage)
            .permission("org/a", "u5", Permission::Read);

        let report = run(&api, "org", Permission::Maintain, false).await.unwrap();

        assert_eq!(report.downgraded, 1);
        let calls = api.calls();
        assert_eq!(
            set_permission_calls(&calls),
            vec![&Call::SetPermission(
                "org/a".to_owned(),
                "u1".to_owned(),
                Permission::Maintain
            )]
        );
    }

    #[tokio::test]
    async fn repo_listing_failure_aborts_the_run() {
        let api = FakeApi {
            fail_repo_listing: Some("boom".to_owned()),
            ..FakeApi::default()
        };

        assert!(run(&api, "org", Permission::Maintain, false).await.is_err());
    }

    #[tokio::test]
    async fn collaborator_listing_failure_skips_only_that_repo() {
        let api = FakeApi::with_repos(&["org/a", "org/b"])
            .fail_collaborators("org/a", "transport error")
            .collaborators("org/b", &["carol"])
            .permission("org/b", "carol", Permission::Admin);

        let report = run(&api, "org", Permission::Maintain, false).await.unwrap();

        assert_eq!(report.repositories, 2);
        assert_eq!(report.repositories_skipped, 1);
        assert_eq!(report.downgraded, 1);
        assert_eq!(report.failures, 1);

        // No per-collaborator calls for org/a, but org/b processed normally
        let calls = api.calls();
        assert!(!calls
            .iter()
            .any(|c| matches!(c, Call::PermissionLevel(repo, _) if repo == "org/a")));
        assert!(calls
            .iter()
            .any(|c| matches!(c, Call::PermissionLevel(repo, _) if repo == "org/b")));
    }

    #[tokio::test]
    async fn lists_collaborators_exactly_once_per_repo() {
        let api = FakeApi::with_repos(&["org/a", "org/b", "org/c"])
            .fail_collaborators("org/b", "transport error");

        run(&api, "org", Permission::Maintain, false).await.unwrap();

        let listings: Vec<_> = api
            .calls()
            .iter()
            .filter_map(|c| match c {
                Call::ListCollaborators(repo) => Some(repo.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(listings, vec!["org/a", "org/b", "org/c"]);
    }

    #[tokio::test]
    async fn permission_lookup_failure_skips_only_that_collaborator() {
        let api = FakeApi::with_repos(&["org/a"])
            .collaborators("org/a", &["alice", "bob", "carol"])
            .permission("org/a", "alice", Permission::Admin)
            .fail_permission("org/a", "bob", "timeout")
            .permission("org/a", "carol", Permission::Admin);

        let report = run(&api, "org", Permission::Maintain, false).await.unwrap();

        assert_eq!(report.collaborators, 3);
        assert_eq!(report.downgraded, 2);
        assert_eq!(report.failures, 1);
    }

    #[tokio::test]
    async fn mutation_failure_skips_only_that_collaborator() {
        let api = FakeApi::with_repos(&["org/a"])
            .collaborators("org/a", &["alice", "bob"])
            .permission("org/a", "alice", Permission::Admin)
            .permission("org/a", "bob", Permission::Admin)
            .fail_set("org/a", "alice", "422 validation failed");

        let report = run(&api, "org", Permission::Maintain, false).await.unwrap();

        assert_eq!(report.downgraded, 1);
        assert_eq!(report.failures, 1);
        assert_eq!(set_permission_calls(&api.calls()).len(), 2);
    }

    #[tokio::test]
    async fn second_run_against_downgraded_state_mutates_nothing() {
        // State as it would look after a successful first run: the former
        // admins now hold maintain.
        let api = FakeApi::with_repos(&["org/a", "org/b"])
            .collaborators("org/a", &["alice", "bob"])
            .collaborators("org/b", &["carol"])
            .permission("org/a", "alice", Permission::Maintain)
            .permission("org/a", "bob", Permission::Write)
            .permission("org/b", "carol", Permission::Maintain);

        let report = run(&api, "org", Permission::Maintain, false).await.unwrap();

        assert_eq!(report.downgraded, 0);
        assert!(set_permission_calls(&api.calls()).is_empty());
    }

    #[tokio::test]
    async fn dry_run_issues_no_mutations() {
        let api = FakeApi::with_repos(&["org/a"])
            .collaborators("org/a", &["alice"])
            .permission("org/a", "alice", Permission::Admin);

        let report = run(&api, "org", Permission::Maintain, true).await.unwrap();

        assert_eq!(report.downgraded, 1);
        assert!(set_permission_calls(&api.calls()).is_empty());
    }
}
