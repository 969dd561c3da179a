use admin_to_maintainer::{run, LiveApi, Result};
use github::{AuthScheme, Client, Permission};
use log::info;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Options {
    #[structopt(long, env = "ORG_NAME")]
    /// organization whose repositories should be processed
    org: String,

    #[structopt(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    /// personal access token used to authenticate against the API
    token: String,

    #[structopt(long)]
    /// base URL of the API, for GitHub Enterprise installs (trailing slash required)
    base_url: Option<String>,

    #[structopt(long, default_value = "bearer")]
    /// authorization scheme: "bearer" or legacy "token"
    auth_scheme: AuthScheme,

    #[structopt(long, default_value = "maintain")]
    /// permission level to grant collaborators currently holding admin
    target_permission: Permission,

    #[structopt(long)]
    /// report what would change without issuing any mutations
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = Options::from_args();

    // set up logging, allowing info level logging by default
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("admin-to-maintainer starting for org {}", options.org);

    let mut builder = Client::builder()
        .github_api_token(options.token.as_str())
        .auth_scheme(options.auth_scheme);
    if let Some(base_url) = &options.base_url {
        builder = builder.base_url(base_url.as_str());
    }
    let client = builder.build()?;

    let api = LiveApi::new(client);
    let report = run(&api, &options.org, options.target_permission, options.dry_run).await?;

    info!(
        "done: {} repositories ({} skipped), {} collaborators inspected, {} downgraded, {} failures",
        report.repositories,
        report.repositories_skipped,
        report.collaborators,
        report.downgraded,
        report.failures
    );

    Ok(())
}
