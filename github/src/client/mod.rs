use log::debug;
use reqwest::{header, Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use std::{str::FromStr, time::Duration};

mod error;
mod pagination;
mod rate_limit;
mod repos;

pub use error::{Error, GithubApiError, Result};
pub use pagination::{Pagination, PaginationOptions};
pub use rate_limit::Rate;
pub use repos::{ListCollaboratorsOptions, ListReposOptions, RepoType, RepositoryClient};

// Constants
const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const HEADER_RATE_LIMIT: &str = "X-RateLimit-Limit";
const HEADER_RATE_REMAINING: &str = "X-RateLimit-Remaining";
const HEADER_RATE_RESET: &str = "X-RateLimit-Reset";
const HEADER_LINK: &str = "Link";

const MEDIA_TYPE_V3: &str = "application/vnd.github.v3+json";

/// Scheme used for the `Authorization` header.
///
/// GitHub has accepted both over the API's lifetime; `Bearer` is the
/// currently documented form, `token` the legacy one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    Bearer,
    Token,
}

impl AuthScheme {
    fn header_value(self, token: &str) -> String {
        match self {
            AuthScheme::Bearer => format!("Bearer {}", token),
            AuthScheme::Token => format!("token {}", token),
        }
    }
}

impl Default for AuthScheme {
    fn default() -> Self {
        AuthScheme::Bearer
    }
}

impl FromStr for AuthScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bearer" => Ok(AuthScheme::Bearer),
            "token" => Ok(AuthScheme::Token),
            _ => Err(format!("unknown auth scheme '{}'", s)),
        }
    }
}

#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    github_api_token: Option<String>,
    auth_scheme: AuthScheme,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            github_api_token: None,
            auth_scheme: AuthScheme::default(),
            timeout: None,
        }
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn github_api_token<S: Into<String>>(mut self, github_api_token: S) -> Self {
        self.github_api_token = Some(github_api_token.into());
        self
    }

    pub fn auth_scheme(mut self, auth_scheme: AuthScheme) -> Self {
        self.auth_scheme = auth_scheme;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        if !base_url.ends_with('/') {
            return Err(format!("base url '{}' must end with a trailing slash", base_url).into());
        }
        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_owned());

        // Every request carries the API version pin and, when a token was
        // provided, the Authorization header. reqwest attaches default
        // headers once per outgoing request before handing it to the
        // underlying transport.
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(MEDIA_TYPE_V3));

        if let Some(token) = &self.github_api_token {
            let mut value =
                header::HeaderValue::from_str(&self.auth_scheme.header_value(token))
                    .map_err(|e| e.to_string())?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = ReqwestClient::builder()
            .user_agent(user_agent.as_str())
            .default_headers(headers)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(Client { base_url, client })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the GitHub v3 REST API.
///
/// Immutable after construction and safe to share across calls; each
/// operation is a single synchronous round trip bounded by the client's
/// request timeout. No retries.
#[derive(Debug)]
pub struct Client {
    /// Base URL to use for API requests. Defaults to the public GitHub API,
    /// but can be overridden for use with GitHub Enterprise. Must always be
    /// terminated with a trailing slash.
    base_url: String,

    /// Client used to make http requests
    client: ReqwestClient,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub(crate) fn put(&self, url: &str) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, url);
        self.client.request(method, &url)
    }

    // Process a response received from GitHub: capture pagination and rate
    // limit information from the headers, check the status, and deserialize
    // the json body.
    pub(crate) async fn json<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Response<T>> {
        debug!("GitHub response: {} {}", response.status(), response.url());

        let pagination = Pagination::from_headers(response.headers());
        let rate = Rate::from_headers(response.headers());

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let payload = response.json().await?;

        Ok(Response::new(pagination, rate, payload))
    }

    // Process a bodiless mutation response. The collaborator mutation
    // endpoint signals success with exactly 201 (invitation created) or
    // 204 (permission updated in place); anything else is a failure.
    pub(crate) async fn empty(&self, response: reqwest::Response) -> Result<Response<()>> {
        debug!("GitHub response: {} {}", response.status(), response.url());

        let pagination = Pagination::from_headers(response.headers());
        let rate = Rate::from_headers(response.headers());

        match response.status() {
            StatusCode::CREATED | StatusCode::NO_CONTENT => {
                Ok(Response::new(pagination, rate, ()))
            }
            _ => Err(Self::status_error(response).await),
        }
    }

    async fn status_error(response: reqwest::Response) -> Error {
        let status = response.status();

        match response.json::<GithubApiError>().await {
            Ok(payload) => Error::Github(status, payload),
            Err(_) => Error::Message(format!("request failed: {}", status).into()),
        }
    }

    pub fn repos(&self) -> RepositoryClient<'_> {
        RepositoryClient::new(self)
    }
}

/// A typed API response along with the pagination and rate limit
/// information carried in its headers.
#[derive(Debug)]
pub struct Response<T> {
    pagination: Pagination,
    rate: Rate,
    inner: T,
}

impl<T> Response<T> {
    pub(crate) fn new(pagination: Pagination, rate: Rate, inner: T) -> Self {
        Self {
            pagination,
            rate,
            inner,
        }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn rate(&self) -> &Rate {
        &self.rate
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn into_parts(self) -> (Pagination, Rate, T) {
        (self.pagination, self.rate, self.inner)
    }
}
