//! Error type for the GitHub client

use reqwest::StatusCode;
use serde::Deserialize;
use std::borrow::Cow;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reqwest error")]
    Reqwest(#[from] reqwest::Error),

    #[error("json error")]
    Json(#[from] serde_json::Error),

    #[error("`{0}`")]
    Message(Cow<'static, str>),

    #[error("github error `{0}` `{1:?}`")]
    Github(StatusCode, GithubApiError),
}

impl Error {
    /// Status code of the platform's error response, if this error is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Github(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl From<&'static str> for Error {
    fn from(error: &'static str) -> Self {
        Error::Message(error.into())
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Message(error.into())
    }
}

// GitHub error responses
// https://developer.github.com/v3/#client-errors
#[derive(Debug, Deserialize)]
pub struct GithubApiError {
    pub message: Option<String>,
    pub errors: Option<Vec<GithubApiErrorDetail>>,
    pub documentation_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GithubApiErrorDetail {
    Message(String),
    Code {
        resource: String,
        field: String,
        code: String,
    },
}
