use crate::client::{HEADER_RATE_LIMIT, HEADER_RATE_REMAINING, HEADER_RATE_RESET};
use reqwest::header::HeaderMap;

/// Rate limit status reported in the headers of every API response.
///
/// GitHub API docs: https://developer.github.com/v3/#rate-limiting
#[derive(Debug, Default)]
pub struct Rate {
    pub limit: usize,
    pub remaining: usize,
    /// UTC epoch seconds at which the current window resets
    pub reset: usize,
}

impl Rate {
    pub(super) fn from_headers(headers: &HeaderMap) -> Self {
        fn header_usize(headers: &HeaderMap, name: &str) -> Option<usize> {
            headers.get(name)?.to_str().ok()?.parse().ok()
        }

        Self {
            limit: header_usize(headers, HEADER_RATE_LIMIT).unwrap_or_default(),
            remaining: header_usize(headers, HEADER_RATE_REMAINING).unwrap_or_default(),
            reset: header_usize(headers, HEADER_RATE_RESET).unwrap_or_default(),
        }
    }
}
