use crate::client::HEADER_LINK;
use serde::Serialize;
use url::Url;

/// Pagination information extracted from a `Link` response header.
///
/// https://developer.github.com/v3/#pagination
#[derive(Debug, Default)]
pub struct Pagination {
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
    pub first_page: Option<usize>,
    pub last_page: Option<usize>,
}

impl Pagination {
    pub(super) fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let mut pagination = Self::default();

        let links = match headers.get(HEADER_LINK).and_then(|h| h.to_str().ok()) {
            Some(links) => links,
            None => return pagination,
        };

        for link in links.split(',') {
            let mut segments = link.split(';').map(str::trim);

            // First segment is the angle-bracketed target url
            let href = match segments.next() {
                Some(href) if href.starts_with('<') && href.ends_with('>') => {
                    &href[1..href.len() - 1]
                }
                _ => continue,
            };

            let page = match Url::parse(href).ok().and_then(|url| {
                url.query_pairs()
                    .find_map(|(k, v)| if k == "page" { v.parse().ok() } else { None })
            }) {
                Some(page) => page,
                None => continue,
            };

            for rel in segments {
                match rel {
                    r#"rel="next""# => pagination.next_page = Some(page),
                    r#"rel="prev""# => pagination.prev_page = Some(page),
                    r#"rel="first""# => pagination.first_page = Some(page),
                    r#"rel="last""# => pagination.last_page = Some(page),
                    _ => {}
                }
            }
        }

        pagination
    }
}

/// Query-string options accepted by every paginated list endpoint.
#[derive(Debug, Default, Serialize)]
pub struct PaginationOptions {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[cfg(test)]
mod test {
    use super::{Pagination, HEADER_LINK};
    use reqwest::header::HeaderMap;

    #[test]
    fn pagination() {
        let mut headers = HeaderMap::new();
        let link = r#"<https://api.github.com/orgs/octo/repos?page=3&per_page=100>; rel="next", <https://api.github.com/orgs/octo/repos?page=50&per_page=100>; rel="last""#;
        headers.insert(HEADER_LINK, link.parse().unwrap());

        let p = Pagination::from_headers(&headers);
        assert_eq!(p.next_page, Some(3));
        assert_eq!(p.last_page, Some(50));
        assert_eq!(p.prev_page, None);
    }

    #[test]
    fn no_link_header() {
        let p = Pagination::from_headers(&HeaderMap::new());
        assert_eq!(p.next_page, None);
    }

    #[test]
    fn malformed_links_are_skipped() {
        let mut headers = HeaderMap::new();
        let link = r#"not-a-link; rel="next", <://bad>; rel="last""#;
        headers.insert(HEADER_LINK, link.parse().unwrap());

        let p = Pagination::from_headers(&headers);
        assert_eq!(p.next_page, None);
        assert_eq!(p.last_page, None);
    }
}
