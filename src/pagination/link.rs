//! RFC 5988 `Link` header parsing

use reqwest::header::{HeaderMap, LINK};
use url::Url;

/// One entry of a `Link` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target URL, as sent (may be relative)
    pub url: String,
    /// Relation type, e.g. `next`
    pub rel: String,
}

/// Parse a `Link` header value into its entries
///
/// Format: `<url>; rel="next", <url>; rel=prev`. Entries without a URL or
/// `rel` are skipped. Commas inside `<...>` do not split entries.
pub fn parse_link_header(header: &str) -> Vec<Link> {
    split_entries(header)
        .into_iter()
        .filter_map(parse_entry)
        .collect()
}

fn split_entries(header: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_url = false;
    let mut start = 0;

    for (i, c) in header.char_indices() {
        match c {
            '<' => in_url = true,
            '>' => in_url = false,
            ',' if !in_url => {
                entries.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&header[start..]);
    entries
}

fn parse_entry(entry: &str) -> Option<Link> {
    let mut url = None;
    let mut rel = None;

    for segment in entry.split(';') {
        let segment = segment.trim();
        if segment.starts_with('<') && segment.ends_with('>') {
            url = Some(&segment[1..segment.len() - 1]);
        } else if let Some((key, value)) = segment.split_once('=') {
            if key.trim().eq_ignore_ascii_case("rel") {
                rel = Some(value.trim().trim_matches('"').trim_matches('\''));
            }
        }
    }

    Some(Link {
        url: url?.to_string(),
        rel: rel?.to_string(),
    })
}

/// URL of the first link with relation `rel` across all `Link` headers
pub fn find_link(headers: &HeaderMap, rel: &str) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(parse_link_header)
        .find(|link| {
            link.rel
                .split_whitespace()
                .any(|r| r.eq_ignore_ascii_case(rel))
        })
        .map(|link| link.url)
}

/// Value of the query parameter `param` in a (possibly relative) link URL
///
/// Returns `None` when the parameter is missing or empty.
pub fn cursor_from_url(link: &str, param: &str) -> Option<String> {
    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(_) => Url::parse("http://localhost/").ok()?.join(link).ok()?,
    };

    url.query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
