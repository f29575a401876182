//! Resource path building
//!
//! Identifiers (serials, network IDs, ...) are percent-encoded before they are
//! substituted into `{name}` placeholders, so a value can never add, remove or
//! reinterpret path segments. Values of exactly `.` or `..` are rejected since
//! URL resolution treats them (encoded or not) as dot segments.

use crate::error::{Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::sync::LazyLock;

/// Everything except RFC 3986 unreserved characters gets encoded
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Regex for matching path placeholders: {networkId}
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}").expect("placeholder regex is valid")
});

/// Percent-encode a single path segment
pub fn escape(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string()
}

/// Substitute `{name}` placeholders in a resource path template
///
/// Each value is passed through [`escape`]. Placeholders without a matching
/// argument are reported together in a single error; a `.` or `..` value is
/// an invalid value error for its placeholder.
///
/// ```
/// use meraki_dashboard::path::render_path;
///
/// let path = render_path("/devices/{serial}/cellularGateway/lan", &[("serial", "Q2XX/1")]).unwrap();
/// assert_eq!(path, "/devices/Q2XX%2F1/cellularGateway/lan");
/// ```
pub fn render_path(template: &str, args: &[(&str, &str)]) -> Result<String> {
    let mut missing = Vec::new();
    let mut dot_segment = None;

    let rendered = PLACEHOLDER_REGEX.replace_all(template, |cap: &regex::Captures<'_>| {
        let name = &cap[1];
        match args.iter().find(|(key, _)| *key == name) {
            Some((_, value)) if is_dot_segment(value) => {
                dot_segment.get_or_insert_with(|| name.to_string());
                String::new()
            }
            Some((_, value)) => escape(value),
            None => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if !missing.is_empty() {
        return Err(Error::undefined_var(missing.join(", ")));
    }
    if let Some(name) = dot_segment {
        return Err(Error::invalid_value(
            name,
            "\".\" and \"..\" are not valid path identifiers",
        ));
    }
    Ok(rendered.into_owned())
}

fn is_dot_segment(value: &str) -> bool {
    value == "." || value == ".."
}

/// Names of all placeholders in a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}
