//! `Cookie` request header parsing.

use http::HeaderMap;
use http::header::COOKIE;

/// Name and value pairs from every `Cookie` header, in order.
///
/// Pairs are separated by `;`. Fragments without `=` or with an empty name
/// are skipped, and a value wrapped in double quotes is unquoted. Headers
/// that are not valid visible ASCII are ignored.
pub fn parse(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(parse_pair)
        .collect()
}

fn parse_pair(pair: &str) -> Option<(String, String)> {
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or(value);
    Some((name.to_string(), value.to_string()))
}
