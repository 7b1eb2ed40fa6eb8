//! URL helpers

use std::collections::BTreeMap;

/// `k1=v1&k2=v2`, keys in sorted order, both sides percent-encoded
pub fn encode_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Host part of an absolute url (`https://api.hadax.com/v1` → `api.hadax.com`)
pub fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?']).next().unwrap_or(rest)
}
