//! HTTP utilities for the hosted league database

use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

/// Build request headers for the REST interface.
///
/// The hosted service wants the key twice: as `apikey` and as a bearer token.
/// Without a key only `Accept` is set (public read-only tables).
pub fn api_header_map(api_key: Option<&str>) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
        h.insert("apikey", HeaderValue::from_str(key)?);
        h.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {key}"))?);
    }
    Ok(h)
}
