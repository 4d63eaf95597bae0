// src/fetch/detect.rs
//! Format detection: decide whether a source serves a JSON Feed or XML.
//!
//! The probe is deliberately forgiving. Whatever goes wrong — network error,
//! non-JSON content type, a body that fails to parse — the answer is "not
//! JSON" and the caller proceeds down the XML path. Detection must never be
//! the reason a source is lost.

use reqwest::header::{ACCEPT, CONTENT_TYPE};

/// Accept header used for every upstream request. JSON Feed servers key off
/// `application/feed+json`; everything else ignores the hint.
pub const FEED_ACCEPT: &str = "application/json, application/feed+json, */*";

/// True when the URL serves a JSON Feed document.
pub async fn is_json_feed(client: &reqwest::Client, url: &str) -> bool {
    match probe(client, url).await {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::debug!(error = ?e, url, "format probe inconclusive, assuming xml");
            false
        }
    }
}

async fn probe(client: &reqwest::Client, url: &str) -> anyhow::Result<bool> {
    let resp = client.get(url).header(ACCEPT, FEED_ACCEPT).send().await?;

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !content_type.contains("application/feed+json")
        && !content_type.contains("application/json")
    {
        return Ok(false);
    }

    // Content type alone is not enough: plenty of endpoints serve plain JSON
    // that is not a feed. The version marker settles it.
    let body = resp.text().await?;
    let doc: serde_json::Value = serde_json::from_str(&body)?;
    Ok(doc
        .get("version")
        .and_then(|v| v.as_str())
        .is_some_and(|v| v.contains("jsonfeed.org")))
}
