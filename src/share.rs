// src/share.rs
//! Shareable-link token codec.
//!
//! The composer UI stores the whole feed list in one URL-safe query value so a
//! merge can be passed around as a permalink. The wire format is lz-string's
//! `compressToEncodedURIComponent` applied to the JSON array of URLs, which is
//! what browser-side encoders produce; `lz-str` speaks the same format.

use anyhow::{anyhow, Context, Result};

/// Encode a list of feed URLs into a compact URL-safe token.
pub fn encode_feed_list(urls: &[String]) -> Result<String> {
    let json = serde_json::to_string(urls).context("serializing feed list")?;
    Ok(lz_str::compress_to_encoded_uri_component(json.as_str()))
}

/// Decode a token back into the list of feed URLs.
///
/// Fails on corrupt tokens and on tokens that decompress to anything other
/// than a JSON array of strings. The caller decides what a failure means;
/// this layer only knows the wire format.
pub fn decode_feed_list(token: &str) -> Result<Vec<String>> {
    let wide = lz_str::decompress_from_encoded_uri_component(token)
        .ok_or_else(|| anyhow!("token is not valid lz-string data"))?;
    let json = String::from_utf16(&wide).context("decompressed token is not utf-16 text")?;
    let urls: Vec<String> = serde_json::from_str(&json).context("token payload is not a string array")?;
    Ok(urls)
}
