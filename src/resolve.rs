// src/resolve.rs
//! Feed Source Resolver: turns the request's query into the concrete list of
//! source URLs to fetch.
//!
//! The compressed `feeds` token wins when present; the repeatable literal
//! `url` parameter is the legacy fallback. A *present but broken* token is a
//! caller error, never a silent fallback.

use thiserror::Error;

use crate::share;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// `feeds` was present but did not decode into a JSON array of strings.
    #[error("Invalid compressed feeds parameter")]
    InvalidInput,
    /// The resolved source set came up empty.
    #[error("No RSS feed URLs provided")]
    NoSourcesProvided,
}

/// Resolve the source URL set from the two query inputs.
pub fn resolve_sources(
    feeds_token: Option<&str>,
    literal_urls: Vec<String>,
) -> Result<Vec<String>, ResolveError> {
    let urls = match feeds_token {
        Some(token) => share::decode_feed_list(token).map_err(|e| {
            tracing::debug!(error = ?e, "rejecting feeds token");
            ResolveError::InvalidInput
        })?,
        None => literal_urls,
    };

    if urls.is_empty() {
        return Err(ResolveError::NoSourcesProvided);
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_takes_precedence_over_literals() {
        let urls = vec!["https://a.example/feed".to_string()];
        let token = share::encode_feed_list(&urls).unwrap();
        let resolved = resolve_sources(
            Some(&token),
            vec!["https://ignored.example/feed".to_string()],
        )
        .unwrap();
        assert_eq!(resolved, urls);
    }

    #[test]
    fn absent_token_falls_back_to_literals() {
        let literals = vec![
            "https://a.example/feed".to_string(),
            "https://b.example/feed".to_string(),
        ];
        assert_eq!(resolve_sources(None, literals.clone()).unwrap(), literals);
    }

    #[test]
    fn broken_token_is_invalid_input_not_a_fallback() {
        let err = resolve_sources(Some("%%%"), vec!["https://a.example/feed".to_string()])
            .unwrap_err();
        assert_eq!(err, ResolveError::InvalidInput);
    }

    #[test]
    fn token_decoding_to_empty_list_means_no_sources() {
        let token = share::encode_feed_list(&[]).unwrap();
        assert_eq!(
            resolve_sources(Some(&token), vec![]).unwrap_err(),
            ResolveError::NoSourcesProvided
        );
    }

    #[test]
    fn nothing_at_all_means_no_sources() {
        assert_eq!(
            resolve_sources(None, vec![]).unwrap_err(),
            ResolveError::NoSourcesProvided
        );
    }
}
