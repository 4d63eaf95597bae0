// src/merge.rs
//! Merge engine: concatenate per-source entries, order by effective
//! publication time, cap the result.

use std::cmp::Reverse;

use chrono::DateTime;

use crate::fetch::types::{NormalizedEntry, SourceFeed};

pub const MERGED_FEED_TITLE: &str = "Merged RSS Feed!";

/// The merged result handed to the serializers.
#[derive(Debug, Clone)]
pub struct MergedFeed {
    pub title: String,
    pub description: String,
    /// Canonical URL of the request that produced this merge.
    pub link: String,
    pub items: Vec<NormalizedEntry>,
}

/// Publication time used for ordering, in unix seconds.
///
/// Precedence: the parsed timestamp, else the raw date string reinterpreted
/// (RFC 2822 first — that is what RSS pubDate looks like — then RFC 3339),
/// else zero, which sorts last.
pub fn effective_timestamp(entry: &NormalizedEntry) -> i64 {
    if let Some(dt) = entry.published_at {
        return dt.timestamp();
    }
    entry
        .pub_date
        .as_deref()
        .and_then(parse_date_string)
        .unwrap_or(0)
}

fn parse_date_string(ts: &str) -> Option<i64> {
    DateTime::parse_from_rfc2822(ts)
        .or_else(|_| DateTime::parse_from_rfc3339(ts))
        .ok()
        .map(|dt| dt.timestamp())
}

/// Combine all source feeds into one bounded, newest-first feed.
///
/// Sources are concatenated in the order they were requested and the sort is
/// stable, so entries with equal timestamps keep that concatenation order.
pub fn merge_feeds(sources: Vec<SourceFeed>, link: String, max_items: usize) -> MergedFeed {
    let description = format!(
        "Combined feed from {}",
        sources
            .iter()
            .filter_map(|s| s.title.as_deref())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut items: Vec<NormalizedEntry> = sources.into_iter().flat_map(|s| s.entries).collect();
    items.sort_by_key(|entry| Reverse(effective_timestamp(entry)));
    items.truncate(max_items);

    MergedFeed {
        title: MERGED_FEED_TITLE.to_string(),
        description,
        link,
        items,
    }
}
