// src/fetch/types.rs
use chrono::{DateTime, Utc};

/// One feed item, normalized out of whichever wire format the source spoke.
///
/// `pub_date` keeps the publication date exactly as the source wrote it;
/// `published_at` is the parsed form. RSS output prefers the raw string,
/// sorting prefers the parsed one.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub guid: Option<String>,
    pub pub_date: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub content_html: Option<String>,
    pub content_text: Option<String>,
    pub creator: Option<String>,
    pub categories: Vec<String>,
    /// Provenance. Stamped by the fetcher, never taken from the feed itself.
    pub source_title: Option<String>,
    pub source_url: String,
}

/// Everything one source contributed: its own title plus its entries.
/// A failed source shows up as `SourceFeed::empty()` — no title, no entries.
#[derive(Debug, Clone, Default)]
pub struct SourceFeed {
    pub title: Option<String>,
    pub entries: Vec<NormalizedEntry>,
}

impl SourceFeed {
    pub fn empty() -> Self {
        Self::default()
    }
}
