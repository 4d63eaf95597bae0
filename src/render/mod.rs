// src/render/mod.rs
pub mod json_feed;
pub mod rss;

/// Which wire format the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Rss,
    JsonFeed,
}

impl OutputFormat {
    /// `rss` is the default; `json` and `jsonfeed` select JSON Feed.
    /// Unknown values fall back to RSS.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("json") | Some("jsonfeed") => OutputFormat::JsonFeed,
            _ => OutputFormat::Rss,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Rss => "application/rss+xml; charset=utf-8",
            OutputFormat::JsonFeed => "application/feed+json; charset=utf-8",
        }
    }
}
