// src/render/json_feed.rs
//! JSON Feed 1.1 serializer.

use serde::Serialize;
use uuid::Uuid;

use crate::merge::{MergedFeed, MERGED_FEED_TITLE};

pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

#[derive(Debug, Serialize)]
struct JsonFeedOutput {
    version: &'static str,
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    home_page_url: Option<String>,
    feed_url: String,
    items: Vec<JsonFeedItemOutput>,
}

#[derive(Debug, Serialize)]
struct JsonFeedItemOutput {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<JsonFeedAuthorOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonFeedAuthorOutput {
    name: String,
}

/// Render the merged feed as a JSON Feed 1.1 document.
///
/// `request_url` is echoed back as `feed_url` so readers can resubscribe to
/// the exact merge they were handed.
pub fn render_json_feed(feed: &MergedFeed, request_url: &str) -> String {
    let items = feed
        .items
        .iter()
        .map(|item| {
            // Never empty: guid, else link, else a one-off identifier.
            let id = item
                .guid
                .clone()
                .or_else(|| item.link.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string());

            JsonFeedItemOutput {
                id,
                url: item.link.clone(),
                title: item.title.clone(),
                content_html: item.content_html.clone(),
                content_text: item.content_text.clone(),
                date_published: item
                    .published_at
                    .map(|dt| dt.to_rfc3339())
                    .or_else(|| item.pub_date.clone()),
                author: item
                    .creator
                    .clone()
                    .map(|name| JsonFeedAuthorOutput { name }),
                tags: item.categories.clone(),
            }
        })
        .collect();

    let title = if feed.title.is_empty() {
        MERGED_FEED_TITLE.to_string()
    } else {
        feed.title.clone()
    };

    let doc = JsonFeedOutput {
        version: JSON_FEED_VERSION,
        title,
        description: feed.description.clone(),
        home_page_url: Some(feed.link.clone()),
        feed_url: request_url.to_string(),
        items,
    };

    serde_json::to_string_pretty(&doc).expect("json feed serialization")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::types::NormalizedEntry;

    fn bare_entry() -> NormalizedEntry {
        NormalizedEntry {
            title: None,
            link: None,
            guid: None,
            pub_date: None,
            published_at: None,
            content_html: None,
            content_text: None,
            creator: None,
            categories: Vec::new(),
            source_title: None,
            source_url: "https://src.example/feed".to_string(),
        }
    }

    fn feed_with(items: Vec<NormalizedEntry>) -> MergedFeed {
        MergedFeed {
            title: MERGED_FEED_TITLE.to_string(),
            description: "Combined feed from X".to_string(),
            link: "http://localhost/merge?url=a".to_string(),
            items,
        }
    }

    #[test]
    fn version_is_the_jsonfeed_1_1_uri() {
        let out = render_json_feed(&feed_with(vec![]), "http://localhost/merge");
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["version"], "https://jsonfeed.org/version/1.1");
        assert_eq!(v["feed_url"], "http://localhost/merge");
    }

    #[test]
    fn id_is_never_empty_even_without_guid_or_link() {
        let out = render_json_feed(&feed_with(vec![bare_entry()]), "http://localhost/merge");
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        let id = v["items"][0]["id"].as_str().unwrap();
        assert!(!id.is_empty());
    }

    #[test]
    fn author_is_omitted_entirely_without_a_creator() {
        let mut with_creator = bare_entry();
        with_creator.creator = Some("Jamie".to_string());
        let out = render_json_feed(
            &feed_with(vec![bare_entry(), with_creator]),
            "http://localhost/merge",
        );
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(v["items"][0].get("author").is_none());
        assert_eq!(v["items"][1]["author"]["name"], "Jamie");
    }

    #[test]
    fn date_published_prefers_parsed_over_raw() {
        use chrono::{TimeZone, Utc};
        let mut entry = bare_entry();
        entry.pub_date = Some("Mon, 02 Mar 2026 08:00:00 GMT".to_string());
        entry.published_at = Some(Utc.timestamp_opt(1772438400, 0).unwrap());
        let out = render_json_feed(&feed_with(vec![entry]), "http://localhost/merge");
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        let date = v["items"][0]["date_published"].as_str().unwrap();
        assert!(date.starts_with("2026-03-02T08:00:00"));
    }
}
