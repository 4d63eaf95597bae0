// tests/render_json.rs
//
// Serializer contract tests for the JSON Feed 1.1 output.

use chrono::{TimeZone, Utc};
use serde_json::Value as Json;

use rss_merger::merge::MergedFeed;
use rss_merger::render::json_feed::render_json_feed;
use rss_merger::NormalizedEntry;

fn entry() -> NormalizedEntry {
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

fn feed(items: Vec<NormalizedEntry>) -> MergedFeed {
    MergedFeed {
        title: "Merged RSS Feed!".to_string(),
        description: "Combined feed from Src".to_string(),
        link: "http://localhost/merge?url=x".to_string(),
        items,
    }
}

fn render(items: Vec<NormalizedEntry>) -> Json {
    let out = render_json_feed(&feed(items), "http://localhost/merge?url=x&format=json");
    serde_json::from_str(&out).expect("valid json")
}

#[test]
fn document_header_matches_jsonfeed_1_1() {
    let v = render(vec![]);
    assert_eq!(v["version"], "https://jsonfeed.org/version/1.1");
    assert_eq!(v["title"], "Merged RSS Feed!");
    assert_eq!(v["description"], "Combined feed from Src");
    assert_eq!(v["home_page_url"], "http://localhost/merge?url=x");
    assert_eq!(v["feed_url"], "http://localhost/merge?url=x&format=json");
    assert_eq!(v["items"].as_array().unwrap().len(), 0);
}

#[test]
fn id_prefers_guid_then_link_then_generated() {
    let mut with_guid = entry();
    with_guid.guid = Some("guid-1".to_string());
    with_guid.link = Some("https://a.example/1".to_string());

    let mut with_link = entry();
    with_link.link = Some("https://a.example/2".to_string());

    let bare = entry();

    let v = render(vec![with_guid, with_link, bare]);
    let items = v["items"].as_array().unwrap();
    assert_eq!(items[0]["id"], "guid-1");
    assert_eq!(items[1]["id"], "https://a.example/2");

    let generated = items[2]["id"].as_str().unwrap();
    assert!(!generated.is_empty());
    // Generated ids must be unique within a response.
    assert_ne!(generated, items[0]["id"].as_str().unwrap());
    assert_ne!(generated, items[1]["id"].as_str().unwrap());
}

#[test]
fn two_generated_ids_differ() {
    let v = render(vec![entry(), entry()]);
    let items = v["items"].as_array().unwrap();
    let a = items[0]["id"].as_str().unwrap();
    let b = items[1]["id"].as_str().unwrap();
    assert!(!a.is_empty() && !b.is_empty());
    assert_ne!(a, b);
}

#[test]
fn date_published_prefers_parsed_then_raw() {
    let mut parsed = entry();
    parsed.published_at = Some(Utc.timestamp_opt(1772438400, 0).unwrap());
    parsed.pub_date = Some("Mon, 02 Mar 2026 08:00:00 GMT".to_string());

    let mut raw_only = entry();
    raw_only.pub_date = Some("Mon, 02 Mar 2026 08:00:00 GMT".to_string());

    let dateless = entry();

    let v = render(vec![parsed, raw_only, dateless]);
    let items = v["items"].as_array().unwrap();
    assert_eq!(items[0]["date_published"], "2026-03-02T08:00:00+00:00");
    assert_eq!(items[1]["date_published"], "Mon, 02 Mar 2026 08:00:00 GMT");
    assert!(items[2].get("date_published").is_none());
}

#[test]
fn author_and_tags_are_omitted_when_absent() {
    let mut full = entry();
    full.creator = Some("Jamie".to_string());
    full.categories = vec!["a".to_string(), "b".to_string()];

    let v = render(vec![full, entry()]);
    let items = v["items"].as_array().unwrap();
    assert_eq!(items[0]["author"]["name"], "Jamie");
    assert_eq!(items[0]["tags"].as_array().unwrap().len(), 2);
    assert!(items[1].get("author").is_none());
    assert!(items[1].get("tags").is_none());
}

#[test]
fn content_fields_pass_through_unmodified() {
    let mut e = entry();
    e.title = Some("A note".to_string());
    e.link = Some("https://a.example/n".to_string());
    e.content_html = Some("<p>party 🎉</p>".to_string());
    e.content_text = Some("party".to_string());

    let v = render(vec![e]);
    let item = &v["items"][0];
    assert_eq!(item["url"], "https://a.example/n");
    assert_eq!(item["title"], "A note");
    // Unlike the RSS path, JSON output keeps non-ASCII content intact.
    assert_eq!(item["content_html"], "<p>party 🎉</p>");
    assert_eq!(item["content_text"], "party");
}
