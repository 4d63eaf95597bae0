// src/fetch/mod.rs
pub mod detect;
pub mod json_feed;
pub mod rss_xml;
pub mod types;

use futures::future::join_all;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use sha2::{Digest, Sha256};

use crate::fetch::types::SourceFeed;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("merge_sources_total", "Source URLs dispatched for fetching.");
        describe_counter!(
            "merge_source_errors_total",
            "Sources that failed to fetch or parse and were replaced by an empty result."
        );
        describe_counter!(
            "merge_items_total",
            "Entries normalized out of successfully fetched sources."
        );
        describe_histogram!("merge_fetch_ms", "Per-source fetch+parse time in milliseconds.");
    });
}

/// Identifier of last resort for entries that carry neither guid nor link.
/// Deterministic, so the same entry hashes the same across requests.
pub(crate) fn fallback_guid(
    link: Option<&str>,
    title: Option<&str>,
    published: Option<i64>,
) -> String {
    let input = format!(
        "{}|{}|{}",
        link.unwrap_or(""),
        title.unwrap_or(""),
        published.map(|p| p.to_string()).unwrap_or_default()
    );
    let hash = Sha256::digest(input.as_bytes());
    format!("{:x}", hash)
}

/// Fetch and normalize one source.
///
/// This is the fault-isolation boundary: whatever goes wrong past this point
/// — unreachable host, non-2xx status, malformed body — is logged, counted,
/// and flattened into an empty `SourceFeed`. A bad source never takes its
/// siblings or the response down with it.
pub async fn fetch_source(client: &reqwest::Client, url: &str) -> SourceFeed {
    let t0 = std::time::Instant::now();

    let result = if detect::is_json_feed(client, url).await {
        json_feed::fetch_json_feed(client, url).await
    } else {
        rss_xml::fetch_rss(client, url).await
    };

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("merge_fetch_ms").record(ms);

    match result {
        Ok(feed) => {
            counter!("merge_items_total").increment(feed.entries.len() as u64);
            feed
        }
        Err(e) => {
            tracing::warn!(error = ?e, url, "source unavailable, substituting empty feed");
            counter!("merge_source_errors_total").increment(1);
            SourceFeed::empty()
        }
    }
}

/// Fixed fan-out/fan-in over all sources.
///
/// Every fetch starts at once and the join waits for the slowest; the result
/// vector keeps the input order, which is what makes the merge's tie-break
/// ("concatenation order") deterministic.
pub async fn fetch_all(client: &reqwest::Client, urls: &[String]) -> Vec<SourceFeed> {
    ensure_metrics_described();
    counter!("merge_sources_total").increment(urls.len() as u64);

    join_all(urls.iter().map(|url| fetch_source(client, url))).await
}
