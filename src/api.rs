// src/api.rs
//! HTTP surface: `/health` and the merge endpoint.

use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use shuttle_axum::axum::{
    extract::{OriginalUri, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::MergeConfig;
use crate::render::OutputFormat;
use crate::{fetch, merge, render, resolve};

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub config: MergeConfig,
}

impl AppState {
    /// Build the production state: pooled HTTP client + loaded config.
    pub fn from_env() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rss-merger/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            client,
            config: MergeConfig::load_default(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/merge", get(merge_handler))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// The three recognized query inputs. Parsed by hand because `url` repeats,
/// which the usual one-value-per-key extractors cannot represent.
#[derive(Debug, Default, PartialEq)]
struct MergeQuery {
    format: Option<String>,
    feeds: Option<String>,
    urls: Vec<String>,
}

impl MergeQuery {
    fn parse(query: &str) -> Self {
        let mut out = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "format" => out.format = Some(value.into_owned()),
                "feeds" => out.feeds = Some(value.into_owned()),
                "url" => out.urls.push(value.into_owned()),
                _ => {}
            }
        }
        out
    }
}

async fn merge_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    counter!("merge_requests_total").increment(1);

    let query = MergeQuery::parse(uri.query().unwrap_or_default());
    let format = OutputFormat::from_query(query.format.as_deref());

    let urls = match resolve::resolve_sources(query.feeds.as_deref(), query.urls) {
        Ok(urls) => urls,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let sources = fetch::fetch_all(&state.client, &urls).await;

    let request_url = canonical_request_url(&headers, &uri);
    let merged = merge::merge_feeds(sources, request_url.clone(), state.config.max_items);

    let body = match format {
        OutputFormat::Rss => render::rss::render_rss(&merged, Utc::now()),
        OutputFormat::JsonFeed => render::json_feed::render_json_feed(&merged, &request_url),
    };

    let ttl = state.config.cache_ttl_secs;
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CACHE_CONTROL,
                format!("max-age={ttl}, s-maxage={ttl}"),
            ),
        ],
        body,
    )
        .into_response()
}

/// Rebuild the URL the caller used, for the channel link / feed_url fields.
/// Honors the proxy's forwarded scheme; Shuttle terminates TLS upstream.
fn canonical_request_url(headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{scheme}://{host}{uri}")
}
