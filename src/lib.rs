// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod fetch;
pub mod merge;
pub mod metrics;
pub mod render;
pub mod resolve;
pub mod share;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::MergeConfig;
pub use crate::fetch::types::{NormalizedEntry, SourceFeed};
pub use crate::merge::MergedFeed;
