// src/config.rs
//! Service tunables. The item cap and cache lifetime look like magic numbers
//! in the wire output but are plain configuration here.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_ITEMS: usize = 100;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

pub const ENV_CONFIG_PATH: &str = "MERGE_CONFIG_PATH";
pub const ENV_MAX_ITEMS: &str = "MERGE_MAX_ITEMS";
pub const ENV_CACHE_TTL_SECS: &str = "MERGE_CACHE_TTL_SECS";

const DEFAULT_CONFIG_FILE: &str = "config/merge.toml";

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct MergeConfig {
    /// Upper bound on items in a merged response.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Advised shared/private cache lifetime for successful responses.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl MergeConfig {
    /// Load from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading merge config from {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load using env var + fallbacks:
    /// 1) $MERGE_CONFIG_PATH
    /// 2) config/merge.toml
    /// 3) built-in defaults
    /// Individual MERGE_MAX_ITEMS / MERGE_CACHE_TTL_SECS overrides win last.
    /// Never fails: unreadable files and unparseable values are logged and
    /// replaced by defaults.
    pub fn load_default() -> Self {
        let mut cfg = Self::file_config().unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "merge config file ignored, using defaults");
            Self::default()
        });
        cfg.apply_env_overrides();
        cfg
    }

    fn file_config() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            return Self::load_from(&PathBuf::from(p));
        }
        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::load_from(&default_path);
        }
        Ok(Self::default())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(ENV_MAX_ITEMS) {
            match raw.parse::<usize>() {
                Ok(v) if v > 0 => self.max_items = v,
                _ => tracing::warn!(%raw, "ignoring unusable {ENV_MAX_ITEMS}"),
            }
        }
        if let Ok(raw) = std::env::var(ENV_CACHE_TTL_SECS) {
            match raw.parse::<u64>() {
                Ok(v) => self.cache_ttl_secs = v,
                _ => tracing::warn!(%raw, "ignoring unusable {ENV_CACHE_TTL_SECS}"),
            }
        }
    }
}
