//! # Configuration DTOs
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML -> DTO mapping and environment overrides
//!
//! Missing keys fall back to the documented defaults. Values are not validated
//! here; clamping happens where a value is consumed (e.g. [`HistoryLimits::new`]).
//!
//! [`HistoryLimits::new`]: crate::clipboard::HistoryLimits::new

use std::time::Duration;

use crate::clipboard::{HistoryLimits, FETCH_LIMIT, RESULT_LIMIT};

pub const ENV_STORE_URL: &str = "CLIPSYNC_STORE_URL";
pub const ENV_STORE_KEY: &str = "CLIPSYNC_STORE_KEY";
pub const ENV_STORE_TABLE: &str = "CLIPSYNC_STORE_TABLE";

const DEFAULT_TABLE: &str = "clipboard";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const MAX_POLL_INTERVAL_MS: u64 = 60 * 60 * 1000;
const DEFAULT_MAX_TEXT_BYTES: usize = 1024 * 1024;
const ORIGIN_MARKER_TICKS: u32 = 3;

/// Application configuration DTO
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub sync: SyncConfig,
}

/// Remote store settings.
///
/// `url` and `key` are optional: without both the store runs in degraded mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub key: Option<String>,
    pub table: String,
    pub timeout_secs: u64,
}

/// Complete credentials for the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCredentials {
    pub url: String,
    pub key: String,
    pub table: String,
    pub timeout: Duration,
}

/// Sync loop settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub local_poll_interval_ms: u64,
    pub remote_poll_interval_ms: u64,
    pub fetch_limit: usize,
    pub result_limit: usize,
    pub max_text_bytes: usize,
    /// Re-submit texts copied from the history list as new entries.
    pub resubmit_history_selection: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            key: None,
            table: DEFAULT_TABLE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            local_poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            remote_poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            fetch_limit: FETCH_LIMIT,
            result_limit: RESULT_LIMIT,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            resubmit_history_selection: false,
        }
    }
}

impl StoreConfig {
    /// Returns credentials when both URL and key are present and non-blank.
    pub fn credentials(&self) -> Option<StoreCredentials> {
        let url = non_blank(self.url.as_deref())?;
        let key = non_blank(self.key.as_deref())?;
        Some(StoreCredentials {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            table: self.table.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        })
    }
}

impl SyncConfig {
    pub fn local_poll_interval(&self) -> Duration {
        Duration::from_millis(self.local_poll_interval_ms.clamp(1, MAX_POLL_INTERVAL_MS))
    }

    pub fn remote_poll_interval(&self) -> Duration {
        Duration::from_millis(self.remote_poll_interval_ms.clamp(1, MAX_POLL_INTERVAL_MS))
    }

    pub fn history_limits(&self) -> HistoryLimits {
        HistoryLimits::new(self.fetch_limit, self.result_limit)
    }

    /// Lifetime of a self-write marker: the local watcher must get a few ticks
    /// to observe the write before the marker expires.
    pub fn origin_marker_ttl(&self) -> Duration {
        self.local_poll_interval()
            .checked_mul(ORIGIN_MARKER_TICKS)
            .unwrap_or(Duration::MAX)
    }
}

impl AppConfig {
    /// Create AppConfig from a TOML value.
    ///
    /// Unknown keys are ignored, missing keys keep their defaults.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let store = toml_value.get("store");
        let sync = toml_value.get("sync");

        let str_at = |section: Option<&toml::Value>, key: &str| {
            section
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let int_at = |section: Option<&toml::Value>, key: &str| {
            section
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
        };
        let bool_at = |section: Option<&toml::Value>, key: &str| {
            section.and_then(|s| s.get(key)).and_then(|v| v.as_bool())
        };

        Ok(Self {
            store: StoreConfig {
                url: str_at(store, "url"),
                key: str_at(store, "key"),
                table: str_at(store, "table").unwrap_or(defaults.store.table),
                timeout_secs: int_at(store, "timeout_secs").unwrap_or(defaults.store.timeout_secs),
            },
            sync: SyncConfig {
                local_poll_interval_ms: int_at(sync, "local_poll_interval_ms")
                    .unwrap_or(defaults.sync.local_poll_interval_ms),
                remote_poll_interval_ms: int_at(sync, "remote_poll_interval_ms")
                    .unwrap_or(defaults.sync.remote_poll_interval_ms),
                fetch_limit: int_at(sync, "fetch_limit")
                    .map(|v| v as usize)
                    .unwrap_or(defaults.sync.fetch_limit),
                result_limit: int_at(sync, "result_limit")
                    .map(|v| v as usize)
                    .unwrap_or(defaults.sync.result_limit),
                max_text_bytes: int_at(sync, "max_text_bytes")
                    .map(|v| v as usize)
                    .unwrap_or(defaults.sync.max_text_bytes),
                resubmit_history_selection: bool_at(sync, "resubmit_history_selection")
                    .unwrap_or(defaults.sync.resubmit_history_selection),
            },
        })
    }

    /// Apply store overrides from an environment lookup.
    ///
    /// The lookup is injected so callers decide where variables come from
    /// (`std::env::var` in production, a map in tests).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_STORE_URL) {
            self.store.url = Some(url);
        }
        if let Some(key) = lookup(ENV_STORE_KEY) {
            self.store.key = Some(key);
        }
        if let Some(table) = non_blank(lookup(ENV_STORE_TABLE).as_deref()) {
            self.store.table = table.to_string();
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
