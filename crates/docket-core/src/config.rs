//! Application Configuration
//!
//! Defaults come from an embedded TOML document, are sanitized after parsing, and can be
//! overridden per build through environment variables.

use serde::{Deserialize, Serialize};

use crate::calendar::WeekStart;
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api/v1".to_string(),
        }
    }
}

impl ApiConfig {
    /// `base_url` + `api_prefix` + `path`, with exactly one slash at each seam
    pub fn endpoint(&self, path: &str) -> String {
        let mut url = self.base_url.trim_end_matches('/').to_string();
        for segment in [self.api_prefix.as_str(), path] {
            let segment = segment.trim_matches('/');
            if !segment.is_empty() {
                url.push('/');
                url.push_str(segment);
            }
        }
        url
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Empty means realtime is disabled
    pub ws_url: String,
    pub typing_timeout_ms: u64,
    pub teardown_grace_ms: u32,
    pub typing_prune_ms: u32,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            ws_url: String::new(),
            typing_timeout_ms: 3_000,
            teardown_grace_ms: 100,
            typing_prune_ms: 1_000,
        }
    }
}

impl RealtimeConfig {
    pub fn endpoint(&self) -> Option<&str> {
        let url = self.ws_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub dashboard_secs: u32,
    pub notifications_secs: u32,
    pub health_secs: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            dashboard_secs: 60,
            notifications_secs: 30,
            health_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentConfig {
    pub capacity: usize,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self { capacity: 8 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub week_start: WeekStart,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub realtime: RealtimeConfig,
    pub polling: PollingConfig,
    pub recent: RecentConfig,
    pub calendar: CalendarConfig,
}

const MAX_RECENT: usize = 50;

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> DomainResult<Self> {
        let mut config: AppConfig =
            toml::from_str(raw).map_err(|e| DomainError::InvalidInput(format!("config: {}", e)))?;
        config.sanitize();
        Ok(config)
    }

    /// Replace zero/blank values with defaults and normalise URLs
    pub fn sanitize(&mut self) {
        let defaults = AppConfig::default();

        self.api.base_url = self.api.base_url.trim().trim_end_matches('/').to_string();
        if self.api.base_url.is_empty() {
            self.api.base_url = defaults.api.base_url;
        }
        self.realtime.ws_url = self.realtime.ws_url.trim().trim_end_matches('/').to_string();

        if self.realtime.typing_timeout_ms == 0 {
            self.realtime.typing_timeout_ms = defaults.realtime.typing_timeout_ms;
        }
        if self.realtime.typing_prune_ms == 0 {
            self.realtime.typing_prune_ms = defaults.realtime.typing_prune_ms;
        }
        if self.polling.dashboard_secs == 0 {
            self.polling.dashboard_secs = defaults.polling.dashboard_secs;
        }
        if self.polling.notifications_secs == 0 {
            self.polling.notifications_secs = defaults.polling.notifications_secs;
        }
        if self.polling.health_secs == 0 {
            self.polling.health_secs = defaults.polling.health_secs;
        }
        if self.recent.capacity == 0 {
            self.recent.capacity = defaults.recent.capacity;
        }
        self.recent.capacity = self.recent.capacity.min(MAX_RECENT);
    }

    /// Build-time overrides; `Some("")` for the socket URL disables realtime
    pub fn with_overrides(mut self, api_url: Option<&str>, ws_url: Option<&str>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.to_string();
        }
        if let Some(url) = ws_url {
            self.realtime.ws_url = url.to_string();
        }
        self.sanitize();
        self
    }
}
