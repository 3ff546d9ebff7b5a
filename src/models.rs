//! Data Models
//!
//! Wire types the backend returns for screens outside the docket core.

use serde::{Deserialize, Serialize};

pub use docket_core::{Case, CaseStats, Deadline, DeadlineStatus, Priority, Trigger};

/// Dashboard summary cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_cases: u32,
    pub total_documents: u32,
    pub pending_deadlines: u32,
    pub overdue_deadlines: u32,
    pub deadlines_this_week: u32,
    pub completed_this_month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UnreadCount {
    #[serde(default, alias = "unread_count")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    #[serde(default, alias = "file_name")]
    pub filename: String,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { id: None, role: ChatRole::User, content: content.into(), created_at: None }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { id: None, role: ChatRole::Assistant, content: content.into(), created_at: None }
    }
}

/// Assistant answer to one message
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(alias = "message", alias = "content")]
    pub response: String,
    #[serde(default)]
    pub message_id: Option<String>,
    /// Set when the assistant created or changed deadlines
    #[serde(default)]
    pub deadlines_changed: bool,
}

/// Scraper state as reported by the backend monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Down,
    #[default]
    #[serde(other)]
    Unknown,
}

impl HealthStatus {
    /// Higher is worse; an unreported source ranks between healthy and degraded
    pub fn severity(self) -> u8 {
        match self {
            HealthStatus::Healthy => 0,
            HealthStatus::Unknown => 1,
            HealthStatus::Degraded => 2,
            HealthStatus::Down => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Degraded => "Degraded",
            HealthStatus::Down => "Down",
            HealthStatus::Unknown => "Unknown",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "health-ok",
            HealthStatus::Degraded => "health-warn",
            HealthStatus::Down => "health-down",
            HealthStatus::Unknown => "health-unknown",
        }
    }
}

/// One court-rule scraper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperSource {
    #[serde(alias = "source")]
    pub name: String,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub status: Option<HealthStatus>,
    #[serde(default)]
    pub last_success_at: Option<String>,
    #[serde(default)]
    pub consecutive_failures: u32,
    #[serde(default)]
    pub last_error: Option<String>,
}

impl ScraperSource {
    pub fn effective_status(&self) -> HealthStatus {
        self.status.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthCounts {
    pub healthy: usize,
    pub degraded: usize,
    pub down: usize,
    pub unknown: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScraperHealth {
    #[serde(default, alias = "overall_status")]
    pub status: Option<HealthStatus>,
    #[serde(default)]
    pub checked_at: Option<String>,
    #[serde(default, alias = "scrapers")]
    pub sources: Vec<ScraperSource>,
}

impl ScraperHealth {
    /// Reported overall status, else the worst source (healthy when there are none)
    pub fn overall(&self) -> HealthStatus {
        self.status.unwrap_or_else(|| {
            self.sources
                .iter()
                .map(ScraperSource::effective_status)
                .max_by_key(|s| s.severity())
                .unwrap_or(HealthStatus::Healthy)
        })
    }

    pub fn counts(&self) -> HealthCounts {
        let mut counts = HealthCounts::default();
        for source in &self.sources {
            match source.effective_status() {
                HealthStatus::Healthy => counts.healthy += 1,
                HealthStatus::Degraded => counts.degraded += 1,
                HealthStatus::Down => counts.down += 1,
                HealthStatus::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    /// Worst first, then by name
    pub fn by_severity(&self) -> Vec<ScraperSource> {
        let mut sources = self.sources.clone();
        sources.sort_by(|a, b| {
            b.effective_status()
                .severity()
                .cmp(&a.effective_status().severity())
                .then_with(|| a.name.cmp(&b.name))
        });
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_reply_accepts_message_alias() {
        let reply: ChatReply = serde_json::from_str(r#"{"message": "Answer is due **Friday**"}"#).unwrap();
        assert_eq!(reply.response, "Answer is due **Friday**");
        assert!(!reply.deadlines_changed);
    }

    #[test]
    fn test_dashboard_stats_missing_fields_default() {
        let stats: DashboardStats = serde_json::from_str(r#"{"total_cases": 4}"#).unwrap();
        assert_eq!(stats.total_cases, 4);
        assert_eq!(stats.overdue_deadlines, 0);
    }

    #[test]
    fn test_unread_count_alias() {
        let count: UnreadCount = serde_json::from_str(r#"{"unread_count": 7}"#).unwrap();
        assert_eq!(count.count, 7);
    }

    #[test]
    fn test_scraper_health_tolerates_missing_and_unknown_status() {
        let json = r#"{
            "checked_at": "2026-10-16T08:00:00Z",
            "scrapers": [
                {"source": "fl-rules", "status": "healthy"},
                {"name": "ca-rules", "status": null, "consecutive_failures": 2},
                {"name": "ny-rules", "status": "maintenance"},
                {"name": "tx-rules", "status": "down", "last_error": "timeout"}
            ]
        }"#;
        let health: ScraperHealth = serde_json::from_str(json).unwrap();
        assert_eq!(health.sources.len(), 4);
        assert_eq!(health.sources[0].name, "fl-rules");
        assert_eq!(health.sources[2].effective_status(), HealthStatus::Unknown);
        assert_eq!(health.overall(), HealthStatus::Down);
        assert_eq!(health.counts(), HealthCounts { healthy: 1, degraded: 0, down: 1, unknown: 2 });

        let names: Vec<String> = health.by_severity().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["tx-rules", "ca-rules", "ny-rules", "fl-rules"]);
    }

    #[test]
    fn test_reported_overall_status_wins() {
        let health: ScraperHealth =
            serde_json::from_str(r#"{"overall_status": "degraded", "sources": [{"name": "fl-rules", "status": "healthy"}]}"#)
                .unwrap();
        assert_eq!(health.overall(), HealthStatus::Degraded);
        assert_eq!(ScraperHealth::default().overall(), HealthStatus::Healthy);
    }
}
