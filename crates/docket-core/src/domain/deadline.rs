//! Deadline Record
//!
//! A dated legal obligation tracked per case.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deadline priority tier, ordered fatal (most urgent) to informational.
///
/// The backend has used two vocabularies over time (`fatal`/`critical`/`important`/
/// `standard`/`informational` and `high`/`medium`/`low`); both parse to the same tiers.
/// Anything else is kept verbatim as `Other` and ranks after every known tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Fatal,
    Critical,
    Important,
    #[default]
    Standard,
    Informational,
    Other(String),
}

/// Rank given to unrecognised priority strings
pub const UNKNOWN_PRIORITY_RANK: u8 = 99;

impl Priority {
    /// All known tiers in display order
    pub const KNOWN: [Priority; 5] = [
        Priority::Fatal,
        Priority::Critical,
        Priority::Important,
        Priority::Standard,
        Priority::Informational,
    ];

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Priority::Fatal,
            "critical" => Priority::Critical,
            "important" | "high" => Priority::Important,
            "standard" | "medium" => Priority::Standard,
            "informational" | "low" => Priority::Informational,
            _ => Priority::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Fatal => "fatal",
            Priority::Critical => "critical",
            Priority::Important => "important",
            Priority::Standard => "standard",
            Priority::Informational => "informational",
            Priority::Other(raw) => raw,
        }
    }

    /// Sort rank: lower is more urgent
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Fatal => 1,
            Priority::Critical => 2,
            Priority::Important => 3,
            Priority::Standard => 4,
            Priority::Informational => 5,
            Priority::Other(_) => UNKNOWN_PRIORITY_RANK,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Priority::Fatal => "Fatal",
            Priority::Critical => "Critical",
            Priority::Important => "Important",
            Priority::Standard => "Standard",
            Priority::Informational => "Informational",
            Priority::Other(raw) => raw,
        }
    }

    /// Fatal and critical deadlines get urgent visual treatment
    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::Fatal | Priority::Critical)
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Priority::parse(&value)
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_str().to_string()
    }
}

/// Deadline completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl DeadlineStatus {
    pub const ALL: [DeadlineStatus; 3] = [
        DeadlineStatus::Pending,
        DeadlineStatus::Completed,
        DeadlineStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineStatus::Pending => "pending",
            DeadlineStatus::Completed => "completed",
            DeadlineStatus::Cancelled => "cancelled",
            DeadlineStatus::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "pending" => DeadlineStatus::Pending,
            "completed" => DeadlineStatus::Completed,
            "cancelled" => DeadlineStatus::Cancelled,
            _ => DeadlineStatus::Unknown,
        }
    }
}

/// How the backend arrived at the date
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationMeta {
    #[serde(default)]
    pub rule_citation: Option<String>,
    /// Extra days added for the service method (mail, electronic, ...)
    #[serde(default)]
    pub service_method_adjustment_days: Option<i32>,
    /// 0-100
    #[serde(default)]
    pub confidence_score: Option<f32>,
    #[serde(default)]
    pub calculation_basis: Option<String>,
}

/// Deadline record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    pub id: String,
    pub case_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "wire_date")]
    pub deadline_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: DeadlineStatus,
    #[serde(default)]
    pub deadline_type: Option<String>,
    #[serde(default)]
    pub trigger_id: Option<String>,
    #[serde(default)]
    pub trigger_event: Option<String>,
    #[serde(default)]
    pub applicable_rule: Option<String>,
    #[serde(default)]
    pub rule_citation: Option<String>,
    #[serde(default)]
    pub action_required: Option<String>,
    #[serde(default)]
    pub service_method: Option<String>,
    #[serde(default)]
    pub calculation: Option<CalculationMeta>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Deadline {
    /// Create a pending standard-priority deadline with no optional fields set
    pub fn new(id: impl Into<String>, case_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            case_id: case_id.into(),
            title: title.into(),
            description: None,
            deadline_date: None,
            priority: Priority::Standard,
            status: DeadlineStatus::Pending,
            deadline_type: None,
            trigger_id: None,
            trigger_event: None,
            applicable_rule: None,
            rule_citation: None,
            action_required: None,
            service_method: None,
            calculation: None,
            created_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == DeadlineStatus::Completed
    }

    /// Dated strictly before `today` and not completed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.deadline_date.is_some_and(|d| d < today)
    }

    /// Signed whole days from `today` to the deadline, if dated
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        self.deadline_date.map(|d| (d - today).num_days())
    }

    /// Creation time parsed from either RFC 3339 or a bare ISO timestamp
    pub fn created_timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.created_at.as_deref()?;
        chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }

    /// Rule citation from either the record or its calculation metadata
    pub fn citation(&self) -> Option<&str> {
        self.rule_citation
            .as_deref()
            .or_else(|| self.calculation.as_ref().and_then(|c| c.rule_citation.as_deref()))
    }
}

/// Older records send `null` for priority and status; read it as the default tier.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Dates arrive as `YYYY-MM-DD` or as a full timestamp; only the day matters.
/// Unparseable values read as "no date".
pub(crate) mod wire_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.as_deref().and_then(parse_day))
    }

    pub fn parse_day(raw: &str) -> Option<NaiveDate> {
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_priority_aliases() {
        assert_eq!(Priority::parse("HIGH"), Priority::Important);
        assert_eq!(Priority::parse("medium"), Priority::Standard);
        assert_eq!(Priority::parse("low"), Priority::Informational);
        assert_eq!(Priority::parse("Fatal"), Priority::Fatal);
        assert_eq!(Priority::parse("urgent"), Priority::Other("urgent".to_string()));
    }

    #[test]
    fn test_priority_rank_order() {
        let ranks: Vec<u8> = Priority::KNOWN.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(Priority::parse("whatever").rank(), UNKNOWN_PRIORITY_RANK);
    }

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "id": "d1",
            "case_id": "c1",
            "title": "Answer due",
            "deadline_date": "2026-03-02T00:00:00",
            "priority": "high",
            "status": "archived",
            "calculation": {"rule_citation": "FRCP 12(a)", "confidence_score": 92.5}
        }"#;
        let deadline: Deadline = serde_json::from_str(json).unwrap();
        assert_eq!(deadline.deadline_date, Some(day(2026, 3, 2)));
        assert_eq!(deadline.priority, Priority::Important);
        assert_eq!(deadline.status, DeadlineStatus::Unknown);
        assert_eq!(deadline.citation(), Some("FRCP 12(a)"));
    }

    #[test]
    fn test_null_priority_and_status_read_as_defaults() {
        let json = r#"[
            {"id":"d1","case_id":"c1","title":"Answer","priority":null,"status":null},
            {"id":"d2","case_id":"c1","title":"Reply","priority":"fatal","status":"completed"}
        ]"#;
        let deadlines: Vec<Deadline> = serde_json::from_str(json).unwrap();
        assert_eq!(deadlines.len(), 2);
        assert_eq!(deadlines[0].priority, Priority::Standard);
        assert_eq!(deadlines[0].status, DeadlineStatus::Pending);
        assert_eq!(deadlines[1].priority, Priority::Fatal);
        assert_eq!(deadlines[1].status, DeadlineStatus::Completed);
    }

    #[test]
    fn test_garbage_date_reads_as_none() {
        let json = r#"{"id":"d1","case_id":"c1","title":"t","deadline_date":"TBD"}"#;
        let deadline: Deadline = serde_json::from_str(json).unwrap();
        assert!(deadline.deadline_date.is_none());
    }

    #[test]
    fn test_overdue_requires_pending_past_date() {
        let today = day(2026, 5, 10);
        let mut d = Deadline::new("d1", "c1", "Reply brief");
        assert!(!d.is_overdue(today));

        d.deadline_date = Some(day(2026, 5, 9));
        assert!(d.is_overdue(today));

        d.status = DeadlineStatus::Completed;
        assert!(!d.is_overdue(today));

        d.status = DeadlineStatus::Pending;
        d.deadline_date = Some(today);
        assert!(!d.is_overdue(today));
        assert_eq!(d.days_until(today), Some(0));
    }

    #[test]
    fn test_created_timestamp_formats() {
        let mut d = Deadline::new("d1", "c1", "t");
        d.created_at = Some("2026-01-05T10:00:00Z".to_string());
        assert!(d.created_timestamp().is_some());
        d.created_at = Some("2026-01-05T10:00:00.123".to_string());
        assert!(d.created_timestamp().is_some());
        d.created_at = Some("yesterday".to_string());
        assert!(d.created_timestamp().is_none());
    }
}
