//! Case Record
//!
//! Case records plus the list-view statistics aggregated client-side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::deadline::{wire_date, Deadline, DeadlineStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub case_number: String,
    pub title: String,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub case_type: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default, rename = "_stats")]
    pub stats: Option<CaseStats>,
}

/// Derived list-view block, never sent by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseStats {
    pub document_count: usize,
    pub pending_deadline_count: usize,
    #[serde(default, with = "wire_date")]
    pub next_deadline: Option<NaiveDate>,
}

impl CaseStats {
    /// Pending count plus the earliest pending date on or after `today`
    pub fn aggregate(document_count: usize, deadlines: &[Deadline], today: NaiveDate) -> Self {
        let pending = deadlines
            .iter()
            .filter(|d| d.status == DeadlineStatus::Pending);

        let mut pending_deadline_count = 0;
        let mut next_deadline: Option<NaiveDate> = None;
        for deadline in pending {
            pending_deadline_count += 1;
            if let Some(date) = deadline.deadline_date.filter(|d| *d >= today) {
                next_deadline = Some(next_deadline.map_or(date, |n| n.min(date)));
            }
        }

        Self {
            document_count,
            pending_deadline_count,
            next_deadline,
        }
    }

    /// Replace the deadline-derived fields, keeping the document count
    pub fn with_deadlines(self, deadlines: &[Deadline], today: NaiveDate) -> Self {
        Self::aggregate(self.document_count, deadlines, today)
    }

    /// Replace the document count, keeping the deadline-derived fields
    pub fn with_document_count(self, document_count: usize) -> Self {
        Self { document_count, ..self }
    }
}

impl Case {
    pub fn new(id: impl Into<String>, case_number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            case_number: case_number.into(),
            title: title.into(),
            jurisdiction: None,
            case_type: None,
            court: None,
            stats: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(id: &str, date: Option<NaiveDate>, status: DeadlineStatus) -> Deadline {
        let mut d = Deadline::new(id, "c1", id);
        d.deadline_date = date;
        d.status = status;
        d
    }

    #[test]
    fn test_aggregate_skips_past_and_completed() {
        let today = day(2026, 4, 1);
        let deadlines = vec![
            dated("past", Some(day(2026, 3, 1)), DeadlineStatus::Pending),
            dated("done", Some(day(2026, 4, 2)), DeadlineStatus::Completed),
            dated("later", Some(day(2026, 5, 1)), DeadlineStatus::Pending),
            dated("soon", Some(day(2026, 4, 3)), DeadlineStatus::Pending),
            dated("undated", None, DeadlineStatus::Pending),
        ];

        let stats = CaseStats::aggregate(7, &deadlines, today);
        assert_eq!(stats.document_count, 7);
        assert_eq!(stats.pending_deadline_count, 4);
        assert_eq!(stats.next_deadline, Some(day(2026, 4, 3)));
    }

    #[test]
    fn test_partial_updates_keep_the_other_half() {
        let today = day(2026, 4, 1);
        let deadlines = vec![dated("soon", Some(day(2026, 4, 3)), DeadlineStatus::Pending)];

        let from_deadlines = CaseStats::default().with_deadlines(&deadlines, today);
        assert_eq!(from_deadlines.document_count, 0);
        assert_eq!(from_deadlines.pending_deadline_count, 1);

        let both = from_deadlines.with_document_count(4);
        assert_eq!(both.document_count, 4);
        assert_eq!(both.pending_deadline_count, 1);
        assert_eq!(both.next_deadline, Some(day(2026, 4, 3)));

        let refreshed = both.with_deadlines(&[], today);
        assert_eq!(refreshed.document_count, 4);
        assert_eq!(refreshed.pending_deadline_count, 0);
        assert_eq!(refreshed.next_deadline, None);
    }

    #[test]
    fn test_stats_wire_name() {
        let json = r#"{"id":"c1","case_number":"1:26-cv-001","title":"Doe v. Roe","_stats":{"document_count":2,"pending_deadline_count":1,"next_deadline":"2026-04-03"}}"#;
        let case: Case = serde_json::from_str(json).unwrap();
        assert_eq!(case.stats.unwrap().next_deadline, Some(day(2026, 4, 3)));
    }
}
