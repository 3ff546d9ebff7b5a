//! Trigger Record
//!
//! A dated originating event (e.g. "complaint served") that deadlines are calculated from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::deadline::wire_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    pub case_id: String,
    /// Type code deadlines reference through `trigger_event`
    pub trigger_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "wire_date")]
    pub trigger_date: Option<NaiveDate>,
}

impl Trigger {
    pub fn new(id: impl Into<String>, case_id: impl Into<String>, trigger_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            case_id: case_id.into(),
            trigger_type: trigger_type.into(),
            title: None,
            trigger_date: None,
        }
    }

    /// Human label: explicit title, else the type code with underscores spaced out
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => self.trigger_type.replace('_', " "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_type() {
        let mut trigger = Trigger::new("t1", "c1", "complaint_served");
        assert_eq!(trigger.display_name(), "complaint served");
        trigger.title = Some("Complaint served on Acme".to_string());
        assert_eq!(trigger.display_name(), "Complaint served on Acme");
    }
}
