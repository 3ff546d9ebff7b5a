//! Calendar Event Adapter
//!
//! Maps dated deadlines into all-day calendar events, indexes them per day for the
//! indicator dots, and turns drops onto a day cell into reschedule requests.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::{Deadline, DeadlineStatus, Priority};
use crate::filters::DeadlineFilters;

/// Same selections the list view offers, minus search and trigger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarFilters {
    pub priorities: Vec<Priority>,
    pub statuses: Vec<DeadlineStatus>,
    pub case_ids: Vec<String>,
}

impl CalendarFilters {
    /// Priority and status selections of the list view; search and trigger do not apply
    pub fn from_list(filters: &DeadlineFilters) -> Self {
        Self {
            priorities: filters.priorities.clone(),
            statuses: filters.statuses.clone(),
            case_ids: Vec::new(),
        }
    }

    pub fn matches(&self, deadline: &Deadline) -> bool {
        (self.priorities.is_empty() || self.priorities.contains(&deadline.priority))
            && (self.statuses.is_empty() || self.statuses.contains(&deadline.status))
            && (self.case_ids.is_empty() || self.case_ids.contains(&deadline.case_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Solid,
    Dashed,
}

impl BorderStyle {
    pub fn as_css(&self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
        }
    }
}

/// Visual treatment, a pure function of priority and derived state
#[derive(Debug, Clone, PartialEq)]
pub struct EventStyle {
    pub background: &'static str,
    pub border_color: &'static str,
    pub border_style: BorderStyle,
    pub opacity: f32,
    pub text_color: &'static str,
}

const COMPLETED_GREY: &str = "#9ca3af";

fn priority_colors(priority: &Priority) -> (&'static str, &'static str) {
    // (background, border)
    match priority {
        Priority::Fatal => ("#dc2626", "#991b1b"),
        Priority::Critical => ("#ea580c", "#9a3412"),
        Priority::Important => ("#d97706", "#92400e"),
        Priority::Standard => ("#2563eb", "#1e40af"),
        Priority::Informational => ("#64748b", "#334155"),
        Priority::Other(_) => ("#6b7280", "#374151"),
    }
}

impl EventStyle {
    pub fn for_deadline(deadline: &Deadline, today: NaiveDate) -> Self {
        if deadline.is_completed() {
            return Self {
                background: COMPLETED_GREY,
                border_color: COMPLETED_GREY,
                border_style: BorderStyle::Solid,
                opacity: 0.5,
                text_color: "#f9fafb",
            };
        }

        let (background, border_color) = priority_colors(&deadline.priority);
        let overdue = deadline.status == DeadlineStatus::Pending && deadline.is_overdue(today);
        Self {
            background,
            border_color,
            border_style: if overdue { BorderStyle::Dashed } else { BorderStyle::Solid },
            opacity: 1.0,
            text_color: "#ffffff",
        }
    }

    /// Inline style attribute for the event chip
    pub fn to_css(&self) -> String {
        format!(
            "background-color: {}; border: 2px {} {}; opacity: {}; color: {};",
            self.background,
            self.border_style.as_css(),
            self.border_color,
            self.opacity,
            self.text_color
        )
    }
}

/// All-day calendar event backed by a deadline
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub all_day: bool,
    pub style: EventStyle,
    pub resource: Deadline,
}

/// Undated deadlines are skipped; input order is kept
pub fn to_calendar_events(deadlines: &[Deadline], filters: &CalendarFilters, today: NaiveDate) -> Vec<CalendarEvent> {
    deadlines
        .iter()
        .filter(|d| filters.matches(d))
        .filter_map(|d| {
            let date = d.deadline_date?;
            Some(CalendarEvent {
                id: d.id.clone(),
                title: d.title.clone(),
                start: date,
                end: date,
                all_day: true,
                style: EventStyle::for_deadline(d, today),
                resource: d.clone(),
            })
        })
        .collect()
}

/// Per-day aggregate behind the indicator dots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayIndicator {
    pub total: usize,
    pub urgent: usize,
    pub overdue: usize,
    pub completed: usize,
}

impl DayIndicator {
    pub fn tooltip(&self) -> String {
        if self.total == 0 {
            return String::new();
        }
        let mut parts = vec![format!("{} deadline{}", self.total, if self.total == 1 { "" } else { "s" })];
        if self.urgent > 0 {
            parts.push(format!("{} fatal/critical", self.urgent));
        }
        if self.overdue > 0 {
            parts.push(format!("{} overdue", self.overdue));
        }
        if self.completed > 0 {
            parts.push(format!("{} completed", self.completed));
        }
        parts.join(" · ")
    }
}

/// Day -> deadlines index, built once per input change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayIndex {
    days: BTreeMap<NaiveDate, Vec<Deadline>>,
    today: Option<NaiveDate>,
}

impl DayIndex {
    pub fn build<'a>(deadlines: impl IntoIterator<Item = &'a Deadline>, today: NaiveDate) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<Deadline>> = BTreeMap::new();
        for deadline in deadlines {
            if let Some(date) = deadline.deadline_date {
                days.entry(date).or_default().push(deadline.clone());
            }
        }
        Self { days, today: Some(today) }
    }

    pub fn from_events(events: &[CalendarEvent], today: NaiveDate) -> Self {
        Self::build(events.iter().map(|e| &e.resource), today)
    }

    pub fn on(&self, day: NaiveDate) -> &[Deadline] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn indicator(&self, day: NaiveDate) -> DayIndicator {
        let today = self.today.unwrap_or(day);
        self.on(day).iter().fold(DayIndicator::default(), |mut acc, d| {
            acc.total += 1;
            if d.priority.is_urgent() {
                acc.urgent += 1;
            }
            if d.is_overdue(today) {
                acc.overdue += 1;
            }
            if d.is_completed() {
                acc.completed += 1;
            }
            acc
        })
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Column headers in display order
    pub fn headers(&self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

/// Whole weeks covering the month, leading/trailing days taken from neighbours.
/// Returns an empty grid for an invalid month.
pub fn month_grid(year: i32, month: u32, week_start: WeekStart) -> Vec<[NaiveDate; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let lead = (first.weekday().num_days_from_monday() + 7 - week_start.weekday().num_days_from_monday()) % 7;
    let mut cursor = first - Duration::days(lead as i64);

    let mut weeks = Vec::new();
    loop {
        let mut week = [cursor; 7];
        for (i, slot) in week.iter_mut().enumerate() {
            *slot = cursor + Duration::days(i as i64);
        }
        weeks.push(week);
        cursor += Duration::days(7);
        if cursor.month() != month || cursor.year() != year {
            break;
        }
    }
    weeks
}

/// First day of the month `delta` months away
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year * 12 + month as i32 - 1 + delta;
    (zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1)
}

/// What a drop onto a day cell asks the caller to persist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub deadline_id: String,
    pub new_date: NaiveDate,
}

/// `None` when the drop lands on the date the deadline already has
pub fn plan_reschedule(deadline: &Deadline, new_date: NaiveDate) -> Option<RescheduleRequest> {
    if deadline.deadline_date == Some(new_date) {
        return None;
    }
    Some(RescheduleRequest {
        deadline_id: deadline.id.clone(),
        new_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(id: &str, date: Option<NaiveDate>, priority: &str, status: DeadlineStatus) -> Deadline {
        let mut d = Deadline::new(id, "c1", id);
        d.deadline_date = date;
        d.priority = Priority::parse(priority);
        d.status = status;
        d
    }

    #[test]
    fn test_events_skip_undated_and_filtered() {
        let today = day(2026, 2, 10);
        let all = vec![
            dated("a", Some(day(2026, 2, 12)), "fatal", DeadlineStatus::Pending),
            dated("b", None, "fatal", DeadlineStatus::Pending),
            dated("c", Some(day(2026, 2, 13)), "low", DeadlineStatus::Pending),
        ];
        let filters = CalendarFilters { priorities: vec![Priority::Fatal], ..Default::default() };
        let events = to_calendar_events(&all, &filters, today);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "a");
        assert_eq!(events[0].start, events[0].end);
        assert!(events[0].all_day);
    }

    #[test]
    fn test_overdue_style_dashed_completed_greyed() {
        let today = day(2026, 2, 10);
        let overdue = dated("o", Some(day(2026, 2, 1)), "critical", DeadlineStatus::Pending);
        let done = dated("d", Some(day(2026, 2, 1)), "critical", DeadlineStatus::Completed);
        let future = dated("f", Some(day(2026, 3, 1)), "critical", DeadlineStatus::Pending);

        assert_eq!(EventStyle::for_deadline(&overdue, today).border_style, BorderStyle::Dashed);
        let done_style = EventStyle::for_deadline(&done, today);
        assert_eq!(done_style.background, COMPLETED_GREY);
        assert!(done_style.opacity < 1.0);
        assert_eq!(EventStyle::for_deadline(&future, today).border_style, BorderStyle::Solid);
        assert!(EventStyle::for_deadline(&overdue, today).to_css().contains("dashed"));
    }

    #[test]
    fn test_cancelled_past_deadline_not_dashed() {
        let today = day(2026, 2, 10);
        let cancelled = dated("x", Some(day(2026, 2, 1)), "fatal", DeadlineStatus::Cancelled);
        assert_eq!(EventStyle::for_deadline(&cancelled, today).border_style, BorderStyle::Solid);
    }

    #[test]
    fn test_day_index_indicator() {
        let today = day(2026, 2, 10);
        let target = day(2026, 2, 5);
        let all = vec![
            dated("a", Some(target), "fatal", DeadlineStatus::Pending),
            dated("b", Some(target), "low", DeadlineStatus::Completed),
            dated("c", Some(day(2026, 2, 6)), "low", DeadlineStatus::Pending),
        ];
        let index = DayIndex::build(&all, today);
        assert_eq!(index.len(), 2);
        let indicator = index.indicator(target);
        assert_eq!(indicator, DayIndicator { total: 2, urgent: 1, overdue: 1, completed: 1 });
        assert_eq!(indicator.tooltip(), "2 deadlines · 1 fatal/critical · 1 overdue · 1 completed");
        assert!(index.on(day(2026, 2, 7)).is_empty());
    }

    #[test]
    fn test_month_grid_sunday_start() {
        // March 2026 starts on a Sunday
        let grid = month_grid(2026, 3, WeekStart::Sunday);
        assert_eq!(grid[0][0], day(2026, 3, 1));
        assert_eq!(grid.len(), 5);
        assert!(grid.last().unwrap().contains(&day(2026, 3, 31)));
    }

    #[test]
    fn test_month_grid_monday_start_leads_from_previous_month() {
        let grid = month_grid(2026, 3, WeekStart::Monday);
        assert_eq!(grid[0][0], day(2026, 2, 23));
        assert_eq!(grid[0][6], day(2026, 3, 1));
        assert_eq!(grid.len(), 6);
        assert!(month_grid(2026, 13, WeekStart::Monday).is_empty());
    }

    #[test]
    fn test_shift_month_wraps_years() {
        assert_eq!(shift_month(2026, 1, -1), (2025, 12));
        assert_eq!(shift_month(2026, 12, 1), (2027, 1));
        assert_eq!(shift_month(2026, 6, 0), (2026, 6));
    }

    #[test]
    fn test_plan_reschedule_ignores_same_day() {
        let d = dated("a", Some(day(2026, 2, 12)), "fatal", DeadlineStatus::Pending);
        assert!(plan_reschedule(&d, day(2026, 2, 12)).is_none());
        let request = plan_reschedule(&d, day(2026, 2, 13)).unwrap();
        assert_eq!(request.deadline_id, "a");
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"deadline_id":"a","new_date":"2026-02-13"}"#);
    }

    #[test]
    fn test_filters_follow_list_selection() {
        let mut list = DeadlineFilters::default();
        list.search = "answer".to_string();
        list.toggle_priority(Priority::Critical);
        list.toggle_status(DeadlineStatus::Pending);

        let filters = CalendarFilters::from_list(&list);
        assert_eq!(filters.priorities, vec![Priority::Critical]);
        assert_eq!(filters.statuses, vec![DeadlineStatus::Pending]);
        assert!(filters.case_ids.is_empty());

        let d = dated("a", Some(day(2026, 2, 12)), "critical", DeadlineStatus::Pending);
        assert!(filters.matches(&d));
    }

    #[test]
    fn test_case_filter_drops_other_cases() {
        let today = day(2026, 2, 10);
        let mine = dated("a", Some(day(2026, 2, 12)), "fatal", DeadlineStatus::Pending);
        let mut theirs = dated("b", Some(day(2026, 2, 12)), "fatal", DeadlineStatus::Pending);
        theirs.case_id = "c2".to_string();
        let all = vec![mine, theirs];

        let everything = to_calendar_events(&all, &CalendarFilters::default(), today);
        assert_eq!(everything.len(), 2);

        let filters = CalendarFilters { case_ids: vec!["c1".to_string()], ..Default::default() };
        let events = to_calendar_events(&all, &filters, today);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "a");
        assert!(!filters.matches(&all[1]));
    }
}
