//! Deadline Filter / Sort / Group Engine
//!
//! Pure transformations over the cached deadline list of a case:
//! filter (order-preserving) -> sort (stable) -> group (labelled buckets).

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Deadline, DeadlineStatus, Priority, Trigger};

// ========================
// Filtering
// ========================

/// Active filter selections. Empty collections mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeadlineFilters {
    pub search: String,
    pub priorities: Vec<Priority>,
    pub types: Vec<String>,
    pub statuses: Vec<DeadlineStatus>,
    pub trigger_id: Option<String>,
}

impl DeadlineFilters {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.priorities.is_empty()
            || !self.types.is_empty()
            || !self.statuses.is_empty()
            || self.trigger_id.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Add the priority if absent, remove it otherwise
    pub fn toggle_priority(&mut self, priority: Priority) {
        toggle(&mut self.priorities, priority);
    }

    pub fn toggle_type(&mut self, deadline_type: String) {
        toggle(&mut self.types, deadline_type);
    }

    pub fn toggle_status(&mut self, status: DeadlineStatus) {
        toggle(&mut self.statuses, status);
    }
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

fn matches_search(deadline: &Deadline, needle: &str) -> bool {
    contains_ci(Some(&deadline.title), needle)
        || contains_ci(deadline.description.as_deref(), needle)
        || contains_ci(deadline.applicable_rule.as_deref(), needle)
        || contains_ci(deadline.citation(), needle)
        || contains_ci(deadline.action_required.as_deref(), needle)
}

fn matches_trigger(deadline: &Deadline, trigger: &Trigger) -> bool {
    deadline.trigger_id.as_deref() == Some(trigger.id.as_str())
        || deadline.trigger_event.as_deref() == Some(trigger.trigger_type.as_str())
}

/// Apply every active selection as a conjunction, keeping input order.
///
/// A selected trigger id that is not in `triggers` leaves the trigger selection inactive.
pub fn filter_deadlines(deadlines: &[Deadline], filters: &DeadlineFilters, triggers: &[Trigger]) -> Vec<Deadline> {
    let needle = filters.search.trim().to_lowercase();
    let trigger = filters
        .trigger_id
        .as_deref()
        .and_then(|id| triggers.iter().find(|t| t.id == id));
    if let (Some(id), None) = (filters.trigger_id.as_deref(), trigger) {
        tracing::debug!(trigger_id = %id, "selected trigger not loaded; ignoring trigger filter");
    }

    deadlines
        .iter()
        .filter(|d| needle.is_empty() || matches_search(d, &needle))
        .filter(|d| filters.priorities.is_empty() || filters.priorities.contains(&d.priority))
        .filter(|d| {
            filters.types.is_empty()
                || d.deadline_type.as_ref().is_some_and(|t| filters.types.contains(t))
        })
        .filter(|d| filters.statuses.is_empty() || filters.statuses.contains(&d.status))
        .filter(|d| trigger.map_or(true, |t| matches_trigger(d, t)))
        .cloned()
        .collect()
}

/// Distinct deadline types with their counts, alphabetical
pub fn type_facets(deadlines: &[Deadline]) -> Vec<(String, usize)> {
    let mut counts = BTreeMap::new();
    for deadline in deadlines {
        if let Some(t) = deadline.deadline_type.as_ref() {
            *counts.entry(t.clone()).or_insert(0usize) += 1;
        }
    }
    counts.into_iter().collect()
}

// ========================
// Sorting
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    Priority,
    Created,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Date, SortKey::Priority, SortKey::Created, SortKey::Title];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Priority => "priority",
            SortKey::Created => "created",
            SortKey::Title => "title",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "priority" => SortKey::Priority,
            "created" => SortKey::Created,
            "title" => SortKey::Title,
            _ => SortKey::Date,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Date => "Due date",
            SortKey::Priority => "Priority",
            SortKey::Created => "Created",
            SortKey::Title => "Title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Missing values go last regardless of direction
fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn known_rank(priority: &Priority) -> Option<u8> {
    match priority {
        Priority::Other(_) => None,
        known => Some(known.rank()),
    }
}

pub fn compare_deadlines(a: &Deadline, b: &Deadline, key: SortKey, direction: SortDirection) -> Ordering {
    match key {
        SortKey::Date => nulls_last(a.deadline_date, b.deadline_date, direction),
        SortKey::Priority => nulls_last(known_rank(&a.priority), known_rank(&b.priority), direction),
        SortKey::Created => nulls_last(a.created_timestamp(), b.created_timestamp(), direction),
        SortKey::Title => direction.apply(a.title.to_lowercase().cmp(&b.title.to_lowercase())),
    }
}

/// Stable sort: equal keys keep their input order in both directions
pub fn sort_deadlines(deadlines: &mut [Deadline], key: SortKey, direction: SortDirection) {
    deadlines.sort_by(|a, b| compare_deadlines(a, b, key, direction));
}

// ========================
// Grouping
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    DateRange,
    Priority,
    Type,
    Trigger,
    None,
}

impl GroupBy {
    pub const ALL: [GroupBy; 5] = [GroupBy::DateRange, GroupBy::Priority, GroupBy::Type, GroupBy::Trigger, GroupBy::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::DateRange => "date_range",
            GroupBy::Priority => "priority",
            GroupBy::Type => "type",
            GroupBy::Trigger => "trigger",
            GroupBy::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "priority" => GroupBy::Priority,
            "type" => GroupBy::Type,
            "trigger" => GroupBy::Trigger,
            "none" => GroupBy::None,
            _ => GroupBy::DateRange,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::DateRange => "Date range",
            GroupBy::Priority => "Priority",
            GroupBy::Type => "Type",
            GroupBy::Trigger => "Trigger",
            GroupBy::None => "No grouping",
        }
    }
}

/// Day-granularity bucket relative to local midnight of "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    Overdue,
    Today,
    ThisWeek,
    ThisMonth,
    Later,
    NoDate,
    Completed,
}

impl DateBucket {
    /// Fixed display order
    pub const ORDER: [DateBucket; 7] = [
        DateBucket::Overdue,
        DateBucket::Today,
        DateBucket::ThisWeek,
        DateBucket::ThisMonth,
        DateBucket::Later,
        DateBucket::NoDate,
        DateBucket::Completed,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DateBucket::Overdue => "overdue",
            DateBucket::Today => "today",
            DateBucket::ThisWeek => "this_week",
            DateBucket::ThisMonth => "this_month",
            DateBucket::Later => "later",
            DateBucket::NoDate => "no_date",
            DateBucket::Completed => "completed",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DateBucket::Overdue => "Overdue",
            DateBucket::Today => "Today",
            DateBucket::ThisWeek => "This Week",
            DateBucket::ThisMonth => "This Month",
            DateBucket::Later => "Later",
            DateBucket::NoDate => "No Date",
            DateBucket::Completed => "Completed",
        }
    }
}

pub fn classify_date_bucket(deadline: &Deadline, today: NaiveDate) -> DateBucket {
    if deadline.is_completed() {
        return DateBucket::Completed;
    }
    match deadline.days_until(today) {
        None => DateBucket::NoDate,
        Some(days) if days < 0 => DateBucket::Overdue,
        Some(0) => DateBucket::Today,
        Some(1..=7) => DateBucket::ThisWeek,
        Some(8..=30) => DateBucket::ThisMonth,
        Some(_) => DateBucket::Later,
    }
}

/// A labelled, non-empty slice of the sorted list
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineGroup {
    pub key: String,
    pub title: String,
    /// Title with the item count, e.g. "Overdue (3)"
    pub label: String,
    pub items: Vec<Deadline>,
}

impl DeadlineGroup {
    fn new(key: impl Into<String>, title: impl Into<String>, items: Vec<Deadline>) -> Self {
        let title = title.into();
        Self {
            key: key.into(),
            label: format!("{} ({})", title, items.len()),
            title,
            items,
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// `filing_deadline` -> `Filing Deadline`
fn humanize(code: &str) -> String {
    code.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const NO_TRIGGER_KEY: &str = "manual";
const NO_TYPE_KEY: &str = "general";

fn resolve_trigger<'a>(deadline: &Deadline, triggers: &'a [Trigger]) -> Option<&'a Trigger> {
    if let Some(id) = deadline.trigger_id.as_deref() {
        if let Some(t) = triggers.iter().find(|t| t.id == id) {
            return Some(t);
        }
    }
    let event = deadline.trigger_event.as_deref()?;
    triggers.iter().find(|t| t.trigger_type == event)
}

/// Partition an already-sorted list. Items keep their relative order inside each group
/// and empty groups are never emitted.
pub fn group_deadlines(sorted: &[Deadline], group_by: GroupBy, triggers: &[Trigger], today: NaiveDate) -> Vec<DeadlineGroup> {
    match group_by {
        GroupBy::DateRange => {
            let mut buckets: BTreeMap<usize, Vec<Deadline>> = BTreeMap::new();
            for deadline in sorted {
                let bucket = classify_date_bucket(deadline, today);
                let slot = DateBucket::ORDER.iter().position(|b| *b == bucket).unwrap_or(0);
                buckets.entry(slot).or_default().push(deadline.clone());
            }
            buckets
                .into_iter()
                .map(|(slot, items)| {
                    let bucket = DateBucket::ORDER[slot];
                    DeadlineGroup::new(bucket.key(), bucket.title(), items)
                })
                .collect()
        }
        GroupBy::Priority => {
            let mut buckets: BTreeMap<u8, Vec<Deadline>> = BTreeMap::new();
            for deadline in sorted {
                buckets.entry(deadline.priority.rank()).or_default().push(deadline.clone());
            }
            buckets
                .into_iter()
                .map(|(rank, items)| {
                    match Priority::KNOWN.iter().find(|p| p.rank() == rank) {
                        Some(p) => DeadlineGroup::new(p.as_str(), p.label(), items),
                        None => DeadlineGroup::new("other", "Other", items),
                    }
                })
                .collect()
        }
        GroupBy::Type => {
            let mut order: Vec<String> = Vec::new();
            let mut buckets: BTreeMap<String, Vec<Deadline>> = BTreeMap::new();
            for deadline in sorted {
                let key = deadline
                    .deadline_type
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| NO_TYPE_KEY.to_string());
                if !buckets.contains_key(&key) {
                    order.push(key.clone());
                }
                buckets.entry(key).or_default().push(deadline.clone());
            }
            order
                .into_iter()
                .filter_map(|key| {
                    let items = buckets.remove(&key)?;
                    let title = humanize(&key);
                    Some(DeadlineGroup::new(key, title, items))
                })
                .collect()
        }
        GroupBy::Trigger => {
            let mut buckets: BTreeMap<usize, Vec<Deadline>> = BTreeMap::new();
            let manual_slot = triggers.len();
            for deadline in sorted {
                let slot = resolve_trigger(deadline, triggers)
                    .and_then(|t| triggers.iter().position(|x| x.id == t.id))
                    .unwrap_or(manual_slot);
                buckets.entry(slot).or_default().push(deadline.clone());
            }
            buckets
                .into_iter()
                .map(|(slot, items)| match triggers.get(slot) {
                    Some(trigger) => {
                        let title = match trigger.trigger_date {
                            Some(date) => format!("{} ({})", trigger.display_name(), date.format("%b %-d, %Y")),
                            None => trigger.display_name(),
                        };
                        DeadlineGroup::new(trigger.id.clone(), title, items)
                    }
                    None => DeadlineGroup::new(NO_TRIGGER_KEY, "Manual / No Trigger", items),
                })
                .collect()
        }
        GroupBy::None => {
            if sorted.is_empty() {
                Vec::new()
            } else {
                vec![DeadlineGroup::new("all", "All Deadlines", sorted.to_vec())]
            }
        }
    }
}

// ========================
// Expansion State
// ========================

/// Which groups are visually open. Independent of the data.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupExpansion {
    expanded: BTreeSet<String>,
}

impl Default for GroupExpansion {
    fn default() -> Self {
        Self {
            expanded: [DateBucket::Overdue, DateBucket::ThisWeek, DateBucket::ThisMonth]
                .iter()
                .map(|b| b.key().to_string())
                .collect(),
        }
    }
}

impl GroupExpansion {
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn toggle(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    pub fn expand_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        self.expanded.extend(keys.into_iter().map(str::to_string));
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

// ========================
// Pipeline
// ========================

/// Filter -> sort -> group in one pass, with the counts the list header shows
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineView {
    pub groups: Vec<DeadlineGroup>,
    pub total: usize,
    pub visible: usize,
}

impl DeadlineView {
    pub fn compute(
        deadlines: &[Deadline],
        filters: &DeadlineFilters,
        sort: (SortKey, SortDirection),
        group_by: GroupBy,
        triggers: &[Trigger],
        today: NaiveDate,
    ) -> Self {
        let mut visible = filter_deadlines(deadlines, filters, triggers);
        sort_deadlines(&mut visible, sort.0, sort.1);
        Self {
            total: deadlines.len(),
            visible: visible.len(),
            groups: group_deadlines(&visible, group_by, triggers, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn make_deadline(id: &str, offset: Option<i64>, status: DeadlineStatus, priority: &str) -> Deadline {
        let mut d = Deadline::new(id, "c1", format!("Deadline {}", id));
        d.deadline_date = offset.map(|o| today() + chrono::Duration::days(o));
        d.status = status;
        d.priority = Priority::parse(priority);
        d
    }

    fn ids(deadlines: &[Deadline]) -> Vec<&str> {
        deadlines.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_example_scenario_buckets() {
        let deadlines = vec![
            make_deadline("1", Some(-1), DeadlineStatus::Pending, "fatal"),
            make_deadline("2", None, DeadlineStatus::Pending, "standard"),
            make_deadline("3", Some(0), DeadlineStatus::Completed, "standard"),
        ];

        let groups = group_deadlines(&deadlines, GroupBy::DateRange, &[], today());
        let summary: Vec<(&str, &str, usize)> = groups
            .iter()
            .map(|g| (g.key.as_str(), g.label.as_str(), g.count()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("overdue", "Overdue (1)", 1),
                ("no_date", "No Date (1)", 1),
                ("completed", "Completed (1)", 1),
            ]
        );
    }

    #[test]
    fn test_bucket_boundaries() {
        let bucket = |offset| classify_date_bucket(&make_deadline("x", Some(offset), DeadlineStatus::Pending, "standard"), today());
        assert_eq!(bucket(-30), DateBucket::Overdue);
        assert_eq!(bucket(0), DateBucket::Today);
        assert_eq!(bucket(1), DateBucket::ThisWeek);
        assert_eq!(bucket(7), DateBucket::ThisWeek);
        assert_eq!(bucket(8), DateBucket::ThisMonth);
        assert_eq!(bucket(30), DateBucket::ThisMonth);
        assert_eq!(bucket(31), DateBucket::Later);
    }

    #[test]
    fn test_search_covers_rule_and_action_fields() {
        let mut a = make_deadline("a", Some(1), DeadlineStatus::Pending, "standard");
        a.applicable_rule = Some("FRCP 56".to_string());
        let mut b = make_deadline("b", Some(2), DeadlineStatus::Pending, "standard");
        b.action_required = Some("File OPPOSITION brief".to_string());
        let c = make_deadline("c", Some(3), DeadlineStatus::Pending, "standard");
        let all = vec![a, b, c];

        let mut filters = DeadlineFilters { search: "frcp".to_string(), ..Default::default() };
        assert_eq!(ids(&filter_deadlines(&all, &filters, &[])), vec!["a"]);

        filters.search = "  opposition ".to_string();
        assert_eq!(ids(&filter_deadlines(&all, &filters, &[])), vec!["b"]);
    }

    #[test]
    fn test_priority_filter_uses_aliases() {
        let all = vec![
            make_deadline("a", Some(1), DeadlineStatus::Pending, "high"),
            make_deadline("b", Some(1), DeadlineStatus::Pending, "important"),
            make_deadline("c", Some(1), DeadlineStatus::Pending, "low"),
        ];
        let mut filters = DeadlineFilters::default();
        filters.toggle_priority(Priority::Important);
        assert_eq!(ids(&filter_deadlines(&all, &filters, &[])), vec!["a", "b"]);

        filters.toggle_priority(Priority::Important);
        assert!(!filters.is_active());
    }

    #[test]
    fn test_trigger_filter_matches_id_or_type() {
        let trigger = Trigger::new("t1", "c1", "complaint_served");
        let mut by_id = make_deadline("a", Some(1), DeadlineStatus::Pending, "standard");
        by_id.trigger_id = Some("t1".to_string());
        let mut by_type = make_deadline("b", Some(1), DeadlineStatus::Pending, "standard");
        by_type.trigger_event = Some("complaint_served".to_string());
        let unrelated = make_deadline("c", Some(1), DeadlineStatus::Pending, "standard");
        let all = vec![by_id, by_type, unrelated];

        let filters = DeadlineFilters { trigger_id: Some("t1".to_string()), ..Default::default() };
        assert_eq!(ids(&filter_deadlines(&all, &filters, &[trigger])), vec!["a", "b"]);

        // Unknown trigger: selection ignored
        assert_eq!(filter_deadlines(&all, &filters, &[]).len(), 3);
    }

    #[test]
    fn test_sort_desc_keeps_missing_last() {
        let mut all = vec![
            make_deadline("none", None, DeadlineStatus::Pending, "standard"),
            make_deadline("early", Some(1), DeadlineStatus::Pending, "standard"),
            make_deadline("late", Some(9), DeadlineStatus::Pending, "standard"),
        ];
        sort_deadlines(&mut all, SortKey::Date, SortDirection::Desc);
        assert_eq!(ids(&all), vec!["late", "early", "none"]);
    }

    #[test]
    fn test_priority_sort_unknown_last() {
        let mut all = vec![
            make_deadline("odd", Some(1), DeadlineStatus::Pending, "someday"),
            make_deadline("info", Some(1), DeadlineStatus::Pending, "informational"),
            make_deadline("fatal", Some(1), DeadlineStatus::Pending, "fatal"),
            make_deadline("crit", Some(1), DeadlineStatus::Pending, "critical"),
        ];
        sort_deadlines(&mut all, SortKey::Priority, SortDirection::Asc);
        assert_eq!(ids(&all), vec!["fatal", "crit", "info", "odd"]);

        sort_deadlines(&mut all, SortKey::Priority, SortDirection::Desc);
        assert_eq!(ids(&all), vec!["info", "crit", "fatal", "odd"]);
    }

    #[test]
    fn test_title_sort_case_insensitive() {
        let mut a = make_deadline("1", None, DeadlineStatus::Pending, "standard");
        a.title = "beta".to_string();
        let mut b = make_deadline("2", None, DeadlineStatus::Pending, "standard");
        b.title = "Alpha".to_string();
        let mut all = vec![a, b];
        sort_deadlines(&mut all, SortKey::Title, SortDirection::Asc);
        assert_eq!(ids(&all), vec!["2", "1"]);
    }

    #[test]
    fn test_group_by_priority_order() {
        let all = vec![
            make_deadline("s", Some(1), DeadlineStatus::Pending, "medium"),
            make_deadline("x", Some(1), DeadlineStatus::Pending, "??"),
            make_deadline("f", Some(1), DeadlineStatus::Pending, "fatal"),
        ];
        let groups = group_deadlines(&all, GroupBy::Priority, &[], today());
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["fatal", "standard", "other"]);
    }

    #[test]
    fn test_group_by_type_first_appearance() {
        let mut a = make_deadline("a", Some(1), DeadlineStatus::Pending, "standard");
        a.deadline_type = Some("response_deadline".to_string());
        let b = make_deadline("b", Some(2), DeadlineStatus::Pending, "standard");
        let mut c = make_deadline("c", Some(3), DeadlineStatus::Pending, "standard");
        c.deadline_type = Some("response_deadline".to_string());

        let groups = group_deadlines(&[a, b, c], GroupBy::Type, &[], today());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Response Deadline (2)");
        assert_eq!(groups[1].key, "general");
    }

    #[test]
    fn test_group_by_trigger_manual_last() {
        let mut trigger = Trigger::new("t1", "c1", "trial_date");
        trigger.trigger_date = Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        let manual = make_deadline("m", Some(1), DeadlineStatus::Pending, "standard");
        let mut linked = make_deadline("l", Some(2), DeadlineStatus::Pending, "standard");
        linked.trigger_event = Some("trial_date".to_string());

        let groups = group_deadlines(&[manual, linked], GroupBy::Trigger, &[trigger], today());
        assert_eq!(groups[0].key, "t1");
        assert_eq!(groups[0].title, "trial date (Sep 1, 2026)");
        assert_eq!(groups[1].label, "Manual / No Trigger (1)");
    }

    #[test]
    fn test_expansion_defaults_and_toggle() {
        let mut expansion = GroupExpansion::default();
        assert!(expansion.is_expanded("overdue"));
        assert!(expansion.is_expanded("this_week"));
        assert!(expansion.is_expanded("this_month"));
        assert!(!expansion.is_expanded("today"));

        expansion.toggle("today");
        expansion.toggle("overdue");
        assert!(expansion.is_expanded("today"));
        assert!(!expansion.is_expanded("overdue"));

        expansion.collapse_all();
        assert!(!expansion.is_expanded("today"));
    }

    #[test]
    fn test_view_counts() {
        let all = vec![
            make_deadline("a", Some(1), DeadlineStatus::Pending, "fatal"),
            make_deadline("b", Some(1), DeadlineStatus::Completed, "fatal"),
        ];
        let filters = DeadlineFilters { statuses: vec![DeadlineStatus::Pending], ..Default::default() };
        let view = DeadlineView::compute(&all, &filters, (SortKey::Date, SortDirection::Asc), GroupBy::None, &[], today());
        assert_eq!(view.total, 2);
        assert_eq!(view.visible, 1);
        assert_eq!(view.groups[0].label, "All Deadlines (1)");
    }

    #[test]
    fn test_type_facets() {
        let mut a = make_deadline("a", None, DeadlineStatus::Pending, "standard");
        a.deadline_type = Some("hearing".to_string());
        let mut b = a.clone();
        b.id = "b".to_string();
        let c = make_deadline("c", None, DeadlineStatus::Pending, "standard");
        assert_eq!(type_facets(&[a, b, c]), vec![("hearing".to_string(), 2)]);
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn arb_status() -> impl Strategy<Value = DeadlineStatus> {
        prop_oneof![
            Just(DeadlineStatus::Pending),
            Just(DeadlineStatus::Completed),
            Just(DeadlineStatus::Cancelled),
        ]
    }

    fn arb_priority() -> impl Strategy<Value = Priority> {
        prop_oneof![
            Just("fatal"), Just("critical"), Just("high"), Just("standard"),
            Just("low"), Just("informational"), Just("whenever"),
        ]
        .prop_map(Priority::parse)
    }

    fn arb_deadlines() -> impl Strategy<Value = Vec<Deadline>> {
        prop::collection::vec(
            (proptest::option::of(-45i64..60), arb_status(), arb_priority(), "[a-c]{0,3}"),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (offset, status, priority, title))| {
                    let mut d = Deadline::new(format!("d{}", i), "c1", title);
                    d.deadline_date = offset.map(|o| today() + chrono::Duration::days(o));
                    d.status = status;
                    d.priority = priority;
                    d
                })
                .collect()
        })
    }

    fn arb_filters() -> impl Strategy<Value = DeadlineFilters> {
        ("[a-c]{0,2}", prop::collection::vec(arb_priority(), 0..3), prop::collection::vec(arb_status(), 0..2))
            .prop_map(|(search, priorities, statuses)| DeadlineFilters {
                search,
                priorities,
                statuses,
                ..Default::default()
            })
    }

    fn position(all: &[Deadline], id: &str) -> usize {
        all.iter().position(|d| d.id == id).unwrap()
    }

    proptest! {
        #[test]
        fn filter_is_order_stable_subset(all in arb_deadlines(), filters in arb_filters()) {
            let kept = filter_deadlines(&all, &filters, &[]);
            let positions: Vec<usize> = kept.iter().map(|d| position(&all, &d.id)).collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn date_sort_nulls_last_and_stable(mut all in arb_deadlines()) {
            let original = all.clone();
            sort_deadlines(&mut all, SortKey::Date, SortDirection::Asc);

            let first_none = all.iter().position(|d| d.deadline_date.is_none()).unwrap_or(all.len());
            prop_assert!(all[first_none..].iter().all(|d| d.deadline_date.is_none()));

            for pair in all.windows(2) {
                if pair[0].deadline_date == pair[1].deadline_date {
                    prop_assert!(position(&original, &pair[0].id) < position(&original, &pair[1].id));
                } else if let (Some(a), Some(b)) = (pair[0].deadline_date, pair[1].deadline_date) {
                    prop_assert!(a < b);
                }
            }
        }

        #[test]
        fn date_groups_partition_sorted_list(all in arb_deadlines()) {
            let mut sorted = all.clone();
            sort_deadlines(&mut sorted, SortKey::Date, SortDirection::Asc);
            let groups = group_deadlines(&sorted, GroupBy::DateRange, &[], today());

            prop_assert!(groups.iter().all(|g| !g.items.is_empty()));
            let mut union: Vec<String> = groups.iter().flat_map(|g| g.items.iter().map(|d| d.id.clone())).collect();
            let mut expected: Vec<String> = sorted.iter().map(|d| d.id.clone()).collect();
            union.sort();
            expected.sort();
            prop_assert_eq!(union, expected);

            for group in &groups {
                prop_assert_eq!(&group.label, &format!("{} ({})", group.title, group.items.len()));
                for d in &group.items {
                    if d.is_completed() {
                        prop_assert_eq!(group.key.as_str(), "completed");
                    }
                    if d.deadline_date.is_none() && !d.is_completed() {
                        prop_assert_eq!(group.key.as_str(), "no_date");
                    }
                }
            }
        }

        #[test]
        fn completed_never_overdue(offset in -60i64..-1) {
            let mut d = Deadline::new("d", "c", "t");
            d.deadline_date = Some(today() + chrono::Duration::days(offset));
            prop_assert_eq!(classify_date_bucket(&d, today()), DateBucket::Overdue);
            d.status = DeadlineStatus::Completed;
            prop_assert_eq!(classify_date_bucket(&d, today()), DateBucket::Completed);
        }

        #[test]
        fn priority_sort_respects_rank_table(mut all in arb_deadlines()) {
            sort_deadlines(&mut all, SortKey::Priority, SortDirection::Asc);
            let ranks: Vec<u8> = all.iter().map(|d| d.priority.rank()).collect();
            prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn priority_sort_is_stable_with_unknown_last(all in arb_deadlines(), descending in any::<bool>()) {
            let direction = if descending { SortDirection::Desc } else { SortDirection::Asc };
            let mut sorted = all.clone();
            sort_deadlines(&mut sorted, SortKey::Priority, direction);

            let ranks: Vec<Option<u8>> = sorted.iter().map(|d| known_rank(&d.priority)).collect();
            let first_unknown = ranks.iter().position(Option::is_none).unwrap_or(ranks.len());
            prop_assert!(ranks[first_unknown..].iter().all(Option::is_none));

            for pair in sorted.windows(2) {
                let (a, b) = (known_rank(&pair[0].priority), known_rank(&pair[1].priority));
                if a == b {
                    prop_assert!(position(&all, &pair[0].id) < position(&all, &pair[1].id));
                } else if let (Some(a), Some(b)) = (a, b) {
                    match direction {
                        SortDirection::Asc => prop_assert!(a < b),
                        SortDirection::Desc => prop_assert!(a > b),
                    }
                }
            }
        }
    }
}
