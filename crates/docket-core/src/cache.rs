//! Optimistic Deadline Cache
//!
//! Transient copy of a case's deadlines. Mutations apply immediately and hand back the
//! previous record; if the server rejects the change the caller restores it or re-fetches.

use chrono::NaiveDate;

use crate::domain::{Deadline, DeadlineStatus, DomainError, DomainResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeadlineCache {
    items: Vec<Deadline>,
}

impl DeadlineCache {
    pub fn new(items: Vec<Deadline>) -> Self {
        Self { items }
    }

    /// Authoritative reload from the server
    pub fn replace_all(&mut self, items: Vec<Deadline>) {
        self.items = items;
    }

    pub fn items(&self) -> &[Deadline] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Deadline> {
        self.items.iter().find(|d| d.id == id)
    }

    fn get_mut(&mut self, id: &str) -> DomainResult<&mut Deadline> {
        self.items
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("deadline {}", id)))
    }

    /// Returns the record as it was before the change
    pub fn set_status(&mut self, id: &str, status: DeadlineStatus) -> DomainResult<Deadline> {
        let deadline = self.get_mut(id)?;
        let previous = deadline.clone();
        deadline.status = status;
        Ok(previous)
    }

    pub fn reschedule(&mut self, id: &str, date: NaiveDate) -> DomainResult<Deadline> {
        let deadline = self.get_mut(id)?;
        if deadline.is_completed() {
            return Err(DomainError::Conflict(format!("deadline {} is already completed", id)));
        }
        let previous = deadline.clone();
        deadline.deadline_date = Some(date);
        Ok(previous)
    }

    /// Apply one status to many records; unknown ids are skipped
    pub fn set_status_many(&mut self, ids: &[String], status: DeadlineStatus) -> Vec<Deadline> {
        ids.iter()
            .filter_map(|id| self.set_status(id, status).ok())
            .collect()
    }

    /// Insert or replace by id; returns the replaced record
    pub fn upsert(&mut self, deadline: Deadline) -> Option<Deadline> {
        match self.items.iter_mut().find(|d| d.id == deadline.id) {
            Some(existing) => Some(std::mem::replace(existing, deadline)),
            None => {
                self.items.push(deadline);
                None
            }
        }
    }

    /// Put back a record captured before an optimistic change
    pub fn restore(&mut self, previous: Deadline) {
        self.upsert(previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> DeadlineCache {
        let mut a = Deadline::new("a", "c1", "Answer");
        a.deadline_date = NaiveDate::from_ymd_opt(2026, 5, 1);
        let b = Deadline::new("b", "c1", "Discovery cutoff");
        DeadlineCache::new(vec![a, b])
    }

    #[test]
    fn test_status_change_and_rollback() {
        let mut cache = cache();
        let previous = cache.set_status("a", DeadlineStatus::Completed).unwrap();
        assert_eq!(previous.status, DeadlineStatus::Pending);
        assert!(cache.get("a").unwrap().is_completed());

        cache.restore(previous);
        assert_eq!(cache.get("a").unwrap().status, DeadlineStatus::Pending);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_reschedule_rejects_completed() {
        let mut cache = cache();
        let new_date = NaiveDate::from_ymd_opt(2026, 5, 8).unwrap();
        let previous = cache.reschedule("a", new_date).unwrap();
        assert_eq!(previous.deadline_date, NaiveDate::from_ymd_opt(2026, 5, 1));
        assert_eq!(cache.get("a").unwrap().deadline_date, Some(new_date));

        cache.set_status("a", DeadlineStatus::Completed).unwrap();
        assert!(matches!(cache.reschedule("a", new_date), Err(DomainError::Conflict(_))));
        assert!(matches!(cache.reschedule("zzz", new_date), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_bulk_status_skips_unknown() {
        let mut cache = cache();
        let ids = vec!["a".to_string(), "missing".to_string(), "b".to_string()];
        let previous = cache.set_status_many(&ids, DeadlineStatus::Cancelled);
        assert_eq!(previous.len(), 2);
        assert!(cache.items().iter().all(|d| d.status == DeadlineStatus::Cancelled));

        // A rejected bulk request puts every captured record back
        for deadline in previous {
            cache.restore(deadline);
        }
        assert!(cache.items().iter().all(|d| d.status == DeadlineStatus::Pending));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut cache = cache();
        assert!(cache.upsert(Deadline::new("c", "c1", "New")).is_none());
        let mut renamed = Deadline::new("b", "c1", "Renamed");
        renamed.priority = crate::domain::Priority::Fatal;
        assert_eq!(cache.upsert(renamed).unwrap().title, "Discovery cutoff");
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("b").unwrap().title, "Renamed");
    }
}
