//! Deadline Endpoints

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Deadline, DeadlineStatus};
use super::{client, seg, ApiResult};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct StatusArgs {
    status: DeadlineStatus,
}

#[derive(Serialize)]
struct RescheduleArgs {
    new_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Serialize)]
struct SnoozeArgs {
    days: u32,
}

#[derive(Serialize)]
struct BulkStatusArgs<'a> {
    deadline_ids: &'a [String],
    status: DeadlineStatus,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct BulkUpdateResult {
    pub updated: usize,
    pub failed: Vec<String>,
}

// ========================
// Commands
// ========================

pub async fn update_deadline_status(deadline_id: &str, status: DeadlineStatus) -> ApiResult<Deadline> {
    client()
        .patch(&format!("/deadlines/{}/status", seg(deadline_id)), &StatusArgs { status })
        .await
}

pub async fn reschedule_deadline(deadline_id: &str, new_date: NaiveDate, reason: Option<String>) -> ApiResult<Deadline> {
    client()
        .patch(&format!("/deadlines/{}/reschedule", seg(deadline_id)), &RescheduleArgs { new_date, reason })
        .await
}

pub async fn snooze_deadline(deadline_id: &str, days: u32) -> ApiResult<Deadline> {
    client()
        .post(&format!("/deadlines/{}/snooze", seg(deadline_id)), &SnoozeArgs { days })
        .await
}

pub async fn bulk_update_status(deadline_ids: &[String], status: DeadlineStatus) -> ApiResult<BulkUpdateResult> {
    client()
        .post("/deadlines/bulk-update-status", &BulkStatusArgs { deadline_ids, status })
        .await
}
