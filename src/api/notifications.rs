//! Notification Endpoints

use serde::Serialize;

use crate::models::{Notification, UnreadCount};
use super::{client, seg, ApiResult};

#[derive(Serialize)]
struct ListQuery {
    limit: u32,
    unread_only: bool,
}

pub async fn unread_count() -> ApiResult<u32> {
    let count: UnreadCount = client().get("/notifications/unread-count").await?;
    Ok(count.count)
}

pub async fn list_notifications(limit: u32, unread_only: bool) -> ApiResult<Vec<Notification>> {
    client()
        .get_query("/notifications", &ListQuery { limit, unread_only })
        .await
}

pub async fn mark_read(notification_id: &str) -> ApiResult<()> {
    let _: serde_json::Value = client()
        .patch(&format!("/notifications/{}/read", seg(notification_id)), &serde_json::json!({}))
        .await?;
    Ok(())
}
