//! Dashboard Endpoint

use crate::models::DashboardStats;
use super::{client, ApiResult};

pub async fn get_dashboard_stats() -> ApiResult<DashboardStats> {
    client().get("/dashboard").await
}
