//! Scraper Health Endpoint

use crate::models::ScraperHealth;
use super::{client, ApiResult};

pub async fn get_scraper_health() -> ApiResult<ScraperHealth> {
    client().get("/admin/scraper-health").await
}
