//! Case Endpoints

use crate::models::{Case, Deadline, DocumentSummary, Trigger};
use super::{client, seg, ApiResult};

pub async fn list_cases() -> ApiResult<Vec<Case>> {
    client().get("/cases").await
}

pub async fn get_case(case_id: &str) -> ApiResult<Case> {
    client().get(&format!("/cases/{}", seg(case_id))).await
}

pub async fn list_case_documents(case_id: &str) -> ApiResult<Vec<DocumentSummary>> {
    client().get(&format!("/cases/{}/documents", seg(case_id))).await
}

pub async fn list_case_deadlines(case_id: &str) -> ApiResult<Vec<Deadline>> {
    client().get(&format!("/deadlines/case/{}", seg(case_id))).await
}

pub async fn list_case_triggers(case_id: &str) -> ApiResult<Vec<Trigger>> {
    client().get(&format!("/triggers/case/{}", seg(case_id))).await
}
