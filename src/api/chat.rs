//! Assistant Chat Endpoints

use serde::Serialize;

use crate::models::{ChatMessage, ChatReply};
use super::{client, ApiResult};

#[derive(Serialize)]
struct SendArgs<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    case_id: Option<&'a str>,
}

#[derive(Serialize)]
struct HistoryQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    case_id: Option<&'a str>,
    limit: u32,
}

/// Case-scoped when `case_id` is set
pub async fn send_message(message: &str, case_id: Option<&str>) -> ApiResult<ChatReply> {
    client().post("/chat/message", &SendArgs { message, case_id }).await
}

pub async fn chat_history(case_id: Option<&str>, limit: u32) -> ApiResult<Vec<ChatMessage>> {
    client().get_query("/chat/history", &HistoryQuery { case_id, limit }).await
}
