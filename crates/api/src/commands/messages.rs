use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use psnlink_domain::MessagingTarget;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::utils::command_helpers::execute_command;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

pub async fn get_main_thread_messages(
    State(ctx): State<Arc<AppContext>>,
    Path(group_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let messages =
        execute_command("messages::get_messages", ctx.gateway.get_messages(&group_id, None))
            .await?;
    Ok(Json(json!({ "success": true, "messages": messages })))
}

pub async fn get_thread_messages(
    State(ctx): State<Arc<AppContext>>,
    Path((group_id, thread_id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let messages = execute_command(
        "messages::get_messages",
        ctx.gateway.get_messages(&group_id, Some(&thread_id)),
    )
    .await?;
    Ok(Json(json!({ "success": true, "messages": messages })))
}

pub async fn send_message(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    if request.group_id.trim().is_empty() || request.message.is_empty() {
        return Err(ApiError::bad_request("groupId and message are required"));
    }

    let target = MessagingTarget::new(request.group_id, request.thread_id);
    execute_command("messages::send_message", ctx.gateway.send_message(&target, &request.message))
        .await?;
    Ok(Json(json!({ "success": true, "message": "Message sent successfully" })))
}
