use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::utils::command_helpers::execute_command;

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub invites: Vec<String>,
}

pub async fn create_group(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<CreateGroupRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    if request.invites.is_empty() {
        return Err(ApiError::bad_request("Invites array is required"));
    }

    let group =
        execute_command("groups::create_group", ctx.gateway.create_group(&request.invites))
            .await?;
    Ok(Json(json!({ "success": true, "group": group })))
}

pub async fn get_groups(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<Value>> {
    let groups = execute_command("groups::get_groups", ctx.gateway.get_groups()).await?;
    Ok(Json(json!({ "success": true, "groups": groups })))
}

pub async fn get_first_group_messages(
    State(ctx): State<Arc<AppContext>>,
) -> ApiResult<Json<Value>> {
    let first = execute_command(
        "groups::get_first_group_messages",
        ctx.gateway.get_first_group_messages(),
    )
    .await?;
    Ok(Json(json!({ "success": true, "group": first.group, "messages": first.messages })))
}
