use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::command_helpers::execute_command;

/// Fetch a session handle from the SSO cookie endpoint and install it.
pub async fn get_npsso(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<Value>> {
    let handle = execute_command("auth::get_npsso", ctx.gateway.fetch_session_handle()).await?;
    Ok(Json(json!({ "success": true, "npsso": handle.as_str() })))
}

pub async fn get_token(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<Value>> {
    let tokens = execute_command("auth::get_token", ctx.gateway.ensure_access_token()).await?;
    Ok(Json(json!({ "success": true, "tokens": tokens })))
}
