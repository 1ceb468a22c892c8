use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use psnlink_domain::constants::DEFAULT_SEARCH_DOMAIN;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::utils::command_helpers::execute_command;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
}

pub async fn get_own_profile(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<Value>> {
    let profile = execute_command("profile::get_profile", ctx.gateway.get_profile(None)).await?;
    Ok(Json(json!({ "success": true, "profile": profile })))
}

pub async fn get_profile(
    State(ctx): State<Arc<AppContext>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    let profile =
        execute_command("profile::get_profile", ctx.gateway.get_profile(Some(&name))).await?;
    Ok(Json(json!({ "success": true, "profile": profile })))
}

pub async fn get_friends(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<Value>> {
    let friends = execute_command("profile::get_friends", ctx.gateway.get_friends()).await?;
    Ok(Json(json!({ "success": true, "friends": friends })))
}

pub async fn delete_friend(
    State(ctx): State<Arc<AppContext>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    execute_command("profile::delete_friend", ctx.gateway.delete_friend(&name)).await?;
    Ok(Json(json!({ "success": true, "message": format!("Friend {name} deleted successfully") })))
}

pub async fn search(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("Search name is required"));
    }

    let domain = request
        .domain
        .filter(|domain| !domain.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SEARCH_DOMAIN.to_string());

    let result =
        execute_command("profile::search", ctx.gateway.search(&request.name, &domain)).await?;
    Ok(Json(json!({ "success": true, "result": result })))
}
