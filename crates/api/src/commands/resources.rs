use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use psnlink_domain::constants::CONTENT_TYPE_IMAGE;
use psnlink_domain::{MessagingTarget, ResourceKind};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::utils::command_helpers::execute_command;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResourceRequest {
    #[serde(default)]
    pub group_id: String,
    /// Local file path or png/jpg URL.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResourceRequest {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub resource_id: String,
    /// Numeric resource kind: 0 image, 1 sticker, 2 video, 3 audio, 4 link.
    #[serde(rename = "type")]
    pub kind: Option<u8>,
}

pub async fn add_resource(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<AddResourceRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    if request.group_id.trim().is_empty() || request.path.trim().is_empty() {
        return Err(ApiError::bad_request("groupId and path are required"));
    }

    let target = MessagingTarget::main_thread(request.group_id);
    let resource_id = execute_command(
        "resources::add_resource",
        ctx.gateway.add_resource(&target, request.path.trim()),
    )
    .await?;
    Ok(Json(json!({ "success": true, "resourceId": resource_id })))
}

pub async fn send_resource(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<SendResourceRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    let code = match request.kind {
        Some(code)
            if !request.group_id.trim().is_empty() && !request.resource_id.trim().is_empty() =>
        {
            code
        }
        _ => return Err(ApiError::bad_request("groupId, resourceId, and type are required")),
    };
    let kind = ResourceKind::try_from(code)?;

    let target = MessagingTarget::new(request.group_id, request.thread_id);
    execute_command(
        "resources::send_resource",
        ctx.gateway.send_resource(&target, &request.resource_id, kind),
    )
    .await?;
    Ok(Json(json!({ "success": true, "message": "Resource sent successfully" })))
}

/// Raw resource bytes with the upstream content type.
pub async fn get_resource(
    State(ctx): State<Arc<AppContext>>,
    Path((group_id, resource_id)): Path<(String, String)>,
) -> ApiResult<Response> {
    let resource = execute_command(
        "resources::get_resource",
        ctx.gateway.get_resource(&group_id, &resource_id),
    )
    .await?;

    let content_type = HeaderValue::from_str(&resource.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(CONTENT_TYPE_IMAGE));
    Ok(([(header::CONTENT_TYPE, content_type)], resource.bytes).into_response())
}
