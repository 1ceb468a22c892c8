use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::context::AppContext;

pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "PSN API Server is running",
        "uptimeSecs": ctx.uptime_secs(),
    }))
}

/// Endpoint index.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "PSNLink API Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "npsso": "GET /api/psn/npsso",
            "token": "GET /api/psn/token",
            "profile": "GET /api/psn/profile/{name?}",
            "friends": "GET /api/psn/friends",
            "deleteFriend": "DELETE /api/psn/friends/{name}",
            "search": "POST /api/psn/search",
            "createGroup": "POST /api/psn/groups",
            "getGroups": "GET /api/psn/groups",
            "firstGroupMessages": "GET /api/psn/groups/first/messages",
            "getMessages": "GET /api/psn/messages/{groupId}/{threadId?}",
            "sendMessage": "POST /api/psn/messages",
            "addResource": "POST /api/psn/resources",
            "sendResource": "POST /api/psn/resources/send",
            "getResource": "GET /api/psn/resources/{groupId}/{resourceId}"
        }
    }))
}
