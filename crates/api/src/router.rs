//! Router assembly.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::Router;
use psnlink_domain::SessionHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::commands;
use crate::context::AppContext;

/// Header carrying a replacement session handle.
pub const SESSION_HEADER: &str = "x-npsso";

/// Build the full application router.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let psn = Router::new()
        .route("/npsso", get(commands::get_npsso))
        .route("/token", get(commands::get_token))
        .route("/profile", get(commands::get_own_profile))
        .route("/profile/{name}", get(commands::get_profile))
        .route("/friends", get(commands::get_friends))
        .route("/friends/{name}", delete(commands::delete_friend))
        .route("/search", post(commands::search))
        .route("/groups", post(commands::create_group).get(commands::get_groups))
        .route("/groups/first/messages", get(commands::get_first_group_messages))
        .route("/messages", post(commands::send_message))
        .route("/messages/{group_id}", get(commands::get_main_thread_messages))
        .route("/messages/{group_id}/{thread_id}", get(commands::get_thread_messages))
        .route("/resources", post(commands::add_resource))
        .route("/resources/send", post(commands::send_resource))
        .route("/resources/{group_id}/{resource_id}", get(commands::get_resource))
        .layer(middleware::from_fn_with_state(ctx.clone(), apply_session_header));

    Router::new()
        .route("/", get(commands::index))
        .route("/health", get(commands::health))
        .nest("/api/psn", psn)
        .layer(cors_layer(&ctx.config.server.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Install a session handle supplied by the caller before the handler runs.
///
/// A configured `NPSSO` takes precedence; the header only fills in when none
/// is configured.
async fn apply_session_header(
    State(ctx): State<Arc<AppContext>>,
    request: Request,
    next: Next,
) -> Response {
    if ctx.has_configured_session() {
        if request.headers().contains_key(SESSION_HEADER) {
            debug!("configured session handle takes precedence over {SESSION_HEADER} header");
        }
        return next.run(request).await;
    }

    if let Some(value) = request.headers().get(SESSION_HEADER) {
        match value.to_str() {
            Ok(raw) => {
                let session = SessionHandle::new(raw.trim());
                if !session.is_empty() {
                    ctx.gateway.replace_session_handle(session).await;
                }
            }
            Err(_) => warn!("ignoring non-ASCII {SESSION_HEADER} header"),
        }
    }

    next.run(request).await
}

/// `*` allows any origin without credentials; anything else is an exact
/// origin with credentials.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(SESSION_HEADER),
        ]);

    if origin.trim() == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(origin.trim()) {
        Ok(value) => layer.allow_origin(value).allow_credentials(true),
        Err(err) => {
            warn!(origin, error = %err, "invalid CORS origin; allowing any origin");
            layer.allow_origin(Any)
        }
    }
}
