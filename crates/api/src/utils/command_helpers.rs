//! Command execution helpers
//!
//! Times each gateway call and logs its outcome so handlers stay short.

use std::future::Future;
use std::time::Instant;

use psnlink_domain::Result as DomainResult;

use crate::error::ApiResult;
use crate::utils::logging::log_command_execution;

/// Run a gateway operation, log its outcome, and convert failures into
/// [`crate::ApiError`].
///
/// # Example
///
/// ```rust,ignore
/// pub async fn get_groups(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<Value>> {
///     let groups = execute_command("groups::get_groups", ctx.gateway.get_groups()).await?;
///     Ok(Json(json!({ "success": true, "groups": groups })))
/// }
/// ```
pub async fn execute_command<Fut, T>(command_name: &str, command: Fut) -> ApiResult<T>
where
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command.await;

    let error_type = result.as_ref().err().map(|err| err.label());
    log_command_execution(command_name, start.elapsed(), result.is_ok(), error_type);

    result.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use psnlink_domain::PsnError;

    use super::*;

    #[tokio::test]
    async fn success_passes_value_through() {
        let value = execute_command("test::ok", async { Ok::<_, PsnError>(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn failure_becomes_api_error() {
        let err = execute_command("test::fail", async {
            Err::<(), _>(PsnError::Unauthenticated("no session".into()))
        })
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, "unauthenticated");
    }
}
