//! Task-local trace id for the request currently being served.
//!
//! `RequestTrace` installs the scope; `AppError` reads it when building an
//! error body. Outside a request the id reads as `"unknown"`.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` as the current task's trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
