//! Task-local trace id for the request currently being served.
//!
//! `RequestTrace` opens the scope; error rendering and log statements read it
//! through [`trace_id`]. Outside a request the id is `"unknown"`.

use std::cell::RefCell;

use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Trace id of the current task, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Run `future` with `trace_id` installed as the task-local trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trace_id_outside_scope_is_unknown() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn trace_id_is_visible_inside_scope_only() {
        let id = "trace-abc".to_string();

        let seen = with_trace_id(id.clone(), async { trace_id() }).await;

        assert_eq!(seen, id);
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn nested_scopes_restore_outer_id() {
        let outer = with_trace_id("outer".to_string(), async {
            let inner = with_trace_id("inner".to_string(), async { trace_id() }).await;
            (inner, trace_id())
        })
        .await;

        assert_eq!(outer, ("inner".to_string(), "outer".to_string()));
    }
}
