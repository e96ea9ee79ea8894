//! Bounded waiting on store calls.

use serde_json::json;
use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// Runs a store call with a time limit.
///
/// An elapsed limit is reported as [`AppError::Retrieval`], the same as an
/// unreachable store.
pub async fn within<T, F>(limit: Duration, operation: &'static str, call: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, timeout_ms = limit.as_millis() as u64, "Store call timed out");
            Err(AppError::retrieval(
                "Data store timed out",
                json!({ "operation": operation, "timeout_ms": limit.as_millis() as u64 }),
            ))
        }
    }
}
