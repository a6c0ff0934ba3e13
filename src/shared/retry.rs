// src/shared/retry.rs

use std::fmt::Display;
use std::future::Future;

use tracing::{debug, error, warn};

/// Runs `call`, and on failure runs it exactly once more.
///
/// When the second attempt fails too, the first error is returned as-is.
/// There is no backoff: this only smooths over transient blips between the
/// service and the database.
pub async fn retry_once<T, E, F, Fut>(operation: &str, call: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    retry_once_when(operation, |_: &E| true, call).await
}

/// Like [`retry_once`], but only failures accepted by `should_retry` get a
/// second attempt. Anything else is logged and returned immediately.
pub async fn retry_once_when<T, E, F, Fut, P>(
    operation: &str,
    should_retry: P,
    mut call: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    let first_error = match call().await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if !should_retry(&first_error) {
        debug!(operation, error = %first_error, "Store call failed (not retried)");
        return Err(first_error);
    }

    warn!(operation, error = %first_error, "Store call failed, retrying once");

    match call().await {
        Ok(value) => Ok(value),
        Err(retry_error) => {
            error!(
                operation,
                error = %first_error,
                retry_error = %retry_error,
                "Store call failed after retry"
            );
            Err(first_error)
        }
    }
}
