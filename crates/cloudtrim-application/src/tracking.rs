//! Shared Pending/settle plumbing for the use cases.

use cloudtrim_core::error::{ApiError, Result};
use cloudtrim_core::store::{Action, Operation, Store};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Dispatches `Pending`, awaits `call` and settles cancellation.
///
/// Once the token has fired, whatever the call produced (data or error) is
/// dropped: `Cancelled` is dispatched and [`ApiError::Cancelled`] returned.
/// Any other outcome is handed back for the caller to dispatch.
pub(crate) async fn track<T, F>(
    store: &Store,
    cancel: &CancellationToken,
    operation: Operation,
    call: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    store.dispatch(Action::pending(operation));

    let result = call.await;
    if cancel.is_cancelled() {
        return Err(cancelled(store, operation));
    }
    match result {
        Err(ApiError::Cancelled) => Err(cancelled(store, operation)),
        other => other,
    }
}

/// Records `err` as the operation's rejection and hands it back.
pub(crate) fn reject(store: &Store, operation: Operation, err: ApiError) -> ApiError {
    tracing::debug!("[{}] rejected: {}", operation.as_str(), err);
    store.dispatch(Action::rejected(operation, err.user_message()));
    err
}

fn cancelled(store: &Store, operation: Operation) -> ApiError {
    tracing::debug!("[{}] cancelled", operation.as_str());
    store.dispatch(Action::cancelled(operation));
    ApiError::Cancelled
}
