use std::future::Future;
use std::time::Duration;

use crate::server::error::Error;

/// Runs a unit of work detached from the request that spawned it.
///
/// The future is spawned onto the runtime and raced against `deadline`.
/// When the deadline expires the caller gets [`Error::Timeout`] while the
/// spawned work keeps running to completion, so a mutation can still commit
/// after its client already received a 504.
pub async fn run_detached<T, F>(deadline: Duration, future: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(future);

    match tokio::time::timeout(deadline, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(Error::InternalError(format!(
            "detached task failed: {join_error}"
        ))),
        Err(_) => Err(Error::Timeout),
    }
}
