use std::future::Future;

use tokio::time::{sleep, Duration, Instant};
use tracing::debug;

use crate::chain::errors::ChainClientError;

/// JSON-RPC codes meaning "not executed yet": pending, executing, not found.
pub const PENDING_CODES: [i64; 3] = [-31002, -31003, -31004];

pub enum PollResult<T> {
    Found(T),
    NotFound,
}

/// Repeats `attempt` every `poll_interval` until it yields a value or `timeout`
/// runs out. Pending node codes and exhausted endpoints count as "not yet"; any
/// other error ends the wait.
pub async fn poll_for_result<T, F, Fut>(
    mut attempt: F,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<T, ChainClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollResult<T>, ChainClientError>>,
{
    let start = Instant::now();

    loop {
        match attempt().await {
            Ok(PollResult::Found(value)) => return Ok(value),
            Ok(PollResult::NotFound) => {}
            Err(e) if is_retryable(&e) => {
                debug!(error = %e, "result not available yet");
            }
            Err(e) => return Err(e),
        }

        let remaining = timeout.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            return Err(timeout_error(timeout));
        }
        sleep(poll_interval.min(remaining)).await;
    }
}

/// Maps pending node codes and a missing result onto [`PollResult::NotFound`].
pub fn pending_as_not_found<T>(
    outcome: Result<T, ChainClientError>,
) -> Result<PollResult<T>, ChainClientError> {
    match outcome {
        Ok(value) => Ok(PollResult::Found(value)),
        Err(ChainClientError::RemoteRpcError { code, .. }) if PENDING_CODES.contains(&code) => {
            Ok(PollResult::NotFound)
        }
        Err(ChainClientError::TransactionNotFound(_)) => Ok(PollResult::NotFound),
        Err(e) => Err(e),
    }
}

fn is_retryable(error: &ChainClientError) -> bool {
    matches!(error, ChainClientError::AllEndpointsFailed(_)) || error.is_transport()
}

fn timeout_error(timeout: Duration) -> ChainClientError {
    ChainClientError::TimeoutError(format!(
        "Timeout waiting for transaction result after {:.1} seconds",
        timeout.as_secs_f64()
    ))
}
