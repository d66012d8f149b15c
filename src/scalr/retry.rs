//! Retry policy and backoff schedule

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Observer invoked before each retry with the retry number (starting at 1)
/// and the response that triggered it, if there was one.
pub type RetryLogHook = Arc<dyn Fn(u32, Option<&reqwest::Response>) + Send + Sync>;

/// What happened on one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// The server answered with this status
    Status(u16),
    /// No response: connection, TLS or timeout failure
    TransportError,
}

/// Outcome of a retry check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait and send again
    Retry,
    /// Hand the attempt's response or error back to the caller
    Return,
    /// The caller's token fired; stop with a cancellation error
    Cancelled,
}

/// Decides whether an attempt is worth repeating
pub trait RetryPolicy: Send + Sync {
    fn should_retry(
        &self,
        ctx: &CancellationToken,
        attempt: Attempt,
        retry_server_errors: bool,
    ) -> RetryDecision;
}

/// Rate limits are always retried; server and transport failures only when
/// server-error retries are enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRetryPolicy;

impl RetryPolicy for DefaultRetryPolicy {
    fn should_retry(
        &self,
        ctx: &CancellationToken,
        attempt: Attempt,
        retry_server_errors: bool,
    ) -> RetryDecision {
        if ctx.is_cancelled() {
            return RetryDecision::Cancelled;
        }

        match attempt {
            Attempt::TransportError if retry_server_errors => RetryDecision::Retry,
            Attempt::TransportError => RetryDecision::Return,
            Attempt::Status(429) => RetryDecision::Retry,
            Attempt::Status(code) if retry_server_errors && code >= 500 => RetryDecision::Retry,
            Attempt::Status(_) => RetryDecision::Return,
        }
    }
}

/// Wait before retry number `attempt + 1`.
///
/// `min * 2^attempt`, capped at `max`. A server supplied `Retry-After` takes
/// precedence but never drops below `min`.
pub fn backoff(
    min: Duration,
    max: Duration,
    attempt: u32,
    retry_after: Option<Duration>,
) -> Duration {
    if let Some(wait) = retry_after {
        return wait.max(min);
    }

    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    min.checked_mul(factor).map_or(max, |wait| wait.min(max))
}

/// Numeric `Retry-After` seconds on 429 and 503 responses
pub(crate) fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    let status = response.status().as_u16();
    if status != 429 && status != 503 {
        return None;
    }
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
