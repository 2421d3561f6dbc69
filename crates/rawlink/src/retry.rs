//! Resilient GET with exponential backoff
//!
//! Success, 404 and 403 are terminal. 429 and 5xx are retried while the
//! budget lasts, as are transport errors. Everything else is returned as-is.

use crate::error::RawLinkError;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default delay before the first retry
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);

/// Retry budget and backoff schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each later one
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// Policy that never retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `attempt` (zero-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_delay.saturating_mul(factor)
    }
}

/// How a received status is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx
    Success,
    /// 404, 403 and any other non-retryable status
    Terminal,
    /// 429 and 5xx
    Retryable,
}

impl StatusClass {
    pub fn of(status: StatusCode) -> Self {
        if status.is_success() {
            StatusClass::Success
        } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            StatusClass::Retryable
        } else {
            StatusClass::Terminal
        }
    }
}

/// GET `url`, retrying transient failures according to `policy`
///
/// Once the budget is spent a retryable response is returned unchanged and a
/// transport error becomes [`RawLinkError::Network`].
pub async fn fetch_resilient(
    client: &Client,
    url: &str,
    headers: &HeaderMap,
    policy: &RetryPolicy,
) -> Result<Response, RawLinkError> {
    let mut attempt: u32 = 0;

    loop {
        let retries_left = policy.max_retries.saturating_sub(attempt);

        let delay = match client.get(url).headers(headers.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                if StatusClass::of(status) != StatusClass::Retryable || retries_left == 0 {
                    debug!(url, status = status.as_u16(), attempt, "Request settled");
                    return Ok(response);
                }
                // Release the connection before backing off
                drop(response);
                let delay = policy.delay_for(attempt);
                warn!(
                    url,
                    status = status.as_u16(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Retryable status, backing off"
                );
                delay
            }
            Err(err) => {
                if retries_left == 0 {
                    return Err(RawLinkError::Network(err));
                }
                let delay = policy.delay_for(attempt);
                warn!(
                    url,
                    error = %err,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Request failed, backing off"
                );
                delay
            }
        };

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
