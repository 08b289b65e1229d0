//! Retry with exponential backoff for WooCommerce HTTP calls.
//!
//! Transport errors, `429 Too Many Requests` and `5xx` responses are
//! retried. Other statuses are returned immediately for the caller to
//! inspect.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::warn;

/// Default number of retries after the initial request.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry (doubles each attempt: 200ms, 400ms, 800ms).
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(200);

/// How many times to retry a request and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1_u32 << attempt.min(16))
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Send a request, retrying according to `policy`.
///
/// `f` is called up to `policy.max_retries + 1` times. The last result is
/// returned as-is, whether it is an error or a non-success response.
pub(crate) async fn send_with_retry<F, Fut>(
    policy: RetryPolicy,
    f: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        let result = f().await;

        let retryable = match &result {
            Ok(response) => is_retryable_status(response.status()),
            Err(e) => !e.is_builder(),
        };
        if !retryable || attempt >= policy.max_retries {
            return result;
        }

        let delay = policy.delay_for(attempt);
        match &result {
            Ok(response) => warn!(
                attempt = attempt + 1,
                max_retries = policy.max_retries,
                status = %response.status(),
                "WooCommerce request returned retryable status, retrying in {delay:?}"
            ),
            Err(e) => warn!(
                attempt = attempt + 1,
                max_retries = policy.max_retries,
                "WooCommerce request failed, retrying in {delay:?}: {}",
                e.without_url_ref()
            ),
        }
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// Display helper that keeps credential-bearing URLs out of log lines.
trait WithoutUrlRef {
    fn without_url_ref(&self) -> String;
}

impl WithoutUrlRef for reqwest::Error {
    fn without_url_ref(&self) -> String {
        let mut message = self.to_string();
        if let Some(url) = self.url() {
            message = message.replace(url.as_str(), url.path());
        }
        message
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(200));
        assert_eq!(policy.delay_for(1), Duration::from_millis(400));
        assert_eq!(policy.delay_for(2), Duration::from_millis(800));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_exhausts_all_attempts_on_transport_failure() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = call_count.clone();
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1),
        };

        let result = send_with_retry(policy, || {
            let cc = cc.clone();
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                // Request to a guaranteed-closed port → connection refused.
                reqwest::Client::new().get("http://127.0.0.1:1/").send().await
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(call_count.load(Ordering::SeqCst), 4);
    }
}
