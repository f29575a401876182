//! Backoff policies and per-session rate limit state
//!
//! Two independent retry classes:
//! - 429 responses grow an exponential delay shared by the whole session and
//!   reset on the next non-429 response
//! - transient failures (5xx, connection errors) use a short per-request
//!   schedule bounded by the retry budget

use crate::types::BackoffType;
use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// How the session reacts to 429 responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Retry rate-limited requests; when false the first 429 is returned as an error
    pub wait_on_rate_limit: bool,
    /// Maximum number of 429 retries for one request
    pub max_retries: u32,
    /// Delay after the first 429 when the server sends no hint
    pub initial_delay: Duration,
    /// Ceiling for any single rate-limit wait
    pub max_delay: Duration,
    /// Upper bound of the random jitter added to every wait
    pub jitter: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            wait_on_rate_limit: true,
            max_retries: 10,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            jitter: Duration::from_secs(1),
        }
    }
}

impl RateLimitPolicy {
    /// Delay before retrying after the `consecutive`-th 429 in a row
    ///
    /// A server hint wins over the exponential schedule; either way the
    /// result is capped at `max_delay`. Jitter is not included.
    pub fn delay(&self, consecutive: u32, retry_after: Option<Duration>) -> Duration {
        let delay = match retry_after {
            Some(hint) => hint,
            None => {
                let exponent = consecutive.saturating_sub(1);
                self.initial_delay
                    .saturating_mul(2u32.saturating_pow(exponent))
            }
        };
        delay.min(self.max_delay)
    }
}

/// Consecutive-429 bookkeeping for one session
///
/// Owned by the session behind a mutex; clones of a session share it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitState {
    consecutive_429s: u32,
    current_delay: Duration,
}

impl RateLimitState {
    /// Record a 429 and return the delay to wait before retrying (without jitter)
    pub fn record_429(
        &mut self,
        policy: &RateLimitPolicy,
        retry_after: Option<Duration>,
    ) -> Duration {
        self.consecutive_429s = self.consecutive_429s.saturating_add(1);
        self.current_delay = policy.delay(self.consecutive_429s, retry_after);
        self.current_delay
    }

    /// Back to baseline after any non-429 response
    pub fn reset(&mut self) {
        self.consecutive_429s = 0;
        self.current_delay = Duration::ZERO;
    }

    /// Number of 429 responses since the last non-429 response
    pub fn consecutive_429s(&self) -> u32 {
        self.consecutive_429s
    }

    /// Delay chosen for the most recent 429
    pub fn current_delay(&self) -> Duration {
        self.current_delay
    }
}

/// Delay before the transient retry following `attempt` (zero based)
pub fn transient_delay(
    backoff_type: BackoffType,
    initial: Duration,
    max: Duration,
    attempt: u32,
) -> Duration {
    let delay = match backoff_type {
        BackoffType::Constant => initial,
        BackoffType::Linear => initial.saturating_mul(attempt.saturating_add(1)),
        BackoffType::Exponential => initial.saturating_mul(2u32.saturating_pow(attempt)),
    };

    std::cmp::min(delay, max)
}

/// Random duration in `[0, max]`
pub fn jitter(max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=max_ms))
}

/// Read the `Retry-After` header (delta seconds or HTTP date)
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    let wait = at.signed_duration_since(Utc::now());
    Some(wait.to_std().unwrap_or(Duration::ZERO))
}

#[cfg(test)]
mod backoff_tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn policy() -> RateLimitPolicy {
        RateLimitPolicy {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
            ..RateLimitPolicy::default()
        }
    }

    #[test]
    fn test_rate_limit_delay_grows_exponentially() {
        let policy = policy();
        assert_eq!(policy.delay(1, None), Duration::from_millis(100));
        assert_eq!(policy.delay(2, None), Duration::from_millis(200));
        assert_eq!(policy.delay(3, None), Duration::from_millis(400));
        assert_eq!(policy.delay(4, None), Duration::from_millis(800));
        assert_eq!(policy.delay(5, None), Duration::from_millis(1000));
        assert_eq!(policy.delay(60, None), Duration::from_millis(1000));
    }

    #[test]
    fn test_rate_limit_delay_prefers_hint_but_caps_it() {
        let policy = policy();
        assert_eq!(
            policy.delay(1, Some(Duration::from_millis(300))),
            Duration::from_millis(300)
        );
        assert_eq!(
            policy.delay(1, Some(Duration::from_secs(30))),
            Duration::from_millis(1000)
        );
    }

    #[test]
    fn test_rate_limit_state_counts_and_resets() {
        let policy = policy();
        let mut state = RateLimitState::default();

        state.record_429(&policy, None);
        let delay = state.record_429(&policy, None);
        assert_eq!(state.consecutive_429s(), 2);
        assert_eq!(delay, Duration::from_millis(200));
        assert_eq!(state.current_delay(), delay);

        state.reset();
        assert_eq!(state, RateLimitState::default());
    }

    #[test]
    fn test_transient_delay_constant() {
        let initial = Duration::from_millis(100);
        let max = Duration::from_secs(10);
        for attempt in [0, 1, 5] {
            assert_eq!(
                transient_delay(BackoffType::Constant, initial, max, attempt),
                initial
            );
        }
    }

    #[test]
    fn test_transient_delay_linear() {
        let initial = Duration::from_millis(100);
        let max = Duration::from_secs(10);
        assert_eq!(
            transient_delay(BackoffType::Linear, initial, max, 0),
            Duration::from_millis(100)
        );
        assert_eq!(
            transient_delay(BackoffType::Linear, initial, max, 2),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_transient_delay_exponential_respects_max() {
        let initial = Duration::from_millis(100);
        let max = Duration::from_millis(500);
        assert_eq!(
            transient_delay(BackoffType::Exponential, initial, max, 2),
            Duration::from_millis(400)
        );
        assert_eq!(
            transient_delay(BackoffType::Exponential, initial, max, 10),
            max
        );
    }

    #[test]
    fn test_jitter_bounds() {
        assert_eq!(jitter(Duration::ZERO), Duration::ZERO);
        for _ in 0..100 {
            assert!(jitter(Duration::from_millis(50)) <= Duration::from_millis(50));
        }
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("2"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_parse_retry_after_http_date_in_past() {
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), Some(Duration::ZERO));
    }

    #[test]
    fn test_parse_retry_after_missing_or_garbage() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after(&headers), None);
    }
}
