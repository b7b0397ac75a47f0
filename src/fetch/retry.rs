//! Bounded retry with randomized backoff.
//!
//! Every unit of work in the pipeline (year index, paper detail, PDF body)
//! runs through [`retry_with_backoff`]. The loop makes at most
//! [`RetryPolicy::max_attempts`] attempts, sleeps a uniformly drawn whole
//! number of seconds between attempts, and absorbs the final failure into a
//! [`RetryOutcome::Skipped`] instead of returning an error.
//!
//! # Example
//!
//! ```
//! use proceedings_core::fetch::{RetryOutcome, RetryPolicy, retry_with_backoff};
//!
//! # async fn example() {
//! let policy = RetryPolicy::without_backoff(3);
//! let outcome = retry_with_backoff(&policy, "https://papers.nips.cc", |attempt| async move {
//!     if attempt < 2 { Err("flaky") } else { Ok(attempt) }
//! })
//! .await;
//! assert!(matches!(outcome, RetryOutcome::Completed { value: 2, attempts: 2 }));
//! # }
//! ```

use std::fmt::Display;
use std::future::Future;
use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::constants::{DEFAULT_MAX_ATTEMPTS, FILE_BACKOFF_SECS, YEAR_BACKOFF_SECS};

/// Attempt limit and backoff range for one kind of unit.
///
/// # Default Values
///
/// - `max_attempts`: 3
/// - backoff: 5 to 15 seconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    max_attempts: u32,

    /// Lower bound of the backoff draw, in seconds.
    min_backoff_secs: u64,

    /// Upper bound of the backoff draw, in seconds (inclusive).
    max_backoff_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::file_fetch()
    }
}

impl RetryPolicy {
    /// Creates a policy with custom settings.
    ///
    /// `max_attempts` is clamped to at least 1; a reversed backoff range is
    /// normalized.
    #[must_use]
    pub fn new(max_attempts: u32, min_backoff_secs: u64, max_backoff_secs: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            min_backoff_secs: min_backoff_secs.min(max_backoff_secs),
            max_backoff_secs: max_backoff_secs.max(min_backoff_secs),
        }
    }

    /// Policy for PDF bodies and paper detail pages (3 attempts, 5-15s).
    #[must_use]
    pub fn file_fetch() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, FILE_BACKOFF_SECS.0, FILE_BACKOFF_SECS.1)
    }

    /// Policy for year index pages (3 attempts, 10-30s).
    #[must_use]
    pub fn year_fetch() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, YEAR_BACKOFF_SECS.0, YEAR_BACKOFF_SECS.1)
    }

    /// Policy that retries immediately. Used by tests against local mock servers.
    #[must_use]
    pub fn without_backoff(max_attempts: u32) -> Self {
        Self::new(max_attempts, 0, 0)
    }

    /// Returns the maximum number of attempts configured.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the inclusive backoff range in seconds.
    #[must_use]
    pub fn backoff_range(&self) -> RangeInclusive<u64> {
        self.min_backoff_secs..=self.max_backoff_secs
    }

    /// Draws the sleep before the next attempt.
    fn next_delay(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.backoff_range());
        Duration::from_secs(secs)
    }
}

/// Terminal state of one retried unit.
#[derive(Debug)]
pub enum RetryOutcome<T, E> {
    /// An attempt succeeded; the action's value is carried out.
    Completed {
        /// Value produced by the successful attempt.
        value: T,
        /// Attempts made, including the successful one.
        attempts: u32,
    },

    /// Every attempt failed and the unit was abandoned.
    Skipped {
        /// Attempts made (always the policy maximum).
        attempts: u32,
        /// Error from the final attempt.
        last_error: E,
    },
}

impl<T, E> RetryOutcome<T, E> {
    /// Number of attempts made.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Completed { attempts, .. } | Self::Skipped { attempts, .. } => *attempts,
        }
    }

    /// Whether an attempt succeeded.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns the value of a completed unit, discarding a skip.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Completed { value, .. } => Some(value),
            Self::Skipped { .. } => None,
        }
    }
}

/// Runs `action` until it succeeds or the policy's attempts are exhausted.
///
/// `action` receives the 1-indexed attempt number. Failures are logged and
/// followed by a randomized sleep, except after the final attempt. The
/// function never fails: exhaustion is reported as [`RetryOutcome::Skipped`]
/// together with a logged skip.
#[instrument(skip(policy, action), fields(max_attempts = policy.max_attempts))]
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    unit: &str,
    mut action: F,
) -> RetryOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        debug!(attempt, "starting attempt");

        let error = match action(attempt).await {
            Ok(value) => {
                debug!(attempt, "attempt succeeded");
                return RetryOutcome::Completed {
                    value,
                    attempts: attempt,
                };
            }
            Err(error) => error,
        };

        warn!(attempt, error = %error, "attempt failed");

        if attempt >= policy.max_attempts {
            warn!(
                attempts = attempt,
                "skipped {unit} after {attempt} failed attempts"
            );
            return RetryOutcome::Skipped {
                attempts: attempt,
                last_error: error,
            };
        }

        let delay = policy.next_delay();
        info!(
            next_attempt = attempt + 1,
            delay_secs = delay.as_secs(),
            "retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    // ==================== RetryPolicy Tests ====================

    #[test]
    fn test_retry_policy_file_fetch_values() {
        let policy = RetryPolicy::file_fetch();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.backoff_range(), 5..=15);
        assert_eq!(RetryPolicy::default(), policy);
    }

    #[test]
    fn test_retry_policy_year_fetch_values() {
        let policy = RetryPolicy::year_fetch();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.backoff_range(), 10..=30);
    }

    #[test]
    fn test_retry_policy_max_attempts_minimum_is_one() {
        let policy = RetryPolicy::new(0, 1, 2);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_retry_policy_reversed_range_is_normalized() {
        let policy = RetryPolicy::new(3, 30, 10);
        assert_eq!(policy.backoff_range(), 10..=30);
    }

    #[test]
    fn test_next_delay_within_bounds() {
        let policy = RetryPolicy::year_fetch();
        for _ in 0..100 {
            let delay = policy.next_delay();
            assert!(
                (10..=30).contains(&delay.as_secs()),
                "delay {}s outside 10-30s",
                delay.as_secs()
            );
            assert_eq!(delay.subsec_nanos(), 0, "delay must be whole seconds");
        }
    }

    #[test]
    fn test_without_backoff_has_zero_delay() {
        let policy = RetryPolicy::without_backoff(3);
        assert_eq!(policy.next_delay(), Duration::ZERO);
    }

    // ==================== retry_with_backoff Tests ====================

    #[tokio::test]
    async fn test_first_attempt_success_runs_once() {
        let calls = AtomicU32::new(0);
        let outcome = retry_with_backoff(&RetryPolicy::without_backoff(3), "unit", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, String>("done") }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(outcome.is_completed());
        assert_eq!(outcome.attempts(), 1);
        assert_eq!(outcome.into_value(), Some("done"));
    }

    #[tokio::test]
    async fn test_success_after_transient_failures() {
        let outcome = retry_with_backoff(&RetryPolicy::without_backoff(3), "unit", |attempt| async move {
            if attempt < 3 {
                Err(format!("failure {attempt}"))
            } else {
                Ok(attempt)
            }
        })
        .await;

        match outcome {
            RetryOutcome::Completed { value, attempts } => {
                assert_eq!(value, 3);
                assert_eq!(attempts, 3);
            }
            RetryOutcome::Skipped { .. } => panic!("expected completion on third attempt"),
        }
    }

    #[tokio::test]
    async fn test_exhaustion_skips_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let outcome: RetryOutcome<(), String> =
            retry_with_backoff(&RetryPolicy::without_backoff(3), "unit", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("failure {attempt}")) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3, "never more than 3 attempts");
        match outcome {
            RetryOutcome::Skipped {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_error, "failure 3");
            }
            RetryOutcome::Completed { .. } => panic!("expected skip"),
        }
    }

    #[tokio::test]
    async fn test_single_attempt_policy_does_not_retry() {
        let calls = AtomicU32::new(0);
        let outcome: RetryOutcome<(), &str> =
            retry_with_backoff(&RetryPolicy::without_backoff(1), "unit", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("nope") }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!outcome.is_completed());
        assert!(outcome.into_value().is_none());
    }
}
