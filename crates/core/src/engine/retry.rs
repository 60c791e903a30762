//! Bounded retry with a fixed delay between failed attempts.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Outcome of a single attempt against the provider.
pub enum Attempt<T> {
    Success(T),
    Failure(anyhow::Error),
}

/// All attempts within the budget failed.
#[derive(Debug)]
pub struct RetryExhausted {
    /// Number of attempts actually made.
    pub attempts: u32,
    /// The last observed failure; `None` only when the budget was zero.
    pub last_error: Option<anyhow::Error>,
}

/// Runs `attempt` up to `retries` times, sleeping `delay` between failed
/// attempts but never after the last one. Returns the first success, or
/// [`RetryExhausted`] carrying the last failure once the budget runs out.
pub fn run_with_retries<T>(
    retries: u32,
    delay: Duration,
    mut attempt: impl FnMut(u32) -> Attempt<T>,
) -> Result<T, RetryExhausted> {
    let mut last_error = None;

    for n in 1..=retries {
        match attempt(n) {
            Attempt::Success(value) => {
                debug!(attempt = n, "provider attempt succeeded");
                return Ok(value);
            }
            Attempt::Failure(error) => {
                warn!(attempt = n, retries, %error, "provider attempt failed");
                last_error = Some(error);
                if n < retries {
                    thread::sleep(delay);
                }
            }
        }
    }

    Err(RetryExhausted {
        attempts: retries,
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use anyhow::anyhow;

    use super::*;

    #[test]
    fn first_success_short_circuits() {
        let mut calls = 0;
        let result = run_with_retries(5, Duration::ZERO, |_| {
            calls += 1;
            Attempt::Success(42)
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn recovers_after_transient_failures() {
        let mut calls = 0;
        let result = run_with_retries(5, Duration::ZERO, |attempt| {
            calls += 1;
            if attempt <= 2 {
                Attempt::Failure(anyhow!("transient"))
            } else {
                Attempt::Success("ok")
            }
        });
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls, 3);
    }

    #[test]
    fn exhaustion_reports_attempt_count_and_last_error() {
        let mut calls = 0;
        let result: Result<(), _> = run_with_retries(3, Duration::ZERO, |attempt| {
            calls += 1;
            Attempt::Failure(anyhow!("outage {attempt}"))
        });
        let exhausted = result.unwrap_err();
        assert_eq!(calls, 3);
        assert_eq!(exhausted.attempts, 3);
        assert_eq!(exhausted.last_error.unwrap().to_string(), "outage 3");
    }

    #[test]
    fn zero_budget_makes_no_attempt() {
        let mut calls = 0;
        let result: Result<(), _> = run_with_retries(0, Duration::ZERO, |_| {
            calls += 1;
            Attempt::Success(())
        });
        let exhausted = result.unwrap_err();
        assert_eq!(calls, 0);
        assert_eq!(exhausted.attempts, 0);
        assert!(exhausted.last_error.is_none());
    }

    #[test]
    fn delay_applies_between_failed_attempts_only() {
        let delay = Duration::from_millis(20);
        let started = Instant::now();
        let result = run_with_retries(3, delay, |attempt| {
            if attempt < 3 {
                Attempt::Failure(anyhow!("not yet"))
            } else {
                Attempt::Success(())
            }
        });
        assert!(result.is_ok());
        // Two failures, so two sleeps; the succeeding attempt adds none.
        assert!(started.elapsed() >= delay * 2);
    }
}
