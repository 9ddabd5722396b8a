//! Fixed-schedule retry for idempotent reads.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// Up to `max_retries` further attempts after the first, waiting
/// `base_delay × n` before the n-th retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay * retry
    }

    /// Run `op` until it succeeds or retries are exhausted, returning the
    /// last error. `on_error` sees every failure, including the last.
    pub async fn run<T, E, F, Fut>(&self, mut op: F, mut on_error: impl FnMut(&E)) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut retry = 0;
        loop {
            match op().await {
                Ok(value) => {
                    if retry > 0 {
                        info!(retries = retry, "retry=success");
                    }
                    return Ok(value);
                }
                Err(e) => {
                    on_error(&e);
                    if retry >= self.max_retries {
                        warn!(retries = retry, error = %e, "retry=exhausted");
                        return Err(e);
                    }
                    retry += 1;
                    let delay = self.delay_for(retry);
                    warn!(retry, max_retries = self.max_retries, delay_ms = delay.as_millis() as u64, error = %e, "retry=scheduled");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn delays_grow_linearly() {
        let policy = RetryPolicy::default();
        let delays: Vec<u128> = (1..=3).map(|n| policy.delay_for(n).as_millis()).collect();
        assert_eq!(delays, [500, 1000, 1500]);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let calls = Cell::new(0);
        let mut seen = Vec::new();
        let result: Result<u32, String> = RetryPolicy::default()
            .run(
                || {
                    calls.set(calls.get() + 1);
                    let n = calls.get();
                    async move {
                        if n < 3 {
                            Err(format!("fail {n}"))
                        } else {
                            Ok(n)
                        }
                    }
                },
                |e: &String| seen.push(e.clone()),
            )
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(seen, ["fail 1", "fail 2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_three_retries() {
        let calls = Cell::new(0);
        let started = tokio::time::Instant::now();
        let result: Result<(), &str> = RetryPolicy::default()
            .run(
                || {
                    calls.set(calls.get() + 1);
                    async { Err("down") }
                },
                |_| {},
            )
            .await;

        assert_eq!(result, Err("down"));
        assert_eq!(calls.get(), 4);
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }
}
