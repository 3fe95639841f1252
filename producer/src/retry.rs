//! Bounded retry with exponential backoff for enqueue failures.

use crate::error::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Retry policy for enqueueing records.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first one.
    pub max_retries: u32,

    /// Backoff before the first retry.
    pub initial_backoff: Duration,

    /// Upper bound on the backoff between attempts.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Sets the maximum number of retry attempts.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the initial backoff duration.
    pub fn with_initial_backoff(mut self, duration: Duration) -> Self {
        self.initial_backoff = duration;
        self
    }

    /// Sets the maximum backoff duration.
    pub fn with_max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Backoff to wait after `attempt` failed attempts (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let mut backoff = self.initial_backoff;
        for _ in 1..attempt {
            backoff = std::cmp::min(backoff * 2, self.max_backoff);
        }
        std::cmp::min(backoff, self.max_backoff)
    }
}

/// Runs `enqueue` until it succeeds, fails permanently, or the policy runs out.
pub async fn retry_enqueue<F, R>(policy: &RetryPolicy, mut enqueue: F) -> Result<R>
where
    F: FnMut() -> Result<R>,
{
    let mut attempt = 0;

    loop {
        match enqueue() {
            Ok(value) => {
                if attempt > 0 {
                    info!("Message enqueued successfully after {} retries", attempt);
                }
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                attempt += 1;

                if attempt > policy.max_retries {
                    error!(
                        "Failed to enqueue message after {} attempts: {}",
                        attempt, e
                    );
                    return Err(e);
                }

                let backoff = policy.backoff_for(attempt);
                warn!(
                    "Error enqueueing message (attempt {}/{}): {}. Retrying in {:?}",
                    attempt, policy.max_retries, e, backoff
                );

                sleep(backoff).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublishError;
    use rdkafka::error::{KafkaError, RDKafkaErrorCode};

    fn queue_full() -> PublishError {
        PublishError::Kafka(KafkaError::MessageProduction(RDKafkaErrorCode::QueueFull))
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::default()
            .with_initial_backoff(Duration::from_millis(1))
            .with_max_backoff(Duration::from_millis(4))
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default()
            .with_initial_backoff(Duration::from_millis(100))
            .with_max_backoff(Duration::from_millis(350));

        assert_eq!(policy.backoff_for(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(350));
        assert_eq!(policy.backoff_for(10), Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let mut calls = 0;
        let result = retry_enqueue(&fast_policy(), || {
            calls += 1;
            if calls < 3 {
                Err(queue_full())
            } else {
                Ok(calls)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let mut calls = 0;
        let result: Result<()> = retry_enqueue(&fast_policy().with_max_retries(2), || {
            calls += 1;
            Err(queue_full())
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_the_policy_backoff_between_attempts() {
        let policy = RetryPolicy::default()
            .with_max_retries(3)
            .with_initial_backoff(Duration::from_millis(100))
            .with_max_backoff(Duration::from_millis(150));
        let expected: Duration = (1..=3).map(|attempt| policy.backoff_for(attempt)).sum();

        let started = tokio::time::Instant::now();
        let result: Result<()> = retry_enqueue(&policy, || Err(queue_full())).await;

        assert!(result.is_err());
        assert_eq!(expected, Duration::from_millis(400));
        let elapsed = started.elapsed();
        assert!(elapsed >= expected, "waited only {:?}", elapsed);
        assert!(elapsed < expected + Duration::from_millis(50), "waited {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let mut calls = 0;
        let result: Result<()> = retry_enqueue(&fast_policy(), || {
            calls += 1;
            Err(PublishError::Serialization("bad record".into()))
        })
        .await;

        assert!(matches!(result, Err(PublishError::Serialization(_))));
        assert_eq!(calls, 1);
    }
}
