//! Fixed-delay retry decorator for any [`RestClient`].

use async_trait::async_trait;
use log::debug;
use std::future::Future;

use crate::client::{Model, RestClient};
use crate::error::{RestError, Result};
use crate::logger::Logger;
use crate::policy::{Exhaustion, FailureLogging, RetryPolicy};
use crate::sleeper::{Sleeper, TokioSleeper};

/// Wraps a [`RestClient`] and retries transient failures.
///
/// Transient errors are logged and retried up to
/// [`RetryPolicy::max_attempts`] times, [`RetryPolicy::delay`] apart. A fatal
/// error aborts the call at once with [`RestError::Aborted`]. When every
/// attempt fails transiently the call yields `T::default()` (or
/// [`RestError::Exhausted`] under [`Exhaustion::Fail`]).
pub struct RetryingClient<C, L, S = TokioSleeper> {
    inner: C,
    logger: L,
    sleeper: S,
    policy: RetryPolicy,
}

impl<C: RestClient, L: Logger> RetryingClient<C, L> {
    /// Wraps `inner` with the default policy: 3 attempts, 1 second apart.
    pub fn new(inner: C, logger: L) -> Self {
        Self::with_policy(inner, logger, RetryPolicy::default())
    }

    pub fn with_policy(inner: C, logger: L, policy: RetryPolicy) -> Self {
        Self {
            inner,
            logger,
            sleeper: TokioSleeper,
            policy,
        }
    }
}

impl<C: RestClient, L: Logger, S: Sleeper> RetryingClient<C, L, S> {
    /// Replaces the way the client waits between attempts.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> RetryingClient<C, L, S2> {
        RetryingClient {
            inner: self.inner,
            logger: self.logger,
            sleeper,
            policy: self.policy,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Runs `operation` until it succeeds, fails fatally, or runs out of attempts.
    async fn retry_operation<T, F, Fut>(&self, context: String, operation: F) -> Result<T>
    where
        T: Default,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.policy.max_attempts();
        let delay = self.policy.delay();
        let mut logged = false;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_transient() => {
                    // The final failure is reported once the loop ends.
                    if attempt < max_attempts {
                        self.log_failure(&e.to_string(), &mut logged);
                        debug!(
                            "{}: attempt {}/{} failed ({}), retrying in {:?}...",
                            context, attempt, max_attempts, e, delay
                        );
                        self.sleeper.sleep(delay).await;
                    }
                    last_error = Some(e);
                }
                Err(e) => {
                    debug!("{}: non-retryable error: {}", context, e);
                    return Err(RestError::Aborted {
                        context,
                        attempts: max_attempts,
                        source: Box::new(e),
                    });
                }
            }
        }

        let message = last_error
            .as_ref()
            .map_or_else(|| context.clone(), ToString::to_string);
        self.log_failure(&message, &mut logged);

        match self.policy.exhaustion() {
            Exhaustion::ReturnDefault => Ok(T::default()),
            Exhaustion::Fail => Err(RestError::Exhausted {
                context,
                attempts: max_attempts,
                source: last_error.map(Box::new),
            }),
        }
    }

    fn log_failure(&self, message: &str, logged: &mut bool) {
        if *logged && self.policy.failure_logging() == FailureLogging::FirstOnly {
            return;
        }
        self.logger.error(message);
        *logged = true;
    }
}

#[async_trait]
impl<C, L, S> RestClient for RetryingClient<C, L, S>
where
    C: RestClient,
    L: Logger,
    S: Sleeper,
{
    #[tracing::instrument(skip(self))]
    async fn get<T: Model>(&self, url: &str) -> Result<T> {
        self.retry_operation(format!("Failed to get data from {}", url), move || {
            self.inner.get::<T>(url)
        })
        .await
    }

    #[tracing::instrument(skip(self, model))]
    async fn put<T: Model>(&self, url: &str, model: &T) -> Result<T> {
        self.retry_operation("Failed to edit data".to_string(), move || {
            self.inner.put(url, model)
        })
        .await
    }

    #[tracing::instrument(skip(self, model))]
    async fn post<T: Model>(&self, url: &str, model: &T) -> Result<T> {
        self.retry_operation("Failed to insert data".to_string(), move || {
            self.inner.post(url, model)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete<T: Model>(&self, id: i64) -> Result<T> {
        self.retry_operation(format!("Failed to delete data with id {}", id), move || {
            self.inner.delete::<T>(id)
        })
        .await
    }
}
