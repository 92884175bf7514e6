//! Retry configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::PolicyError;

/// Total attempts made by default, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Delay between attempts by default.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Which transient failures of a single call reach the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureLogging {
    /// One log line per failed attempt.
    #[default]
    EveryAttempt,
    /// Only the first failure of each call.
    FirstOnly,
}

/// What a call returns once every attempt failed transiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Exhaustion {
    /// `T::default()`, indistinguishable from a legitimate empty result.
    #[default]
    ReturnDefault,
    /// [`RestError::Exhausted`](crate::RestError::Exhausted).
    Fail,
}

/// Immutable retry settings of a [`RetryingClient`](crate::RetryingClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: NonZeroUsize,
    delay: Duration,
    failure_logging: FailureLogging,
    exhaustion: Exhaustion,
}

impl RetryPolicy {
    /// Creates a policy making at most `max_attempts` tries, `delay` apart.
    pub fn new(max_attempts: usize, delay: Duration) -> Result<Self, PolicyError> {
        let max_attempts = NonZeroUsize::new(max_attempts).ok_or(PolicyError::ZeroAttempts)?;
        Ok(Self {
            max_attempts,
            delay,
            failure_logging: FailureLogging::default(),
            exhaustion: Exhaustion::default(),
        })
    }

    pub fn with_failure_logging(mut self, failure_logging: FailureLogging) -> Self {
        self.failure_logging = failure_logging;
        self
    }

    pub fn with_exhaustion(mut self, exhaustion: Exhaustion) -> Self {
        self.exhaustion = exhaustion;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts.get()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn failure_logging(&self) -> FailureLogging {
        self.failure_logging
    }

    pub fn exhaustion(&self) -> Exhaustion {
        self.exhaustion
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: NonZeroUsize::new(DEFAULT_MAX_ATTEMPTS).unwrap_or(NonZeroUsize::MIN),
            delay: DEFAULT_DELAY,
            failure_logging: FailureLogging::default(),
            exhaustion: Exhaustion::default(),
        }
    }
}
