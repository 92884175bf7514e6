//! Retry decorator for async REST clients.
//!
//! [`RetryingClient`] wraps any [`RestClient`] and retries transient failures
//! a bounded number of times with a fixed delay, logging each failure through
//! a [`Logger`]. Fatal errors abort immediately with [`RestError::Aborted`].

pub mod client;
pub mod error;
pub mod http;
pub mod logger;
pub mod policy;
pub mod retry;
pub mod sleeper;

pub use client::{Model, RestClient};
pub use error::{ErrorKind, PolicyError, RestError, Result};
pub use http::HttpRestClient;
pub use logger::{LogLogger, Logger};
pub use policy::{DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS, Exhaustion, FailureLogging, RetryPolicy};
pub use retry::RetryingClient;
pub use sleeper::{Sleeper, TokioSleeper};

