//! Sink for failure messages emitted by the retry engine.

use log::error;
use std::sync::Arc;

/// Receives error-severity messages.
#[cfg_attr(test, mockall::automock)]
pub trait Logger: Send + Sync {
    fn error(&self, message: &str);
}

/// Forwards messages to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn error(&self, message: &str) {
        error!("{}", message);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_arc_logger_forwards() {
        let mut mock = MockLogger::new();
        mock.expect_error()
            .with(eq("connection refused"))
            .times(1)
            .return_const(());

        let shared: Arc<dyn Logger> = Arc::new(mock);
        Logger::error(&shared, "connection refused");
    }

    #[test_log::test]
    fn test_log_logger_does_not_panic() {
        LogLogger.error("something went wrong");
    }
}
