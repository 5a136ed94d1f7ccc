use crate::errors::SqsWorkerError;
use std::sync::Arc;

/// Where workers report recoverable failures.
///
/// Every failed receive, failed handler call and failed delete produces exactly
/// one call to [`ErrorLogger::log`]. The logger is shared by all workers and
/// may be called concurrently.
#[derive(Clone, Default)]
pub enum ErrorLogger {
    /// Writes the error's description to standard error.
    #[default]
    Stderr,

    /// Emits the error as a `tracing` event at error level.
    Tracing,

    /// Calls a user-supplied function.
    Custom(Arc<dyn Fn(&SqsWorkerError) + Send + Sync>),
}

impl ErrorLogger {
    /// Wraps a function as a logger.
    pub fn custom<F>(log_fn: F) -> Self
    where
        F: Fn(&SqsWorkerError) + Send + Sync + 'static,
    {
        ErrorLogger::Custom(Arc::new(log_fn))
    }

    pub fn log(&self, error: &SqsWorkerError) {
        match self {
            ErrorLogger::Stderr => eprintln!("{}", error),
            ErrorLogger::Tracing => tracing::error!(error = %error, "sqs worker error"),
            ErrorLogger::Custom(log_fn) => log_fn(error),
        }
    }
}

impl std::fmt::Debug for ErrorLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorLogger::Stderr => f.write_str("Stderr"),
            ErrorLogger::Tracing => f.write_str("Tracing"),
            ErrorLogger::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
