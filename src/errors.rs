use thiserror::Error;

/// Error types for the SQS worker pool.
///
/// The first group of variants is returned while building a
/// [`SqsReceiver`](crate::receiver::SqsReceiver); nothing is started when one
/// of them occurs. The runtime variants are never returned from
/// [`SqsReceiver::start`](crate::receiver::SqsReceiver::start); workers hand
/// them to the configured [`ErrorLogger`](crate::receiver::ErrorLogger) and
/// keep polling.
#[derive(Debug, Error)]
pub enum SqsWorkerError {
    /// No message handler was registered on the builder.
    #[error("handler required")]
    HandlerRequired,

    /// The configured worker count is below one.
    #[error("1 or more workers required. invalid value {0}")]
    InvalidWorkerCount(i32),

    /// The AWS region is missing; the client cannot address the service without it.
    #[error("aws region required")]
    RegionRequired,

    /// Error that occurs during AWS SQS client initialization.
    ///
    /// This error typically happens when the queue cannot be identified or its
    /// URL cannot be resolved from the queue name.
    #[error("failed to initialize AWS SQS client: {0}")]
    InitializationError(String),

    #[error("failed to receive message: {0}")]
    ReceiveError(String),

    #[error("failed to delete message: {0}")]
    DeleteError(String),

    /// The handler panicked; the message is left for redelivery.
    #[error("handler panicked: {0}")]
    HandlerPanicked(String),

    /// A worker task ended by panicking instead of observing shutdown.
    #[error("worker {index} terminated abnormally: {reason}")]
    WorkerPanicked { index: usize, reason: String },

    #[error("{0}")]
    GenericError(#[from] GenericError),
}

impl SqsWorkerError {
    /// Returns `true` for errors that prevent a receiver from being built.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            SqsWorkerError::HandlerRequired
                | SqsWorkerError::InvalidWorkerCount(_)
                | SqsWorkerError::RegionRequired
                | SqsWorkerError::InitializationError(_)
        )
    }
}

/// Generic error type for handler failures.
#[derive(Debug, Error)]
pub struct GenericError(String);

impl GenericError {
    /// Creates a new `GenericError` with the provided message.
    pub fn new(message: String) -> Self {
        GenericError(message)
    }
}

impl std::fmt::Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GenericError {
    fn from(s: String) -> Self {
        GenericError::new(s)
    }
}

impl From<&str> for GenericError {
    fn from(s: &str) -> Self {
        GenericError::new(s.to_string())
    }
}
