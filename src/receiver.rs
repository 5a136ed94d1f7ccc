use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::client::{QueueClient, SqsQueueClient};
use crate::config::Settings;
use crate::errors::SqsWorkerError;

mod functions;
mod logger;

pub use functions::{MessageHandler, MessageHandlerFn, SharedMessageHandlerFn};
pub use logger::ErrorLogger;

/// A fixed pool of workers polling one queue.
///
/// Each worker receives a message, passes its body to the handler and deletes
/// it when the handler succeeds. Failures never stop a worker; they go to the
/// [`ErrorLogger`].
pub struct SqsReceiver<C = SqsQueueClient>
where
    C: QueueClient,
{
    settings: Settings,

    /// The queue client, shared by every worker.
    client: Arc<C>,

    handler: Arc<dyn MessageHandler>,

    logger: ErrorLogger,
}

impl SqsReceiver<SqsQueueClient> {
    pub fn builder(settings: Settings) -> SqsReceiverBuilder {
        SqsReceiverBuilder::new(settings)
    }
}

impl<C> SqsReceiver<C>
where
    C: QueueClient,
{
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn logger(&self) -> &ErrorLogger {
        &self.logger
    }

    /// Runs `settings.workers` workers until `shutdown` is cancelled.
    ///
    /// Returns once every worker has observed the cancellation and finished
    /// its current iteration. Per-message failures are only reported through
    /// the logger.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rs_sqs_worker::config::Settings;
    /// use rs_sqs_worker::receiver::SqsReceiver;
    /// use tokio_util::sync::CancellationToken;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let receiver = SqsReceiver::builder(Settings::load())
    ///         .handler_fn(|body| async move {
    ///             println!("{}", body);
    ///             Ok(())
    ///         })
    ///         .build()
    ///         .await?;
    ///
    ///     receiver.start(CancellationToken::new()).await;
    ///     Ok(())
    /// }
    /// ```
    pub async fn start(&self, shutdown: CancellationToken) {
        let workers = usize::try_from(self.settings.workers).unwrap_or_default();
        tracing::info!(workers, "starting sqs workers");

        let tasks = (0..workers).map(|index| {
            tokio::spawn(functions::run_worker(
                index,
                Arc::clone(&self.client),
                Arc::clone(&self.handler),
                self.logger.clone(),
                shutdown.clone(),
            ))
        });

        for (index, result) in join_all(tasks).await.into_iter().enumerate() {
            if let Err(e) = result {
                self.logger.log(&SqsWorkerError::WorkerPanicked {
                    index,
                    reason: e.to_string(),
                });
            }
        }

        tracing::info!(workers, "all sqs workers stopped");
    }
}

/// Builder for [`SqsReceiver`].
///
/// A handler is mandatory. The logger defaults to [`ErrorLogger::Stderr`].
pub struct SqsReceiverBuilder {
    settings: Settings,
    handler: Option<Arc<dyn MessageHandler>>,
    logger: ErrorLogger,
}

impl SqsReceiverBuilder {
    fn new(settings: Settings) -> Self {
        SqsReceiverBuilder {
            settings,
            handler: None,
            logger: ErrorLogger::default(),
        }
    }

    pub fn handler<H>(mut self, handler: H) -> Self
    where
        H: MessageHandler + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Registers an async closure as the handler.
    pub fn handler_fn<F, Fut>(self, handler_fn: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SqsWorkerError>> + Send + 'static,
    {
        self.handler(MessageHandlerFn::new(handler_fn))
    }

    /// Registers an async closure that receives a clone of `shared_resources`
    /// with every message.
    pub fn handler_with_shared<F, Fut, TShared>(self, shared_resources: TShared, rv_fn: F) -> Self
    where
        F: Fn(String, TShared) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SqsWorkerError>> + Send + 'static,
        TShared: Send + Sync + Clone + 'static,
    {
        self.handler(SharedMessageHandlerFn::new(rv_fn, shared_resources))
    }

    pub fn logger(mut self, logger: ErrorLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Validates the settings and connects to SQS.
    pub async fn build(self) -> Result<SqsReceiver<SqsQueueClient>, SqsWorkerError> {
        let client_config = self.validate()?;
        let client = SqsQueueClient::connect(client_config).await?;
        self.finish(client)
    }

    /// Validates the settings and uses `client` instead of connecting to SQS.
    pub fn build_with_client<C>(self, client: C) -> Result<SqsReceiver<C>, SqsWorkerError>
    where
        C: QueueClient,
    {
        self.validate()?;
        self.finish(client)
    }

    fn validate(&self) -> Result<crate::client::ClientConfig, SqsWorkerError> {
        if self.handler.is_none() {
            return Err(SqsWorkerError::HandlerRequired);
        }

        if self.settings.workers < 1 {
            return Err(SqsWorkerError::InvalidWorkerCount(self.settings.workers));
        }

        self.settings.client_config()
    }

    fn finish<C>(self, client: C) -> Result<SqsReceiver<C>, SqsWorkerError>
    where
        C: QueueClient,
    {
        let handler = self.handler.ok_or(SqsWorkerError::HandlerRequired)?;

        Ok(SqsReceiver {
            settings: self.settings,
            client: Arc::new(client),
            handler,
            logger: self.logger,
        })
    }
}
