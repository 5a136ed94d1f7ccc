use crate::client::{Message, QueueClient};
use crate::errors::SqsWorkerError;
use crate::receiver::logger::ErrorLogger;
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Trait for implementing asynchronous SQS message handlers.
///
/// The handler is shared by every worker of a receiver and may be invoked
/// concurrently. Returning `Ok(())` deletes the message; returning an error
/// leaves it on the queue for redelivery once its visibility timeout expires.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Processes one message body.
    async fn handle(&self, body: String) -> Result<(), SqsWorkerError>;
}

/// Adapter turning an async closure `Fn(String) -> Future` into a [`MessageHandler`].
pub struct MessageHandlerFn<F> {
    handler_fn: F,
}

impl<F, Fut> MessageHandlerFn<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SqsWorkerError>> + Send + 'static,
{
    pub fn new(handler_fn: F) -> Self {
        MessageHandlerFn { handler_fn }
    }
}

#[async_trait]
impl<F, Fut> MessageHandler for MessageHandlerFn<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SqsWorkerError>> + Send + 'static,
{
    async fn handle(&self, body: String) -> Result<(), SqsWorkerError> {
        (self.handler_fn)(body).await
    }
}

/// Adapter for handlers that need a shared resource on every call.
///
/// # Type Parameters
///
/// * `RFn` - The message handler function type
/// * `TShared` - The type of shared resources passed to the handler, cloned per message
pub struct SharedMessageHandlerFn<RFn, TShared> {
    rv_fn: RFn,
    shared_resources: TShared,
}

impl<RFn, Fut, TShared> SharedMessageHandlerFn<RFn, TShared>
where
    RFn: Fn(String, TShared) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SqsWorkerError>> + Send + 'static,
    TShared: Send + Sync + Clone + 'static,
{
    pub fn new(rv_fn: RFn, shared_resources: TShared) -> Self {
        SharedMessageHandlerFn {
            rv_fn,
            shared_resources,
        }
    }
}

#[async_trait]
impl<RFn, Fut, TShared> MessageHandler for SharedMessageHandlerFn<RFn, TShared>
where
    RFn: Fn(String, TShared) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SqsWorkerError>> + Send + 'static,
    TShared: Send + Sync + Clone + 'static,
{
    async fn handle(&self, body: String) -> Result<(), SqsWorkerError> {
        (self.rv_fn)(body, self.shared_resources.clone()).await
    }
}

/// Body of every worker task: poll, handle, delete, until shutdown.
///
/// Shutdown is only checked at the top of each iteration, so an in-flight
/// receive, handler call or delete always runs to completion. A panicking
/// handler counts as a failed handler call.
pub(crate) async fn run_worker<C>(
    index: usize,
    client: Arc<C>,
    handler: Arc<dyn MessageHandler>,
    logger: ErrorLogger,
    shutdown: CancellationToken,
) where
    C: QueueClient,
{
    tracing::debug!(worker = index, "worker started");

    while !shutdown.is_cancelled() {
        let Message {
            body,
            receipt_handle,
        } = match client.consume().await {
            Ok(Some(message)) => message,
            Ok(None) => continue,
            Err(e) => {
                logger.log(&e);
                continue;
            }
        };

        let outcome = AssertUnwindSafe(handler.handle(body))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(SqsWorkerError::HandlerPanicked(panic_message(&*panic))));

        if let Err(e) = outcome {
            // Not deleted: the message comes back after its visibility timeout.
            logger.log(&e);
            continue;
        }

        match client.delete(&receipt_handle).await {
            Ok(()) => tracing::debug!(worker = index, "message deleted"),
            Err(e) => logger.log(&e),
        }
    }

    tracing::debug!(worker = index, "worker stopped");
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
