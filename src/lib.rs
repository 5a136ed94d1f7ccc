//! # SQS Worker
//!
//! An asynchronous AWS SQS worker pool: a fixed number of workers poll one
//! queue, hand each message body to a user-supplied handler and delete the
//! message when the handler succeeds.
//!
//! ## Features
//!
//! - Fixed-size pool of tokio workers sharing one queue client
//! - Trait-based handlers, plus closure adapters with optional shared resources
//! - At-least-once delivery: failed messages stay on the queue for redelivery
//! - Continue-on-error semantics; failures go to a pluggable error logger
//! - Cooperative shutdown through a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! - Settings from command line flags or environment variables
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rs_sqs_worker::{config::Settings, receiver::SqsReceiver};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let receiver = SqsReceiver::builder(Settings::load())
//!         .handler_fn(|message| async move {
//!             println!("Processing message: {}", message);
//!             Ok(())
//!         })
//!         .build()
//!         .await?;
//!
//!     let shutdown = CancellationToken::new();
//!     let signal = shutdown.clone();
//!     tokio::spawn(async move {
//!         let _ = tokio::signal::ctrl_c().await;
//!         signal.cancel();
//!     });
//!
//!     receiver.start(shutdown).await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod receiver;

pub use client::{ClientConfig, Message, QueueClient, SqsQueueClient};
pub use config::Settings;
pub use errors::{GenericError, SqsWorkerError};
pub use receiver::{ErrorLogger, MessageHandler, SqsReceiver};
