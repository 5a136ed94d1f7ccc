use rs_sqs_worker::{ErrorLogger, Settings, SqsReceiver};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rs_sqs_worker=info,sqs_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load();
    tracing::info!(
        workers = settings.workers,
        region = ?settings.aws.region,
        queue = ?settings.sqs.queue_name,
        url = ?settings.sqs.queue_url,
        "sqs-worker starting"
    );

    let receiver = SqsReceiver::builder(settings)
        .handler_fn(|body| async move {
            println!("{}", body);
            Ok(())
        })
        .logger(ErrorLogger::Tracing)
        .build()
        .await?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        tracing::info!("shutdown requested, waiting for in-flight messages");
        signal.cancel();
    });

    receiver.start(shutdown).await;

    tracing::info!("sqs-worker shutdown complete");
    Ok(())
}
