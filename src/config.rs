use clap::{Args, Parser};

use crate::client::ClientConfig;
use crate::errors::SqsWorkerError;

/// Process-level settings for the worker pool.
///
/// Every field can be given as a command line flag or through the matching
/// environment variable. Settings are immutable once loaded; the receiver
/// takes ownership of them.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "sqs-worker", version, about = "Poll an SQS queue with a fixed pool of workers")]
pub struct Settings {
    /// The number of parallel workers to run
    #[arg(long, env = "SQS_WORKERS", default_value_t = 1, allow_negative_numbers = true)]
    pub workers: i32,

    #[command(flatten)]
    pub aws: AwsSettings,

    #[command(flatten)]
    pub sqs: SqsSettings,
}

/// AWS account and endpoint settings.
#[derive(Clone, Default, PartialEq, Args)]
pub struct AwsSettings {
    /// AWS account id, used as the queue owner when resolving a queue name
    #[arg(long = "id", env = "AWS_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// AWS access key id (leave blank for the default credential chain)
    #[arg(long = "key", env = "AWS_ACCESS_KEY_ID")]
    pub access_key_id: Option<String>,

    /// AWS secret access key (leave blank for the default credential chain)
    #[arg(long = "secret", env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// AWS region (i.e. us-east-1)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Custom AWS endpoint, e.g. a local SQS emulator
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint: Option<String>,
}

impl std::fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSettings")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Queue identity and polling settings.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct SqsSettings {
    /// The queue name
    #[arg(long = "queue", env = "SQS_QUEUE_NAME")]
    pub queue_name: Option<String>,

    /// The SQS queue URL
    #[arg(long = "url", env = "SQS_QUEUE_URL")]
    pub queue_url: Option<String>,

    /// The client's number of retries (negative uses the client default)
    #[arg(long, env = "SQS_RETRIES", default_value_t = -1, allow_negative_numbers = true)]
    pub retries: i32,

    /// The message visibility timeout in seconds
    #[arg(long = "timeout", env = "SQS_VISIBILITY_TIMEOUT", default_value_t = 30)]
    pub visibility_timeout: i32,

    /// Long-poll wait time in seconds
    #[arg(long = "wait", env = "SQS_WAIT_TIME", default_value_t = 0)]
    pub wait_time: i32,
}

impl Default for SqsSettings {
    fn default() -> Self {
        SqsSettings {
            queue_name: None,
            queue_url: None,
            retries: -1,
            visibility_timeout: 30,
            wait_time: 0,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            workers: 1,
            aws: AwsSettings::default(),
            sqs: SqsSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from the process arguments and environment.
    ///
    /// Exits the process with a usage message on malformed input, like any
    /// other command line tool.
    pub fn load() -> Self {
        Settings::parse()
    }

    /// Loads settings from an explicit argument list.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args)
    }

    /// Translates these settings into the queue client's configuration.
    ///
    /// The region is the only field checked here. Everything else is passed
    /// through and left to the client to validate.
    pub fn client_config(&self) -> Result<ClientConfig, SqsWorkerError> {
        let region = non_empty(&self.aws.region).ok_or(SqsWorkerError::RegionRequired)?;

        Ok(ClientConfig {
            account_id: non_empty(&self.aws.account_id),
            access_key_id: non_empty(&self.aws.access_key_id),
            secret_access_key: non_empty(&self.aws.secret_access_key),
            region,
            endpoint: non_empty(&self.aws.endpoint),
            queue_name: non_empty(&self.sqs.queue_name),
            queue_url: non_empty(&self.sqs.queue_url),
            retries: self.sqs.retries,
            visibility_timeout: self.sqs.visibility_timeout,
            wait_time: self.sqs.wait_time,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}
