// src/config.rs
use crate::constants::{
    DEFAULT_CACHE_WARM_UP, DEFAULT_LOG_FILE_NAME, DEFAULT_NOTIFY_FROM, DEFAULT_NOTIFY_TO,
    DEFAULT_REQUEST_TIMEOUT,
};
use crate::error::ConfigError;
use crate::notify::NotificationAddresses;
use crate::retry::RetrySchedule;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// URL (http:// or https://) or path of the text to count
    pub source: String,

    /// Comma-separated delays in milliseconds between retries of a failed download.
    /// An empty value disables retries.
    #[arg(long, default_value = "500,1000,10000")]
    pub retry_delays: String,

    /// How long the cache takes to warm up on first use, in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub cache_warm_up_ms: u64,

    /// Timeout for a single download, in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Recipient of the result notification
    #[arg(long, default_value = DEFAULT_NOTIFY_TO)]
    pub notify_to: String,

    /// Sender of the result notification
    #[arg(long, default_value = DEFAULT_NOTIFY_FROM)]
    pub notify_from: String,

    /// Where to write the debug log (defaults to wordtally.log in the temp directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where the text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Web(String),
    File(String),
}

impl SourceSpec {
    /// Classifies a source argument: `http://` and `https://` are web pages,
    /// anything else is a file path.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ConfigError::InvalidSource {
                input: input.to_string(),
                reason: "source cannot be empty".to_string(),
            });
        }

        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            url::Url::parse(input).map_err(|e| ConfigError::InvalidSource {
                input: input.to_string(),
                reason: e.to_string(),
            })?;
            Ok(Self::Web(input.to_string()))
        } else {
            Ok(Self::File(input.to_string()))
        }
    }
}

/// Parses `"500,1000,10000"` into a retry schedule. Blank means no retries.
pub fn parse_retry_delays(input: &str) -> Result<RetrySchedule, ConfigError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(RetrySchedule::none());
    }

    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidRetryDelay {
                    value: part.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(RetrySchedule::new)
}

/// Resolved configuration, validated and ready to wire the workflow.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub source: SourceSpec,
    pub retry_schedule: RetrySchedule,
    pub cache_warm_up: Duration,
    pub request_timeout: Duration,
    pub addresses: NotificationAddresses,
    pub log_file: PathBuf,
    pub verbose: bool,
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_FILE_NAME)
}

impl WorkflowConfig {
    pub fn resolve(cli: CommandLineInput) -> Result<Self, ConfigError> {
        for address in [&cli.notify_to, &cli.notify_from] {
            if !address.contains('@') {
                return Err(ConfigError::InvalidAddress(address.clone()));
            }
        }

        Ok(Self {
            source: SourceSpec::parse(&cli.source)?,
            retry_schedule: parse_retry_delays(&cli.retry_delays)?,
            cache_warm_up: Duration::from_millis(cli.cache_warm_up_ms),
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
            addresses: NotificationAddresses {
                to: cli.notify_to,
                from: cli.notify_from,
            },
            log_file: cli.log_file.unwrap_or_else(default_log_file),
            verbose: cli.verbose,
        })
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            source: SourceSpec::File(String::new()),
            retry_schedule: RetrySchedule::default(),
            cache_warm_up: DEFAULT_CACHE_WARM_UP,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            addresses: NotificationAddresses::default(),
            log_file: default_log_file(),
            verbose: false,
        }
    }
}
