// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;
use wordtally::{
    CancellationToken, CommandLineInput, FileTextSource, HttpFetcher, LogNotifier,
    MarkupTextExtractor, SourceSpec, TextSource, WebTextSourceFactory, WordCountCache,
    WordCountingEngine, WordCountingWorkflow, WorkflowConfig,
};

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}";

/// Sends wordtally's own records to the log file at debug level and to
/// stderr at the console level; stdout stays reserved for the count.
/// Dependencies only log warnings and above.
fn setup_logging(config: &WorkflowConfig) -> anyhow::Result<()> {
    let console_level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{l}] {m}{n}")))
        .build();

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let log_config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("console", Box::new(console)),
        )
        .appender(Appender::builder().build("file", Box::new(file)))
        .logger(Logger::builder().build("wordtally", LevelFilter::Debug))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Warn),
        )?;

    log4rs::init_config(log_config)?;
    log::debug!("Logging to {}", config.log_file.display());
    Ok(())
}

/// Builds the text source named on the command line.
fn build_source(config: &WorkflowConfig) -> anyhow::Result<Box<dyn TextSource>> {
    match &config.source {
        SourceSpec::Web(url) => {
            let fetcher = HttpFetcher::with_timeout(config.request_timeout)
                .context("failed to create HTTP client")?;
            let factory = WebTextSourceFactory::new(
                Arc::new(fetcher),
                Arc::new(MarkupTextExtractor),
                config.retry_schedule.clone(),
            );
            Ok(Box::new(factory.create(url.as_str())))
        }
        SourceSpec::File(path) => Ok(Box::new(FileTextSource::new(path.as_str()))),
    }
}

/// Wires the workflow once; the cache handle is shared by everything built here.
fn build_workflow(config: &WorkflowConfig) -> WordCountingWorkflow {
    let cache = WordCountCache::new(config.cache_warm_up);
    let engine = WordCountingEngine::new(cache);
    WordCountingWorkflow::new(engine, Arc::new(LogNotifier), config.addresses.clone())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WorkflowConfig::resolve(CommandLineInput::parse())?;
    setup_logging(&config)?;

    let source = build_source(&config)?;
    let workflow = build_workflow(&config);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let count = workflow.run(source.as_ref(), &cancel).await;
    println!("Number of words on [{}]: {}", source.id(), count);

    Ok(())
}
