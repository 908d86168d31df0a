// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;
use weread2discord::{
    AppError, CommandLineInput, DeliveryMode, DeliveryTarget, ReadingRepository, RunConfig,
    RunSummary, WereadHttpClient, WereadToDiscord,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("weread2discord.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // stderr keeps stdout clean for pipe mode
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes one digest run: fetch → compose → deliver.
async fn execute_pipeline(config: &RunConfig) -> Result<(), AppError> {
    let client = WereadHttpClient::new(&config.cookie)?;
    if let Err(e) = client.warm_up().await {
        log::warn!("Could not reach the WeRead front page: {}", e);
    }
    let repository: Arc<dyn ReadingRepository> = Arc::new(client);

    let pipeline = WereadToDiscord::new(repository, config.delivery.clone())?
        .with_digest_size(config.digest_size)
        .with_seed(config.seed);

    let summary = pipeline.run().await;
    report_completion(config, &summary);

    Ok(())
}

/// Reports completion to the user with stats and delivery confirmations.
fn report_completion(config: &RunConfig, summary: &RunSummary) {
    if config.delivery == DeliveryMode::Stdout {
        return;
    }

    if summary.fetch.notebook_list_failed {
        eprintln!("⚠️  Could not read the WeRead notebook list. Is the cookie still valid?");
        return;
    }

    println!(
        "📚 Fetched {} books ({} with chapter info): {} highlights, {} notes, {} summaries.",
        summary.library.books,
        summary.library.books_with_chapters,
        summary.library.bookmarks,
        summary.library.notes,
        summary.library.summaries
    );
    println!(
        "🧱 Rendered {} headings, {} callouts and {} quotes.",
        summary.composition.render.headings,
        summary.composition.render.callouts,
        summary.composition.render.quotes
    );
    if summary.fetch.books_skipped > 0 {
        eprintln!(
            "⚠️  {} book(s) skipped after fetch errors.",
            summary.fetch.books_skipped
        );
    }

    let Some(report) = &summary.output else {
        println!("✓ Nothing to publish today.");
        return;
    };

    for completed in &report.completed {
        if let DeliveryTarget::PostWebhook { .. } = completed.operation {
            println!(
                "✓ Posted {} of {} notes to the webhook",
                summary.drawn(),
                summary.composition.pool_size
            );
        }
    }
    for failed in &report.failed {
        eprintln!("⚠️  Delivery failed: {}", failed.error);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = RunConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
