//! keyword-crawler main entry point
//!
//! This is the command-line interface for the keyword crawler: it crawls a
//! site, prints the highlighted text of every page it found and records
//! reader feedback.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keyword_crawler::config::{load_config_with_hash, Config};
use keyword_crawler::output::{print_statistics, write_markdown_report};
use keyword_crawler::session::{run_session, CrawlRequest};
use keyword_crawler::{FeedbackStore, JsonFeedbackStore, Relevance};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// keyword-crawler: crawl a site and highlight what matters
///
/// Crawls every page reachable from a start URL without leaving its domain,
/// up to a chosen link depth, and shows the visible text of each page with
/// search terms highlighted.
#[derive(Parser, Debug)]
#[command(name = "keyword-crawler")]
#[command(version)]
#[command(about = "A depth-bounded site crawler with keyword highlighting", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Also write log lines to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a site and print the highlighted text of every page
    Crawl {
        /// Start URL, including its scheme
        url: String,

        /// Link depth to follow (1-5); defaults to the configured depth
        #[arg(short, long)]
        depth: Option<i64>,

        /// Comma-separated search terms to highlight
        #[arg(short, long, default_value = "")]
        terms: String,

        /// Write a markdown report to this file
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Stop crawling after this many seconds and keep what was found
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Record or list relevance feedback
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },
}

#[derive(Subcommand, Debug)]
enum FeedbackAction {
    /// Append one relevance judgement
    Add {
        #[arg(long)]
        url: String,

        #[arg(long)]
        text: String,

        /// 1 if the page was relevant, 0 if not
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
        label: u8,
    },

    /// Print every recorded judgement
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from));
    let _guard = setup_logging(cli.verbose, cli.quiet, log_file.as_deref())?;

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::debug!("No configuration file given, using defaults"),
    }

    match cli.command {
        Command::Crawl {
            url,
            depth,
            terms,
            report,
            timeout,
        } => {
            let depth = depth.unwrap_or(i64::from(config.crawler.max_depth));
            let report_path = report.or_else(|| config.output.report_path.as_ref().map(PathBuf::from));
            handle_crawl(&config, &url, depth, &terms, report_path, timeout)
                .await
                .with_context(|| format!("Crawl of {} failed", url))
        }
        Command::Feedback { action } => handle_feedback(&config, action)
            .with_context(|| format!("Feedback store {} failed", config.output.feedback_path)),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// The returned guard flushes the log file when dropped.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("keyword_crawler=info,warn"),
            1 => EnvFilter::new("keyword_crawler=debug,info"),
            2 => EnvFilter::new("keyword_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Handles the crawl command
async fn handle_crawl(
    config: &Config,
    url: &str,
    depth: i64,
    terms: &str,
    report_path: Option<PathBuf>,
    timeout: Option<u64>,
) -> keyword_crawler::Result<()> {
    let request = CrawlRequest::new(url, depth, terms)?;

    let cancel = CancellationToken::new();
    spawn_cancel_triggers(&cancel, timeout);

    let output = run_session(config, &request, cancel).await?;

    println!("# Results for {}\n", output.report.start_url);
    if output.views.is_empty() {
        println!("No pages could be fetched.\n");
    }
    for (index, view) in output.views.iter().enumerate() {
        println!("### {}. [{}]({})\n", index + 1, view.url, view.url);
        println!("{}\n", view.snippet);
    }

    if let Some(path) = report_path {
        write_markdown_report(&output.report, &output.views, &path)?;
        println!("Report written to {}\n", path.display());
    }

    print_statistics(&output.report.stats);
    Ok(())
}

/// Cancels the crawl on Ctrl-C or once the timeout elapses
fn spawn_cancel_triggers(cancel: &CancellationToken, timeout: Option<u64>) {
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with the pages fetched so far");
            on_signal.cancel();
        }
    });

    if let Some(secs) = timeout {
        let on_timeout = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            tracing::warn!("Crawl timeout of {}s reached", secs);
            on_timeout.cancel();
        });
    }
}

/// Handles the feedback subcommands
fn handle_feedback(config: &Config, action: FeedbackAction) -> keyword_crawler::Result<()> {
    let mut store = JsonFeedbackStore::new(&config.output.feedback_path);

    match action {
        FeedbackAction::Add { url, text, label } => {
            let label = Relevance::try_from(label)?;
            store.add_feedback(&url, &text, label)?;
            println!("Feedback saved to {}", store.path().display());
        }
        FeedbackAction::List => {
            let records = store.load_feedback()?;
            if records.is_empty() {
                println!("No feedback recorded yet.");
            }
            for record in records {
                println!("[{}] {} ({})", u8::from(record.label), record.url, record.label);
                println!("    {}", record.text);
            }
        }
    }

    Ok(())
}
