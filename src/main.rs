//! mp4cut - lossless MP4 sub-clip extraction
//!
//! Takes the file path a desktop shell would deliver via drag-and-drop,
//! obtains a start/end timestamp pair, and has an external ffmpeg process
//! stream-copy that range into a new timestamp-named file.
//!
//! # Usage
//!
//! ```bash
//! mp4cut video.mp4
//! mp4cut video.mp4 --start 00:01:00 --end 00:02:00
//! mp4cut "file:///home/me/video.mp4" -s 00:01:00 -e 00:02:00 -o cut.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use mp4cut::app::{CutSession, SessionInput};
use mp4cut::cli::Cli;
use mp4cut::config::{Config, FileConfig};
use mp4cut::extract::FfmpegExtractor;
use mp4cut::logs::EventLog;
use mp4cut::notify::ConsoleNotifier;
use mp4cut::prompt::StdinTimePrompt;

/// Main entry point for the mp4cut CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Resolve configuration: CLI > env > file > defaults
    let file_config = FileConfig::load(cli.config.as_deref())?;
    let config = Config::resolve(cli.ffmpeg, cli.output_dir, cli.log_dir, file_config);
    debug!(?config, "resolved configuration");

    // Open the append-only event log once for the lifetime of the process
    let log = EventLog::open(&config.log_dir)?;

    // Ctrl-C flips the cancel channel; the extractor kills its child in turn
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping extraction");
            let _ = cancel_tx.send(true);
        }
    });

    let extractor = Arc::new(FfmpegExtractor::new(config.ffmpeg.clone()));
    let session = CutSession::new(&config, &log, &StdinTimePrompt, &ConsoleNotifier, extractor);

    let outcome = session
        .run(
            SessionInput {
                dropped: cli.input,
                start: cli.start,
                end: cli.end,
                output: cli.output,
            },
            cancel_rx,
        )
        .await?;

    debug!(?outcome, "session finished");
    std::process::exit(outcome.exit_code());
}
