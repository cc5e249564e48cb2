//! CLI module for mp4cut
//!
//! One operation, so the surface is a flat argument set: the input path plus
//! optional timestamps and location overrides. Timestamps omitted here are
//! prompted for interactively.

use std::path::PathBuf;

use clap::Parser;

/// mp4cut - lossless MP4 sub-clip extraction
///
/// Takes the file path a desktop shell would deliver via drag-and-drop,
/// obtains a start/end timestamp pair, and has ffmpeg stream-copy that range
/// into a new timestamp-named file.
#[derive(Parser, Debug)]
#[command(name = "mp4cut")]
#[command(about = "Cut a sub-clip out of an MP4 file without re-encoding")]
#[command(version)]
pub struct Cli {
    /// Input video file; a file:// prefix from a drag-and-drop payload is
    /// accepted
    pub input: String,

    /// Start time (hh:mm:ss); prompted for interactively when omitted
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (hh:mm:ss); prompted for interactively when omitted
    #[arg(short, long)]
    pub end: Option<String>,

    /// Output file path (default: auto-generated timestamp name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory generated clips are written into
    #[arg(long, env = "MP4CUT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// ffmpeg binary to invoke
    #[arg(long, env = "MP4CUT_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Directory for the append-only log files
    #[arg(long, env = "MP4CUT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Configuration file (default: mp4cut.toml when present)
    #[arg(long, env = "MP4CUT_CONFIG")]
    pub config: Option<PathBuf>,
}
