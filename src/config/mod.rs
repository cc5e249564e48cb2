//! Configuration loading and resolution
//!
//! Precedence follows CLI > environment > file > defaults. Environment
//! overrides are handled by clap's `env` attributes on the CLI flags, so by
//! the time values reach [`Config::resolve`] the CLI side already folds the
//! environment in.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{CutError, CutResult};

/// Config file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "mp4cut.toml";

/// Settings that may come from a `mp4cut.toml` file. All optional; anything
/// unset falls through to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// ffmpeg binary to invoke.
    pub ffmpeg: Option<PathBuf>,
    /// Directory generated clips are written into.
    pub output_dir: Option<PathBuf>,
    /// Directory for the append-only log files.
    pub log_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Read `path`, or the default file when `None`. A missing default file
    /// is not an error; a missing explicitly requested file is.
    pub fn load(path: Option<&Path>) -> CutResult<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
                debug!("no config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(CutError::Io(err)),
        };

        toml::from_str(&text).map_err(|err| CutError::Config {
            message: format!("{}: {}", path.display(), err),
        })
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// ffmpeg binary to invoke.
    pub ffmpeg: PathBuf,
    /// Directory generated clips are written into.
    pub output_dir: PathBuf,
    /// Directory for the append-only log files.
    pub log_dir: PathBuf,
}

impl Config {
    /// Merge CLI/env values over file values over defaults.
    pub fn resolve(
        cli_ffmpeg: Option<PathBuf>,
        cli_output_dir: Option<PathBuf>,
        cli_log_dir: Option<PathBuf>,
        file: FileConfig,
    ) -> Self {
        Self {
            ffmpeg: cli_ffmpeg
                .or(file.ffmpeg)
                .unwrap_or_else(|| PathBuf::from("ffmpeg")),
            output_dir: cli_output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            log_dir: cli_log_dir
                .or(file.log_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
