//! Error handling module for mp4cut

use thiserror::Error;

/// Main error type for mp4cut operations
#[derive(Error, Debug)]
pub enum CutError {
    /// Dropped path does not carry the supported extension
    #[error("not an MP4 file: {path}")]
    NotAnMp4 { path: String },

    /// Input path has no usable base name (e.g. ends in `..`)
    #[error("input file has no usable base name: {path}")]
    BadBaseName { path: String },

    /// External tool could not be started
    #[error("failed to launch {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External tool ran but reported failure
    #[error("extraction failed ({status}): {detail}")]
    ExtractionFailed { status: String, detail: String },

    /// Extraction was interrupted before the tool finished
    #[error("extraction cancelled")]
    Cancelled,

    /// Configuration file could not be parsed
    #[error("configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for mp4cut operations
pub type CutResult<T> = std::result::Result<T, CutError>;
