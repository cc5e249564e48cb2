//! mp4cut library
//!
//! Lossless MP4 sub-clip extraction: validate a dropped file path, obtain a
//! start/end timestamp pair, and have an external ffmpeg process stream-copy
//! that range into a new timestamp-named file.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logs;
pub mod naming;
pub mod notify;
pub mod ports;
pub mod prompt;
pub mod validate;

// Re-export commonly used types
pub use app::{CutSession, SessionInput, SessionOutcome};
pub use error::{CutError, CutResult};
pub use ports::{ExtractJob, ExtractReport, Extractor, Notifier, TimePrompt};
