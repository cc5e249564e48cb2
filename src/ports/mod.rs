// Ports - interface contracts between the cut session and its collaborators

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::CutResult;

/// A single extraction job: opaque timestamps in, new file out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractJob {
    /// Validated input file.
    pub input: PathBuf,
    /// Free-form `hh:mm:ss` string. Never parsed locally; the external tool
    /// is the true validator and fails the job on malformed input.
    pub start: String,
    /// Free-form `hh:mm:ss` string, same rules as `start`.
    pub end: String,
    /// Destination the tool writes to.
    pub output: PathBuf,
}

/// Report returned by a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    /// Where the clip landed.
    pub output: PathBuf,
}

/// Port for the external stream-copy tool.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Run one extraction attempt. Resolves when the tool exits or the
    /// cancel channel flips to `true`. No retry, no timeout; a partially
    /// written output file is left on disk on failure.
    async fn extract(
        &self,
        job: &ExtractJob,
        cancel: watch::Receiver<bool>,
    ) -> CutResult<ExtractReport>;
}

/// Port for the start/end timestamp prompts.
pub trait TimePrompt {
    /// Show `message` and return the trimmed answer, or `None` when the user
    /// cancels (EOF or a blank line).
    fn ask(&self, message: &str) -> io::Result<Option<String>>;
}

/// Port for the result notifications that stand in for the original shell's
/// modal dialogs.
pub trait Notifier {
    /// The dropped path failed validation.
    fn invalid_input(&self, raw: &str);
    /// Extraction failed; detail goes to the event log, not the user.
    fn failure(&self);
    /// Extraction succeeded and wrote `output`.
    fn success(&self, output: &Path);
}
