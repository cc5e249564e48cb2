//! External ffmpeg invocation
//!
//! The extraction itself is delegated entirely to ffmpeg: seek to start, cut
//! to end, stream-copy every stream, write a new file. Nothing is re-encoded
//! locally and cut accuracy is whatever keyframe alignment allows.

use std::process::Stdio;

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{CutError, CutResult};
use crate::ports::{ExtractJob, ExtractReport, Extractor};

/// Stream-copy extractor backed by an external ffmpeg binary.
pub struct FfmpegExtractor {
    program: PathBuf,
}

impl FfmpegExtractor {
    /// Create an extractor invoking `program` (usually `ffmpeg` on PATH).
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

#[async_trait]
impl Extractor for FfmpegExtractor {
    async fn extract(
        &self,
        job: &ExtractJob,
        mut cancel: watch::Receiver<bool>,
    ) -> CutResult<ExtractReport> {
        debug!(program = %self.program.display(), ?job, "spawning extraction");

        let mut child = Command::new(&self.program)
            .arg("-i")
            .arg(&job.input)
            .arg("-ss")
            .arg(&job.start)
            .arg("-to")
            .arg(&job.end)
            .arg("-c")
            .arg("copy")
            .arg(&job.output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CutError::SpawnFailed {
                program: self.program.display().to_string(),
                source,
            })?;

        // Drain stderr concurrently so a chatty tool cannot fill the pipe
        // and stall; the captured text becomes the failure detail.
        let stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut detail = String::new();
            if let Some(mut pipe) = stderr {
                let _ = pipe.read_to_string(&mut detail).await;
            }
            detail
        });

        // A closed cancel channel means no shell is listening; keep waiting
        // on the child instead of treating it as a cancellation.
        let cancelled = async {
            if cancel.wait_for(|&flag| flag).await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        let status = tokio::select! {
            status = child.wait() => status?,
            _ = cancelled => {
                let _ = child.kill().await;
                return Err(CutError::Cancelled);
            }
        };

        let detail = stderr_task.await.unwrap_or_default();

        if status.success() {
            debug!(output = %job.output.display(), "extraction finished");
            Ok(ExtractReport {
                output: job.output.clone(),
            })
        } else {
            Err(CutError::ExtractionFailed {
                status: status.to_string(),
                detail: detail.trim().to_string(),
            })
        }
    }
}
