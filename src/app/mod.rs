//! Cut session orchestration
//!
//! One session per invocation, mirroring one drag-and-drop event of the
//! original shell: validate the dropped path, obtain the time range, name
//! the output, run the extractor, notify. Every collaborator is injected so
//! the flow can be exercised without a console, an ffmpeg binary, or a
//! display server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tokio::sync::watch;
use tracing::debug;

use crate::config::Config;
use crate::error::{CutError, CutResult};
use crate::logs::EventLog;
use crate::naming;
use crate::ports::{ExtractJob, Extractor, Notifier, TimePrompt};
use crate::prompt::{END_PROMPT, START_PROMPT};
use crate::validate::clean_dropped_path;

/// Terminal result of one cut session.
///
/// The session walks Validating, AwaitingStart, AwaitingEnd and Extracting
/// in order; each variant is the state it terminated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The dropped path failed validation.
    InvalidInput,
    /// The user cancelled one of the timestamp prompts, or the extraction
    /// was interrupted.
    Cancelled,
    /// The external tool failed or could not be started.
    Failed,
    /// The clip was written to the contained path.
    Saved(PathBuf),
}

impl SessionOutcome {
    /// Process exit code for the outcome. Cancellation is a clean exit.
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionOutcome::Saved(_) | SessionOutcome::Cancelled => 0,
            SessionOutcome::Failed => 1,
            SessionOutcome::InvalidInput => 2,
        }
    }
}

/// Per-invocation inputs: the dropped path plus optional pre-answered
/// prompts and an output override.
#[derive(Debug, Clone)]
pub struct SessionInput {
    /// Raw dropped-file string, possibly `file://`-prefixed.
    pub dropped: String,
    /// Pre-answered start prompt.
    pub start: Option<String>,
    /// Pre-answered end prompt.
    pub end: Option<String>,
    /// Explicit output path, bypassing the namer.
    pub output: Option<PathBuf>,
}

/// Orchestrates one cut from dropped path to result notification.
pub struct CutSession<'a> {
    config: &'a Config,
    log: &'a EventLog,
    prompt: &'a dyn TimePrompt,
    notifier: &'a dyn Notifier,
    extractor: Arc<dyn Extractor>,
}

impl<'a> CutSession<'a> {
    /// Create a session over injected collaborators.
    pub fn new(
        config: &'a Config,
        log: &'a EventLog,
        prompt: &'a dyn TimePrompt,
        notifier: &'a dyn Notifier,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self {
            config,
            log,
            prompt,
            notifier,
            extractor,
        }
    }

    /// Run the session to a terminal outcome.
    ///
    /// Only prompt I/O failures surface as `Err`; every domain-level failure
    /// is a terminal [`SessionOutcome`], and none of them panic or retry.
    pub async fn run(
        &self,
        input: SessionInput,
        cancel: watch::Receiver<bool>,
    ) -> CutResult<SessionOutcome> {
        let input_path = match clean_dropped_path(&input.dropped) {
            Ok(path) => path,
            Err(err) => {
                self.log.warn("file doesn't have mp4 ext.");
                self.notifier.invalid_input(&input.dropped);
                debug!(%err, "input rejected");
                return Ok(SessionOutcome::InvalidInput);
            }
        };

        // A cancelled prompt aborts silently: no dialog, no log entry, and
        // the extractor is never consulted.
        let Some((start, end)) = self.obtain_times(input.start, input.end)? else {
            return Ok(SessionOutcome::Cancelled);
        };

        let output = match input.output {
            Some(path) => path,
            None => self.generate_output_path(&input_path),
        };

        let job = ExtractJob {
            input: input_path,
            start,
            end,
            output,
        };

        match self.extractor.extract(&job, cancel).await {
            Ok(report) => {
                self.log
                    .info(&format!("video saved as {}", report.output.display()));
                self.notifier.success(&report.output);
                Ok(SessionOutcome::Saved(report.output))
            }
            Err(CutError::Cancelled) => Ok(SessionOutcome::Cancelled),
            Err(err) => {
                self.log.error(&format!("error when cutting video: {err}"));
                self.notifier.failure();
                Ok(SessionOutcome::Failed)
            }
        }
    }

    /// Ask for start then end. A cancelled start never asks for end.
    fn obtain_times(
        &self,
        start: Option<String>,
        end: Option<String>,
    ) -> CutResult<Option<(String, String)>> {
        let Some(start) = self.obtain_time(start, START_PROMPT)? else {
            return Ok(None);
        };
        let Some(end) = self.obtain_time(end, END_PROMPT)? else {
            return Ok(None);
        };
        Ok(Some((start, end)))
    }

    // A pre-answered prompt goes through the same non-emptiness gate as an
    // interactive one.
    fn obtain_time(&self, preset: Option<String>, message: &str) -> CutResult<Option<String>> {
        let answer = match preset {
            Some(value) => Some(value),
            None => self.prompt.ask(message)?,
        };
        Ok(answer
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    }

    /// Timestamp-prefixed name in the output directory, disambiguated when a
    /// same-minute cut already produced it.
    fn generate_output_path(&self, input: &Path) -> PathBuf {
        let now = Local::now();
        let candidate =
            naming::timestamped_name(now, input).unwrap_or_else(|_| naming::fallback_name(now));
        let name = naming::disambiguate(&self.config.output_dir, &candidate);
        self.config.output_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Extractor stub: counts calls, records the job, returns a canned result.
    struct StubExtractor {
        calls: AtomicUsize,
        last_job: Mutex<Option<ExtractJob>>,
        fail: bool,
    }

    impl StubExtractor {
        fn succeeding() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_job: Mutex::new(None),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_job: Mutex::new(None),
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Extractor for StubExtractor {
        async fn extract(
            &self,
            job: &ExtractJob,
            _cancel: watch::Receiver<bool>,
        ) -> CutResult<crate::ports::ExtractReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_job.lock().unwrap() = Some(job.clone());
            if self.fail {
                Err(CutError::ExtractionFailed {
                    status: "exit status: 1".to_string(),
                    detail: "stub failure".to_string(),
                })
            } else {
                Ok(crate::ports::ExtractReport {
                    output: job.output.clone(),
                })
            }
        }
    }

    /// Prompt stub yielding a fixed sequence of answers.
    struct ScriptedPrompt {
        answers: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedPrompt {
        fn new(answers: Vec<Option<&str>>) -> Self {
            Self {
                answers: Mutex::new(
                    answers
                        .into_iter()
                        .rev()
                        .map(|a| a.map(str::to_string))
                        .collect(),
                ),
            }
        }
    }

    impl TimePrompt for ScriptedPrompt {
        fn ask(&self, _message: &str) -> io::Result<Option<String>> {
            Ok(self.answers.lock().unwrap().pop().flatten())
        }
    }

    /// Notifier stub recording every notification.
    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn invalid_input(&self, _raw: &str) {
            self.events.lock().unwrap().push("invalid".to_string());
        }

        fn failure(&self) {
            self.events.lock().unwrap().push("failure".to_string());
        }

        fn success(&self, output: &Path) {
            self.events
                .lock()
                .unwrap()
                .push(format!("success {}", output.display()));
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        config: Config,
        log: EventLog,
        notifier: RecordingNotifier,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = Config {
                ffmpeg: PathBuf::from("ffmpeg"),
                output_dir: dir.path().to_path_buf(),
                log_dir: dir.path().to_path_buf(),
            };
            let log = EventLog::open(dir.path()).unwrap();
            Self {
                _dir: dir,
                config,
                log,
                notifier: RecordingNotifier::default(),
            }
        }

        fn log_dir(&self) -> &Path {
            &self.config.log_dir
        }
    }

    fn input(dropped: &str, start: Option<&str>, end: Option<&str>) -> SessionInput {
        SessionInput {
            dropped: dropped.to_string(),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            output: None,
        }
    }

    // The stubs never observe cancellation, so a receiver with a dropped
    // sender is fine here.
    fn cancel_rx() -> watch::Receiver<bool> {
        watch::channel(false).1
    }

    #[tokio::test]
    async fn invalid_extension_never_reaches_prompts_or_extractor() {
        let fx = Fixture::new();
        let extractor = StubExtractor::succeeding();
        let prompt = ScriptedPrompt::new(vec![]);
        let session = CutSession::new(
            &fx.config,
            &fx.log,
            &prompt,
            &fx.notifier,
            extractor.clone(),
        );

        let outcome = session
            .run(input("/v/clip.avi", None, None), cancel_rx())
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::InvalidInput);
        assert_eq!(outcome.exit_code(), 2);
        assert_eq!(extractor.calls(), 0);
        assert_eq!(fx.notifier.events(), vec!["invalid"]);

        let warnings = std::fs::read_to_string(fx.log_dir().join("log_warn.log")).unwrap();
        assert!(warnings.contains("file doesn't have mp4 ext."));
    }

    #[tokio::test]
    async fn cancelled_start_prompt_aborts_silently() {
        let fx = Fixture::new();
        let extractor = StubExtractor::succeeding();
        let prompt = ScriptedPrompt::new(vec![None]);
        let session = CutSession::new(
            &fx.config,
            &fx.log,
            &prompt,
            &fx.notifier,
            extractor.clone(),
        );

        let outcome = session
            .run(input("/v/clip.mp4", None, None), cancel_rx())
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(extractor.calls(), 0);
        assert!(fx.notifier.events().is_empty());
        // silent abort leaves no trace in any log stream
        for name in ["log_info.log", "log_warn.log", "log_err.log"] {
            let text = std::fs::read_to_string(fx.log_dir().join(name)).unwrap();
            assert!(text.is_empty(), "{name} should be empty");
        }
    }

    #[tokio::test]
    async fn cancelled_end_prompt_aborts_silently() {
        let fx = Fixture::new();
        let extractor = StubExtractor::succeeding();
        let prompt = ScriptedPrompt::new(vec![Some("00:00:01"), None]);
        let session = CutSession::new(
            &fx.config,
            &fx.log,
            &prompt,
            &fx.notifier,
            extractor.clone(),
        );

        let outcome = session
            .run(input("/v/clip.mp4", None, None), cancel_rx())
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert_eq!(extractor.calls(), 0);
        assert!(fx.notifier.events().is_empty());
    }

    #[tokio::test]
    async fn empty_preset_time_counts_as_cancel() {
        let fx = Fixture::new();
        let extractor = StubExtractor::succeeding();
        let prompt = ScriptedPrompt::new(vec![]);
        let session = CutSession::new(
            &fx.config,
            &fx.log,
            &prompt,
            &fx.notifier,
            extractor.clone(),
        );

        let outcome = session
            .run(
                input("/v/clip.mp4", Some("  "), Some("00:00:02")),
                cancel_rx(),
            )
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert_eq!(extractor.calls(), 0);
    }

    #[tokio::test]
    async fn successful_extraction_notifies_and_logs() {
        let fx = Fixture::new();
        let extractor = StubExtractor::succeeding();
        let prompt = ScriptedPrompt::new(vec![]);
        let session = CutSession::new(
            &fx.config,
            &fx.log,
            &prompt,
            &fx.notifier,
            extractor.clone(),
        );

        let outcome = session
            .run(
                input("file:///v/clip.mp4", Some("00:00:01"), Some("00:00:02")),
                cancel_rx(),
            )
            .await
            .unwrap();

        let SessionOutcome::Saved(output) = outcome else {
            panic!("expected Saved, got {outcome:?}");
        };

        // name matches <HH-MM_DD-MM-YY>-clip.mp4 in the output dir
        let name = output.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("-clip.mp4"), "unexpected name {name}");
        assert_eq!(name.len(), "14-05_02-01-06-clip.mp4".len());

        // the reported name is exactly what the stub received
        let job = extractor.last_job.lock().unwrap().clone().unwrap();
        assert_eq!(job.output, output);
        assert_eq!(job.input, PathBuf::from("/v/clip.mp4"));
        assert_eq!(job.start, "00:00:01");
        assert_eq!(job.end, "00:00:02");

        assert_eq!(
            fx.notifier.events(),
            vec![format!("success {}", output.display())]
        );
        let info = std::fs::read_to_string(fx.log_dir().join("log_info.log")).unwrap();
        assert!(info.contains("video saved as"));
    }

    #[tokio::test]
    async fn failed_extraction_notifies_and_logs_detail() {
        let fx = Fixture::new();
        let extractor = StubExtractor::failing();
        let prompt = ScriptedPrompt::new(vec![]);
        let session = CutSession::new(
            &fx.config,
            &fx.log,
            &prompt,
            &fx.notifier,
            extractor.clone(),
        );

        let outcome = session
            .run(
                input("/v/clip.mp4", Some("00:00:01"), Some("bogus")),
                cancel_rx(),
            )
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Failed);
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(fx.notifier.events(), vec!["failure"]);

        let errors = std::fs::read_to_string(fx.log_dir().join("log_err.log")).unwrap();
        assert!(errors.contains("error when cutting video"));
        assert!(errors.contains("stub failure"));
        let info = std::fs::read_to_string(fx.log_dir().join("log_info.log")).unwrap();
        assert!(info.is_empty());
    }

    #[tokio::test]
    async fn explicit_output_bypasses_the_namer() {
        let fx = Fixture::new();
        let extractor = StubExtractor::succeeding();
        let prompt = ScriptedPrompt::new(vec![]);
        let session = CutSession::new(
            &fx.config,
            &fx.log,
            &prompt,
            &fx.notifier,
            extractor.clone(),
        );

        let mut request = input("/v/clip.mp4", Some("00:00:01"), Some("00:00:02"));
        request.output = Some(PathBuf::from("picked.mp4"));

        let outcome = session.run(request, cancel_rx()).await.unwrap();
        assert_eq!(outcome, SessionOutcome::Saved(PathBuf::from("picked.mp4")));
    }

    #[tokio::test]
    async fn same_minute_collision_gets_a_suffix() {
        let fx = Fixture::new();
        let extractor = StubExtractor::succeeding();
        let prompt = ScriptedPrompt::new(vec![]);
        let session = CutSession::new(
            &fx.config,
            &fx.log,
            &prompt,
            &fx.notifier,
            extractor.clone(),
        );

        // pre-create the name the namer would pick for this minute
        let now = Local::now();
        let candidate = naming::timestamped_name(now, Path::new("/v/clip.mp4")).unwrap();
        std::fs::write(fx.config.output_dir.join(&candidate), b"").unwrap();

        let outcome = session
            .run(
                input("/v/clip.mp4", Some("00:00:01"), Some("00:00:02")),
                cancel_rx(),
            )
            .await
            .unwrap();

        let SessionOutcome::Saved(output) = outcome else {
            panic!("expected Saved, got {outcome:?}");
        };
        let name = output.file_name().unwrap().to_str().unwrap();
        // tolerate the clock crossing a minute between the two now() calls
        if name.starts_with(&candidate[..candidate.len() - ".mp4".len()]) {
            assert!(name.ends_with("-clip_1.mp4"), "unexpected name {name}");
        } else {
            assert!(name.ends_with("-clip.mp4"), "unexpected name {name}");
        }
    }
}
