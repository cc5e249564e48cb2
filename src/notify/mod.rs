//! User-facing result notifications
//!
//! Console stand-ins for the modal result dialogs of the original desktop
//! shell. Messages keep the original wording.

use std::path::Path;

use crate::ports::Notifier;

/// Notifier writing to stdout (success) and stderr (errors).
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn invalid_input(&self, _raw: &str) {
        eprintln!("Only MP4 files are allowed");
    }

    fn failure(&self) {
        eprintln!("Error when cutting video");
    }

    fn success(&self, output: &Path) {
        println!("Video saved as: {}", output.display());
    }
}
