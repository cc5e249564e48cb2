//! Interactive timestamp prompts
//!
//! Console stand-in for the two modal text-entry dialogs of the original
//! desktop shell. The timestamps are collected as-is; format validation is
//! left to the external tool.

use std::io::{self, BufRead, Write};

use crate::ports::TimePrompt;

/// Prompt text for the start of the range.
pub const START_PROMPT: &str = "Enter the start time (hh:mm:ss):";

/// Prompt text for the end of the range.
pub const END_PROMPT: &str = "Enter the end time (hh:mm:ss):";

/// Prompt on stdout and read one line from stdin.
///
/// EOF or a blank answer maps to `None`, the Cancel button of the dialog it
/// replaces.
pub struct StdinTimePrompt;

impl TimePrompt for StdinTimePrompt {
    fn ask(&self, message: &str) -> io::Result<Option<String>> {
        let mut out = io::stdout().lock();
        write!(out, "{} ", message)?;
        out.flush()?;

        let mut line = String::new();
        let bytes = io::stdin().lock().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }
}
