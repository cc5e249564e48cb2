//! Dropped-path validation
//!
//! The input path arrives the way a drag-and-drop payload would deliver it:
//! possibly wrapped in a `file://` scheme and surrounded by whitespace from
//! the URI-list terminator.

use std::path::{Path, PathBuf};

use crate::error::{CutError, CutResult};

/// The one extension this tool accepts. Matching is case-sensitive, so
/// `.MP4` is rejected; widening this would be a behavior change, not a fix.
pub const MP4_EXTENSION: &str = "mp4";

/// Clean a raw dropped-file string and require the `.mp4` extension.
///
/// Strips a leading `file://` scheme and surrounding whitespace, then checks
/// the extension. Pure string work; the filesystem is never touched.
pub fn clean_dropped_path(raw: &str) -> CutResult<PathBuf> {
    let trimmed = raw.trim();
    let cleaned = trimmed.strip_prefix("file://").unwrap_or(trimmed).trim();

    let path = Path::new(cleaned);
    match path.extension() {
        Some(ext) if ext == MP4_EXTENSION => Ok(path.to_path_buf()),
        _ => Err(CutError::NotAnMp4 {
            path: cleaned.to_string(),
        }),
    }
}
