//! Output file naming
//!
//! Generated names carry an hour-minute/day-month-year prefix, so they are
//! unique only down to the minute. [`disambiguate`] resolves the same-minute
//! collision instead of silently overwriting the earlier clip.
//!
//! The clock instant is always passed in by the caller, never sampled here,
//! which keeps the naming deterministic under test.

use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::{CutError, CutResult};

/// Timestamp layout used in every generated name, at minute granularity.
const NAME_TIMESTAMP_FORMAT: &str = "%H-%M_%d-%m-%y";

/// Build `<HH-MM_DD-MM-YY>-<basename>` for the given instant, preserving the
/// input's own extension.
pub fn timestamped_name(now: DateTime<Local>, input: &Path) -> CutResult<String> {
    let base = input
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CutError::BadBaseName {
            path: input.display().to_string(),
        })?;

    Ok(format!("{}-{}", now.format(NAME_TIMESTAMP_FORMAT), base))
}

/// Generic fallback name, `output_<HH-MM_DD-MM-YY>.mp4`, for inputs whose
/// base name cannot be derived.
pub fn fallback_name(now: DateTime<Local>) -> String {
    format!("output_{}.mp4", now.format(NAME_TIMESTAMP_FORMAT))
}

/// Resolve a same-minute name collision against the contents of `dir`.
///
/// If `candidate` is free it is returned unchanged; otherwise `_1`, `_2`, …
/// is inserted before the extension until a free name is found.
pub fn disambiguate(dir: &Path, candidate: &str) -> String {
    if !dir.join(candidate).exists() {
        return candidate.to_string();
    }

    let (stem, ext) = match candidate.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (candidate, None),
    };

    let mut n = 1u32;
    loop {
        let alternative = match ext {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        };
        if !dir.join(&alternative).exists() {
            return alternative;
        }
        n += 1;
    }
}
