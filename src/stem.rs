//! Sequence allocation for new entry filenames.
//!
//! A stem looks like `entry-20240301-091500UTC-50`: a fixed prefix, the UTC
//! time at second resolution, and a two-digit counter. The counter starts at
//! `50` for the first entry in a given second and goes up by one for each
//! further entry sharing that timestamp. Sorting stems as strings therefore
//! sorts them by creation time, which is what the assembler orders by.
//!
//! Allocation reads the directory and returns a stem; the caller creates the
//! file. Two callers racing on the same directory within the same second can
//! get the same stem. At most 50 entries fit in one second before the counter
//! leaves two digits and breaks lexicographic order.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Literal prefix of every allocated stem.
pub const PREFIX: &str = "entry";

/// Counter assigned to the first entry within a second.
pub const FIRST_COUNTER: u32 = 50;

#[derive(Error, Debug)]
pub enum StemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Format a timestamp as `YYYYMMDD-HHMMSSUTC`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d-%H%M%SUTC").to_string()
}

/// Build a stem from its timestamp and counter.
pub fn format_stem(timestamp: &str, counter: u32) -> String {
    format!("{PREFIX}-{timestamp}-{counter:02}")
}

/// Allocate a stem for an entry created now.
pub fn allocate_stem(dir: &Path) -> Result<String, StemError> {
    allocate_stem_at(dir, Utc::now())
}

/// Allocate a stem for an entry created at `now`.
///
/// A directory that does not exist yet holds no entries, so it yields the
/// first counter.
pub fn allocate_stem_at(dir: &Path, now: DateTime<Utc>) -> Result<String, StemError> {
    let ts = timestamp(now);
    let names = if dir.is_dir() {
        fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect::<Vec<_>>()
    } else {
        Vec::new()
    };
    let counter = next_counter(names.iter().map(String::as_str), &ts);
    log::debug!("allocated counter {counter} for {ts} in {}", dir.display());
    Ok(format_stem(&ts, counter))
}

/// Next counter for `timestamp`, given the file names already present.
///
/// Saturates at `u32::MAX`; the file created under such a stem then collides
/// with the existing one and `add` refuses to overwrite it.
pub fn next_counter<'a>(names: impl IntoIterator<Item = &'a str>, timestamp: &str) -> u32 {
    names
        .into_iter()
        .filter_map(|name| parse_counter(name, timestamp))
        .max()
        .map(|max| max.saturating_add(1))
        .unwrap_or(FIRST_COUNTER)
}

/// Extract `NN` from `entry-<timestamp>-NN.<ext>` when the timestamp matches.
fn parse_counter(name: &str, timestamp: &str) -> Option<u32> {
    let rest = name
        .strip_prefix(PREFIX)?
        .strip_prefix('-')?
        .strip_prefix(timestamp)?
        .strip_prefix('-')?;
    let (digits, _ext) = rest.split_once('.')?;
    if digits.len() < 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
