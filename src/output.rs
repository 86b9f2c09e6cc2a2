//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Entries in /home/me/journal
//! 001 heading  entry-20240301-091500UTC-50
//! 002 item     entry-20240301-091500UTC-51
//! 003 image    trip/entry-20240302-120000UTC-50
//!
//! 3 entries
//! ```
//!
//! ## Build
//!
//! ```text
//! Wrote /home/me/journal/index.html (3 entries)
//! ```

use crate::assemble::Assembly;
use crate::types::Record;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn entry_count(n: usize) -> String {
    if n == 1 {
        "1 entry".to_string()
    } else {
        format!("{n} entries")
    }
}

/// Record title with its directory relative to `root`, `/`-separated.
fn display_name(record: &Record, root: &Path) -> String {
    let rel = record.directory.strip_prefix(root).unwrap_or(record.directory.as_path());
    let mut parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.push(record.title.clone());
    parts.join("/")
}

/// Format the decoded record listing for `check`.
pub fn format_check_output(records: &[Record], root: &Path) -> Vec<String> {
    let mut lines = vec![format!("Entries in {}", root.display())];
    for (i, record) in records.iter().enumerate() {
        lines.push(format!(
            "{} {:<8} {}",
            format_index(i + 1),
            record.kind.label(),
            display_name(record, root)
        ));
    }
    lines.push(String::new());
    lines.push(entry_count(records.len()));
    lines
}

pub fn print_check_output(records: &[Record], root: &Path) {
    for line in format_check_output(records, root) {
        println!("{}", line);
    }
}

/// One-line confirmation after a successful build. Also used as the
/// notification body.
pub fn build_message(assembly: &Assembly) -> String {
    format!(
        "Wrote {} ({})",
        assembly.output.display(),
        entry_count(assembly.records.len())
    )
}
