//! Shared test utilities for the daybook test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_entry(tmp.path(), "entry-20240301-091500UTC-50.h1", "Monday");
//! let records = list_records(tmp.path()).unwrap();
//! assert_eq!(titles(&records), vec!["entry-20240301-091500UTC-50"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::types::{Content, Entry, Kind, Record};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a file under `dir`, creating parent directories as needed.
pub fn write_entry(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Build an in-memory entry from a file name and text. Panics if the name
/// does not decode.
pub fn entry(name: &str, text: &str) -> Entry {
    let record = codec::decode(Path::new(name))
        .unwrap_or_else(|| panic!("'{name}' is not a journal entry name"));
    let content = match record.kind {
        Kind::Image => Content::Image,
        Kind::RawHtml => Content::Raw(text.as_bytes().to_vec()),
        _ => Content::Text(text.to_string()),
    };
    Entry { record, content }
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn titles(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

pub fn kinds(records: &[Record]) -> Vec<Kind> {
    records.iter().map(|r| r.kind).collect()
}
