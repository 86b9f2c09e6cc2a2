//! Record repository backed by a directory scan.
//!
//! The journal directory is the database. [`list_records`] walks it, hands
//! each file path to the [`codec`](crate::codec), keeps what decodes, and
//! returns records in byte-wise path order. Traversal only produces paths;
//! whether a path is an entry is the codec's decision alone.
//!
//! ```text
//! journal/
//! ├── index.html                         # ignored (unknown extension)
//! ├── notes.txt                          # ignored
//! ├── entry-20240301-091500UTC-50.h1     # heading
//! ├── entry-20240301-091500UTC-51.item   # item
//! ├── entry-20240301-091502UTC-50.link   # link
//! └── trip/
//!     └── entry-20240302-120000UTC-50.jpg  # image (nested dirs are walked)
//! ```

use crate::codec;
use crate::types::{Content, Entry, Kind, Record};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// All file paths under `root`, unsorted. Hidden directories are not entered.
///
/// Only a failure on `root` itself is an error. Anything below it that cannot
/// be visited (dangling symlinks, link loops, unreadable subdirectories) is
/// skipped like any other non-entry.
fn collect_files(root: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden_dir(e));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(StoreError::Walk {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                log::debug!("skipping unreadable path: {err}");
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_hidden_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
}

/// List every entry under `root`, ordered by full path (byte-wise).
pub fn list_records(root: &Path) -> Result<Vec<Record>, StoreError> {
    let mut paths = collect_files(root)?;
    paths.sort_by(|a, b| codec::path_order(a, b));

    let records: Vec<Record> = paths
        .iter()
        .filter_map(|path| {
            let record = codec::decode(path);
            if record.is_none() {
                log::debug!("skipping {}: not a journal entry", path.display());
            }
            record
        })
        .collect();

    log::debug!(
        "found {} entries among {} files in {}",
        records.len(),
        paths.len(),
        root.display()
    );
    Ok(records)
}

/// Read the payload of a record. Image bytes are never loaded; raw HTML is
/// kept as-is and everything else is decoded as (lossy) UTF-8.
pub fn read_content(record: &Record) -> Result<Content, StoreError> {
    match record.kind {
        Kind::Image => Ok(Content::Image),
        Kind::RawHtml => Ok(Content::Raw(fs::read(codec::encode(record))?)),
        _ => {
            let bytes = fs::read(codec::encode(record))?;
            Ok(Content::Text(String::from_utf8_lossy(&bytes).into_owned()))
        }
    }
}

/// List and read every entry under `root`.
pub fn load_entries(root: &Path) -> Result<Vec<Entry>, StoreError> {
    list_records(root)?
        .into_iter()
        .map(|record| {
            let content = read_content(&record)?;
            Ok(Entry { record, content })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn empty_directory_has_no_records() {
        let tmp = TempDir::new().unwrap();
        assert!(list_records(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn unrelated_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "README", "");
        write_entry(tmp.path(), "index.html", "<html></html>");
        write_entry(tmp.path(), "notes.txt", "");
        write_entry(tmp.path(), ".item", "");
        write_entry(tmp.path(), "entry-20240301-091500UTC-50.item", "kept");

        let records = list_records(tmp.path()).unwrap();
        assert_eq!(titles(&records), vec!["entry-20240301-091500UTC-50"]);
    }

    #[test]
    fn records_sorted_by_path() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "entry-20240301-091501UTC-50.h1", "");
        write_entry(tmp.path(), "entry-20240301-091500UTC-51.item", "");
        write_entry(tmp.path(), "entry-20240301-091500UTC-50.link", "");

        let records = list_records(tmp.path()).unwrap();
        assert_eq!(
            titles(&records),
            vec![
                "entry-20240301-091500UTC-50",
                "entry-20240301-091500UTC-51",
                "entry-20240301-091501UTC-50",
            ]
        );
        assert_eq!(kinds(&records), vec![Kind::Link, Kind::Item, Kind::Heading]);
    }

    #[test]
    fn nested_directories_are_walked() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "a.item", "");
        write_entry(tmp.path(), "trip/b.jpg", "");

        let records = list_records(tmp.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].directory, tmp.path().join("trip"));
        assert_eq!(records[1].kind, Kind::Image);
    }

    #[test]
    fn hidden_directories_are_not_entered() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), ".git/objects.item", "");
        write_entry(tmp.path(), "a.item", "");

        let records = list_records(tmp.path()).unwrap();
        assert_eq!(titles(&records), vec!["a"]);
    }

    #[test]
    fn read_text_content() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "a.h1", "Title\n");

        let entries = load_entries(tmp.path()).unwrap();
        assert_eq!(entries[0].content, Content::Text("Title\n".to_string()));
    }

    #[test]
    fn image_content_is_not_read() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.png"), [0x89, 0x50, 0x4e, 0x47, 0xff]).unwrap();

        let entries = load_entries(tmp.path()).unwrap();
        assert_eq!(entries[0].content, Content::Image);
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.item"), [b'o', b'k', 0xff]).unwrap();

        let entries = load_entries(tmp.path()).unwrap();
        assert_eq!(entries[0].content, Content::Text("ok\u{fffd}".to_string()));
    }

    #[test]
    fn raw_html_keeps_exact_bytes() {
        let tmp = TempDir::new().unwrap();
        let raw = b"<p>\xe9</p>\n".to_vec();
        std::fs::write(tmp.path().join("a.code"), &raw).unwrap();

        let entries = load_entries(tmp.path()).unwrap();
        assert_eq!(entries[0].content, Content::Raw(raw));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "a.item", "kept");
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("stale-link.txt"))
            .unwrap();

        let records = list_records(tmp.path()).unwrap();
        assert_eq!(titles(&records), vec!["a"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "trip/b.item", "kept");
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("trip").join("back")).unwrap();

        let records = list_records(tmp.path()).unwrap();
        assert_eq!(titles(&records), vec!["b"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = list_records(&tmp.path().join("nowhere"));
        assert!(matches!(result, Err(StoreError::Walk { .. })));
    }
}
