//! Creating new entries.
//!
//! Allocates a stem in the journal directory and writes the entry file under
//! it. The file is opened with `create_new`, so if another process allocated
//! the same stem in the same second the write fails instead of overwriting
//! the other entry.

use crate::stem::{self, StemError};
use crate::types::Kind;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Stem(#[from] StemError),
    #[error("Image entries need a source file (--from)")]
    MissingImage,
    #[error("Unsupported image {0}: expected a .png or .jpg file")]
    UnsupportedImage(PathBuf),
}

/// Where the payload of a new entry comes from.
#[derive(Debug, Clone)]
pub enum EntrySource {
    Text(String),
    File(PathBuf),
    /// Read from standard input, only once the kind is known to take text.
    Stdin,
}

/// Create a new entry of `kind` in `dir`, stamped with the current time.
pub fn add_entry(dir: &Path, kind: Kind, source: &EntrySource) -> Result<PathBuf, AddError> {
    add_entry_at(dir, kind, source, Utc::now())
}

/// Create a new entry of `kind` in `dir`, stamped with `now`.
pub fn add_entry_at(
    dir: &Path,
    kind: Kind,
    source: &EntrySource,
    now: DateTime<Utc>,
) -> Result<PathBuf, AddError> {
    let (extension, bytes) = match (kind, source) {
        (Kind::Image, EntrySource::File(from)) => (image_extension(from)?, fs::read(from)?),
        (Kind::Image, _) => return Err(AddError::MissingImage),
        (_, EntrySource::File(from)) => (kind.default_extension(), fs::read(from)?),
        (_, EntrySource::Text(text)) => (kind.default_extension(), text.clone().into_bytes()),
        (_, EntrySource::Stdin) => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            (kind.default_extension(), bytes)
        }
    };

    fs::create_dir_all(dir)?;
    let stem = stem::allocate_stem_at(dir, now)?;
    let path = dir.join(format!("{stem}.{extension}"));
    let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
    file.write_all(&bytes)?;

    log::info!("created {}", path.display());
    Ok(path)
}

/// `png` or `jpg`, taken from the source file name.
fn image_extension(from: &Path) -> Result<&'static str, AddError> {
    let ext = from
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("png"),
        "jpg" | "jpeg" => Ok("jpg"),
        _ => Err(AddError::UnsupportedImage(from.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn text_entry_is_written_under_new_stem() {
        let tmp = TempDir::new().unwrap();
        let path = add_entry_at(
            tmp.path(),
            Kind::Heading,
            &EntrySource::Text("Friday".into()),
            noon(),
        )
        .unwrap();
        assert_eq!(path, tmp.path().join("entry-20240301-120000UTC-50.h1"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Friday");
    }

    #[test]
    fn entries_in_same_second_get_consecutive_counters() {
        let tmp = TempDir::new().unwrap();
        let text = EntrySource::Text("x".into());
        let a = add_entry_at(tmp.path(), Kind::Item, &text, noon()).unwrap();
        let b = add_entry_at(tmp.path(), Kind::Link, &text, noon()).unwrap();
        assert!(a.to_string_lossy().ends_with("-50.item"));
        assert!(b.to_string_lossy().ends_with("-51.link"));

        let records = store::list_records(tmp.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, Kind::Item);
        assert_eq!(records[1].kind, Kind::Link);
    }

    #[test]
    fn image_keeps_source_extension() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("shot.JPEG");
        fs::write(&src, [0xff, 0xd8]).unwrap();
        let journal = tmp.path().join("journal");

        let path =
            add_entry_at(&journal, Kind::Image, &EntrySource::File(src), noon()).unwrap();
        assert_eq!(path, journal.join("entry-20240301-120000UTC-50.jpg"));
        assert_eq!(fs::read(path).unwrap(), vec![0xff, 0xd8]);
    }

    #[test]
    fn image_requires_file() {
        let tmp = TempDir::new().unwrap();
        let result = add_entry_at(
            tmp.path(),
            Kind::Image,
            &EntrySource::Text("not an image".into()),
            noon(),
        );
        assert!(matches!(result, Err(AddError::MissingImage)));
    }

    #[test]
    fn image_from_stdin_is_rejected_before_reading() {
        let tmp = TempDir::new().unwrap();
        let result = add_entry_at(tmp.path(), Kind::Image, &EntrySource::Stdin, noon());
        assert!(matches!(result, Err(AddError::MissingImage)));
        assert!(store::list_records(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn unsupported_image_rejected() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("anim.gif");
        fs::write(&src, "GIF89a").unwrap();
        let result = add_entry_at(tmp.path(), Kind::Image, &EntrySource::File(src), noon());
        assert!(matches!(result, Err(AddError::UnsupportedImage(_))));
    }
}
