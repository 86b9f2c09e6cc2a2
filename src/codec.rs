//! Filename codec: the mapping between a path on disk and a [`Record`].
//!
//! Every journal entry is a single file whose name carries everything needed
//! to place and type it:
//!
//! ```text
//! journal/entry-20240301-091500UTC-50.h1
//! └──┬──┘ └────────────┬──────────┘ └┬┘
//! directory          title        extension → kind
//! ```
//!
//! Decoding splits on the **last** path delimiter, then splits the basename on
//! its **last** `.`. Anything that doesn't decode (no extension, unknown
//! extension, dot-file) is not an entry and is skipped by the store; journals
//! share their directory with unrelated files.
//!
//! ## Ordering
//!
//! Records sort by their full original path, compared byte-wise. The stem
//! format produced by [`crate::stem`] relies on this: timestamp first, then a
//! zero-padded counter, so lexicographic order is creation order.

use crate::types::{Kind, Record};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Decode a path into a record.
///
/// Returns `None` for paths that are not journal entries:
/// - `notes` → no extension
/// - `photo.gif` → unknown extension
/// - `.item` → empty title
/// - a basename that is not valid UTF-8
pub fn decode(path: &Path) -> Option<Record> {
    let basename = path.file_name()?.to_str()?;
    let (title, extension) = basename.rsplit_once('.')?;
    if title.is_empty() {
        return None;
    }
    let kind = Kind::from_extension(extension)?;
    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Some(Record {
        directory,
        title: title.to_string(),
        extension: extension.to_string(),
        kind,
    })
}

/// Rebuild the on-disk path of a record. Inverse of [`decode`].
pub fn encode(record: &Record) -> PathBuf {
    record
        .directory
        .join(format!("{}.{}", record.title, record.extension))
}

/// Byte-wise comparison of two paths.
///
/// `Path`'s own `Ord` compares component by component, which disagrees with
/// plain byte order when a name contains characters below `/` (e.g. `-`).
pub fn path_order(a: &Path, b: &Path) -> Ordering {
    a.as_os_str()
        .as_encoded_bytes()
        .cmp(b.as_os_str().as_encoded_bytes())
}

/// Byte-wise comparison of two records by their encoded paths.
pub fn record_order(a: &Record, b: &Record) -> Ordering {
    path_order(&encode(a), &encode(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(path: &str) -> Record {
        decode(Path::new(path)).unwrap_or_else(|| panic!("'{path}' should decode"))
    }

    #[test]
    fn heading_with_directory() {
        let r = decoded("journal/entry-20240301-091500UTC-50.h1");
        assert_eq!(r.directory, Path::new("journal"));
        assert_eq!(r.title, "entry-20240301-091500UTC-50");
        assert_eq!(r.extension, "h1");
        assert_eq!(r.kind, Kind::Heading);
    }

    #[test]
    fn every_known_extension() {
        assert_eq!(decoded("a.h1").kind, Kind::Heading);
        assert_eq!(decoded("a.item").kind, Kind::Item);
        assert_eq!(decoded("a.link").kind, Kind::Link);
        assert_eq!(decoded("a.png").kind, Kind::Image);
        assert_eq!(decoded("a.jpg").kind, Kind::Image);
        assert_eq!(decoded("a.code").kind, Kind::RawHtml);
    }

    #[test]
    fn no_extension_is_skipped() {
        assert_eq!(decode(Path::new("journal/README")), None);
    }

    #[test]
    fn unknown_extension_is_skipped() {
        assert_eq!(decode(Path::new("journal/index.html")), None);
        assert_eq!(decode(Path::new("journal/photo.gif")), None);
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert_eq!(decode(Path::new("photo.PNG")), None);
    }

    #[test]
    fn dot_file_is_skipped() {
        assert_eq!(decode(Path::new("journal/.item")), None);
    }

    #[test]
    fn splits_on_last_dot() {
        let r = decoded("journal/v1.2 release notes.item");
        assert_eq!(r.title, "v1.2 release notes");
        assert_eq!(r.extension, "item");
    }

    #[test]
    fn bare_basename_has_empty_directory() {
        let r = decoded("today.item");
        assert_eq!(r.directory, PathBuf::new());
        assert_eq!(encode(&r), PathBuf::from("today.item"));
    }

    #[test]
    fn titles_round_trip() {
        let titles = [
            "entry-20240301-091500UTC-50",
            "plain",
            "with spaces  and\ttabs",
            "unicode ✓ café",
            "quotes \"and\" 'apostrophes' & <angles>",
            "trailing-dash-",
            "many...dots",
        ];
        for title in titles {
            for ext in ["h1", "item", "link", "png", "jpg", "code"] {
                let path = PathBuf::from("some/nested/dir").join(format!("{title}.{ext}"));
                let r = decode(&path).unwrap();
                assert_eq!(r.title, title);
                assert_eq!(encode(&r), path);
            }
        }
    }

    #[test]
    fn path_order_is_byte_wise() {
        // Component order would put `a/b` first; byte order puts `-` (0x2d)
        // before `/` (0x2f).
        let a = Path::new("a/b.item");
        let b = Path::new("a-b/c.item");
        assert_eq!(path_order(b, a), Ordering::Less);
    }

    #[test]
    fn record_order_follows_stems() {
        let first = decoded("j/entry-20240301-091500UTC-50.item");
        let second = decoded("j/entry-20240301-091500UTC-51.h1");
        let third = decoded("j/entry-20240301-091501UTC-50.code");
        assert_eq!(record_order(&first, &second), Ordering::Less);
        assert_eq!(record_order(&second, &third), Ordering::Less);
    }
}
