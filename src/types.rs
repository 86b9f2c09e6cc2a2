//! Shared types used across the store, renderers, and assembler.
//!
//! A [`Record`] is what the filename codec recovers from a single path on
//! disk. It carries no content; the store reads payloads separately so that
//! decoding stays a pure function of the path.

use serde::Serialize;
use std::path::PathBuf;

/// The kind of a journal entry, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    Heading,
    Item,
    Link,
    Image,
    RawHtml,
}

impl Kind {
    /// Map a file extension to a kind. Matching is case-sensitive.
    ///
    /// | extension | kind |
    /// |-----------|------|
    /// | `h1` | heading |
    /// | `item` | item |
    /// | `link` | link |
    /// | `png`, `jpg` | image |
    /// | `code` | rawHtml |
    pub fn from_extension(ext: &str) -> Option<Kind> {
        match ext {
            "h1" => Some(Kind::Heading),
            "item" => Some(Kind::Item),
            "link" => Some(Kind::Link),
            "png" | "jpg" => Some(Kind::Image),
            "code" => Some(Kind::RawHtml),
            _ => None,
        }
    }

    /// Canonical extension used when creating a new entry of this kind.
    ///
    /// Images have two valid extensions; `png` is the default.
    pub fn default_extension(self) -> &'static str {
        match self {
            Kind::Heading => "h1",
            Kind::Item => "item",
            Kind::Link => "link",
            Kind::Image => "png",
            Kind::RawHtml => "code",
        }
    }

    /// Items and links are grouped into a shared list container.
    pub fn is_list_item(self) -> bool {
        matches!(self, Kind::Item | Kind::Link)
    }

    pub fn label(self) -> &'static str {
        match self {
            Kind::Heading => "heading",
            Kind::Item => "item",
            Kind::Link => "link",
            Kind::Image => "image",
            Kind::RawHtml => "rawHtml",
        }
    }
}

/// A decoded entry: where it lives, what it is called, and what it is.
///
/// `directory.join(format!("{title}.{extension}"))` is exactly the path the
/// record was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub directory: PathBuf,
    pub title: String,
    /// Extension as found on disk (`png` and `jpg` both decode to `Image`).
    pub extension: String,
    pub kind: Kind,
}

/// Payload of a record as read by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Decoded text of a heading, item, or link entry.
    Text(String),
    /// Raw HTML entries, kept as the exact bytes on disk.
    Raw(Vec<u8>),
    /// Image entries are referenced by path; their bytes are never read.
    Image,
}

/// A record paired with its payload, ready for rendering.
#[derive(Debug, Clone)]
pub struct Entry {
    pub record: Record,
    pub content: Content,
}
