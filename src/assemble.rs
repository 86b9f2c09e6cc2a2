//! Document assembly.
//!
//! Reads every entry in a journal directory, renders each one, and writes a
//! single `index.html` next to them.
//!
//! ## List Grouping
//!
//! Items and links are list elements; every other kind is a standalone block.
//! A run of adjacent list elements (in sorted order) shares one `<ul>`:
//!
//! ```text
//! item, item, heading, link
//! → <ul><li>…</li><li>…</li></ul><h1>…</h1><ul><li><a …>…</a></li></ul>
//! ```
//!
//! Grouping is a two-state machine ([`ListState`]) folded over the records in
//! a single pass. It never looks ahead and never merges runs separated by a
//! standalone block.
//!
//! ## Failure
//!
//! A document whose body renders to nothing is an error
//! ([`AssembleError::EmptyDocument`]) and nothing is written. The output is
//! written to a temporary file and renamed into place, so a failed write never
//! leaves a half-written `index.html` behind.

use crate::codec;
use crate::render;
use crate::store::{self, StoreError};
use crate::types::{Entry, Kind, Record};
use maud::{DOCTYPE, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the assembled document inside the journal directory.
pub const OUTPUT_FILE: &str = "index.html";

const LIST_OPEN: &str = "<ul>";
const LIST_CLOSE: &str = "</ul>";

/// Marker the rendered body replaces inside the document shell.
const BODY_SLOT: &str = "<!--daybook:body-->";

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Nothing to show: no entries rendered in {0}")]
    EmptyDocument(PathBuf),
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether the fold is currently inside a `<ul>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Outside,
    Inside,
}

/// Tag emitted on a list state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTag {
    Open,
    Close,
}

impl ListTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ListTag::Open => LIST_OPEN,
            ListTag::Close => LIST_CLOSE,
        }
    }
}

impl ListState {
    /// Transition on the next record's kind. The returned tag, if any, goes
    /// before that record's fragment.
    pub fn step(self, kind: Kind) -> (ListState, Option<ListTag>) {
        match (self, kind.is_list_item()) {
            (ListState::Outside, true) => (ListState::Inside, Some(ListTag::Open)),
            (ListState::Inside, false) => (ListState::Outside, Some(ListTag::Close)),
            (state, _) => (state, None),
        }
    }

    /// Tag needed after the last record.
    pub fn finish(self) -> Option<ListTag> {
        match self {
            ListState::Inside => Some(ListTag::Close),
            ListState::Outside => None,
        }
    }
}

/// Settings for a single assembly run.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Contents of the document's `<title>`.
    pub title: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            title: "Journal".to_string(),
        }
    }
}

/// Result of a successful assembly.
#[derive(Debug)]
pub struct Assembly {
    /// Path of the written document.
    pub output: PathBuf,
    /// Entries that went into the document, in order.
    pub records: Vec<Record>,
}

/// Image `src` for a record: its path relative to `root`, `/`-separated.
fn image_src(root: &Path, record: &Record) -> String {
    let path = codec::encode(record);
    let rel = path.strip_prefix(root).unwrap_or(path.as_path());
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Render sorted entries into the document body.
///
/// `None` when no entry produced anything visible; list tags around blank
/// items do not count.
pub fn render_body(entries: &[Entry], root: &Path) -> Option<Vec<u8>> {
    let (state, mut body, shown) = entries.iter().fold(
        (ListState::Outside, Vec::new(), false),
        |(state, mut body, shown), entry| {
            let (next, tag) = state.step(entry.record.kind);
            if let Some(tag) = tag {
                body.extend_from_slice(tag.as_str().as_bytes());
            }
            let src = image_src(root, &entry.record);
            let fragment = render::render_entry(entry, &src);
            let visible = fragment.iter().any(|b| !b.is_ascii_whitespace());
            body.extend_from_slice(&fragment);
            (next, body, shown || visible)
        },
    );
    if let Some(tag) = state.finish() {
        body.extend_from_slice(tag.as_str().as_bytes());
    }
    shown.then_some(body)
}

/// Wrap a rendered body in a minimal HTML document.
///
/// The shell is built with maud; the body is spliced in as bytes at
/// [`BODY_SLOT`].
fn base_document(title: &str, body: &[u8]) -> Vec<u8> {
    let shell = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                (PreEscaped(BODY_SLOT))
            }
        }
    }
    .into_string();
    let (before, after) = shell.split_once(BODY_SLOT).unwrap_or((shell.as_str(), ""));
    let mut document = Vec::with_capacity(shell.len() + body.len());
    document.extend_from_slice(before.as_bytes());
    document.extend_from_slice(body);
    document.extend_from_slice(after.as_bytes());
    document
}

/// Write `contents` to `path` through a sibling temporary file.
fn write_replacing(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("html.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}

/// Assemble every entry in `dir` into `dir/index.html`.
///
/// The directory is created if missing. Fails with
/// [`AssembleError::EmptyDocument`] (and writes nothing) when no entry renders
/// any output.
pub fn assemble(dir: &Path, options: &AssembleOptions) -> Result<Assembly, AssembleError> {
    fs::create_dir_all(dir).map_err(|source| AssembleError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let entries = store::load_entries(dir)?;
    let body = render_body(&entries, dir)
        .ok_or_else(|| AssembleError::EmptyDocument(dir.to_path_buf()))?;

    let document = base_document(&options.title, &body);
    let output = dir.join(OUTPUT_FILE);
    write_replacing(&output, &document).map_err(|source| AssembleError::Write {
        path: output.clone(),
        source,
    })?;
    log::info!("wrote {} ({} entries)", output.display(), entries.len());

    Ok(Assembly {
        output,
        records: entries.into_iter().map(|e| e.record).collect(),
    })
}

// ============================================================================
// Tests
// ============================================================================
