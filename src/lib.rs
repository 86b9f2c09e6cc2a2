//! # daybook
//!
//! A personal journal kept as a flat directory of small files, assembled on
//! demand into a single HTML page.
//!
//! Every entry is one file. Its name says when it was written and its
//! extension says what it is:
//!
//! ```text
//! journal/
//! ├── entry-20240301-091500UTC-50.h1     # heading
//! ├── entry-20240301-091500UTC-51.item   # list item
//! ├── entry-20240301-091502UTC-50.link   # HREF=… / TEXT=…
//! ├── entry-20240301-093000UTC-50.png    # screenshot
//! ├── entry-20240301-100000UTC-50.code   # raw HTML, inserted verbatim
//! └── index.html                         # assembled document
//! ```
//!
//! # Pipeline
//!
//! ```text
//! 1. Allocate  journal/  →  stem            (next free name for a new entry)
//! 2. Decode    journal/  →  Vec<Record>     (paths → typed, ordered records)
//! 3. Assemble  records   →  index.html      (render + group list items)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`stem`] | Allocates `entry-<timestamp>-NN` stems that sort in creation order |
//! | [`codec`] | Pure path ⇄ [`types::Record`] mapping and byte-wise ordering |
//! | [`store`] | Directory scan: the record repository |
//! | [`render`] | One HTML renderer per entry kind |
//! | [`assemble`] | List-grouping state machine and document writer |
//! | [`add`] | Creates a new entry file under a fresh stem |
//! | [`config`] | `config.toml` loading and journal directory resolution |
//! | [`notify`] | Desktop notification after a build |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Shared types (`Kind`, `Record`, `Entry`) |
//!
//! # Design Decisions
//!
//! ## The Filesystem Is the Database
//!
//! There is no index file and no metadata store. The directory listing is the
//! whole state; renaming or deleting a file is how you edit the journal. The
//! decoding rules live in [`codec`] as pure functions so they can be tested
//! without touching the disk, and [`store`] is the only module that walks it.
//!
//! ## Names Sort in Creation Order
//!
//! Entries are ordered by their full path compared byte-wise. Stems put the
//! UTC timestamp first and a zero-padded counter second, so plain string order
//! is creation order. Any change to the stem format has to keep that true.
//!
//! ## No Locking
//!
//! Allocating a stem and creating the file are separate steps. Two processes
//! adding entries to the same journal in the same second can pick the same
//! stem; [`add`] opens files with `create_new` so the loser fails rather than
//! overwriting. This is a single-user tool and nothing stronger is attempted.

pub mod add;
pub mod assemble;
pub mod codec;
pub mod config;
pub mod notify;
pub mod output;
pub mod render;
pub mod stem;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
