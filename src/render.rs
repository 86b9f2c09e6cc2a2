//! Content renderers: one pure function per entry kind.
//!
//! Text renderers collapse every whitespace run (newlines included) to a
//! single space, trim the ends, and escape `& < > " '` once. Text that is
//! empty after collapsing renders to an empty fragment. Raw HTML entries are
//! passed through byte for byte.
//!
//! Escaping is applied exactly once to whatever bytes the file holds. Text
//! that is already escaped gets escaped again (`&amp;` → `&amp;amp;`); entries
//! are plain text, not HTML.
//!
//! List items are rendered as bare `<li>` elements. Wrapping them in `<ul>` is
//! the assembler's job.

use crate::types::{Content, Entry, Kind};

/// Alt text for every image entry.
pub const IMAGE_ALT: &str = "no description available";

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape the five HTML metacharacters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Collapse, then escape. `None` when nothing is left.
fn clean_text(text: &str) -> Option<String> {
    let collapsed = collapse_whitespace(text);
    if collapsed.is_empty() {
        None
    } else {
        Some(escape_html(&collapsed))
    }
}

pub fn render_heading(text: &str) -> String {
    clean_text(text)
        .map(|t| format!("<h1>{t}</h1>"))
        .unwrap_or_default()
}

pub fn render_item(text: &str) -> String {
    clean_text(text)
        .map(|t| format!("<li>{t}</li>"))
        .unwrap_or_default()
}

/// Fields of a link entry.
#[derive(Debug, Default, PartialEq)]
pub struct LinkFields<'a> {
    pub href: Option<&'a str>,
    pub text: Option<&'a str>,
}

/// Parse `KEY=value` lines. Only `HREF` and `TEXT` are kept; the first
/// occurrence of each wins. Lines without `=` are ignored.
pub fn parse_link(content: &str) -> LinkFields<'_> {
    let mut fields = LinkFields::default();
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let slot = match key.trim() {
            "HREF" => &mut fields.href,
            "TEXT" => &mut fields.text,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.trim());
        }
    }
    fields
}

/// Render a link entry as a list item holding an anchor.
///
/// Missing `TEXT` yields an empty fragment; missing `HREF` yields an empty
/// `href` attribute.
pub fn render_link(content: &str) -> String {
    let fields = parse_link(content);
    let Some(text) = fields.text.and_then(clean_text) else {
        log::debug!("link entry has no TEXT, rendering nothing");
        return String::new();
    };
    let href = escape_html(fields.href.unwrap_or_default());
    format!(r#"<li><a href="{href}" target="_blank">{text}</a></li>"#)
}

/// Render an image entry. `src` is the image path relative to the document.
pub fn render_image(src: &str) -> String {
    format!(r#"<p><img src="{src}" alt="{IMAGE_ALT}" /></p>"#)
}

/// Raw HTML goes out exactly as it was read, valid UTF-8 or not.
pub fn render_raw_html(content: &[u8]) -> Vec<u8> {
    content.to_vec()
}

/// Dispatch an entry to the renderer for its kind.
///
/// `image_src` is only consulted for image entries. Fragments are bytes
/// because raw HTML entries are not required to be UTF-8.
pub fn render_entry(entry: &Entry, image_src: &str) -> Vec<u8> {
    match (&entry.content, entry.record.kind) {
        (Content::Image, _) | (_, Kind::Image) => render_image(image_src).into_bytes(),
        (Content::Raw(bytes), _) => render_raw_html(bytes),
        (Content::Text(text), Kind::Heading) => render_heading(text).into_bytes(),
        (Content::Text(text), Kind::Item) => render_item(text).into_bytes(),
        (Content::Text(text), Kind::Link) => render_link(text).into_bytes(),
        (Content::Text(text), Kind::RawHtml) => render_raw_html(text.as_bytes()),
    }
}
