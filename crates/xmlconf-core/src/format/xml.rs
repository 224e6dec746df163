//! XML codec for the settings document.
//!
//! Document shape:
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <Settings>
//!   <FullScreen>1</FullScreen>
//!   <FontSize>14</FontSize>
//! </Settings>
//! ```
//! Each direct child of the root is one setting: the tag name is the key,
//! the text content is the value.  The root name is written as `Settings`
//! but any root name is accepted when parsing.
//!
//! Parsing rules:
//! - A leading UTF-8 byte-order mark is skipped.
//! - A value is the concatenation of all text and CDATA beneath the child,
//!   nested descendants included, with entities unescaped.
//! - A leaf setting keeps its text verbatim, whitespace-only text included.
//!   In a setting with nested elements, whitespace-only text nodes are
//!   layout and dropped.
//! - Text directly under the root (between settings) is ignored.
//! - Duplicate children are all returned, in document order.

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};

use crate::error::{Result, StoreError};
use crate::store::Settings;

/// Name of the root element written by [`render_document`].
pub const ROOT_ELEMENT: &str = "Settings";

/// Indentation used by [`render_document`] for each nesting level.
const INDENT_SIZE: usize = 2;

/// Parses a settings document into `(key, value)` pairs in document order.
///
/// # Errors
///
/// Returns [`StoreError::Xml`] for syntax errors reported by the reader and
/// [`StoreError::Malformed`] when the document has no root element, more
/// than one root element, text outside the root, or unclosed elements.
///
/// # Examples
///
/// ```rust
/// use xmlconf_core::format::xml::parse_document;
///
/// let entries = parse_document("<Settings><FontSize>14</FontSize></Settings>").unwrap();
/// assert_eq!(entries, vec![("FontSize".to_string(), "14".to_string())]);
/// ```
pub fn parse_document(text: &str) -> Result<Vec<(String, String)>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = Reader::from_str(text);

    let mut entries = Vec::new();
    let mut depth: usize = 0;
    let mut seen_root = false;
    let mut current: Option<PendingEntry> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                match depth {
                    0 => enter_root(&mut seen_root)?,
                    1 => current = Some(PendingEntry::new(element_name(reader.decoder(), e.name())?)),
                    _ => mark_nested(&mut current),
                }
                depth += 1;
            }
            Event::Empty(e) => match depth {
                0 => enter_root(&mut seen_root)?,
                1 => entries.push((element_name(reader.decoder(), e.name())?, String::new())),
                _ => mark_nested(&mut current),
            },
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 1 {
                    if let Some(entry) = current.take() {
                        entries.push(entry.finish());
                    }
                }
            }
            Event::Text(e) => {
                let content = e.unescape()?;
                let blank = content.trim().is_empty();
                match depth {
                    0 if !blank => {
                        return Err(StoreError::Malformed(
                            "text content outside the root element".to_string(),
                        ))
                    }
                    0 | 1 => {}
                    _ => {
                        if let Some(entry) = current.as_mut() {
                            entry.push_text(&content, blank);
                        }
                    }
                }
            }
            Event::CData(e) => {
                let content = e.decode().map_err(quick_xml::Error::from)?;
                match depth {
                    0 => {
                        return Err(StoreError::Malformed(
                            "CDATA outside the root element".to_string(),
                        ))
                    }
                    1 => {}
                    _ => {
                        if let Some(entry) = current.as_mut() {
                            entry.push_text(&content, false);
                        }
                    }
                }
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, DOCTYPE.
            _ => {}
        }
    }

    if depth != 0 {
        return Err(StoreError::Malformed(format!(
            "document ended with {depth} unclosed element(s)"
        )));
    }
    if !seen_root {
        return Err(StoreError::Malformed(
            "document has no root element".to_string(),
        ));
    }

    Ok(entries)
}

fn element_name(decoder: Decoder, name: QName<'_>) -> Result<String> {
    let name = decoder
        .decode(name.as_ref())
        .map_err(quick_xml::Error::from)?;
    Ok(name.into_owned())
}

/// A setting element whose end tag has not been read yet.
struct PendingEntry {
    key: String,
    /// Every text node, whitespace-only ones included.
    raw: String,
    /// Text nodes that are not whitespace-only.
    significant: String,
    nested: bool,
}

impl PendingEntry {
    fn new(key: String) -> Self {
        Self {
            key,
            raw: String::new(),
            significant: String::new(),
            nested: false,
        }
    }

    fn push_text(&mut self, text: &str, blank: bool) {
        self.raw.push_str(text);
        if !blank {
            self.significant.push_str(text);
        }
    }

    fn finish(self) -> (String, String) {
        let value = if self.nested { self.significant } else { self.raw };
        (self.key, value)
    }
}

fn mark_nested(current: &mut Option<PendingEntry>) {
    if let Some(entry) = current.as_mut() {
        entry.nested = true;
    }
}

fn enter_root(seen_root: &mut bool) -> Result<()> {
    if *seen_root {
        return Err(StoreError::Malformed(
            "document has more than one root element".to_string(),
        ));
    }
    *seen_root = true;
    Ok(())
}

/// Renders `settings` as a complete XML document, children in map order.
///
/// # Errors
///
/// Returns [`StoreError::InvalidElementName`] if any key cannot be used as
/// an element name.  Nothing is rendered in that case.
pub fn render_document(settings: &Settings) -> Result<String> {
    if let Some(bad) = settings.keys().find(|key| !is_valid_element_name(key)) {
        return Err(StoreError::InvalidElementName(bad.clone()));
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(quick_xml::Error::from)?;

    let root = writer.create_element(ROOT_ELEMENT);
    if settings.is_empty() {
        root.write_empty().map_err(quick_xml::Error::from)?;
    } else {
        root.write_inner_content(|w| {
            for (key, value) in settings {
                w.create_element(key.as_str())
                    .write_text_content(BytesText::new(value))?;
            }
            Ok(())
        })
        .map_err(quick_xml::Error::from)?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| StoreError::Malformed(e.to_string()))
}

/// Returns `true` if `name` can be written as an unprefixed XML element name.
///
/// The first character must be a letter or `_`; the rest may also contain
/// digits, `-` and `.`.  Colons are rejected because they denote a
/// namespace prefix.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
