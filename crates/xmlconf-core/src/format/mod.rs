//! On-disk document formats for the settings store.

pub mod xml;

pub use xml::{parse_document, render_document, ROOT_ELEMENT};
