//! Document loading pipeline for the minnow layout engine.
//!
//! # Scope
//!
//! - **Document loading** - read HTML from a file path or fetch it over
//!   `http(s)://`
//! - **Parsing** - hand the source to `minnow-html` and get a tree back
//! - **Text measurement** - a fontdue-backed [`TextMeasurer`] for real
//!   glyph metrics ([`FontTextMeasurer`])
//!
//! Rendering stays out of scope; consumers read the engine's boxes and
//! draw them however they like.

pub mod font_metrics;

pub use font_metrics::{FontError, FontTextMeasurer};

pub use minnow_dom as dom;
pub use minnow_html as html;
pub use minnow_layout as layout;

use minnow_common::net::{self, FetchError};
use minnow_dom::DomTree;
use std::fs;
use thiserror::Error;

/// Why a document could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A local file could not be read.
    #[error("failed to read '{path}': {source}")]
    File {
        /// Path that was attempted.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// An HTTP source could not be fetched.
    #[error(transparent)]
    Network(#[from] FetchError),
    /// The source was read but contained nothing to lay out.
    #[error("'{0}' contains no document")]
    EmptyDocument(String),
}

/// Read HTML source from a file path or an `http(s)://` URL.
///
/// # Errors
/// Returns a [`LoadError`] if the file cannot be read or the fetch fails.
pub fn load_source(source: &str) -> Result<String, LoadError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        Ok(net::fetch_text(source)?)
    } else {
        fs::read_to_string(source).map_err(|e| LoadError::File {
            path: source.to_string(),
            source: e,
        })
    }
}

/// Load and parse a document from a file path or URL.
///
/// Warnings from any previous document are cleared so each load reports
/// its own problems.
///
/// # Errors
/// Returns a [`LoadError`] if the source cannot be read or is empty.
pub fn load_document(source: &str) -> Result<DomTree, LoadError> {
    let html = load_source(source)?;
    if html.trim().is_empty() {
        return Err(LoadError::EmptyDocument(source.to_string()));
    }

    minnow_common::clear_warnings();
    Ok(minnow_html::parse(&html))
}

/// Parse an HTML string you already have in memory.
#[must_use]
pub fn parse_html_string(html: &str) -> DomTree {
    minnow_html::parse(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_source_reports_missing_files() {
        let err = load_source("/definitely/not/here.html").unwrap_err();
        assert!(matches!(err, LoadError::File { .. }));
    }

    #[test]
    fn parse_html_string_builds_a_tree() {
        let dom = parse_html_string("<p>one</p>");
        assert_eq!(dom.children(dom.root()).len(), 1);
    }

    #[test]
    fn nbsp_document_lays_out_as_one_word() {
        use minnow_layout::{ApproximateTextMeasurer, Layout, WordMetricsCache};

        let dom = parse_html_string("a&nbsp;b");
        let cache =
            WordMetricsCache::shared(Box::new(ApproximateTextMeasurer { char_size: 14.0 }));
        let mut layout = Layout::new(cache);
        layout.set_width(500);
        layout.construct_from_document(&dom);

        assert_eq!(layout.boxes().len(), 1);
        assert_eq!(layout.boxes()[0].words(), ["a\u{00a0}b"]);
    }
}
