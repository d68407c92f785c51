//! Small HTML tokenizer and tree builder.
//!
//! This is nowhere near a conforming WHATWG parser and does not try to
//! be: the layout engine only needs elements, text, and paragraph
//! boundaries, so the tokenizer handles tags, attributes, comments,
//! raw-text elements, and a handful of character references, and the
//! tree builder is a plain open-element stack. Malformed input is
//! reported through [`minnow_common::warn_once`] and parsing always
//! produces a tree.

mod parser;
mod tokenizer;

pub use parser::{TreeBuilder, VOID_ELEMENTS};
pub use tokenizer::{Token, Tokenizer};

use minnow_dom::DomTree;

/// Parse an HTML string into a document tree.
#[must_use]
pub fn parse(html: &str) -> DomTree {
    let tokens = Tokenizer::new(html).run();
    TreeBuilder::new(tokens).run()
}
