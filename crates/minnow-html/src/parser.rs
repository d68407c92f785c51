//! Tree builder: token stream to document tree.

use crate::tokenizer::Token;
use minnow_common::warn_once;
use minnow_dom::{DomTree, ElementData, NodeId, NodeType};

/// Elements that never have content and never go on the open stack.
///
/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
pub const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Builds a [`DomTree`] from a token stream with an open-element stack.
///
/// End tags pop to the nearest matching open element; an end tag with no
/// matching open element is ignored with a warning. Elements still open
/// at end of input are closed implicitly. Text consisting entirely of
/// spaces (inter-tag formatting after newline normalization) produces no
/// node, so document indentation never reaches the layout engine.
pub struct TreeBuilder {
    tokens: Vec<Token>,
    dom: DomTree,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    /// Create a builder over `tokens`.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let dom = DomTree::new();
        let root = dom.root();
        TreeBuilder {
            tokens,
            dom,
            stack: vec![root],
        }
    }

    /// Consume the tokens and return the finished tree.
    #[must_use]
    pub fn run(mut self) -> DomTree {
        let tokens = std::mem::take(&mut self.tokens);
        for token in tokens {
            match token {
                Token::Text(text) => self.insert_text(&text),
                Token::StartTag {
                    name,
                    attrs,
                    self_closing,
                } => self.insert_element(name, attrs, self_closing),
                Token::EndTag { name } => self.close_element(&name),
            }
        }
        self.dom
    }

    fn current(&self) -> NodeId {
        *self
            .stack
            .last()
            .unwrap_or(&NodeId::ROOT)
    }

    fn insert_text(&mut self, text: &str) {
        if text.chars().all(|c| c == ' ') {
            return;
        }
        let node = self.dom.alloc(NodeType::Text(text.to_string()));
        self.dom.append_child(self.current(), node);
    }

    fn insert_element(
        &mut self,
        name: String,
        attrs: minnow_dom::AttributesMap,
        self_closing: bool,
    ) {
        let is_void = VOID_ELEMENTS.contains(&name.as_str());
        let node = self.dom.alloc(NodeType::Element(ElementData {
            tag_name: name,
            attrs,
        }));
        self.dom.append_child(self.current(), node);

        if !self_closing && !is_void {
            self.stack.push(node);
        }
    }

    fn close_element(&mut self, name: &str) {
        // Search from the innermost open element outward, never popping
        // the document root.
        let position = self.stack[1..]
            .iter()
            .rposition(|&id| {
                self.dom
                    .as_element(id)
                    .is_some_and(|e| e.tag_name == name)
            })
            .map(|i| i + 1);

        match position {
            Some(i) => self.stack.truncate(i),
            None => warn_once("html", &format!("end tag '</{name}>' matches nothing")),
        }
    }
}
