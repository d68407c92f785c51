//! Arena document tree consumed by the minnow layout engine.
//!
//! This is deliberately a small slice of the
//! [DOM Living Standard](https://dom.spec.whatwg.org/): the layout engine
//! only ever asks a node whether it is text, whether it is a paragraph
//! boundary, for its text content, and for its children. The tree uses
//! arena allocation with [`NodeId`] indices so traversal never fights the
//! borrow checker.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Tags that act as paragraph boundaries during layout.
///
/// When the layout walk meets one of these and at least one line box
/// already exists, it closes the current line and opens a vertical gap.
pub const PARAGRAPH_TAGS: [&str; 2] = ["p", "br"];

/// A type-safe index into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// The kind of a tree node.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The document itself; exactly one, at [`NodeId::ROOT`].
    Document,
    /// An element such as `<p>` or `<body>`.
    Element(ElementData),
    /// A run of character data.
    Text(String),
}

/// Element-specific data: local name plus attribute list.
///
/// Attributes are stored but otherwise uninterpreted; layout only looks
/// at tag names.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's local (tag) name, lowercased by the parser.
    pub tag_name: String,
    /// The element's attribute list.
    pub attrs: AttributesMap,
}

/// A single node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub node_type: NodeType,
    /// Parent node, `None` only for the document root.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// Arena-based document tree.
///
/// All nodes live in one vector indexed by [`NodeId`], giving O(1) access
/// and cheap whole-tree clones (the layout engine keeps a copy of the
/// document it was built from so it can re-lay it out on resize).
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree containing just the document node.
    #[must_use]
    pub fn new() -> Self {
        DomTree {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root document node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the tree (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty. Always false for a constructed tree;
    /// kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Allocate a detached node and return its id.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Children of a node in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `id` is a text node.
    #[must_use]
    pub fn is_text_node(&self, id: NodeId) -> bool {
        matches!(
            self.get(id).map(|n| &n.node_type),
            Some(NodeType::Text(_))
        )
    }

    /// Whether `id` is a paragraph-boundary element (see [`PARAGRAPH_TAGS`]).
    #[must_use]
    pub fn is_paragraph_node(&self, id: NodeId) -> bool {
        self.as_element(id)
            .is_some_and(|e| PARAGRAPH_TAGS.contains(&e.tag_name.as_str()))
    }

    /// Element data if `id` is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Text content if `id` is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str) -> NodeType {
        NodeType::Element(ElementData {
            tag_name: tag.to_string(),
            attrs: AttributesMap::new(),
        })
    }

    #[test]
    fn append_child_links_both_directions() {
        let mut dom = DomTree::new();
        let body = dom.alloc(element("body"));
        dom.append_child(dom.root(), body);
        let text = dom.alloc(NodeType::Text("hi".to_string()));
        dom.append_child(body, text);

        assert_eq!(dom.children(dom.root()), &[body]);
        assert_eq!(dom.get(text).unwrap().parent, Some(body));
    }

    #[test]
    fn node_kind_queries() {
        let mut dom = DomTree::new();
        let p = dom.alloc(element("p"));
        let br = dom.alloc(element("br"));
        let div = dom.alloc(element("div"));
        let text = dom.alloc(NodeType::Text("words".to_string()));

        assert!(dom.is_paragraph_node(p));
        assert!(dom.is_paragraph_node(br));
        assert!(!dom.is_paragraph_node(div));
        assert!(!dom.is_paragraph_node(text));

        assert!(dom.is_text_node(text));
        assert_eq!(dom.as_text(text), Some("words"));
        assert_eq!(dom.as_element(div).unwrap().tag_name, "div");
    }

    #[test]
    fn cloned_tree_is_independent() {
        let mut dom = DomTree::new();
        let body = dom.alloc(element("body"));
        dom.append_child(dom.root(), body);

        let snapshot = dom.clone();
        let extra = dom.alloc(element("p"));
        dom.append_child(body, extra);

        assert_eq!(snapshot.children(body).len(), 0);
        assert_eq!(dom.children(body).len(), 1);
    }
}
