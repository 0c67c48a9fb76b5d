//! Document tree for CSS/SCSS sources.
//!
//! The tree is arena-backed: all nodes live in one `Vec` inside the
//! [`Document`] and refer to each other by [`NodeId`]. Parent links are
//! back-references, not ownership. Every node carries the raw whitespace
//! that preceded it in the source, so serializing an unmodified document
//! reproduces the input byte-for-byte.

/// 1-based source position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Index of a node within its document's arena.
///
/// Ids are stable for the lifetime of the document: nodes are never
/// removed from the arena, only re-linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The document root. `after` holds trailing whitespace at end of file.
    Root { after: String },
    /// A selector with a braced block, e.g. `a, b { ... }`.
    Rule {
        selector: String,
        /// Raw text between the selector and the opening brace.
        between: String,
        /// Whitespace between the last child and the closing brace.
        after: String,
        /// Source line of the opening brace.
        brace_line: usize,
    },
    /// An at-rule, with a block (`@media ... { ... }`) or without
    /// (`@import ...;`).
    AtRule {
        name: String,
        /// Whitespace between `@name` and the params.
        after_name: String,
        params: String,
        /// Raw text between the params and `{` or `;`.
        between: String,
        /// Whitespace between the last child and the closing brace.
        after: String,
        /// Source line of the opening brace; `None` for statement form.
        brace_line: Option<usize>,
        /// Statement form only: whether a trailing `;` was present.
        semicolon: bool,
    },
    /// A `prop: value` declaration.
    Declaration {
        prop: String,
        /// Raw text from after the prop through the start of the value,
        /// including the colon (typically `": "`).
        between: String,
        /// The value, with trailing whitespace preserved.
        value: String,
        /// Whether the declaration ended with `;`.
        semicolon: bool,
    },
    /// A `/* ... */` comment, or a `//` comment when `inline` (SCSS).
    Comment {
        text: String,
        /// Whitespace between the opener and the text.
        left: String,
        /// Whitespace between the text and the closer.
        right: String,
        inline: bool,
    },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Raw whitespace preceding the node in the source.
    pub before: String,
    pub start: Position,
}

impl Node {
    /// A block comment suitable for insertion into an existing document.
    pub fn comment(text: String, before: String, start: Position) -> Self {
        Self {
            kind: NodeKind::Comment {
                text,
                left: " ".to_string(),
                right: " ".to_string(),
                inline: false,
            },
            parent: None,
            children: Vec::new(),
            before,
            start,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, NodeKind::Comment { .. })
    }
}

/// A parsed CSS/SCSS document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub(crate) fn new() -> Self {
        let root = Node {
            kind: NodeKind::Root {
                after: String::new(),
            },
            parent: None,
            children: Vec::new(),
            before: String::new(),
            start: Position::new(1, 1),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Append `node` as the last child of `parent`.
    pub(crate) fn append_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        node.parent = Some(parent);
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The sibling immediately before `id`, if any.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        let siblings = &self.node(parent).children;
        let idx = siblings.iter().position(|&c| c == id)?;
        if idx == 0 { None } else { Some(siblings[idx - 1]) }
    }

    /// The sibling immediately after `id`, if any.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        let siblings = &self.node(parent).children;
        let idx = siblings.iter().position(|&c| c == id)?;
        siblings.get(idx + 1).copied()
    }

    /// Insert `node` as a sibling immediately before `reference`.
    ///
    /// Sibling order of unrelated nodes is untouched. `reference` must not
    /// be the root.
    pub fn insert_before(&mut self, reference: NodeId, node: Node) -> NodeId {
        self.insert_at(reference, node, 0)
    }

    /// Insert `node` as a sibling immediately after `reference`.
    pub fn insert_after(&mut self, reference: NodeId, node: Node) -> NodeId {
        self.insert_at(reference, node, 1)
    }

    fn insert_at(&mut self, reference: NodeId, mut node: Node, offset: usize) -> NodeId {
        let parent = self.node(reference).parent.unwrap_or(self.root);
        node.parent = Some(parent);
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        let siblings = &mut self.nodes[parent.0].children;
        let idx = siblings
            .iter()
            .position(|&c| c == reference)
            .map(|i| i + offset)
            .unwrap_or(siblings.len());
        siblings.insert(idx, id);
        id
    }

    /// Rewrite a comment node's text in place. No-op for other kinds.
    pub fn set_comment_text(&mut self, id: NodeId, new_text: String) {
        if let NodeKind::Comment { text, .. } = &mut self.nodes[id.0].kind {
            *text = new_text;
        }
    }

    /// All nodes except the root, in document (pre-)order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(self.root, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.node(id).children {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Serialize the document back to source text.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Root { after } => {
                for &child in &node.children {
                    self.write_node(child, out);
                }
                out.push_str(after);
            }
            NodeKind::Rule {
                selector,
                between,
                after,
                ..
            } => {
                out.push_str(&node.before);
                out.push_str(selector);
                out.push_str(between);
                out.push('{');
                for &child in &node.children {
                    self.write_node(child, out);
                }
                out.push_str(after);
                out.push('}');
            }
            NodeKind::AtRule {
                name,
                after_name,
                params,
                between,
                after,
                brace_line,
                semicolon,
            } => {
                out.push_str(&node.before);
                out.push('@');
                out.push_str(name);
                out.push_str(after_name);
                out.push_str(params);
                out.push_str(between);
                if brace_line.is_some() {
                    out.push('{');
                    for &child in &node.children {
                        self.write_node(child, out);
                    }
                    out.push_str(after);
                    out.push('}');
                } else if *semicolon {
                    out.push(';');
                }
            }
            NodeKind::Declaration {
                prop,
                between,
                value,
                semicolon,
            } => {
                out.push_str(&node.before);
                out.push_str(prop);
                out.push_str(between);
                out.push_str(value);
                if *semicolon {
                    out.push(';');
                }
            }
            NodeKind::Comment {
                text,
                left,
                right,
                inline,
            } => {
                out.push_str(&node.before);
                if *inline {
                    out.push_str("//");
                    out.push_str(left);
                    out.push_str(text);
                    out.push_str(right);
                } else {
                    out.push_str("/*");
                    out.push_str(left);
                    out.push_str(text);
                    out.push_str(right);
                    out.push_str("*/");
                }
            }
        }
    }
}
