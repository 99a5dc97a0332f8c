use crate::syntax::{
    kind::NodeKind,
    line_index::{LineCol, LineIndex},
};

/// Half-open byte range `[start, end)` into the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub const fn new(
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Textual name of a constant-introducing node, resolved at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstantName {
    pub name: String,
    /// Span of the name token only (`Super` in `Hello::Super`).
    pub span: TextSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: TextSpan,
    pub constant: Option<ConstantName>,
    children: Vec<NodeId>,
}

/// Parser message attached to a tree; the tree is still usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub message: String,
    pub span: TextSpan,
    /// 1-based line of `span.start`.
    pub line: u32,
}

/// Owned, immutable syntax tree of one source text plus its line index.
///
/// Nodes live in a flat arena in pre-order; the root is always the first
/// node. The whole tree is dropped as one value when a source is reparsed.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    line_index: LineIndex,
    diagnostics: Vec<ParseDiagnostic>,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    pub fn node(
        &self,
        id: NodeId,
    ) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }
}

/// Borrowed handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn tree(self) -> &'a SyntaxTree {
        self.tree
    }

    pub fn data(self) -> &'a SyntaxNode {
        &self.tree.nodes[self.id.index()]
    }

    pub fn kind(self) -> NodeKind {
        self.data().kind
    }

    pub fn span(self) -> TextSpan {
        self.data().span
    }

    pub fn constant(self) -> Option<&'a ConstantName> {
        self.data().constant.as_ref()
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| NodeRef {
            tree,
            id,
        })
    }

    pub fn start(self) -> LineCol {
        self.tree.line_index.line_col(self.span().start)
    }

    pub fn end(self) -> LineCol {
        self.tree.line_index.line_col(self.span().end)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.id == other.id && self.data() == other.data()
    }
}

impl Eq for NodeRef<'_> {}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let data = self.data();
        let mut s = f.debug_struct("NodeRef");
        s.field("kind", &data.kind).field("span", &data.span);
        if let Some(constant) = &data.constant {
            s.field("constant", &constant.name);
        }
        s.finish()
    }
}

/// Incremental builder used by grammar adapters: nodes are opened in
/// pre-order and closed when their children are done.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    open: Vec<NodeId>,
    diagnostics: Vec<ParseDiagnostic>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(
        &mut self,
        kind: NodeKind,
        span: TextSpan,
        constant: Option<ConstantName>,
    ) {
        let id = NodeId(self.nodes.len() as u32);
        if let Some(parent) = self.open.last() {
            self.nodes[parent.index()].children.push(id);
        }
        self.nodes.push(SyntaxNode {
            kind,
            span,
            constant,
            children: Vec::new(),
        });
        self.open.push(id);
    }

    pub fn finish_node(&mut self) {
        self.open.pop();
    }

    pub fn push_diagnostic(
        &mut self,
        message: String,
        span: TextSpan,
    ) {
        self.diagnostics.push(ParseDiagnostic {
            message,
            span,
            line: 0,
        });
    }

    /// Returns `None` when no node was ever started.
    pub fn finish(
        self,
        text: &str,
    ) -> Option<SyntaxTree> {
        if self.nodes.is_empty() {
            return None;
        }
        let line_index = LineIndex::new(text);
        let diagnostics = self
            .diagnostics
            .into_iter()
            .map(|mut diagnostic| {
                diagnostic.line = line_index.line_col(diagnostic.span.start).line;
                diagnostic
            })
            .collect();
        Some(SyntaxTree {
            nodes: self.nodes,
            line_index,
            diagnostics,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/tree_tests.rs"]
mod tests;
