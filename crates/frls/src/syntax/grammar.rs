//! Boundary to the Ruby grammar engine.
//!
//! Prism's own tree borrows the parser and the source buffer, so it cannot
//! be kept inside a [`Source`](crate::document::Source). The adapter lowers
//! it into an owned [`SyntaxTree`] while the parse result is alive and hands
//! back only owned data.

use std::fmt::{Display, Formatter};

use ruby_prism::{Location, Node, Visit};

use crate::syntax::{
    kind::NodeKind,
    tree::{ConstantName, SyntaxTree, TextSpan, TreeBuilder},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The engine produced no root node for the buffer.
    MissingRoot,
}

impl Display for ParseError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::MissingRoot => write!(f, "parser produced no root node"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A Ruby grammar engine: text in, owned tree out.
pub trait Grammar: Send + Sync {
    fn parse(
        &self,
        text: &str,
    ) -> Result<SyntaxTree, ParseError>;
}

/// Production grammar backed by the `ruby-prism` bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismGrammar;

impl Grammar for PrismGrammar {
    fn parse(
        &self,
        text: &str,
    ) -> Result<SyntaxTree, ParseError> {
        let result = ruby_prism::parse(text.as_bytes());

        let mut lowering = Lowering::new();
        for error in result.errors() {
            lowering.builder.push_diagnostic(error.message().to_string(), span_of(&error.location()));
        }
        lowering.visit(&result.node());

        lowering.builder.finish(text).ok_or(ParseError::MissingRoot)
    }
}

/// Pre-order walk over Prism's tree.
///
/// Prism's generated visitor reaches a child through the generic `visit`
/// (which fires the branch/leaf hooks) unless the field holding it has a
/// concrete node type, in which case the typed `visit_*_node` method is
/// called directly and no hook fires. Nodes of those types are therefore
/// opened from their typed method and skipped by the hooks, so every node
/// is lowered exactly once.
struct Lowering {
    builder: TreeBuilder,
    /// One entry per hook-level enter: whether that enter opened a node.
    opened: Vec<bool>,
}

impl Lowering {
    fn new() -> Self {
        Self {
            builder: TreeBuilder::new(),
            opened: Vec::new(),
        }
    }

    fn enter(
        &mut self,
        node: &Node<'_>,
    ) {
        self.builder.start_node(NodeKind::of(node), span_of(&node.location()), constant_name(node));
    }

    fn hook_enter(
        &mut self,
        node: &Node<'_>,
    ) {
        let open = !lowered_by_typed_visit(NodeKind::of(node));
        if open {
            self.enter(node);
        }
        self.opened.push(open);
    }

    fn hook_leave(&mut self) {
        if self.opened.pop() == Some(true) {
            self.builder.finish_node();
        }
    }
}

macro_rules! typed_field_visits {
    ($($method:ident => $node:ident),* $(,)?) => {
        impl<'pr> Visit<'pr> for Lowering {
            fn visit_branch_node_enter(
                &mut self,
                node: Node<'pr>,
            ) {
                self.hook_enter(&node);
            }

            fn visit_branch_node_leave(&mut self) {
                self.hook_leave();
            }

            fn visit_leaf_node_enter(
                &mut self,
                node: Node<'pr>,
            ) {
                self.hook_enter(&node);
            }

            fn visit_leaf_node_leave(&mut self) {
                self.hook_leave();
            }

            $(
                fn $method(
                    &mut self,
                    node: &ruby_prism::$node<'pr>,
                ) {
                    self.enter(&node.as_node());
                    ruby_prism::$method(self, node);
                    self.builder.finish_node();
                }
            )*
        }

        /// Node types that Prism also stores in concretely typed fields.
        fn lowered_by_typed_visit(kind: NodeKind) -> bool {
            matches!(kind, $(NodeKind::$node)|*)
        }
    };
}

typed_field_visits! {
    visit_arguments_node => ArgumentsNode,
    visit_block_argument_node => BlockArgumentNode,
    visit_block_node => BlockNode,
    visit_block_parameter_node => BlockParameterNode,
    visit_call_node => CallNode,
    visit_constant_path_node => ConstantPathNode,
    visit_else_node => ElseNode,
    visit_ensure_node => EnsureNode,
    visit_local_variable_target_node => LocalVariableTargetNode,
    visit_parameters_node => ParametersNode,
    visit_rescue_node => RescueNode,
    visit_splat_node => SplatNode,
    visit_statements_node => StatementsNode,
}

/// Name and name span of constant-introducing nodes, read from Prism's
/// constant pool or from the name token.
fn constant_name(node: &Node<'_>) -> Option<ConstantName> {
    let (name, span) = match node {
        Node::ConstantReadNode { .. } => {
            let read = node.as_constant_read_node()?;
            let name = String::from_utf8_lossy(read.name().as_slice()).into_owned();
            (name, span_of(&node.location()))
        },
        Node::ConstantTargetNode { .. } => {
            let target = node.as_constant_target_node()?;
            let name = String::from_utf8_lossy(target.name().as_slice()).into_owned();
            (name, span_of(&node.location()))
        },
        Node::ConstantPathNode { .. } => name_token(&node.as_constant_path_node()?.name_loc()),
        Node::ConstantWriteNode { .. } => name_token(&node.as_constant_write_node()?.name_loc()),
        Node::ConstantAndWriteNode { .. } => name_token(&node.as_constant_and_write_node()?.name_loc()),
        Node::ConstantOrWriteNode { .. } => name_token(&node.as_constant_or_write_node()?.name_loc()),
        Node::ConstantOperatorWriteNode { .. } => name_token(&node.as_constant_operator_write_node()?.name_loc()),
        _ => return None,
    };

    if name.is_empty() {
        return None;
    }
    Some(ConstantName {
        name,
        span,
    })
}

fn name_token(location: &Location<'_>) -> (String, TextSpan) {
    (String::from_utf8_lossy(location.as_slice()).into_owned(), span_of(location))
}

fn span_of(location: &Location<'_>) -> TextSpan {
    TextSpan::new(location.start_offset(), location.end_offset())
}

#[cfg(test)]
#[path = "../../tests/src/syntax/grammar_tests.rs"]
mod tests;
