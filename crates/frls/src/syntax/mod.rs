//! Lowered Ruby syntax: the grammar boundary, the owned tree it produces,
//! and the traversal every consumer shares.

pub mod grammar;
pub mod kind;
pub mod line_index;
pub mod tree;
pub mod visit;

pub use grammar::{Grammar, ParseError, PrismGrammar};
pub use kind::NodeKind;
pub use line_index::{LineCol, LineIndex};
pub use tree::{ConstantName, NodeId, NodeRef, ParseDiagnostic, SyntaxNode, SyntaxTree, TextSpan};
pub use visit::traverse;
