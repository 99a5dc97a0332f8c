//! Cursor to node resolution and go-to-definition.

mod position;
mod provider;

pub use position::find_node_at;
pub use provider::resolve_definition;
