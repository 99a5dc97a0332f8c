use tracing::debug;

use crate::{
    definition::position::find_node_at,
    document::Source,
    ide::{Location, Position},
    symbols::SymbolIndex,
};

/// Go-to-definition for the node under `position`.
///
/// Only bare constant reads resolve; the lookup is by exact name in the flat
/// index, so every recorded occurrence of that name comes back.
pub fn resolve_definition(
    source: &Source,
    index: &SymbolIndex,
    position: Position,
) -> Vec<Location> {
    let Some(node) = find_node_at(source, position) else {
        debug!("no node at {}:{}:{}", source.file(), position.line, position.character);
        return Vec::new();
    };

    if !node.kind().supports_definition() {
        debug!("definition not supported for {} at {}:{}", node.kind(), position.line, position.character);
        return Vec::new();
    }

    let Some(constant) = node.constant() else {
        return Vec::new();
    };

    let locations = index.get(&constant.name);
    debug!("{} resolved to {} location(s)", constant.name, locations.len());
    locations
}

#[cfg(test)]
#[path = "../../tests/src/definition/provider_tests.rs"]
mod tests;
