use crate::{
    document::Source,
    ide::Position,
    syntax::{NodeRef, traverse},
};

/// Innermost single-line node covering `position`.
///
/// Both column bounds are inclusive, so the cursor just past a token still
/// hits it. Nodes spanning several lines never match. When several nodes
/// match, the last one visited in pre-order wins, which is the deepest.
pub fn find_node_at(
    source: &Source,
    position: Position,
) -> Option<NodeRef<'_>> {
    let tree = source.tree()?;
    let line = position.line + 1;
    let mut found: Option<NodeRef<'_>> = None;
    traverse(
        tree.root(),
        &mut |node, found| {
            let start = node.start();
            let end = node.end();
            if start.line == line
                && end.line == line
                && start.column <= position.character
                && position.character <= end.column
            {
                *found = Some(node);
            }
        },
        &mut found,
    );
    found
}

#[cfg(test)]
#[path = "../../tests/src/definition/position_tests.rs"]
mod tests;
