use crate::syntax::tree::NodeRef;

/// Pre-order walk: `visit` sees a node before any of its children, children
/// in the order the grammar produced them. Uses an explicit stack so deeply
/// nested sources cannot exhaust the call stack.
pub fn traverse<'t, C>(
    node: NodeRef<'t>,
    visit: &mut impl FnMut(NodeRef<'t>, &mut C),
    ctx: &mut C,
) {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        visit(node, ctx);
        stack.extend(node.children().rev());
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/visit_tests.rs"]
mod tests;
