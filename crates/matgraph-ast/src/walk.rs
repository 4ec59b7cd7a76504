//! Bottom-up traversal of the expression DAG.
//!
//! Shared subtrees are visited once. The traversal is iterative, so deep
//! expression chains do not grow the call stack.

use std::ops::ControlFlow;

use cranelift_entity::EntitySet;

use crate::context::ExprAst;
use crate::refs::NodeRef;

/// Visit every node reachable from `roots`, children before parents.
///
/// Siblings are visited in operand order and each node is visited at most
/// once. Stops early when `f` breaks.
pub fn walk_post_order<B>(
    ast: &ExprAst,
    roots: &[NodeRef],
    f: &mut dyn FnMut(NodeRef) -> ControlFlow<B>,
) -> ControlFlow<B> {
    let mut seen = EntitySet::<NodeRef>::new();
    // (node, children already pushed)
    let mut stack: Vec<(NodeRef, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();
    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            f(node)?;
            continue;
        }
        if seen.contains(node) {
            continue;
        }
        seen.insert(node);
        stack.push((node, true));
        for &child in ast.children(node).iter().rev() {
            if !seen.contains(child) {
                stack.push((child, false));
            }
        }
    }
    ControlFlow::Continue(())
}

/// Collect the nodes reachable from `roots` in post-order.
pub fn post_order(ast: &ExprAst, roots: &[NodeRef]) -> Vec<NodeRef> {
    let mut order = Vec::new();
    let _ = walk_post_order::<()>(ast, roots, &mut |node| {
        order.push(node);
        ControlFlow::Continue(())
    });
    order
}
