//! Structural hashing and equality.
//!
//! Together `hash` and `is_equal` let a later CSE pass recognize
//! interchangeable subtrees. Both treat commutative binary operators as
//! unordered, so `a + b` and `b + a` hash and compare equal.
//!
//! Hashes are computed bottom-up: a node may only be hashed once all of its
//! children are. Equality compares children by reference, so it assumes the
//! children themselves were already deduplicated.

use std::hash::{Hash, Hasher};

use matgraph_types::Operator;
use rustc_hash::FxHasher;

use crate::context::ExprAst;
use crate::node::NodeKind;
use crate::refs::NodeRef;
use crate::walk;

impl ExprAst {
    /// Compute and cache the structural hash of `node`.
    ///
    /// All children must already be hashed. Returns the cached value when the
    /// node was hashed before.
    pub fn update_hash(&mut self, node: NodeRef) -> u64 {
        if let Some(hash) = self.node(node).hash() {
            return hash;
        }
        let hash = self.structural_hash(node);
        self.node_mut(node).hash = Some(hash);
        hash
    }

    /// Hash every node reachable from the outputs, children first.
    pub fn update_hashes(&mut self) {
        let order = walk::post_order(self, self.outputs());
        for node in order {
            self.update_hash(node);
        }
    }

    /// Cached hash of `node`, if it has been computed.
    pub fn hash(&self, node: NodeRef) -> Option<u64> {
        self.node(node).hash()
    }

    fn child_hash(&self, child: NodeRef) -> u64 {
        let hash = self.node(child).hash();
        debug_assert!(hash.is_some(), "child {child} must be hashed before its parent");
        hash.unwrap_or_default()
    }

    fn structural_hash(&self, node: NodeRef) -> u64 {
        let data = self.node(node);
        let mut h = FxHasher::default();
        data.kind().tag().hash(&mut h);
        data.return_type().hash(&mut h);
        match data.kind() {
            NodeKind::Unary { op, operand } => {
                op.hash(&mut h);
                self.child_hash(*operand).hash(&mut h);
            }
            NodeKind::Binary { op, operands } => {
                op.hash(&mut h);
                let [lhs, rhs] = *operands;
                let mut hashes = [self.child_hash(lhs), self.child_hash(rhs)];
                if op.is_commutative() {
                    hashes.sort_unstable();
                }
                hashes.hash(&mut h);
            }
            NodeKind::Ternary { op, operands } => {
                op.hash(&mut h);
                for &operand in operands {
                    self.child_hash(operand).hash(&mut h);
                }
            }
            NodeKind::Constant(literal) => literal.hash(&mut h),
            NodeKind::Swizzle { source, components } => {
                self.child_hash(*source).hash(&mut h);
                components.hash(&mut h);
            }
            NodeKind::Input(stream) => stream.name.hash(&mut h),
            NodeKind::Output { stream, expr } => {
                stream.name.hash(&mut h);
                expr.map(|e| self.child_hash(e)).hash(&mut h);
            }
            NodeKind::FunctionCall { candidates, args } => {
                candidates
                    .first()
                    .map(|&f| self.function(f).name.as_str())
                    .hash(&mut h);
                for &arg in args {
                    self.child_hash(arg).hash(&mut h);
                }
            }
            NodeKind::ConstructorCall { args, .. } => {
                for &arg in args {
                    self.child_hash(arg).hash(&mut h);
                }
            }
        }
        h.finish()
    }

    /// Whether `a` and `b` compute the same value, given deduplicated children.
    ///
    /// Children are compared by reference. Commutative binary operators also
    /// match with their operands swapped.
    pub fn is_equal(&self, a: NodeRef, b: NodeRef) -> bool {
        if a == b {
            return true;
        }
        let (x, y) = (self.node(a), self.node(b));
        if let (Some(hx), Some(hy)) = (x.hash(), y.hash()) {
            if hx != hy {
                return false;
            }
        }
        if x.return_type() != y.return_type() {
            return false;
        }
        match (x.kind(), y.kind()) {
            (
                NodeKind::Unary { op: o1, operand: a1 },
                NodeKind::Unary { op: o2, operand: a2 },
            ) => o1 == o2 && a1 == a2,
            (
                NodeKind::Binary {
                    op: o1,
                    operands: [l1, r1],
                },
                NodeKind::Binary {
                    op: o2,
                    operands: [l2, r2],
                },
            ) => {
                if o1 != o2 {
                    return false;
                }
                let (l1, r1, l2, r2) = if o1.is_commutative() {
                    (l1.min(r1), l1.max(r1), l2.min(r2), l2.max(r2))
                } else {
                    (l1, r1, l2, r2)
                };
                l1 == l2 && r1 == r2
            }
            (
                NodeKind::Ternary {
                    op: o1,
                    operands: c1,
                },
                NodeKind::Ternary {
                    op: o2,
                    operands: c2,
                },
            ) => o1 == o2 && c1 == c2,
            (NodeKind::Constant(l1), NodeKind::Constant(l2)) => l1 == l2,
            (
                NodeKind::Swizzle {
                    source: s1,
                    components: c1,
                },
                NodeKind::Swizzle {
                    source: s2,
                    components: c2,
                },
            ) => s1 == s2 && c1 == c2,
            (NodeKind::Input(s1), NodeKind::Input(s2)) => s1 == s2,
            (
                NodeKind::Output {
                    stream: s1,
                    expr: e1,
                },
                NodeKind::Output {
                    stream: s2,
                    expr: e2,
                },
            ) => s1 == s2 && e1 == e2,
            (
                NodeKind::FunctionCall {
                    candidates: c1,
                    args: a1,
                },
                NodeKind::FunctionCall {
                    candidates: c2,
                    args: a2,
                },
            ) => c1 == c2 && a1 == a2,
            (
                NodeKind::ConstructorCall {
                    target: t1,
                    args: a1,
                },
                NodeKind::ConstructorCall {
                    target: t2,
                    args: a2,
                },
            ) => t1 == t2 && a1 == a2,
            _ => false,
        }
    }
}
