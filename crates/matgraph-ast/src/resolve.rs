//! Overload resolution.
//!
//! Every operator kind, function call and constructor is matched against its
//! candidate list once, right after allocation. A candidate is scored by how
//! far each argument's register type is from the type the candidate expects:
//!
//! - widening (`Bool -> Int -> Float`) costs the discriminant distance;
//! - narrowing is tallied separately and always dominates, so a candidate
//!   that narrows any argument loses to every candidate that only widens.
//!
//! The vector width of the node is the widest argument it was scored
//! against. Reduction operators still return a scalar.

use matgraph_types::{DataType, Operator, RegisterType};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::context::ExprAst;
use crate::node::{NodeKind, Resolution};
use crate::refs::NodeRef;

/// Score of one candidate against the actual argument types. Lower is better.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchDistance {
    /// Total register steps an argument would have to be narrowed.
    pub narrowing: u32,
    /// Total register steps an argument would have to be widened.
    pub widening: u32,
}

impl MatchDistance {
    pub fn between(expected: &[RegisterType], actual: &[DataType]) -> Self {
        let mut distance = MatchDistance::default();
        for (&want, have) in expected.iter().zip(actual) {
            let diff = i32::from(want as u8) - i32::from(have.register_type() as u8);
            if diff >= 0 {
                distance.widening += diff.unsigned_abs();
            } else {
                distance.narrowing += diff.unsigned_abs();
            }
        }
        distance
    }
}

/// One entry of a candidate list, independent of where it came from.
#[derive(Clone, Copy, Debug)]
struct Candidate<'a> {
    index: usize,
    result: RegisterType,
    operands: &'a [RegisterType],
    min_required: usize,
}

/// The winning candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Selection {
    index: usize,
    result: RegisterType,
    /// Widest argument among those scored.
    width: usize,
    /// Number of arguments the candidate consumes.
    arity: usize,
}

fn select_best<'a>(
    candidates: impl IntoIterator<Item = Candidate<'a>>,
    args: &[DataType],
) -> Option<Selection> {
    let mut best: Option<(MatchDistance, Selection)> = None;
    for candidate in candidates {
        if args.len() < candidate.min_required {
            continue;
        }
        let scored = &args[..args.len().min(candidate.operands.len())];
        // Arguments past the candidate's arity are dropped, so only scored
        // ones have to be resolved.
        if scored.iter().any(|t| !t.is_known()) {
            continue;
        }
        let distance = MatchDistance::between(candidate.operands, scored);
        // Strict comparison: ties keep the earlier candidate.
        if best.as_ref().is_none_or(|(d, _)| distance < *d) {
            let width = scored.iter().map(|t| t.element_count()).max().unwrap_or(1);
            best = Some((
                distance,
                Selection {
                    index: candidate.index,
                    result: candidate.result,
                    width,
                    arity: candidate.operands.len(),
                },
            ));
        }
    }
    best.map(|(_, selection)| selection)
}

fn select_operator<O: Operator>(op: O, args: &[DataType], hint: DataType) -> Option<Selection> {
    let hint = hint.register_type();
    let candidates = op
        .signatures()
        .iter()
        .enumerate()
        .filter(|(_, sig)| !hint.is_known() || sig.result == hint)
        .map(|(index, sig)| Candidate {
            index,
            result: sig.result,
            operands: sig.operands,
            min_required: sig.arity(),
        });
    select_best(candidates, args)
}

/// Outcome of resolution, computed before the node is mutated.
struct Outcome {
    overload: Option<usize>,
    return_type: DataType,
    num_input_elements: usize,
    /// FunctionCall only: argument count to keep.
    keep_args: Option<usize>,
}

impl Outcome {
    fn failed() -> Self {
        Self {
            overload: None,
            return_type: DataType::UNKNOWN,
            num_input_elements: 1,
            keep_args: None,
        }
    }

    fn operator<O: Operator>(op: O, selection: Selection) -> Self {
        let count = if op.always_returns_single_element() {
            1
        } else {
            selection.width
        };
        Self {
            overload: Some(selection.index),
            return_type: DataType::from_register(selection.result, count),
            num_input_elements: selection.width,
            keep_args: None,
        }
    }
}

impl ExprAst {
    /// Resolve `node` if it has not been resolved yet.
    ///
    /// Idempotent: a node that already resolved, or already failed, is left
    /// untouched. Failure leaves the return type `DataType::UNKNOWN`.
    pub fn resolve(&mut self, node: NodeRef) {
        self.resolve_with_hint(node, DataType::UNKNOWN);
    }

    pub(crate) fn resolve_with_hint(&mut self, node: NodeRef, hint: DataType) {
        if self.node(node).resolution() != Resolution::Pending {
            return;
        }
        let outcome = self.compute_outcome(node, hint);
        if let Some(keep) = outcome.keep_args {
            if let NodeKind::FunctionCall { args, .. } = &mut self.node_mut(node).kind {
                args.truncate(keep);
            }
        }
        self.settle(
            node,
            outcome.return_type,
            outcome.num_input_elements,
            outcome.overload,
        );
    }

    fn compute_outcome(&self, node: NodeRef, hint: DataType) -> Outcome {
        let kind = self.kind(node);
        let arg_types: SmallVec<[DataType; 4]> = kind
            .children()
            .iter()
            .map(|&child| self.return_type(child))
            .collect();
        let outcome = match kind {
            NodeKind::Unary { op, .. } => {
                select_operator(*op, &arg_types, hint).map(|s| Outcome::operator(*op, s))
            }
            NodeKind::Binary { op, .. } => {
                select_operator(*op, &arg_types, hint).map(|s| Outcome::operator(*op, s))
            }
            NodeKind::Ternary { op, .. } => {
                select_operator(*op, &arg_types, hint).map(|s| Outcome::operator(*op, s))
            }
            NodeKind::FunctionCall { candidates, .. } => {
                let candidates = candidates.iter().enumerate().map(|(index, &f)| {
                    let descriptor = self.function(f);
                    Candidate {
                        index,
                        result: descriptor.output,
                        operands: &descriptor.inputs,
                        min_required: descriptor.min_required_inputs,
                    }
                });
                select_best(candidates, &arg_types).map(|s| Outcome {
                    overload: Some(s.index),
                    return_type: DataType::from_register(s.result, s.width),
                    num_input_elements: s.width,
                    keep_args: Some(s.arity),
                })
            }
            NodeKind::ConstructorCall { target, .. } => {
                arg_types.iter().all(|t| t.is_known()).then(|| Outcome {
                    overload: Some(0),
                    return_type: *target,
                    num_input_elements: target.element_count(),
                    keep_args: None,
                })
            }
            NodeKind::Constant(_)
            | NodeKind::Swizzle { .. }
            | NodeKind::Input(_)
            | NodeKind::Output { .. } => {
                debug_assert!(false, "{node}: leaf nodes are settled at creation");
                None
            }
        };

        match outcome {
            Some(outcome) => {
                trace!(
                    %node,
                    kind = kind.mnemonic(),
                    overload = ?outcome.overload,
                    return_type = %outcome.return_type,
                    "resolved overload"
                );
                outcome
            }
            None => {
                debug!(%node, kind = kind.mnemonic(), args = ?arg_types, "no matching overload");
                Outcome::failed()
            }
        }
    }

    /// Data type that child `index` of a resolved node is expected to have.
    ///
    /// Downstream passes compare this with the child's actual return type to
    /// insert conversions. Only meaningful on a resolved node with an
    /// in-range index; anything else is a caller bug, asserted in debug
    /// builds and answered with `DataType::UNKNOWN` otherwise.
    pub fn expected_child_type(&self, node: NodeRef, index: usize) -> DataType {
        let data = self.node(node);
        let Some(overload) = data.overload() else {
            debug_assert!(false, "expected_child_type: {node} is not resolved");
            return DataType::UNKNOWN;
        };
        let width = data.num_input_elements();
        let expected = match data.kind() {
            NodeKind::Unary { op, .. } => op.signatures()[overload]
                .operands
                .get(index)
                .map(|&r| DataType::from_register(r, width)),
            NodeKind::Binary { op, .. } => op.signatures()[overload]
                .operands
                .get(index)
                .map(|&r| DataType::from_register(r, width)),
            NodeKind::Ternary { op, .. } => op.signatures()[overload]
                .operands
                .get(index)
                .map(|&r| DataType::from_register(r, width)),
            NodeKind::FunctionCall { candidates, .. } => self
                .function(candidates[overload])
                .inputs
                .get(index)
                .map(|&r| DataType::from_register(r, width)),
            NodeKind::ConstructorCall { target, args } => (index < args.len())
                .then(|| DataType::from_register(target.register_type(), 1)),
            NodeKind::Swizzle { source, .. } => (index == 0).then(|| self.return_type(*source)),
            NodeKind::Output { stream, expr } => {
                (index == 0 && expr.is_some()).then_some(stream.data_type)
            }
            NodeKind::Constant(_) | NodeKind::Input(_) => None,
        };
        expected.unwrap_or_else(|| {
            debug_assert!(false, "expected_child_type: {node} has no child {index}");
            DataType::UNKNOWN
        })
    }
}
