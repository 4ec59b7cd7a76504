//! Post-build checks over the reachable part of the DAG.
//!
//! Construction never fails loudly: a node whose overload did not match keeps
//! an unknown return type, and a broken output keeps no expression. `validate`
//! collects those leftovers so a caller can report them in one go.

use derive_more::{Display, Error};

use crate::context::ExprAst;
use crate::node::NodeKind;
use crate::refs::NodeRef;
use crate::walk;

// ============================================================================
// Error types
// ============================================================================

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A node whose return type is still unknown.
    #[display("{node} ({kind}) has no resolved type")]
    Unresolved { node: NodeRef, kind: &'static str },

    /// An output root created without an expression.
    #[display("output {node} @{name} has no expression")]
    MissingExpression { node: NodeRef, name: String },
}

impl ValidationIssue {
    pub fn node(&self) -> NodeRef {
        match self {
            ValidationIssue::Unresolved { node, .. }
            | ValidationIssue::MissingExpression { node, .. } => *node,
        }
    }
}

#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display("{} invalid node(s), first: {}", issues.len(), issues[0])]
pub struct ValidationError {
    /// Never empty; only `validate` builds this.
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Issues in children-first order. Never empty.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ExprAst {
    /// Check every node reachable from the outputs.
    ///
    /// Issues are listed children first, so the root cause of a failed
    /// resolution chain comes before the nodes it poisoned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        for node in walk::post_order(self, self.outputs()) {
            let data = self.node(node);
            if let NodeKind::Output { stream, expr: None } = data.kind() {
                issues.push(ValidationIssue::MissingExpression {
                    node,
                    name: stream.name.clone(),
                });
            } else if !data.return_type().is_known() {
                issues.push(ValidationIssue::Unresolved {
                    node,
                    kind: data.kind().mnemonic(),
                });
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}
