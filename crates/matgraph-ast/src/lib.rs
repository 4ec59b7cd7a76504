//! Arena-backed expression DAG for material graphs.
//!
//! `ExprAst` owns every node. Callers build bottom-up through the `create_*`
//! factory methods; each operator or call node is type-checked against its
//! candidate signatures as soon as it is created, and vector constructors are
//! normalized to one scalar argument per element. Structural hashing and
//! equality prepare the graph for common-subexpression elimination.

pub mod build;
pub mod construct;
pub mod context;
pub mod descriptor;
pub mod hash;
pub mod node;
pub mod printer;
pub mod refs;
pub mod resolve;
pub mod validation;
pub mod walk;

pub use context::ExprAst;
pub use descriptor::{FunctionDescriptor, FunctionInterner, StreamDescriptor};
pub use node::{NodeData, NodeKind, NodeTag, Resolution};
pub use printer::{print_ast, print_roots};
pub use refs::{FunctionRef, NodeRef};
pub use resolve::MatchDistance;
pub use validation::{ValidationError, ValidationIssue};
