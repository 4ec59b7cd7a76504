//! Typed expression DAG builder for material graphs.
//!
//! A front end walks its graph and calls the `create_*` methods on an
//! [`ExprAst`]; every node comes back with a concrete [`DataType`] picked by
//! best-match overload resolution, and vector constructors and partial
//! assignments come back normalized to one scalar per element.
//!
//! ```
//! use matgraph::{BinaryOp, DataType, ExprAst, StreamDescriptor};
//!
//! let mut ast = ExprAst::new();
//! let uv = ast.create_input(StreamDescriptor::new("uv", DataType::FLOAT2));
//! let scale = ast.create_constant(2i32, DataType::INT);
//! let scaled = ast.create_binary(BinaryOp::Mul, uv, scale);
//! assert_eq!(ast.return_type(scaled), DataType::FLOAT2);
//! ```

pub use matgraph_ast::{
    ExprAst, FunctionDescriptor, FunctionRef, MatchDistance, NodeData, NodeKind, NodeRef, NodeTag,
    Resolution, StreamDescriptor, ValidationError, ValidationIssue, print_ast, print_roots, walk,
};
pub use matgraph_types::{
    BinaryOp, Component, DataType, Literal, Operator, REGISTER_TYPE_COUNT, RegisterType, Scalar,
    Signature, TernaryOp, UnaryOp,
};
