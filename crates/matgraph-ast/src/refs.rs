//! Entity references into an [`ExprAst`](crate::ExprAst).
//!
//! Each ref type is a thin `u32` wrapper providing type-safe indexing
//! into `PrimaryMap` storage owned by the AST.

use cranelift_entity::entity_impl;

/// Reference to a node in the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(u32);
entity_impl!(NodeRef, "n");

/// Reference to an interned function descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionRef(u32);
entity_impl!(FunctionRef, "fn");
