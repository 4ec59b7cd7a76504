//! Value types shared by the matgraph expression builder.
//!
//! This crate knows nothing about nodes. It defines the register/data type
//! lattice, swizzle components, literal values, and the operator kinds with
//! their candidate signature tables.

pub mod component;
pub mod data_type;
pub mod literal;
pub mod ops;

pub use component::Component;
pub use data_type::{DataType, REGISTER_TYPE_COUNT, RegisterType};
pub use literal::{Literal, Scalar};
pub use ops::{BinaryOp, Operator, Signature, TernaryOp, UnaryOp};
