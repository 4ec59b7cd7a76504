//! Node payloads and per-node metadata.

use std::slice;

use matgraph_types::{BinaryOp, Component, DataType, Literal, Operator, TernaryOp, UnaryOp};
use smallvec::SmallVec;

use crate::descriptor::StreamDescriptor;
use crate::refs::{FunctionRef, NodeRef};

/// The shape of a node: which variant it is and what it points at.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Unary {
        op: UnaryOp,
        operand: NodeRef,
    },
    Binary {
        op: BinaryOp,
        operands: [NodeRef; 2],
    },
    Ternary {
        op: TernaryOp,
        operands: [NodeRef; 3],
    },
    /// Literal already converted to the node's data type.
    Constant(Literal),
    /// Selects 1..=4 components of `source` in the order written.
    Swizzle {
        source: NodeRef,
        components: SmallVec<[Component; 4]>,
    },
    Input(StreamDescriptor),
    /// DAG root. `expr == None` marks an output whose expression failed to build.
    Output {
        stream: StreamDescriptor,
        expr: Option<NodeRef>,
    },
    /// Call through an overload set of interned descriptors.
    FunctionCall {
        candidates: SmallVec<[FunctionRef; 2]>,
        args: Vec<NodeRef>,
    },
    /// Vector construction; `args` holds one scalar per element of `target`.
    ConstructorCall {
        target: DataType,
        args: SmallVec<[NodeRef; 4]>,
    },
}

/// Discriminant of a [`NodeKind`], used as the structural hash header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Unary,
    Binary,
    Ternary,
    Constant,
    Swizzle,
    Input,
    Output,
    FunctionCall,
    ConstructorCall,
}

impl NodeKind {
    /// Child references in operand order.
    pub fn children(&self) -> &[NodeRef] {
        match self {
            NodeKind::Unary { operand, .. } => slice::from_ref(operand),
            NodeKind::Binary { operands, .. } => operands,
            NodeKind::Ternary { operands, .. } => operands,
            NodeKind::Swizzle { source, .. } => slice::from_ref(source),
            NodeKind::Output { expr, .. } => expr.as_slice(),
            NodeKind::FunctionCall { args, .. } => args,
            NodeKind::ConstructorCall { args, .. } => args,
            NodeKind::Constant(_) | NodeKind::Input(_) => &[],
        }
    }

    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Unary { .. } => NodeTag::Unary,
            NodeKind::Binary { .. } => NodeTag::Binary,
            NodeKind::Ternary { .. } => NodeTag::Ternary,
            NodeKind::Constant(_) => NodeTag::Constant,
            NodeKind::Swizzle { .. } => NodeTag::Swizzle,
            NodeKind::Input(_) => NodeTag::Input,
            NodeKind::Output { .. } => NodeTag::Output,
            NodeKind::FunctionCall { .. } => NodeTag::FunctionCall,
            NodeKind::ConstructorCall { .. } => NodeTag::ConstructorCall,
        }
    }

    /// Short name used by the printer and diagnostics.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            NodeKind::Unary { op, .. } => op.name(),
            NodeKind::Binary { op, .. } => op.name(),
            NodeKind::Ternary { op, .. } => op.name(),
            NodeKind::Constant(_) => "const",
            NodeKind::Swizzle { .. } => "swizzle",
            NodeKind::Input(_) => "input",
            NodeKind::Output { .. } => "output",
            NodeKind::FunctionCall { .. } => "call",
            NodeKind::ConstructorCall { .. } => "construct",
        }
    }
}

/// Overload resolution state of a node.
///
/// Transitions only out of `Pending`; once `Resolved` or `Failed`,
/// resolution never runs again for the node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resolution {
    #[default]
    Pending,
    /// Index into the kind's signature table or the call's candidate list.
    Resolved(usize),
    /// No candidate matched; the node's return type stays unknown.
    Failed,
}

/// A node together with its resolution and hashing metadata.
#[derive(Clone, Debug)]
pub struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) return_type: DataType,
    pub(crate) num_input_elements: u8,
    pub(crate) resolution: Resolution,
    pub(crate) hash: Option<u64>,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            return_type: DataType::UNKNOWN,
            num_input_elements: 1,
            resolution: Resolution::Pending,
            hash: None,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[NodeRef] {
        self.kind.children()
    }

    /// `DataType::UNKNOWN` until resolution succeeds.
    pub fn return_type(&self) -> DataType {
        self.return_type
    }

    /// Vector width the node was resolved against.
    pub fn num_input_elements(&self) -> usize {
        usize::from(self.num_input_elements)
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Chosen overload index, if resolution succeeded.
    pub fn overload(&self) -> Option<usize> {
        match self.resolution {
            Resolution::Resolved(index) => Some(index),
            Resolution::Pending | Resolution::Failed => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved(_))
    }

    /// Cached structural hash, present once `update_hash` ran for this node.
    pub fn hash(&self) -> Option<u64> {
        self.hash
    }
}
