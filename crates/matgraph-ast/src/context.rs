//! ExprAst: arena storage for expression nodes.
//!
//! Every node lives in one `PrimaryMap` owned by `ExprAst`; children are
//! plain `NodeRef` indices. Nodes are append-only, so a `NodeRef` stays valid
//! for the lifetime of the AST and a child always has a smaller index than
//! any of its parents.

use cranelift_entity::PrimaryMap;
use matgraph_types::{DataType, Literal, REGISTER_TYPE_COUNT, RegisterType};

use crate::descriptor::{FunctionDescriptor, FunctionInterner};
use crate::node::{NodeData, NodeKind, Resolution};
use crate::refs::{FunctionRef, NodeRef};

/// Owner of an expression DAG.
///
/// Not internally synchronized; all mutation goes through `&mut self`.
#[derive(Debug, Default)]
pub struct ExprAst {
    nodes: PrimaryMap<NodeRef, NodeData>,
    functions: FunctionInterner,
    outputs: Vec<NodeRef>,
    /// Shared zero constant per register type, created on first use.
    zeros: [Option<NodeRef>; REGISTER_TYPE_COUNT],
}

impl ExprAst {
    /// Create an empty AST.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn node(&self, node: NodeRef) -> &NodeData {
        &self.nodes[node]
    }

    pub fn kind(&self, node: NodeRef) -> &NodeKind {
        &self.nodes[node].kind
    }

    pub fn return_type(&self, node: NodeRef) -> DataType {
        self.nodes[node].return_type
    }

    /// Child references of `node` in operand order.
    pub fn children(&self, node: NodeRef) -> &[NodeRef] {
        self.nodes[node].kind.children()
    }

    /// Output roots in creation order.
    pub fn outputs(&self) -> &[NodeRef] {
        &self.outputs
    }

    pub fn function(&self, function: FunctionRef) -> &FunctionDescriptor {
        self.functions.get(function)
    }

    /// Intern a descriptor without creating a call.
    pub fn intern_function(&mut self, descriptor: FunctionDescriptor) -> FunctionRef {
        self.functions.intern(descriptor)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order, which is also a valid bottom-up order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes.keys()
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeRef {
        debug_assert!(
            kind.children().iter().all(|&c| self.nodes.is_valid(c)),
            "alloc: child does not belong to this AST",
        );
        self.nodes.push(NodeData::new(kind))
    }

    pub(crate) fn node_mut(&mut self, node: NodeRef) -> &mut NodeData {
        &mut self.nodes[node]
    }

    /// Record the outcome of resolution for `node`.
    pub(crate) fn settle(
        &mut self,
        node: NodeRef,
        return_type: DataType,
        num_input_elements: usize,
        overload: Option<usize>,
    ) {
        let data = &mut self.nodes[node];
        debug_assert_eq!(data.resolution, Resolution::Pending, "{node} settled twice");
        match overload {
            Some(index) if return_type.is_known() => {
                data.resolution = Resolution::Resolved(index);
                data.return_type = return_type;
            }
            _ => {
                data.resolution = Resolution::Failed;
                data.return_type = DataType::UNKNOWN;
            }
        }
        data.num_input_elements = num_input_elements.clamp(1, 4) as u8;
    }

    pub(crate) fn push_output(&mut self, node: NodeRef) {
        self.outputs.push(node);
    }

    /// Shared scalar zero of `register`. `Unknown` falls back to `Float`.
    pub fn zero_constant(&mut self, register: RegisterType) -> NodeRef {
        let register = if register.is_known() {
            register
        } else {
            RegisterType::Float
        };
        if let Some(zero) = self.zeros[register as usize] {
            return zero;
        }
        let zero = self.create_constant(Literal::from(0i32), DataType::from(register));
        self.zeros[register as usize] = Some(zero);
        zero
    }
}
