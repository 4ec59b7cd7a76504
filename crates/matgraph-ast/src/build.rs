//! Node factory: the `create_*` entry points.
//!
//! Callers build bottom-up, passing refs to already created children.
//! Operator and call nodes are resolved as soon as they are allocated;
//! leaf nodes get their type directly from their payload.

use matgraph_types::{BinaryOp, Component, DataType, Literal, TernaryOp, UnaryOp};
use smallvec::SmallVec;
use tracing::debug;

use crate::context::ExprAst;
use crate::descriptor::{FunctionDescriptor, StreamDescriptor};
use crate::node::NodeKind;
use crate::refs::NodeRef;

impl ExprAst {
    /// Create a unary operator node.
    ///
    /// A `hint` with a known register type restricts resolution to signatures
    /// returning that register type; pass `DataType::UNKNOWN` for no hint.
    /// This is how [`UnaryOp::Convert`] picks its target.
    pub fn create_unary(&mut self, op: UnaryOp, operand: NodeRef, hint: DataType) -> NodeRef {
        let node = self.alloc(NodeKind::Unary { op, operand });
        self.resolve_with_hint(node, hint);
        node
    }

    pub fn create_binary(&mut self, op: BinaryOp, lhs: NodeRef, rhs: NodeRef) -> NodeRef {
        let node = self.alloc(NodeKind::Binary {
            op,
            operands: [lhs, rhs],
        });
        self.resolve(node);
        node
    }

    pub fn create_ternary(&mut self, op: TernaryOp, a: NodeRef, b: NodeRef, c: NodeRef) -> NodeRef {
        let node = self.alloc(NodeKind::Ternary {
            op,
            operands: [a, b, c],
        });
        self.resolve(node);
        node
    }

    /// Create a literal constant of `data_type`.
    ///
    /// Every component is converted to the register type of `data_type`; a
    /// single component is splatted across the full width.
    ///
    /// # Panics
    ///
    /// Panics if `data_type` is unknown, or if `value` has more than one
    /// component and its count differs from the element count of `data_type`.
    pub fn create_constant(&mut self, value: impl Into<Literal>, data_type: DataType) -> NodeRef {
        let value = value.into();
        let Some(literal) = value.convert(data_type) else {
            panic!(
                "create_constant: cannot represent {value} ({} components) as {data_type}",
                value.len()
            );
        };
        let node = self.alloc(NodeKind::Constant(literal));
        self.settle(node, data_type, data_type.element_count(), Some(0));
        node
    }

    /// Create a swizzle from a mask such as `"zyx"` or `"rgba"`.
    ///
    /// Returns `None` if the mask is empty, longer than four characters,
    /// contains an unrecognized character, or selects a component the
    /// source does not have.
    pub fn create_swizzle(&mut self, mask: &str, source: NodeRef) -> Option<NodeRef> {
        let Some(components) = Component::parse_mask(mask) else {
            debug!(mask, "invalid swizzle mask");
            return None;
        };
        let source_type = self.return_type(source);
        if source_type.is_known()
            && components
                .iter()
                .any(|c| c.index() >= source_type.element_count())
        {
            debug!(mask, %source_type, "swizzle selects a missing component");
            return None;
        }
        Some(self.push_swizzle(source, components.into_iter().collect()))
    }

    /// Allocate a swizzle whose components are already validated.
    pub(crate) fn push_swizzle(
        &mut self,
        source: NodeRef,
        components: SmallVec<[Component; 4]>,
    ) -> NodeRef {
        let source_type = self.return_type(source);
        let return_type = DataType::from_register(source_type.register_type(), components.len());
        let node = self.alloc(NodeKind::Swizzle { source, components });
        self.settle(node, return_type, source_type.element_count(), Some(0));
        node
    }

    /// Single-lane swizzle selecting element `index` of `source`.
    pub(crate) fn push_lane(&mut self, source: NodeRef, index: usize) -> NodeRef {
        let mut components = SmallVec::new();
        components.push(Component::ALL[index]);
        self.push_swizzle(source, components)
    }

    pub fn create_input(&mut self, stream: StreamDescriptor) -> NodeRef {
        let data_type = stream.data_type;
        let node = self.alloc(NodeKind::Input(stream));
        self.settle(node, data_type, data_type.element_count(), Some(0));
        node
    }

    /// Create an output root. `expr == None` records a known-broken output.
    pub fn create_output(&mut self, stream: StreamDescriptor, expr: Option<NodeRef>) -> NodeRef {
        let data_type = stream.data_type;
        let node = self.alloc(NodeKind::Output { stream, expr });
        self.settle(node, data_type, data_type.element_count(), Some(0));
        self.push_output(node);
        node
    }

    /// Create a call through an overload set.
    ///
    /// Descriptors are interned, so passing equal descriptors to several
    /// calls yields equal candidate refs. After resolution the argument list
    /// is truncated to the selected descriptor's input count.
    pub fn create_function_call(
        &mut self,
        candidates: impl IntoIterator<Item = FunctionDescriptor>,
        args: impl IntoIterator<Item = NodeRef>,
    ) -> NodeRef {
        let candidates = candidates
            .into_iter()
            .map(|descriptor| self.intern_function(descriptor))
            .collect();
        let node = self.alloc(NodeKind::FunctionCall {
            candidates,
            args: args.into_iter().collect(),
        });
        self.resolve(node);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matgraph_types::{RegisterType, Scalar};

    #[test]
    fn constant_defaults_and_conversion() {
        let mut ast = ExprAst::new();
        let c = ast.create_constant(2i32, DataType::FLOAT);
        assert_eq!(ast.return_type(c), DataType::FLOAT);
        let NodeKind::Constant(lit) = ast.kind(c) else {
            panic!("expected constant");
        };
        assert_eq!(lit.components(), &[Scalar::Float(2.0)]);
        assert!(ast.node(c).is_resolved());
    }

    #[test]
    fn constant_splat() {
        let mut ast = ExprAst::new();
        let c = ast.create_constant(1i32, DataType::INT3);
        let NodeKind::Constant(lit) = ast.kind(c) else {
            panic!("expected constant");
        };
        assert_eq!(lit.components(), &[Scalar::Int(1); 3]);
    }

    #[test]
    #[should_panic(expected = "cannot represent")]
    fn constant_width_mismatch_panics() {
        let mut ast = ExprAst::new();
        ast.create_constant([1.0f32, 2.0], DataType::FLOAT3);
    }

    #[test]
    #[should_panic(expected = "cannot represent")]
    fn constant_unknown_type_panics() {
        let mut ast = ExprAst::new();
        ast.create_constant(1.0f32, DataType::UNKNOWN);
    }

    #[test]
    fn swizzle_preserves_order() {
        let mut ast = ExprAst::new();
        let v = ast.create_constant([1.0f32, 2.0, 3.0], DataType::FLOAT3);
        let s = ast.create_swizzle("zyx", v).unwrap();
        let NodeKind::Swizzle { source, components } = ast.kind(s) else {
            panic!("expected swizzle");
        };
        assert_eq!(*source, v);
        assert_eq!(
            components.as_slice(),
            &[Component::Z, Component::Y, Component::X]
        );
        assert_eq!(ast.return_type(s), DataType::FLOAT3);
    }

    #[test]
    fn swizzle_rgba_spelling_and_widening_mask() {
        let mut ast = ExprAst::new();
        let v = ast.create_constant(1i32, DataType::INT);
        let s = ast.create_swizzle("rrrr", v).unwrap();
        assert_eq!(ast.return_type(s), DataType::INT4);
    }

    #[test]
    fn swizzle_rejects_bad_masks() {
        let mut ast = ExprAst::new();
        let v = ast.create_constant(1.0f32, DataType::FLOAT3);
        let before = ast.len();
        assert_eq!(ast.create_swizzle("", v), None);
        assert_eq!(ast.create_swizzle("xyzvw", v), None);
        assert_eq!(ast.create_swizzle("xq", v), None);
        assert_eq!(ast.create_swizzle("w", v), None);
        assert_eq!(ast.len(), before, "failed swizzles must not allocate");
    }

    #[test]
    fn input_and_output_take_stream_type() {
        let mut ast = ExprAst::new();
        let uv = ast.create_input(StreamDescriptor::new("uv", DataType::FLOAT2));
        let out = ast.create_output(StreamDescriptor::new("out_uv", DataType::FLOAT2), Some(uv));
        let broken = ast.create_output(StreamDescriptor::new("broken", DataType::FLOAT), None);
        assert_eq!(ast.return_type(uv), DataType::FLOAT2);
        assert_eq!(ast.return_type(out), DataType::FLOAT2);
        assert_eq!(ast.outputs(), &[out, broken]);
        assert!(ast.children(broken).is_empty());
    }

    #[test]
    fn function_descriptors_are_interned() {
        let mut ast = ExprAst::new();
        let x = ast.create_constant(1.0f32, DataType::FLOAT);
        let desc = FunctionDescriptor::new("f", [RegisterType::Float], RegisterType::Float);
        let a = ast.create_function_call([desc.clone()], [x]);
        let b = ast.create_function_call([desc], [x]);
        let (
            NodeKind::FunctionCall { candidates: ca, .. },
            NodeKind::FunctionCall { candidates: cb, .. },
        ) = (ast.kind(a), ast.kind(b))
        else {
            panic!("expected calls");
        };
        assert_eq!(ca, cb);
    }
}
