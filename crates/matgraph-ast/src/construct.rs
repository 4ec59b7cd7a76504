//! Constructor and partial-assignment normalization.
//!
//! A finished `ConstructorCall` always carries exactly one scalar argument
//! per element of its target type. Vector arguments are split into
//! single-lane swizzles, missing slots are filled with a shared zero, and a
//! write such as `dst.y = s` is rewritten into a full constructor of `dst`.

use matgraph_types::{Component, DataType, RegisterType};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::context::ExprAst;
use crate::node::NodeKind;
use crate::refs::NodeRef;

impl ExprAst {
    /// Create a vector constructor of `target`.
    ///
    /// A single scalar argument is broadcast to every element. Otherwise the
    /// arguments are consumed element by element, left to right; surplus
    /// elements are dropped and missing ones are zero.
    pub fn create_constructor_call(
        &mut self,
        target: DataType,
        args: impl IntoIterator<Item = NodeRef>,
    ) -> NodeRef {
        let args: SmallVec<[NodeRef; 4]> = args.into_iter().collect();
        let args = self.normalize_constructor_args(target, &args);
        let node = self.alloc(NodeKind::ConstructorCall { target, args });
        self.resolve(node);
        node
    }

    fn normalize_constructor_args(
        &mut self,
        target: DataType,
        args: &[NodeRef],
    ) -> SmallVec<[NodeRef; 4]> {
        let count = target.element_count();
        if let [single] = args {
            if count > 1 && self.return_type(*single).is_scalar() {
                return smallvec![*single; count];
            }
        }

        let mut slots = SmallVec::with_capacity(count);
        let mut pending = args.iter().copied();
        // Argument being consumed: (node, its width, next lane to read).
        let mut current: Option<(NodeRef, usize, usize)> = None;
        while slots.len() < count {
            let (arg, width, lane) = match current {
                Some((arg, width, lane)) if lane < width => (arg, width, lane),
                _ => match pending.next() {
                    Some(arg) => (arg, self.return_type(arg).element_count(), 0),
                    None => {
                        slots.push(self.zero_constant(target.register_type()));
                        continue;
                    }
                },
            };
            let element = if width == 1 {
                arg
            } else {
                self.push_lane(arg, lane)
            };
            slots.push(element);
            current = Some((arg, width, lane + 1));
        }
        trace!(%target, args = args.len(), "normalized constructor arguments");
        slots
    }

    /// Model `old.<mask> = new` as a constructor of the updated vector.
    ///
    /// `old == None` starts from an empty vector whose register type is the
    /// widest one written. Slots the mask skips keep their old value, or
    /// become zero when they lie beyond the old width.
    ///
    /// Returns `None` if the mask is invalid, or if `new` is a vector with
    /// fewer elements than the mask writes.
    pub fn create_masked_assignment(
        &mut self,
        old: Option<NodeRef>,
        new: NodeRef,
        mask: &str,
    ) -> Option<NodeRef> {
        let Some(components) = Component::parse_mask(mask) else {
            debug!(mask, "invalid write mask");
            return None;
        };
        let new_width = self.return_type(new).element_count();
        if new_width > 1 && components.len() > new_width {
            debug!(mask, new_width, "write mask outruns the assigned value");
            return None;
        }

        let mut writes: SmallVec<[(usize, NodeRef); 4]> = SmallVec::new();
        for (lane, component) in components.iter().enumerate() {
            let value = if new_width > 1 {
                self.push_lane(new, lane)
            } else {
                new
            };
            writes.push((component.index(), value));
        }

        let register = match old {
            Some(old) => self.return_type(old).register_type(),
            None => writes
                .iter()
                .map(|&(_, value)| self.return_type(value).register_type())
                .max()
                .unwrap_or(RegisterType::Unknown),
        };

        let mut slots = match old {
            Some(old) => self.split_elements(old),
            None => SmallVec::new(),
        };
        for (index, value) in writes {
            while slots.len() < index {
                slots.push(self.zero_constant(register));
            }
            if index == slots.len() {
                slots.push(value);
            } else {
                slots[index] = value;
            }
        }

        let target = DataType::from_register(register, slots.len());
        Some(self.create_constructor_call(target, slots))
    }

    /// One scalar node per element of `value`.
    fn split_elements(&mut self, value: NodeRef) -> SmallVec<[NodeRef; 4]> {
        if let NodeKind::ConstructorCall { args, .. } = self.kind(value) {
            return args.clone();
        }
        let width = self.return_type(value).element_count();
        if width == 1 {
            return smallvec![value];
        }
        (0..width).map(|lane| self.push_lane(value, lane)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matgraph_types::{Literal, Scalar};

    fn constant_value(ast: &ExprAst, node: NodeRef) -> Literal {
        match ast.kind(node) {
            NodeKind::Constant(lit) => lit.clone(),
            other => panic!("expected constant, got {other:?}"),
        }
    }

    fn swizzle_of(ast: &ExprAst, node: NodeRef) -> (NodeRef, Vec<Component>) {
        match ast.kind(node) {
            NodeKind::Swizzle { source, components } => (*source, components.to_vec()),
            other => panic!("expected swizzle, got {other:?}"),
        }
    }

    #[test]
    fn scalar_broadcast() {
        let mut ast = ExprAst::new();
        let one = ast.create_constant(1.0f32, DataType::FLOAT);
        let ctor = ast.create_constructor_call(DataType::FLOAT4, [one]);
        assert_eq!(ast.children(ctor), &[one; 4]);
        assert_eq!(ast.return_type(ctor), DataType::FLOAT4);
    }

    #[test]
    fn vectors_are_split_into_lanes() {
        let mut ast = ExprAst::new();
        let xy = ast.create_constant([1.0f32, 2.0], DataType::FLOAT2);
        let z = ast.create_constant(3.0f32, DataType::FLOAT);
        let ctor = ast.create_constructor_call(DataType::FLOAT4, [xy, z]);
        let args = ast.children(ctor).to_vec();
        assert_eq!(args.len(), 4);
        assert_eq!(swizzle_of(&ast, args[0]), (xy, vec![Component::X]));
        assert_eq!(swizzle_of(&ast, args[1]), (xy, vec![Component::Y]));
        assert_eq!(args[2], z);
        assert_eq!(
            constant_value(&ast, args[3]).components(),
            &[Scalar::Float(0.0)]
        );
        for i in 0..4 {
            assert_eq!(ast.expected_child_type(ctor, i), DataType::FLOAT);
        }
    }

    #[test]
    fn surplus_elements_are_dropped() {
        let mut ast = ExprAst::new();
        let v = ast.create_constant([1i32, 2, 3], DataType::INT3);
        let ctor = ast.create_constructor_call(DataType::INT2, [v, v]);
        let args = ast.children(ctor).to_vec();
        assert_eq!(args.len(), 2);
        assert_eq!(swizzle_of(&ast, args[1]), (v, vec![Component::Y]));
    }

    #[test]
    fn padding_uses_one_shared_zero() {
        let mut ast = ExprAst::new();
        let ctor = ast.create_constructor_call(DataType::INT3, []);
        let args = ast.children(ctor);
        assert_eq!(args[0], args[1]);
        assert_eq!(args[1], args[2]);
        assert_eq!(ast.return_type(args[0]), DataType::INT);
    }

    #[test]
    fn masked_assignment_without_old_value() {
        let mut ast = ExprAst::new();
        let value = ast.create_constant(2.5f32, DataType::FLOAT);
        let ctor = ast.create_masked_assignment(None, value, "y").unwrap();
        assert_eq!(ast.return_type(ctor), DataType::FLOAT2);
        let args = ast.children(ctor).to_vec();
        assert_eq!(
            constant_value(&ast, args[0]).components(),
            &[Scalar::Float(0.0)]
        );
        assert_eq!(args[1], value);
    }

    #[test]
    fn masked_assignment_overwrites_old_lanes() {
        let mut ast = ExprAst::new();
        let old = ast.create_constant([1.0f32, 2.0, 3.0], DataType::FLOAT3);
        let value = ast.create_constant(9.0f32, DataType::FLOAT);
        let ctor = ast.create_masked_assignment(Some(old), value, "xz").unwrap();
        let args = ast.children(ctor).to_vec();
        assert_eq!(args[0], value);
        assert_eq!(swizzle_of(&ast, args[1]), (old, vec![Component::Y]));
        assert_eq!(args[2], value);
        assert_eq!(ast.return_type(ctor), DataType::FLOAT3);
    }

    #[test]
    fn masked_assignment_reuses_constructor_arguments() {
        let mut ast = ExprAst::new();
        let a = ast.create_constant(1.0f32, DataType::FLOAT);
        let b = ast.create_constant(2.0f32, DataType::FLOAT);
        let old = ast.create_constructor_call(DataType::FLOAT2, [a, b]);
        let pair = ast.create_constant([7.0f32, 8.0], DataType::FLOAT2);
        let ctor = ast.create_masked_assignment(Some(old), pair, "wy").unwrap();
        let args = ast.children(ctor).to_vec();
        assert_eq!(args.len(), 4);
        assert_eq!(args[0], a);
        assert_eq!(swizzle_of(&ast, args[1]), (pair, vec![Component::Y]));
        assert_eq!(
            constant_value(&ast, args[2]).components(),
            &[Scalar::Float(0.0)]
        );
        assert_eq!(swizzle_of(&ast, args[3]), (pair, vec![Component::X]));
        assert_eq!(ast.return_type(ctor), DataType::FLOAT4);
    }

    #[test]
    fn masked_assignment_failures() {
        let mut ast = ExprAst::new();
        let pair = ast.create_constant([7.0f32, 8.0], DataType::FLOAT2);
        let before = ast.len();
        assert_eq!(ast.create_masked_assignment(None, pair, "xyz"), None);
        assert_eq!(ast.create_masked_assignment(None, pair, "xv"), None);
        assert_eq!(ast.create_masked_assignment(None, pair, ""), None);
        assert_eq!(ast.len(), before);
    }

    #[test]
    fn masked_assignment_infers_register_from_written_value() {
        let mut ast = ExprAst::new();
        let value = ast.create_constant(3i32, DataType::INT);
        let ctor = ast.create_masked_assignment(None, value, "z").unwrap();
        assert_eq!(ast.return_type(ctor), DataType::INT3);
        let zero = ast.children(ctor)[0];
        assert_eq!(ast.return_type(zero), DataType::INT);
    }

    #[test]
    fn masked_assignment_splits_vector_without_old_value() {
        let mut ast = ExprAst::new();
        let pair = ast.create_constant([4i32, 5], DataType::INT2);
        let ctor = ast.create_masked_assignment(None, pair, "wx").unwrap();
        assert_eq!(ast.return_type(ctor), DataType::INT4);
        let args = ast.children(ctor).to_vec();
        assert_eq!(args.len(), 4);
        assert_eq!(swizzle_of(&ast, args[0]), (pair, vec![Component::Y]));
        assert_eq!(args[1], args[2]);
        assert_eq!(constant_value(&ast, args[1]).components(), &[Scalar::Int(0)]);
        assert_eq!(swizzle_of(&ast, args[3]), (pair, vec![Component::X]));
    }
}
