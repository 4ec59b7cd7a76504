//! Hash and equality invariants over generated operand pairs.

use matgraph_ast::{ExprAst, NodeRef, StreamDescriptor};
use matgraph_types::{BinaryOp, DataType, Operator, RegisterType};
use proptest::prelude::*;

fn arb_data_type() -> impl Strategy<Value = DataType> {
    (
        prop::sample::select(vec![
            RegisterType::Bool,
            RegisterType::Int,
            RegisterType::Float,
        ]),
        1usize..=4,
    )
        .prop_map(|(register, count)| DataType::from_register(register, count))
}

fn arb_commutative() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Add,
        BinaryOp::Mul,
        BinaryOp::Min,
        BinaryOp::Max,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
        BinaryOp::Equal,
        BinaryOp::NotEqual,
        BinaryOp::LogicalAnd,
        BinaryOp::LogicalOr,
    ])
}

fn arb_ordered() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Sub,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Pow,
        BinaryOp::Less,
        BinaryOp::ShiftLeft,
    ])
}

fn hashed_inputs(ast: &mut ExprAst, a: DataType, b: DataType) -> (NodeRef, NodeRef) {
    let a = ast.create_input(StreamDescriptor::new("a", a));
    let b = ast.create_input(StreamDescriptor::new("b", b));
    ast.update_hash(a);
    ast.update_hash(b);
    (a, b)
}

proptest! {
    #[test]
    fn prop_commutative_swap_is_invisible(
        op in arb_commutative(),
        ta in arb_data_type(),
        tb in arb_data_type(),
    ) {
        prop_assert!(op.is_commutative());
        let mut ast = ExprAst::new();
        let (a, b) = hashed_inputs(&mut ast, ta, tb);
        let ab = ast.create_binary(op, a, b);
        let ba = ast.create_binary(op, b, a);
        prop_assert_eq!(ast.return_type(ab), ast.return_type(ba));
        prop_assert_eq!(ast.update_hash(ab), ast.update_hash(ba));
        prop_assert!(ast.is_equal(ab, ba));
        prop_assert!(ast.is_equal(ba, ab));
    }

    #[test]
    fn prop_ordered_swap_is_visible(
        op in arb_ordered(),
        ta in arb_data_type(),
        tb in arb_data_type(),
    ) {
        prop_assert!(!op.is_commutative());
        let mut ast = ExprAst::new();
        let (a, b) = hashed_inputs(&mut ast, ta, tb);
        let ab = ast.create_binary(op, a, b);
        let ba = ast.create_binary(op, b, a);
        ast.update_hash(ab);
        ast.update_hash(ba);
        prop_assert!(!ast.is_equal(ab, ba));
    }

    #[test]
    fn prop_rebuilt_subtree_is_equal(op in arb_commutative(), ta in arb_data_type()) {
        let mut ast = ExprAst::new();
        let (a, b) = hashed_inputs(&mut ast, ta, ta);
        let first = ast.create_binary(op, a, b);
        let second = ast.create_binary(op, a, b);
        prop_assert_ne!(first, second);
        prop_assert_eq!(ast.update_hash(first), ast.update_hash(second));
        prop_assert!(ast.is_equal(first, second));
    }

    #[test]
    fn prop_hash_ignores_creation_history(ta in arb_data_type(), tb in arb_data_type()) {
        let mut left = ExprAst::new();
        let (a, b) = hashed_inputs(&mut left, ta, tb);
        let sum = left.create_binary(BinaryOp::Add, a, b);

        let mut right = ExprAst::new();
        right.create_constant(1.0f32, DataType::FLOAT);
        let (a2, b2) = hashed_inputs(&mut right, ta, tb);
        let sum2 = right.create_binary(BinaryOp::Add, b2, a2);

        prop_assert_eq!(left.update_hash(sum), right.update_hash(sum2));
    }
}

#[test]
fn update_hashes_enables_equality_across_outputs() {
    let mut ast = ExprAst::new();
    let x = ast.create_input(StreamDescriptor::new("x", DataType::FLOAT2));
    let y = ast.create_input(StreamDescriptor::new("y", DataType::FLOAT2));
    let xy = ast.create_binary(BinaryOp::Mul, x, y);
    let yx = ast.create_binary(BinaryOp::Mul, y, x);
    ast.create_output(StreamDescriptor::new("p", DataType::FLOAT2), Some(xy));
    ast.create_output(StreamDescriptor::new("q", DataType::FLOAT2), Some(yx));
    ast.update_hashes();

    assert_eq!(ast.hash(xy), ast.hash(yx));
    assert!(ast.is_equal(xy, yx));
    let [p, q] = [ast.outputs()[0], ast.outputs()[1]];
    assert!(!ast.is_equal(p, q), "outputs to different streams stay distinct");
}
