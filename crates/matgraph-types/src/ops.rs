//! Operator kinds and their candidate signatures.
//!
//! Operators are split by arity so that a binary kind can never be handed to
//! the unary constructor. Each kind lists up to four candidate
//! [`Signature`]s in preference order; overload resolution scores them
//! against the actual operand types and keeps the closest one.

use std::fmt;

use crate::data_type::RegisterType;

const B: RegisterType = RegisterType::Bool;
const I: RegisterType = RegisterType::Int;
const F: RegisterType = RegisterType::Float;

/// One candidate `(result, operands...)` tuple for an operator kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub result: RegisterType,
    pub operands: &'static [RegisterType],
}

impl Signature {
    pub const fn new(result: RegisterType, operands: &'static [RegisterType]) -> Self {
        Self { result, operands }
    }

    pub const fn arity(&self) -> usize {
        self.operands.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.result)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{operand}")?;
        }
        f.write_str(")")
    }
}

// Shared signature tables. Order matters: ties resolve to the earlier entry.
const INT_OR_FLOAT_1: &[Signature] = &[Signature::new(I, &[I]), Signature::new(F, &[F])];
const FLOAT_1: &[Signature] = &[Signature::new(F, &[F])];
const INT_1: &[Signature] = &[Signature::new(I, &[I])];
const BOOL_1: &[Signature] = &[Signature::new(B, &[B])];
const FLOAT_TEST_1: &[Signature] = &[Signature::new(B, &[F])];
const ANY_1: &[Signature] = &[
    Signature::new(B, &[B]),
    Signature::new(I, &[I]),
    Signature::new(F, &[F]),
];

const INT_OR_FLOAT_2: &[Signature] = &[Signature::new(I, &[I, I]), Signature::new(F, &[F, F])];
const FLOAT_2: &[Signature] = &[Signature::new(F, &[F, F])];
const INT_2: &[Signature] = &[Signature::new(I, &[I, I])];
const BOOL_2: &[Signature] = &[Signature::new(B, &[B, B])];
const ORDER_2: &[Signature] = &[Signature::new(B, &[I, I]), Signature::new(B, &[F, F])];
const EQUALITY_2: &[Signature] = &[
    Signature::new(B, &[B, B]),
    Signature::new(B, &[I, I]),
    Signature::new(B, &[F, F]),
];

const SELECT_3: &[Signature] = &[
    Signature::new(B, &[B, B, B]),
    Signature::new(I, &[B, I, I]),
    Signature::new(F, &[B, F, F]),
];
const INT_OR_FLOAT_3: &[Signature] = &[
    Signature::new(I, &[I, I, I]),
    Signature::new(F, &[F, F, F]),
];
const FLOAT_3: &[Signature] = &[Signature::new(F, &[F, F, F])];

/// Behaviour shared by every operator kind.
pub trait Operator: Copy + fmt::Debug + Eq + std::hash::Hash {
    /// Number of operands.
    const ARITY: usize;

    /// Lower-case mnemonic used by printers.
    fn name(self) -> &'static str;

    /// Candidate signatures in preference order.
    fn signatures(self) -> &'static [Signature];

    /// Whether operand order is irrelevant to the result.
    fn is_commutative(self) -> bool {
        false
    }

    /// Whether the result is a scalar regardless of operand width.
    fn always_returns_single_element(self) -> bool {
        false
    }
}

/// Single-operand operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Neg,
    Abs,
    Sign,
    Floor,
    Ceil,
    Frac,
    Round,
    Trunc,
    Sqrt,
    Rsqrt,
    Rcp,
    Exp,
    Exp2,
    Log,
    Log2,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Saturate,
    Normalize,
    Length,
    BitNot,
    LogicalNot,
    All,
    Any,
    IsFinite,
    IsInf,
    IsNan,
    /// Register conversion; the target kind comes from the return type hint.
    Convert,
}

impl Operator for UnaryOp {
    const ARITY: usize = 1;

    fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "neg",
            UnaryOp::Abs => "abs",
            UnaryOp::Sign => "sign",
            UnaryOp::Floor => "floor",
            UnaryOp::Ceil => "ceil",
            UnaryOp::Frac => "frac",
            UnaryOp::Round => "round",
            UnaryOp::Trunc => "trunc",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Rsqrt => "rsqrt",
            UnaryOp::Rcp => "rcp",
            UnaryOp::Exp => "exp",
            UnaryOp::Exp2 => "exp2",
            UnaryOp::Log => "log",
            UnaryOp::Log2 => "log2",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Asin => "asin",
            UnaryOp::Acos => "acos",
            UnaryOp::Atan => "atan",
            UnaryOp::Saturate => "saturate",
            UnaryOp::Normalize => "normalize",
            UnaryOp::Length => "length",
            UnaryOp::BitNot => "bitnot",
            UnaryOp::LogicalNot => "not",
            UnaryOp::All => "all",
            UnaryOp::Any => "any",
            UnaryOp::IsFinite => "isfinite",
            UnaryOp::IsInf => "isinf",
            UnaryOp::IsNan => "isnan",
            UnaryOp::Convert => "convert",
        }
    }

    fn signatures(self) -> &'static [Signature] {
        match self {
            UnaryOp::Neg | UnaryOp::Abs | UnaryOp::Sign => INT_OR_FLOAT_1,
            UnaryOp::Floor
            | UnaryOp::Ceil
            | UnaryOp::Frac
            | UnaryOp::Round
            | UnaryOp::Trunc
            | UnaryOp::Sqrt
            | UnaryOp::Rsqrt
            | UnaryOp::Rcp
            | UnaryOp::Exp
            | UnaryOp::Exp2
            | UnaryOp::Log
            | UnaryOp::Log2
            | UnaryOp::Sin
            | UnaryOp::Cos
            | UnaryOp::Tan
            | UnaryOp::Asin
            | UnaryOp::Acos
            | UnaryOp::Atan
            | UnaryOp::Saturate
            | UnaryOp::Normalize
            | UnaryOp::Length => FLOAT_1,
            UnaryOp::BitNot => INT_1,
            UnaryOp::LogicalNot | UnaryOp::All | UnaryOp::Any => BOOL_1,
            UnaryOp::IsFinite | UnaryOp::IsInf | UnaryOp::IsNan => FLOAT_TEST_1,
            UnaryOp::Convert => ANY_1,
        }
    }

    fn always_returns_single_element(self) -> bool {
        matches!(self, UnaryOp::Length | UnaryOp::All | UnaryOp::Any)
    }
}

/// Two-operand operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Min,
    Max,
    Pow,
    Atan2,
    Step,
    Dot,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    LogicalAnd,
    LogicalOr,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
}

impl Operator for BinaryOp {
    const ARITY: usize = 2;

    fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Mod => "mod",
            BinaryOp::Min => "min",
            BinaryOp::Max => "max",
            BinaryOp::Pow => "pow",
            BinaryOp::Atan2 => "atan2",
            BinaryOp::Step => "step",
            BinaryOp::Dot => "dot",
            BinaryOp::Less => "lt",
            BinaryOp::Greater => "gt",
            BinaryOp::LessEqual => "le",
            BinaryOp::GreaterEqual => "ge",
            BinaryOp::Equal => "eq",
            BinaryOp::NotEqual => "ne",
            BinaryOp::LogicalAnd => "and",
            BinaryOp::LogicalOr => "or",
            BinaryOp::BitAnd => "bitand",
            BinaryOp::BitOr => "bitor",
            BinaryOp::BitXor => "bitxor",
            BinaryOp::ShiftLeft => "shl",
            BinaryOp::ShiftRight => "shr",
        }
    }

    fn signatures(self) -> &'static [Signature] {
        match self {
            BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Mod
            | BinaryOp::Min
            | BinaryOp::Max
            | BinaryOp::Dot => INT_OR_FLOAT_2,
            BinaryOp::Pow | BinaryOp::Atan2 | BinaryOp::Step => FLOAT_2,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEqual | BinaryOp::GreaterEqual => {
                ORDER_2
            }
            BinaryOp::Equal | BinaryOp::NotEqual => EQUALITY_2,
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr => BOOL_2,
            BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::ShiftLeft
            | BinaryOp::ShiftRight => INT_2,
        }
    }

    fn is_commutative(self) -> bool {
        matches!(
            self,
            BinaryOp::Add
                | BinaryOp::Mul
                | BinaryOp::Min
                | BinaryOp::Max
                | BinaryOp::BitAnd
                | BinaryOp::BitXor
                | BinaryOp::BitOr
                | BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::LogicalAnd
                | BinaryOp::LogicalOr
        )
    }

    fn always_returns_single_element(self) -> bool {
        matches!(self, BinaryOp::Dot)
    }
}

/// Three-operand operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TernaryOp {
    /// `cond ? a : b`
    Select,
    Clamp,
    Lerp,
    SmoothStep,
    /// `a * b + c`
    MulAdd,
}

impl Operator for TernaryOp {
    const ARITY: usize = 3;

    fn name(self) -> &'static str {
        match self {
            TernaryOp::Select => "select",
            TernaryOp::Clamp => "clamp",
            TernaryOp::Lerp => "lerp",
            TernaryOp::SmoothStep => "smoothstep",
            TernaryOp::MulAdd => "muladd",
        }
    }

    fn signatures(self) -> &'static [Signature] {
        match self {
            TernaryOp::Select => SELECT_3,
            TernaryOp::Clamp => INT_OR_FLOAT_3,
            TernaryOp::Lerp | TernaryOp::SmoothStep | TernaryOp::MulAdd => FLOAT_3,
        }
    }
}

macro_rules! impl_display_via_name {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }
        )*
    };
}

impl_display_via_name!(UnaryOp, BinaryOp, TernaryOp);
