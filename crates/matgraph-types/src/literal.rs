//! Literal values carried by constant nodes.

use std::fmt;
use std::hash::{Hash, Hasher};

use derive_more::From;

use crate::data_type::{DataType, RegisterType};

/// A single scalar literal.
///
/// Floats compare and hash by their bit pattern so literals can live in hash
/// maps; `-0.0` and `0.0` are therefore distinct, and a NaN equals itself.
#[derive(Clone, Copy, Debug, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalar {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl Scalar {
    pub const fn register_type(self) -> RegisterType {
        match self {
            Scalar::Bool(_) => RegisterType::Bool,
            Scalar::Int(_) => RegisterType::Int,
            Scalar::Float(_) => RegisterType::Float,
        }
    }

    /// Convert to another register kind with shader cast semantics.
    ///
    /// Returns `None` only for `RegisterType::Unknown`, which has no value
    /// representation.
    pub fn convert(self, register: RegisterType) -> Option<Scalar> {
        let converted = match (register, self) {
            (RegisterType::Unknown, _) => return None,
            (RegisterType::Bool, Scalar::Bool(b)) => Scalar::Bool(b),
            (RegisterType::Bool, Scalar::Int(i)) => Scalar::Bool(i != 0),
            (RegisterType::Bool, Scalar::Float(f)) => Scalar::Bool(f != 0.0),
            (RegisterType::Int, Scalar::Bool(b)) => Scalar::Int(i32::from(b)),
            (RegisterType::Int, Scalar::Int(i)) => Scalar::Int(i),
            (RegisterType::Int, Scalar::Float(f)) => Scalar::Int(f as i32),
            (RegisterType::Float, Scalar::Bool(b)) => Scalar::Float(if b { 1.0 } else { 0.0 }),
            (RegisterType::Float, Scalar::Int(i)) => Scalar::Float(i as f32),
            (RegisterType::Float, Scalar::Float(f)) => Scalar::Float(f),
        };
        Some(converted)
    }

    /// Zero value of the given register kind.
    pub fn zero(register: RegisterType) -> Option<Scalar> {
        Scalar::Int(0).convert(register)
    }

    fn key(self) -> (u8, u32) {
        match self {
            Scalar::Bool(b) => (0, u32::from(b)),
            Scalar::Int(i) => (1, i as u32),
            Scalar::Float(f) => (2, f.to_bits()),
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// A scalar or vector literal of 1..=4 components.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    components: Vec<Scalar>,
}

impl Literal {
    /// Build a literal from its components.
    ///
    /// # Panics
    ///
    /// Panics if `components` is empty or has more than four entries.
    pub fn new(components: impl IntoIterator<Item = Scalar>) -> Self {
        let components: Vec<Scalar> = components.into_iter().collect();
        assert!(
            (1..=4).contains(&components.len()),
            "literal must have 1..=4 components, got {}",
            components.len()
        );
        Self { components }
    }

    pub fn components(&self) -> &[Scalar] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Convert this literal to `data_type`, splatting a single component
    /// across the target width.
    ///
    /// Returns `None` if `data_type` is unknown or the component count is
    /// neither 1 nor the target's element count.
    pub fn convert(&self, data_type: DataType) -> Option<Literal> {
        let register = data_type.register_type();
        let count = data_type.element_count();
        let source: Vec<Scalar> = match self.components.as_slice() {
            [single] => vec![*single; count],
            many if many.len() == count => many.to_vec(),
            _ => return None,
        };
        let components = source
            .into_iter()
            .map(|s| s.convert(register))
            .collect::<Option<Vec<_>>>()?;
        Some(Literal { components })
    }

    /// Data type described by the components, taken from the first one.
    pub fn data_type(&self) -> DataType {
        let register = self
            .components
            .first()
            .map_or(RegisterType::Unknown, |s| s.register_type());
        DataType::from_register(register, self.components.len())
    }
}

impl From<Scalar> for Literal {
    fn from(value: Scalar) -> Self {
        Literal {
            components: vec![value],
        }
    }
}

macro_rules! literal_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::from(Scalar::$variant(value))
                }
            }

            impl<const N: usize> From<[$ty; N]> for Literal {
                fn from(values: [$ty; N]) -> Self {
                    Literal::new(values.into_iter().map(Scalar::$variant))
                }
            }
        )*
    };
}

literal_from!(bool => Bool, i32 => Int, f32 => Float);

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.components.as_slice() {
            [single] => write!(f, "{single}"),
            many => {
                f.write_str("(")?;
                for (i, s) in many.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{s}")?;
                }
                f.write_str(")")
            }
        }
    }
}
