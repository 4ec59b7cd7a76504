//! Register and data types.
//!
//! A [`RegisterType`] is the scalar element kind of a value. A [`DataType`]
//! adds the vector width (1..=4) and packs both into one byte:
//!
//! ```text
//! bits = (register << 2) | (element_count - 1)
//! ```
//!
//! so the register kind is always `bits >> 2`.

use std::fmt;

/// Number of [`RegisterType`] variants, `Unknown` included.
pub const REGISTER_TYPE_COUNT: usize = 4;

/// Scalar element kind of a value, independent of vector width.
///
/// Variants are ordered from narrowest to widest; overload resolution relies
/// on the discriminant distance between two kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum RegisterType {
    #[default]
    Unknown = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
}

impl RegisterType {
    const ALL: [RegisterType; REGISTER_TYPE_COUNT] = [
        RegisterType::Unknown,
        RegisterType::Bool,
        RegisterType::Int,
        RegisterType::Float,
    ];

    /// Decode from the packed representation. Out-of-range values map to `Unknown`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => RegisterType::Bool,
            2 => RegisterType::Int,
            3 => RegisterType::Float,
            _ => RegisterType::Unknown,
        }
    }

    pub const fn is_known(self) -> bool {
        !matches!(self, RegisterType::Unknown)
    }

    /// Shader spelling of the scalar type.
    pub const fn name(self) -> &'static str {
        match self {
            RegisterType::Unknown => "unknown",
            RegisterType::Bool => "bool",
            RegisterType::Int => "int",
            RegisterType::Float => "float",
        }
    }

    /// All register types, `Unknown` first.
    pub fn all() -> impl Iterator<Item = RegisterType> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for RegisterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register type together with a vector width of 1..=4.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct DataType(u8);

impl DataType {
    pub const UNKNOWN: DataType = DataType(0);

    pub const BOOL: DataType = DataType::from_register(RegisterType::Bool, 1);
    pub const BOOL2: DataType = DataType::from_register(RegisterType::Bool, 2);
    pub const BOOL3: DataType = DataType::from_register(RegisterType::Bool, 3);
    pub const BOOL4: DataType = DataType::from_register(RegisterType::Bool, 4);
    pub const INT: DataType = DataType::from_register(RegisterType::Int, 1);
    pub const INT2: DataType = DataType::from_register(RegisterType::Int, 2);
    pub const INT3: DataType = DataType::from_register(RegisterType::Int, 3);
    pub const INT4: DataType = DataType::from_register(RegisterType::Int, 4);
    pub const FLOAT: DataType = DataType::from_register(RegisterType::Float, 1);
    pub const FLOAT2: DataType = DataType::from_register(RegisterType::Float, 2);
    pub const FLOAT3: DataType = DataType::from_register(RegisterType::Float, 3);
    pub const FLOAT4: DataType = DataType::from_register(RegisterType::Float, 4);

    /// Build a data type from its register kind and element count.
    ///
    /// `element_count` is clamped to 1..=4. An `Unknown` register always
    /// yields [`DataType::UNKNOWN`] regardless of the count.
    pub const fn from_register(register: RegisterType, element_count: usize) -> Self {
        if !register.is_known() {
            return DataType::UNKNOWN;
        }
        let count = if element_count == 0 {
            1
        } else if element_count > 4 {
            4
        } else {
            element_count
        };
        DataType(((register as u8) << 2) | (count as u8 - 1))
    }

    pub const fn register_type(self) -> RegisterType {
        RegisterType::from_bits(self.0 >> 2)
    }

    /// Vector width, 1..=4. `Unknown` reports 1.
    pub const fn element_count(self) -> usize {
        (self.0 & 0b11) as usize + 1
    }

    pub const fn is_known(self) -> bool {
        self.register_type().is_known()
    }

    pub const fn is_scalar(self) -> bool {
        self.element_count() == 1
    }

    /// Same register kind with a different width.
    pub const fn with_element_count(self, element_count: usize) -> Self {
        DataType::from_register(self.register_type(), element_count)
    }

    /// Raw packed byte.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl From<RegisterType> for DataType {
    fn from(register: RegisterType) -> Self {
        DataType::from_register(register, 1)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let register = self.register_type();
        if !register.is_known() || self.is_scalar() {
            return f.write_str(register.name());
        }
        write!(f, "{}{}", register.name(), self.element_count())
    }
}

impl fmt::Debug for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataType({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_keeps_register_in_high_bits() {
        for register in RegisterType::all().filter(|r| r.is_known()) {
            for count in 1..=4 {
                let ty = DataType::from_register(register, count);
                assert_eq!(ty.bits() >> 2, register as u8);
                assert_eq!(ty.register_type(), register);
                assert_eq!(ty.element_count(), count);
            }
        }
    }

    #[test]
    fn unknown_is_zero() {
        assert_eq!(DataType::UNKNOWN.bits(), 0);
        assert_eq!(DataType::default(), DataType::UNKNOWN);
        assert_eq!(
            DataType::from_register(RegisterType::Unknown, 3),
            DataType::UNKNOWN
        );
        assert!(!DataType::UNKNOWN.is_known());
        assert_eq!(DataType::UNKNOWN.element_count(), 1);
    }

    #[test]
    fn register_order_is_widening_order() {
        assert!(RegisterType::Unknown < RegisterType::Bool);
        assert!(RegisterType::Bool < RegisterType::Int);
        assert!(RegisterType::Int < RegisterType::Float);
    }

    #[test]
    fn with_element_count_keeps_register() {
        assert_eq!(DataType::INT.with_element_count(3), DataType::INT3);
        assert_eq!(DataType::FLOAT4.with_element_count(1), DataType::FLOAT);
    }

    #[test]
    fn display_uses_shader_spelling() {
        assert_eq!(DataType::FLOAT3.to_string(), "float3");
        assert_eq!(DataType::INT.to_string(), "int");
        assert_eq!(DataType::BOOL2.to_string(), "bool2");
        assert_eq!(DataType::UNKNOWN.to_string(), "unknown");
    }
}
