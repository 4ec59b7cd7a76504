//! Stream and function descriptors supplied by the upstream builder.

use std::collections::HashMap;

use cranelift_entity::PrimaryMap;
use matgraph_types::{DataType, RegisterType};

use crate::refs::FunctionRef;

/// A named external input or output stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamDescriptor {
    pub name: String,
    pub data_type: DataType,
}

impl StreamDescriptor {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// One overload of a named function.
///
/// Arguments past `min_required_inputs` are optional: a call site may omit
/// them, and any arguments beyond `inputs.len()` are dropped once this
/// overload is selected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDescriptor {
    pub name: String,
    pub inputs: Vec<RegisterType>,
    pub output: RegisterType,
    pub min_required_inputs: usize,
}

impl FunctionDescriptor {
    /// Descriptor whose inputs are all required.
    pub fn new(
        name: impl Into<String>,
        inputs: impl IntoIterator<Item = RegisterType>,
        output: RegisterType,
    ) -> Self {
        let inputs: Vec<RegisterType> = inputs.into_iter().collect();
        Self {
            name: name.into(),
            min_required_inputs: inputs.len(),
            inputs,
            output,
        }
    }

    /// Make trailing inputs past `count` optional.
    pub fn with_min_required_inputs(mut self, count: usize) -> Self {
        self.min_required_inputs = count.min(self.inputs.len());
        self
    }
}

/// Deduplicating descriptor interner. Equal descriptors share one `FunctionRef`.
#[derive(Debug, Default)]
pub struct FunctionInterner {
    functions: PrimaryMap<FunctionRef, FunctionDescriptor>,
    dedup: HashMap<FunctionDescriptor, FunctionRef>,
}

impl FunctionInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a descriptor, returning the existing ref if the data matches.
    pub fn intern(&mut self, descriptor: FunctionDescriptor) -> FunctionRef {
        if let Some(&existing) = self.dedup.get(&descriptor) {
            return existing;
        }
        let r = self.functions.push(descriptor.clone());
        self.dedup.insert(descriptor, r);
        r
    }

    pub fn get(&self, r: FunctionRef) -> &FunctionDescriptor {
        &self.functions[r]
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
