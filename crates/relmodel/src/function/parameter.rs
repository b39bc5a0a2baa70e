use crate::{
    source::{ConfigurationSource, Configured},
    types::{ParameterDescriptor, TypeMapping},
};

///
/// DbFunctionParameter
///
/// One formal parameter of a mapped function, in declaration order.
///

#[derive(Clone, Debug, PartialEq)]
pub struct DbFunctionParameter {
    name: String,
    clr_type: String,
    store_type: Configured<String>,
    type_mapping: Configured<TypeMapping>,
    propagates_nullability: Configured<bool>,
}

impl DbFunctionParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, clr_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clr_type: clr_type.into(),
            store_type: Configured::unset(),
            type_mapping: Configured::unset(),
            propagates_nullability: Configured::unset(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn clr_type(&self) -> &str {
        &self.clr_type
    }

    /// Configured store type, falling back to the type mapping's.
    #[must_use]
    pub fn store_type(&self) -> Option<&str> {
        self.store_type
            .get()
            .map(String::as_str)
            .or_else(|| self.type_mapping.get().map(|m| m.store_type.as_str()))
    }

    #[must_use]
    pub const fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.get()
    }

    #[must_use]
    pub fn propagates_nullability(&self) -> bool {
        self.propagates_nullability.get().copied().unwrap_or(false)
    }

    pub fn set_store_type(&mut self, store_type: Option<String>, source: ConfigurationSource) -> bool {
        self.store_type.set(store_type, source)
    }

    pub fn set_type_mapping(
        &mut self,
        type_mapping: Option<TypeMapping>,
        source: ConfigurationSource,
    ) -> bool {
        self.type_mapping.set(type_mapping, source)
    }

    pub fn set_propagates_nullability(
        &mut self,
        propagates: Option<bool>,
        source: ConfigurationSource,
    ) -> bool {
        self.propagates_nullability.set(propagates, source)
    }

    #[must_use]
    pub const fn store_type_configuration_source(&self) -> Option<ConfigurationSource> {
        self.store_type.source()
    }

    #[must_use]
    pub const fn type_mapping_configuration_source(&self) -> Option<ConfigurationSource> {
        self.type_mapping.source()
    }

    #[must_use]
    pub const fn propagates_nullability_configuration_source(
        &self,
    ) -> Option<ConfigurationSource> {
        self.propagates_nullability.source()
    }
}

impl From<&ParameterDescriptor> for DbFunctionParameter {
    fn from(descriptor: &ParameterDescriptor) -> Self {
        Self::new(&descriptor.name, &descriptor.ty.full_name)
    }
}
