use crate::{
    function::{ConventionDbFunction, DbFunction, DbFunctionParameter, ReadDbFunction},
    source::ConfigurationSource,
    sql::FunctionTranslation,
    types::TypeMapping,
};
use tracing::trace;

///
/// DbFunctionBuilder
///
/// Convention-facing builder over one attached entry.
///
/// Each `has_*` call returns `None` when a higher-precedence configuration
/// already owns the property, so calls can be chained with `?`.
///

#[derive(Debug)]
pub struct DbFunctionBuilder<'a> {
    function: &'a mut DbFunction,
}

impl<'a> DbFunctionBuilder<'a> {
    pub(crate) fn new(function: &'a mut DbFunction) -> Self {
        Self { function }
    }

    #[must_use]
    pub fn metadata(&self) -> &DbFunction {
        &*self.function
    }

    pub fn has_name(
        &mut self,
        name: Option<String>,
        source: ConfigurationSource,
    ) -> Option<&mut Self> {
        if !self.can_set_name(name.as_deref(), source) {
            self.rejected("name", source);
            return None;
        }
        self.function.set_name(name, source);

        Some(self)
    }

    #[must_use]
    pub fn can_set_name(&self, name: Option<&str>, source: ConfigurationSource) -> bool {
        source.overrides(self.function.name_configuration_source())
            || self.function.name.get().map(String::as_str) == name
    }

    pub fn has_schema(
        &mut self,
        schema: Option<String>,
        source: ConfigurationSource,
    ) -> Option<&mut Self> {
        if !self.can_set_schema(schema.as_deref(), source) {
            self.rejected("schema", source);
            return None;
        }
        self.function.set_schema(schema, source);

        Some(self)
    }

    #[must_use]
    pub fn can_set_schema(&self, schema: Option<&str>, source: ConfigurationSource) -> bool {
        source.overrides(self.function.schema_configuration_source())
            || self.function.configured_schema() == schema
    }

    pub fn has_store_type(
        &mut self,
        store_type: Option<String>,
        source: ConfigurationSource,
    ) -> Option<&mut Self> {
        if !self.can_set_store_type(store_type.as_deref(), source) {
            self.rejected("store_type", source);
            return None;
        }
        self.function.set_store_type(store_type, source);

        Some(self)
    }

    #[must_use]
    pub fn can_set_store_type(&self, store_type: Option<&str>, source: ConfigurationSource) -> bool {
        source.overrides(self.function.store_type_configuration_source())
            || self.function.store_type.get().map(String::as_str) == store_type
    }

    pub fn has_type_mapping(
        &mut self,
        type_mapping: Option<TypeMapping>,
        source: ConfigurationSource,
    ) -> Option<&mut Self> {
        if !self
            .function
            .type_mapping
            .can_set(type_mapping.as_ref(), source)
        {
            self.rejected("type_mapping", source);
            return None;
        }
        self.function.set_type_mapping(type_mapping, source);

        Some(self)
    }

    #[must_use]
    pub fn can_set_type_mapping(
        &self,
        type_mapping: Option<&TypeMapping>,
        source: ConfigurationSource,
    ) -> bool {
        self.function.type_mapping.can_set(type_mapping, source)
    }

    pub fn has_translation(
        &mut self,
        translation: Option<FunctionTranslation>,
        source: ConfigurationSource,
    ) -> Option<&mut Self> {
        if !self
            .function
            .translation
            .can_set(translation.as_ref(), source)
        {
            self.rejected("translation", source);
            return None;
        }
        self.function.set_translation(translation, source);

        Some(self)
    }

    #[must_use]
    pub fn can_set_translation(
        &self,
        translation: Option<&FunctionTranslation>,
        source: ConfigurationSource,
    ) -> bool {
        self.function.translation.can_set(translation, source)
    }

    pub fn is_built_in(&mut self, built_in: bool, source: ConfigurationSource) -> Option<&mut Self> {
        if !self.can_set_built_in(built_in, source) {
            self.rejected("built_in", source);
            return None;
        }
        self.function.set_built_in(Some(built_in), source);

        Some(self)
    }

    #[must_use]
    pub fn can_set_built_in(&self, built_in: bool, source: ConfigurationSource) -> bool {
        self.function.built_in.can_set(Some(&built_in), source)
    }

    /// Mutable access to a parameter by name for per-parameter configuration.
    pub fn parameter(&mut self, name: &str) -> Option<&mut DbFunctionParameter> {
        self.function.parameter_mut(name)
    }

    fn rejected(&self, property: &'static str, source: ConfigurationSource) {
        trace!(
            function = self.function.model_name(),
            property,
            %source,
            "configuration rejected by higher-precedence source"
        );
    }
}
