//! User-defined database functions mapped to methods.
//!
//! A `DbFunction` is owned by the `Model` registry and implements all three
//! capability traits. The only read that needs the owning model, the default
//! schema fallback, goes through `DbFunctionRef`.

mod builder;
mod parameter;


pub use builder::DbFunctionBuilder;
pub use parameter::DbFunctionParameter;

use crate::{
    error::DbFunctionError,
    model::Model,
    source::{ConfigurationSource, Configured},
    sql::FunctionTranslation,
    types::{MethodDescriptor, ParameterDescriptor, TypeDescriptor, TypeMapping},
};
use std::fmt::{self, Display};

///
/// ReadDbFunction
///
/// Read-only view of a mapped function with every fallback resolved.
/// Implemented by `DbFunction` itself, so any convention or mutable handle
/// narrows to it.
///

pub trait ReadDbFunction {
    /// Composite registry key.
    fn model_name(&self) -> &str;

    /// Configured name, else the method name, else the model name.
    fn name(&self) -> &str;

    /// Schema configured on this entry, without any model default.
    fn configured_schema(&self) -> Option<&str>;

    /// Configured schema, else `default`. Built-ins never take the default.
    fn schema_or<'s>(&'s self, default: Option<&'s str>) -> Option<&'s str> {
        match self.configured_schema() {
            Some(schema) => Some(schema),
            None if self.is_built_in() => None,
            None => default,
        }
    }

    /// Resolved schema. A bare entry has no model default to fall back to;
    /// `DbFunctionRef` supplies the owning model's.
    fn schema(&self) -> Option<&str> {
        self.schema_or(None)
    }

    /// Configured store type, else the type mapping's store type.
    fn store_type(&self) -> Option<&str>;

    fn type_mapping(&self) -> Option<&TypeMapping>;

    fn translation(&self) -> Option<&FunctionTranslation>;

    fn is_queryable(&self) -> bool;

    fn is_scalar(&self) -> bool {
        !self.is_queryable()
    }

    fn is_built_in(&self) -> bool;

    fn method(&self) -> Option<&MethodDescriptor>;

    fn return_type(&self) -> &TypeDescriptor;

    fn parameters(&self) -> &[DbFunctionParameter];

    fn parameter(&self, name: &str) -> Option<&DbFunctionParameter> {
        self.parameters().iter().find(|p| p.name() == name)
    }
}

///
/// ConventionDbFunction
///
/// Source-aware configuration used by conventions and builders. Every setter
/// returns whether the write was applied.
///

pub trait ConventionDbFunction: ReadDbFunction {
    fn configuration_source(&self) -> ConfigurationSource;

    fn set_name(&mut self, name: Option<String>, source: ConfigurationSource) -> bool;
    fn set_schema(&mut self, schema: Option<String>, source: ConfigurationSource) -> bool;
    fn set_store_type(&mut self, store_type: Option<String>, source: ConfigurationSource) -> bool;
    fn set_type_mapping(
        &mut self,
        type_mapping: Option<TypeMapping>,
        source: ConfigurationSource,
    ) -> bool;
    fn set_translation(
        &mut self,
        translation: Option<FunctionTranslation>,
        source: ConfigurationSource,
    ) -> bool;
    fn set_built_in(&mut self, built_in: Option<bool>, source: ConfigurationSource) -> bool;

    fn name_configuration_source(&self) -> Option<ConfigurationSource>;
    fn schema_configuration_source(&self) -> Option<ConfigurationSource>;
    fn store_type_configuration_source(&self) -> Option<ConfigurationSource>;
    fn type_mapping_configuration_source(&self) -> Option<ConfigurationSource>;
    fn translation_configuration_source(&self) -> Option<ConfigurationSource>;
    fn built_in_configuration_source(&self) -> Option<ConfigurationSource>;

    /// Builder for this entry; `None` once the entry left its model.
    fn builder(&mut self) -> Option<DbFunctionBuilder<'_>>;
}

///
/// MutableDbFunction
///
/// User-code configuration. Writes are recorded as explicit.
///

pub trait MutableDbFunction: ConventionDbFunction {
    fn configure_name(&mut self, name: Option<String>) {
        self.set_name(name, ConfigurationSource::Explicit);
    }

    fn configure_schema(&mut self, schema: Option<String>) {
        self.set_schema(schema, ConfigurationSource::Explicit);
    }

    fn configure_store_type(&mut self, store_type: Option<String>) {
        self.set_store_type(store_type, ConfigurationSource::Explicit);
    }

    fn configure_type_mapping(&mut self, type_mapping: Option<TypeMapping>) {
        self.set_type_mapping(type_mapping, ConfigurationSource::Explicit);
    }

    fn configure_translation(&mut self, translation: Option<FunctionTranslation>) {
        self.set_translation(translation, ConfigurationSource::Explicit);
    }

    fn configure_built_in(&mut self, built_in: bool) {
        self.set_built_in(Some(built_in), ConfigurationSource::Explicit);
    }
}

///
/// DbFunction
///

#[derive(Debug)]
pub struct DbFunction {
    model_name: String,
    method: Option<MethodDescriptor>,
    return_type: TypeDescriptor,
    is_queryable: bool,
    parameters: Vec<DbFunctionParameter>,
    configuration_source: ConfigurationSource,

    name: Configured<String>,
    schema: Configured<String>,
    store_type: Configured<String>,
    type_mapping: Configured<TypeMapping>,
    translation: Configured<FunctionTranslation>,
    built_in: Configured<bool>,

    detached: bool,
}

impl DbFunction {
    /// Map `method` to a database function.
    ///
    /// A queryable return type registers its element as an entity type on
    /// `model` here, whether or not the entry is later added. Nothing touches
    /// the model if validation fails.
    pub fn from_method(
        model: &mut Model,
        method: MethodDescriptor,
        source: ConfigurationSource,
    ) -> Result<Self, DbFunctionError> {
        let return_type = validate_method(&method, model.context_type())?.clone();
        let parameters = method.parameters.iter().map(Into::into).collect();

        Ok(Self::build(
            model,
            method.model_name(),
            Some(method),
            return_type,
            parameters,
            source,
        ))
    }

    /// Map a function with no backing method, keyed by `name`.
    pub fn from_name(
        model: &mut Model,
        name: impl Into<String>,
        return_type: TypeDescriptor,
        parameters: &[ParameterDescriptor],
        source: ConfigurationSource,
    ) -> Result<Self, DbFunctionError> {
        let name = name.into();
        if return_type.is_void() {
            return Err(DbFunctionError::InvalidReturnType {
                method: name,
                return_type: return_type.full_name,
            });
        }
        let parameters = parameters.iter().map(Into::into).collect();

        Ok(Self::build(model, name, None, return_type, parameters, source))
    }

    fn build(
        model: &mut Model,
        model_name: String,
        method: Option<MethodDescriptor>,
        return_type: TypeDescriptor,
        parameters: Vec<DbFunctionParameter>,
        source: ConfigurationSource,
    ) -> Self {
        let is_queryable = match return_type.queryable_element() {
            Some(element) => {
                model.add_queryable_result_type(&element.full_name);
                true
            }
            None => false,
        };

        Self {
            model_name,
            method,
            return_type,
            is_queryable,
            parameters,
            configuration_source: source,
            name: Configured::unset(),
            schema: Configured::unset(),
            store_type: Configured::unset(),
            type_mapping: Configured::unset(),
            translation: Configured::unset(),
            built_in: Configured::unset(),
            detached: false,
        }
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut DbFunctionParameter> {
        self.parameters.iter_mut().find(|p| p.name() == name)
    }

    pub fn parameters_mut(&mut self) -> impl Iterator<Item = &mut DbFunctionParameter> {
        self.parameters.iter_mut()
    }

    /// Raise the entry's own source; it never drops.
    pub fn update_configuration_source(&mut self, source: ConfigurationSource) {
        self.configuration_source = self.configuration_source.max(source);
    }

    /// `false` after the entry was removed from its model, and for copies
    /// that have not been added yet.
    #[must_use]
    pub const fn is_in_model(&self) -> bool {
        !self.detached
    }

    pub(crate) fn attach(&mut self) {
        self.detached = false;
    }

    pub(crate) fn detach(&mut self) {
        self.detached = true;
    }
}

// A copy is not part of any model until it is added.
impl Clone for DbFunction {
    fn clone(&self) -> Self {
        Self {
            model_name: self.model_name.clone(),
            method: self.method.clone(),
            return_type: self.return_type.clone(),
            is_queryable: self.is_queryable,
            parameters: self.parameters.clone(),
            configuration_source: self.configuration_source,
            name: self.name.clone(),
            schema: self.schema.clone(),
            store_type: self.store_type.clone(),
            type_mapping: self.type_mapping.clone(),
            translation: self.translation.clone(),
            built_in: self.built_in.clone(),
            detached: true,
        }
    }
}

impl ReadDbFunction for DbFunction {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn name(&self) -> &str {
        self.name
            .get()
            .map(String::as_str)
            .or_else(|| self.method.as_ref().map(|m| m.name.as_str()))
            .unwrap_or(&self.model_name)
    }

    fn configured_schema(&self) -> Option<&str> {
        self.schema.get().map(String::as_str)
    }

    fn store_type(&self) -> Option<&str> {
        self.store_type
            .get()
            .map(String::as_str)
            .or_else(|| self.type_mapping.get().map(|m| m.store_type.as_str()))
    }

    fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.get()
    }

    fn translation(&self) -> Option<&FunctionTranslation> {
        self.translation.get()
    }

    fn is_queryable(&self) -> bool {
        self.is_queryable
    }

    fn is_built_in(&self) -> bool {
        self.built_in.get().copied().unwrap_or(false)
    }

    fn method(&self) -> Option<&MethodDescriptor> {
        self.method.as_ref()
    }

    fn return_type(&self) -> &TypeDescriptor {
        &self.return_type
    }

    fn parameters(&self) -> &[DbFunctionParameter] {
        &self.parameters
    }
}

impl ConventionDbFunction for DbFunction {
    fn configuration_source(&self) -> ConfigurationSource {
        self.configuration_source
    }

    fn set_name(&mut self, name: Option<String>, source: ConfigurationSource) -> bool {
        self.name.set(name, source)
    }

    fn set_schema(&mut self, schema: Option<String>, source: ConfigurationSource) -> bool {
        self.schema.set(schema, source)
    }

    fn set_store_type(&mut self, store_type: Option<String>, source: ConfigurationSource) -> bool {
        self.store_type.set(store_type, source)
    }

    fn set_type_mapping(
        &mut self,
        type_mapping: Option<TypeMapping>,
        source: ConfigurationSource,
    ) -> bool {
        self.type_mapping.set(type_mapping, source)
    }

    fn set_translation(
        &mut self,
        translation: Option<FunctionTranslation>,
        source: ConfigurationSource,
    ) -> bool {
        self.translation.set(translation, source)
    }

    fn set_built_in(&mut self, built_in: Option<bool>, source: ConfigurationSource) -> bool {
        self.built_in.set(built_in, source)
    }

    fn name_configuration_source(&self) -> Option<ConfigurationSource> {
        self.name.source()
    }

    fn schema_configuration_source(&self) -> Option<ConfigurationSource> {
        self.schema.source()
    }

    fn store_type_configuration_source(&self) -> Option<ConfigurationSource> {
        self.store_type.source()
    }

    fn type_mapping_configuration_source(&self) -> Option<ConfigurationSource> {
        self.type_mapping.source()
    }

    fn translation_configuration_source(&self) -> Option<ConfigurationSource> {
        self.translation.source()
    }

    fn built_in_configuration_source(&self) -> Option<ConfigurationSource> {
        self.built_in.source()
    }

    fn builder(&mut self) -> Option<DbFunctionBuilder<'_>> {
        if self.detached {
            None
        } else {
            Some(DbFunctionBuilder::new(self))
        }
    }
}

impl MutableDbFunction for DbFunction {}

impl Display for DbFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DbFunction: {} {}", self.return_type, self.model_name)?;
        if let Some(schema) = self.configured_schema() {
            write!(f, " Schema: {schema}")?;
        }
        if self.is_queryable {
            f.write_str(" Queryable")?;
        }

        Ok(())
    }
}

///
/// DbFunctionRef
///
/// Borrowed pairing of an entry and the model that owns it.
///

#[derive(Clone, Copy, Debug)]
pub struct DbFunctionRef<'a> {
    model: &'a Model,
    function: &'a DbFunction,
}

impl<'a> DbFunctionRef<'a> {
    pub(crate) const fn new(model: &'a Model, function: &'a DbFunction) -> Self {
        Self { model, function }
    }

    #[must_use]
    pub const fn function(&self) -> &'a DbFunction {
        self.function
    }

    #[must_use]
    pub const fn model(&self) -> &'a Model {
        self.model
    }
}

impl ReadDbFunction for DbFunctionRef<'_> {
    fn model_name(&self) -> &str {
        self.function.model_name()
    }

    fn name(&self) -> &str {
        self.function.name()
    }

    fn configured_schema(&self) -> Option<&str> {
        self.function.configured_schema()
    }

    fn schema(&self) -> Option<&str> {
        self.function.schema_or(self.model.default_schema())
    }

    fn store_type(&self) -> Option<&str> {
        self.function.store_type()
    }

    fn type_mapping(&self) -> Option<&TypeMapping> {
        self.function.type_mapping()
    }

    fn translation(&self) -> Option<&FunctionTranslation> {
        self.function.translation()
    }

    fn is_queryable(&self) -> bool {
        self.function.is_queryable()
    }

    fn is_built_in(&self) -> bool {
        self.function.is_built_in()
    }

    fn method(&self) -> Option<&MethodDescriptor> {
        self.function.method()
    }

    fn return_type(&self) -> &TypeDescriptor {
        self.function.return_type()
    }

    fn parameters(&self) -> &[DbFunctionParameter] {
        self.function.parameters()
    }
}

// Reject methods that cannot back a database function, in a fixed order:
// generic, then instance ownership, then return type.
fn validate_method<'m>(
    method: &'m MethodDescriptor,
    context_type: &str,
) -> Result<&'m TypeDescriptor, DbFunctionError> {
    if method.is_generic() {
        return Err(DbFunctionError::GenericMethodNotSupported {
            method: method.model_name(),
        });
    }

    if !method.is_static && !method.declaring_type.is_assignable_to(context_type) {
        return Err(DbFunctionError::InvalidInstanceType {
            method: method.model_name(),
            declaring_type: method.declaring_type.full_name.clone(),
            context_type: context_type.to_string(),
        });
    }

    match &method.return_type {
        Some(ty) if !ty.is_void() => Ok(ty),
        other => Err(DbFunctionError::InvalidReturnType {
            method: method.model_name(),
            return_type: other
                .as_ref()
                .map_or_else(|| "<none>".to_string(), |ty| ty.full_name.clone()),
        }),
    }
}
