//! The mutable model: default schema, entity types, annotations and the
//! function registry.
//!
//! The model exclusively owns every registered `DbFunction`. Entries are kept
//! in a map sorted by model name so iteration order is stable.

pub mod annotation;
pub mod entity;

#[cfg(test)]
mod tests;

use crate::{
    Error,
    error::ModelError,
    function::{ConventionDbFunction, DbFunction, DbFunctionRef, ReadDbFunction},
    options::ModelOptions,
    source::ConfigurationSource,
    types::{MethodDescriptor, ParameterDescriptor, TypeDescriptor},
};
use annotation::{Annotations, DEFAULT_SCHEMA, QUERYABLE_FUNCTION_RESULT_TYPE};
use entity::EntityType;
use serde_json::Value;
use std::collections::{BTreeMap, btree_map::Entry};
use tracing::debug;

///
/// Model
///

#[derive(Debug)]
pub struct Model {
    context_type: String,
    annotations: Annotations,
    entity_types: BTreeMap<String, EntityType>,
    functions: BTreeMap<String, DbFunction>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ModelOptions::default())
    }

    #[must_use]
    pub fn with_options(options: ModelOptions) -> Self {
        let mut model = Self {
            context_type: options.context_type,
            annotations: Annotations::new(),
            entity_types: BTreeMap::new(),
            functions: BTreeMap::new(),
        };
        model.set_default_schema(options.default_schema);

        model
    }

    /// Full name of the type instance-mapped functions must derive from.
    #[must_use]
    pub fn context_type(&self) -> &str {
        &self.context_type
    }

    //
    // annotations
    //

    #[must_use]
    pub const fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }

    #[must_use]
    pub fn default_schema(&self) -> Option<&str> {
        self.annotations.get(DEFAULT_SCHEMA).and_then(Value::as_str)
    }

    pub fn set_default_schema(&mut self, schema: Option<String>) {
        match schema {
            Some(schema) => {
                self.annotations.set(DEFAULT_SCHEMA, Value::String(schema));
            }
            None => {
                self.annotations.remove(DEFAULT_SCHEMA);
            }
        }
    }

    //
    // entity types
    //

    #[must_use]
    pub fn find_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.get(name)
    }

    /// Register `name` as an entity type, or return the existing one.
    pub fn add_entity_type(&mut self, name: &str) -> &mut EntityType {
        self.entity_types
            .entry(name.to_string())
            .or_insert_with(|| EntityType::new(name))
    }

    pub fn remove_entity_type(&mut self, name: &str) -> Option<EntityType> {
        self.entity_types.remove(name)
    }

    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.entity_types.values()
    }

    // Register the element of a queryable return type. Repeat calls leave a
    // single entity type with the marker annotation.
    pub(crate) fn add_queryable_result_type(&mut self, name: &str) {
        let existed = self.entity_types.contains_key(name);
        let entity = self.add_entity_type(name);
        entity
            .annotations_mut()
            .set(QUERYABLE_FUNCTION_RESULT_TYPE, Value::Null);

        debug!(entity = name, existed, "registered queryable function result type");
    }

    //
    // functions
    //

    /// Insert `function` under its model name.
    ///
    /// A duplicate is rejected and dropped. Any queryable result type it
    /// registered at construction stays on the model; the `add_db_function_from_*`
    /// helpers check for duplicates before constructing.
    pub fn add_db_function(&mut self, mut function: DbFunction) -> Result<&mut DbFunction, ModelError> {
        match self.functions.entry(function.model_name().to_string()) {
            Entry::Occupied(entry) => Err(ModelError::DuplicateFunction {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(
                    function = entry.key().as_str(),
                    source = %function.configuration_source(),
                    "registered db function"
                );
                function.attach();

                Ok(entry.insert(function))
            }
        }
    }

    /// Build a function from `method` and register it.
    pub fn add_db_function_from_method(
        &mut self,
        method: MethodDescriptor,
        source: ConfigurationSource,
    ) -> Result<&mut DbFunction, Error> {
        let name = method.model_name();
        if self.functions.contains_key(&name) {
            return Err(ModelError::DuplicateFunction { name }.into());
        }
        let function = DbFunction::from_method(self, method, source)?;

        Ok(self.add_db_function(function)?)
    }

    /// Build a method-less function keyed by `name` and register it.
    pub fn add_db_function_from_name(
        &mut self,
        name: &str,
        return_type: TypeDescriptor,
        parameters: &[ParameterDescriptor],
        source: ConfigurationSource,
    ) -> Result<&mut DbFunction, Error> {
        if self.functions.contains_key(name) {
            return Err(ModelError::DuplicateFunction {
                name: name.to_string(),
            }
            .into());
        }
        let function = DbFunction::from_name(self, name, return_type, parameters, source)?;

        Ok(self.add_db_function(function)?)
    }

    #[must_use]
    pub fn find_db_function(&self, name: &str) -> Option<DbFunctionRef<'_>> {
        self.functions
            .get(name)
            .map(|function| DbFunctionRef::new(self, function))
    }

    #[must_use]
    pub fn find_db_function_by_method(&self, method: &MethodDescriptor) -> Option<DbFunctionRef<'_>> {
        self.find_db_function(&method.model_name())
    }

    pub fn find_db_function_mut(&mut self, name: &str) -> Option<&mut DbFunction> {
        self.functions.get_mut(name)
    }

    /// All functions in model-name order.
    pub fn db_functions(&self) -> impl Iterator<Item = DbFunctionRef<'_>> {
        self.functions
            .values()
            .map(|function| DbFunctionRef::new(self, function))
    }

    pub fn db_functions_mut(&mut self) -> impl Iterator<Item = &mut DbFunction> {
        self.functions.values_mut()
    }

    /// Remove and detach the function registered under `name`.
    pub fn remove_db_function(&mut self, name: &str) -> Option<DbFunction> {
        let mut function = self.functions.remove(name)?;
        function.detach();
        debug!(function = name, "removed db function");

        Some(function)
    }

    pub fn remove_db_function_by_method(&mut self, method: &MethodDescriptor) -> Option<DbFunction> {
        self.remove_db_function(&method.model_name())
    }
}
