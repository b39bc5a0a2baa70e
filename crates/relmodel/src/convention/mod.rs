//! Conventions that fill in function configuration the user did not provide.
//!
//! Conventions write through `DbFunctionBuilder`, so anything configured
//! explicitly or by an attribute is left alone.

mod mapping;

pub use mapping::{MappingTable, TypeMappingSource};

use crate::{
    Error,
    function::{ConventionDbFunction, ReadDbFunction},
    model::Model,
    source::ConfigurationSource,
    validate::validate_db_functions,
};
use tracing::debug;

/// Apply each method's `DbFunctionAttribute` name and schema as data
/// annotations. Returns the number of functions that carried an attribute.
pub fn apply_db_function_attributes(model: &mut Model) -> usize {
    let mut applied = 0;
    for function in model.db_functions_mut() {
        if apply_attribute(function) {
            applied += 1;
        }
    }

    applied
}

fn apply_attribute(function: &mut dyn ConventionDbFunction) -> bool {
    let Some(attribute) = function.method().and_then(|m| m.attribute.clone()) else {
        return false;
    };
    let Some(mut builder) = function.builder() else {
        return false;
    };

    if let Some(name) = attribute.name {
        builder.has_name(Some(name), ConfigurationSource::DataAnnotation);
    }
    if let Some(schema) = attribute.schema {
        builder.has_schema(Some(schema), ConfigurationSource::DataAnnotation);
    }

    debug!(function = builder.metadata().model_name(), "applied db function attribute");

    true
}

/// Resolve missing type mappings for scalar return types and for every
/// parameter. Returns the number of mappings stored.
pub fn apply_type_mappings(model: &mut Model, mappings: &dyn TypeMappingSource) -> usize {
    let mut resolved = 0;

    for function in model.db_functions_mut() {
        if function.is_scalar() && function.type_mapping().is_none() {
            let mapping =
                mappings.resolve(function.store_type(), &function.return_type().full_name);

            if let Some(mapping) = mapping
                && let Some(mut builder) = function.builder()
                && builder
                    .has_type_mapping(Some(mapping), ConfigurationSource::Convention)
                    .is_some()
            {
                resolved += 1;
            }
        }

        for parameter in function.parameters_mut() {
            if parameter.type_mapping().is_some() {
                continue;
            }
            let Some(mapping) = mappings.resolve(parameter.store_type(), parameter.clr_type())
            else {
                continue;
            };
            if parameter.set_type_mapping(Some(mapping), ConfigurationSource::Convention) {
                resolved += 1;
            }
        }
    }

    debug!(resolved, "applied db function type mappings");

    resolved
}

/// Run every function convention, then validate the result.
pub fn finalize_model(model: &mut Model, mappings: &dyn TypeMappingSource) -> Result<(), Error> {
    apply_db_function_attributes(model);
    apply_type_mappings(model, mappings);

    validate_db_functions(model).map_err(Error::Validation)
}
