//! Finalize-time checks over every registered function.

use crate::{
    err,
    error::ErrorTree,
    function::{DbFunctionRef, ReadDbFunction},
    model::Model,
};

/// Validate all functions, collecting every problem under the function's
/// model name.
pub fn validate_db_functions(model: &Model) -> Result<(), ErrorTree> {
    let mut errors = ErrorTree::new();

    for function in model.db_functions() {
        errors.merge_route(function.model_name(), validate_function(model, &function));
    }

    errors.result()
}

fn validate_function(model: &Model, function: &DbFunctionRef<'_>) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if function.name().is_empty() {
        err!(errs, "function name is empty");
    }

    if function.is_queryable() {
        if let Some(element) = function.return_type().queryable_element()
            && model.find_entity_type(&element.full_name).is_none()
        {
            err!(
                errs,
                "queryable result type '{}' is not a registered entity type",
                element.full_name
            );
        }
    } else if function.type_mapping().is_none() {
        err!(
            errs,
            "return type '{}' has no type mapping",
            function.return_type().full_name
        );
    }

    for parameter in function.parameters() {
        if parameter.type_mapping().is_none() {
            err!(
                errs,
                "parameter '{}' of type '{}' has no type mapping",
                parameter.name(),
                parameter.clr_type()
            );
        }
    }

    errs
}
