//! Relational model metadata for user-defined database functions.
//!
//! A `Model` owns a registry of `DbFunction` entries, each mapping a method
//! (or a bare name) to a SQL function. Every configurable property records the
//! `ConfigurationSource` that set it, so conventions never override what user
//! code or attributes configured.

pub mod convention;
pub mod error;
pub mod function;
pub mod model;
pub mod options;
pub mod source;
pub mod sql;
pub mod types;
pub mod validate;

use crate::error::{DbFunctionError, ErrorTree, ModelError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        convention::{MappingTable, TypeMappingSource},
        function::{
            ConventionDbFunction, DbFunction, DbFunctionBuilder, DbFunctionParameter,
            DbFunctionRef, MutableDbFunction, ReadDbFunction,
        },
        model::{Model, entity::EntityType},
        options::ModelOptions,
        source::{ConfigurationSource, Configured},
        sql::{FunctionTranslation, SqlExpression},
        types::{DbFunctionAttribute, MethodDescriptor, TypeDescriptor, TypeMapping},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    DbFunctionError(#[from] DbFunctionError),

    #[error(transparent)]
    ModelError(#[from] ModelError),

    #[error("validation failed: {0}")]
    Validation(ErrorTree),
}
