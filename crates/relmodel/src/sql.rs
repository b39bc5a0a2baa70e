//! Opaque SQL expression values exchanged with a function translation.
//!
//! The model never builds or renders these; it only stores the callback that
//! maps argument expressions to a result expression.

use crate::types::TypeMapping;
use std::{fmt, rc::Rc};

///
/// SqlExpression
///

#[derive(Clone, Debug, PartialEq)]
pub enum SqlExpression {
    Column {
        table: Option<String>,
        name: String,
    },
    Constant(serde_json::Value),
    Fragment(String),
    Function {
        schema: Option<String>,
        name: String,
        arguments: Vec<Self>,
        type_mapping: Option<TypeMapping>,
    },
}

impl SqlExpression {
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn function(name: impl Into<String>, arguments: Vec<Self>) -> Self {
        Self::Function {
            schema: None,
            name: name.into(),
            arguments,
            type_mapping: None,
        }
    }
}

type TranslateFn = dyn Fn(&[SqlExpression]) -> SqlExpression;

///
/// FunctionTranslation
///
/// Shared handle to a custom translation callback. Two handles are equal only
/// when they point at the same callback.
///

#[derive(Clone)]
pub struct FunctionTranslation(Rc<TranslateFn>);

impl FunctionTranslation {
    pub fn new(f: impl Fn(&[SqlExpression]) -> SqlExpression + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[must_use]
    pub fn translate(&self, arguments: &[SqlExpression]) -> SqlExpression {
        (self.0)(arguments)
    }
}

impl PartialEq for FunctionTranslation {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FunctionTranslation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FunctionTranslation")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}
