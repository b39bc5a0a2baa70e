use crate::model::annotation::{Annotations, QUERYABLE_FUNCTION_RESULT_TYPE};

///
/// EntityType
///
/// Mapped entity known to the model. Only the parts the function registry
/// needs are tracked here.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityType {
    name: String,
    annotations: Annotations,
}

impl EntityType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }

    /// Returns `true` if this type is the result shape of a queryable function.
    #[must_use]
    pub fn is_queryable_function_result_type(&self) -> bool {
        self.annotations.contains(QUERYABLE_FUNCTION_RESULT_TYPE)
    }
}
