use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Type that instance-mapped functions must be declared on unless overridden.
pub const DEFAULT_CONTEXT_TYPE: &str = "DbContext";

///
/// ModelOptions
///
/// Model-wide settings that functions consult when they have no explicit
/// configuration of their own.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelOptions {
    /// Schema used by functions that do not configure one.
    pub default_schema: Option<String>,

    /// Full name of the context base type.
    pub context_type: String,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            default_schema: None,
            context_type: DEFAULT_CONTEXT_TYPE.to_string(),
        }
    }
}

impl ModelOptions {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| ModelError::InvalidOptions(e.to_string()))?;

        if options.context_type.is_empty() {
            return Err(ModelError::InvalidOptions(
                "context_type must not be empty".to_string(),
            ));
        }

        Ok(options)
    }

    #[must_use]
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_context_type(mut self, context_type: impl Into<String>) -> Self {
        self.context_type = context_type.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let options = ModelOptions::from_json("{}").expect("empty options");

        assert_eq!(options, ModelOptions::default());
        assert_eq!(options.context_type, DEFAULT_CONTEXT_TYPE);
    }

    #[test]
    fn json_overrides_fields() {
        let options =
            ModelOptions::from_json(r#"{ "default_schema": "sales", "context_type": "Shop.Ctx" }"#)
                .expect("options");

        assert_eq!(options.default_schema.as_deref(), Some("sales"));
        assert_eq!(options.context_type, "Shop.Ctx");
    }

    #[test]
    fn unknown_and_empty_fields_are_rejected() {
        assert!(matches!(
            ModelOptions::from_json(r#"{ "schema": "x" }"#),
            Err(ModelError::InvalidOptions(_))
        ));
        assert!(matches!(
            ModelOptions::from_json(r#"{ "context_type": "" }"#),
            Err(ModelError::InvalidOptions(_))
        ));
    }
}
