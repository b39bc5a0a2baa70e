use serde_json::Value;
use std::collections::BTreeMap;

/// Model annotation holding the default schema name.
pub const DEFAULT_SCHEMA: &str = "Relational:DefaultSchema";

/// Entity annotation marking a type produced by a queryable function.
pub const QUERYABLE_FUNCTION_RESULT_TYPE: &str = "Relational:QueryableFunctionResultType";

///
/// Annotations
///
/// Sorted name/value store shared by the model and its entity types.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Annotations(BTreeMap<String, Value>);

impl Annotations {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set `name`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
