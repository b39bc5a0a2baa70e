use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// DbFunctionError
///
/// Construction-time rejections of a mapped method.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum DbFunctionError {
    #[error("the method '{method}' is generic; generic methods are not supported as database functions")]
    GenericMethodNotSupported { method: String },

    #[error(
        "the method '{method}' is an instance method declared on '{declaring_type}'; instance methods must be declared on a type deriving from '{context_type}'"
    )]
    InvalidInstanceType {
        method: String,
        declaring_type: String,
        context_type: String,
    },

    #[error("the method '{method}' has return type '{return_type}', which cannot be mapped to a database function")]
    InvalidReturnType { method: String, return_type: String },
}

///
/// ModelError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ModelError {
    #[error("a database function named '{name}' is already registered")]
    DuplicateFunction { name: String },

    #[error("invalid model options: {0}")]
    InvalidOptions(String),
}

///
/// ErrorTree
///
/// Collects validation messages under an optional route so a validation pass
/// can report every problem at once.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: Vec<(String, Self)>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn add(&mut self, message: impl Display) {
        self.messages.push(message.to_string());
    }

    /// Attach a child tree under `route`; empty trees are dropped.
    pub fn merge_route(&mut self, route: impl Into<String>, tree: Self) {
        if !tree.is_empty() {
            self.children.push((route.into(), tree));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.iter().all(|(_, c)| c.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.iter().map(|(_, c)| c.len()).sum::<usize>()
    }

    /// Flatten to `route: message` lines.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        let mut out = self.messages.clone();
        for (route, child) in &self.children {
            out.extend(
                child
                    .flatten()
                    .into_iter()
                    .map(|msg| format!("{route}: {msg}")),
            );
        }

        out
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.flatten() {
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Push a formatted message onto an `ErrorTree`.
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }

    #[test]
    fn routed_messages_are_prefixed() {
        let mut child = ErrorTree::new();
        err!(child, "missing type mapping for '{}'", "System.Int32");

        let mut root = ErrorTree::new();
        root.add("top level");
        root.merge_route("Shop.Fn()", child);
        root.merge_route("Shop.Other()", ErrorTree::new());

        let err = root.result().expect_err("tree has messages");
        assert_eq!(err.len(), 2);
        assert_eq!(
            err.flatten(),
            vec![
                "top level".to_string(),
                "Shop.Fn(): missing type mapping for 'System.Int32'".to_string(),
            ]
        );
    }

    #[test]
    fn error_messages_name_the_method() {
        let err = DbFunctionError::GenericMethodNotSupported {
            method: "Shop.Fn()".to_string(),
        };

        assert!(err.to_string().contains("'Shop.Fn()'"));
    }
}
