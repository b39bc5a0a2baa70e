//! Reflected method and type descriptors consumed by the function registry,
//! plus the store type mapping produced by an external resolver.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Full name used for the void type.
pub const VOID_TYPE_NAME: &str = "System.Void";

///
/// TypeKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TypeKind {
    Void,
    Value,
    /// Composable result set of `element`.
    Queryable { element: Box<TypeDescriptor> },
}

///
/// TypeDescriptor
///
/// Minimal reflected view of a type: its full name, the full names of the
/// types it derives from, and its shape.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeDescriptor {
    pub full_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<String>,

    pub kind: TypeKind,
}

impl TypeDescriptor {
    #[must_use]
    pub fn value(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            bases: Vec::new(),
            kind: TypeKind::Value,
        }
    }

    #[must_use]
    pub fn void() -> Self {
        Self {
            full_name: VOID_TYPE_NAME.to_string(),
            bases: Vec::new(),
            kind: TypeKind::Void,
        }
    }

    #[must_use]
    pub fn queryable(element: Self) -> Self {
        Self {
            full_name: format!("IQueryable<{}>", element.full_name),
            bases: Vec::new(),
            kind: TypeKind::Queryable {
                element: Box::new(element),
            },
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Void)
    }

    /// Element type when this is a queryable-of-T shape.
    #[must_use]
    pub fn queryable_element(&self) -> Option<&Self> {
        match &self.kind {
            TypeKind::Queryable { element } => Some(element),
            _ => None,
        }
    }

    /// Returns `true` if a value of this type can be used where `target` is
    /// expected, i.e. it is `target` or derives from it.
    #[must_use]
    pub fn is_assignable_to(&self, target: &str) -> bool {
        self.full_name == target || self.bases.iter().any(|base| base == target)
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

///
/// ParameterDescriptor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl ParameterDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

///
/// DbFunctionAttribute
///
/// Name and schema declared on the method itself.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DbFunctionAttribute {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub schema: Option<String>,
}

///
/// MethodDescriptor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MethodDescriptor {
    pub declaring_type: TypeDescriptor,
    pub name: String,
    pub is_static: bool,

    #[serde(default)]
    pub generic_arguments: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,

    /// `None` when the method has no declared return type.
    pub return_type: Option<TypeDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<DbFunctionAttribute>,
}

impl MethodDescriptor {
    /// Static method returning `return_type`, with no parameters.
    #[must_use]
    pub fn new_static(
        declaring_type: TypeDescriptor,
        name: impl Into<String>,
        return_type: TypeDescriptor,
    ) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            is_static: true,
            generic_arguments: Vec::new(),
            parameters: Vec::new(),
            return_type: Some(return_type),
            attribute: None,
        }
    }

    /// Instance method returning `return_type`, with no parameters.
    #[must_use]
    pub fn new_instance(
        declaring_type: TypeDescriptor,
        name: impl Into<String>,
        return_type: TypeDescriptor,
    ) -> Self {
        Self {
            is_static: false,
            ..Self::new_static(declaring_type, name, return_type)
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, ty));
        self
    }

    #[must_use]
    pub fn with_generic_argument(mut self, name: impl Into<String>) -> Self {
        self.generic_arguments.push(name.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: DbFunctionAttribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_arguments.is_empty()
    }

    /// Composite identity: `<declaringType>.<name>(<paramType>,...)`.
    #[must_use]
    pub fn model_name(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.ty.full_name.as_str())
            .collect::<Vec<_>>()
            .join(",");

        format!("{}.{}({params})", self.declaring_type.full_name, self.name)
    }
}

impl Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model_name())
    }
}

///
/// TypeMapping
///
/// Resolved mapping between a CLR type and a store type. Produced by a
/// `TypeMappingSource`; the model only stores it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeMapping {
    pub clr_type: String,
    pub store_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl TypeMapping {
    #[must_use]
    pub fn new(clr_type: impl Into<String>, store_type: impl Into<String>) -> Self {
        Self {
            clr_type: clr_type.into(),
            store_type: store_type.into(),
            size: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}
