//! Service intermediate representation
//!
//! Produced once per parse and never mutated afterwards. Backends
//! pattern-match on `isLocal` / `isArray` / `isUnknown`, so those flags keep
//! their serialized names.

use crate::protocol::Protocols;
use crate::rules::{ObjectValidationRule, ValidationRule};
use serde::{Deserialize, Serialize};

/// Root IR node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// PascalCase service title
    pub title: String,

    /// Major component of `info.version`
    pub major_version: u64,

    /// One interface per distinct first path segment, in discovery order
    pub interfaces: Vec<Interface>,

    /// Named definitions first, then anonymous types in discovery order
    pub types: Vec<Type>,

    /// Synthesized enums in discovery order
    pub enums: Vec<Enum>,
}

impl Service {
    /// Look up a type by name
    pub fn find_type(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Look up an enum by name
    pub fn find_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Look up an interface by name
    pub fn find_interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Every type descriptor reachable from a parameter, return type or property
    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        let from_methods = self
            .interfaces
            .iter()
            .flat_map(|i| i.methods.iter())
            .flat_map(|m| {
                m.parameters
                    .iter()
                    .map(|p| &p.ty)
                    .chain(m.return_type.iter())
            });
        let from_types = self
            .types
            .iter()
            .flat_map(|t| t.properties.iter().map(|p| &p.ty));

        from_methods.chain(from_types)
    }
}

/// A group of methods sharing the first path segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// Singularized first path segment
    pub name: String,

    pub methods: Vec<Method>,

    /// Wire-level metadata for router generators
    pub protocols: Protocols,
}

impl Interface {
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// One (path, verb) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// `operationId`, or the `UNNAMED` sentinel
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    pub parameters: Vec<Parameter>,

    /// Absent for void methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ReturnType>,
}

/// Summary and/or description text
///
/// Serializes as a plain string when only one of the two is present and as a
/// `[summary, description]` pair when both are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Lines(Vec<String>),
}

impl Description {
    /// Combine an optional summary with an optional description
    pub fn combine(summary: Option<&str>, description: Option<&str>) -> Option<Self> {
        match (summary, description) {
            (Some(s), Some(d)) => Some(Self::Lines(vec![s.to_string(), d.to_string()])),
            (Some(text), None) | (None, Some(text)) => Some(Self::Text(text.to_string())),
            (None, None) => None,
        }
    }

    /// Individual lines of text
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => vec![text.as_str()],
            Self::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

/// Shape shared by parameters, return types and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Primitive kind, local type/enum name, or raw `$ref` when unknown
    pub type_name: String,

    pub is_array: bool,

    /// References an entry of `Service.types` or `Service.enums`
    pub is_local: bool,

    pub is_unknown: bool,

    #[serde(default)]
    pub rules: Vec<ValidationRule>,
}

impl TypeDescriptor {
    /// Descriptor for a primitive kind such as `string` or `integer`
    pub fn primitive(type_name: impl Into<String>, rules: Vec<ValidationRule>) -> Self {
        Self {
            type_name: type_name.into(),
            is_array: false,
            is_local: false,
            is_unknown: false,
            rules,
        }
    }

    /// Descriptor pointing at a type or enum in the same service
    pub fn local(type_name: impl Into<String>, rules: Vec<ValidationRule>) -> Self {
        Self {
            type_name: type_name.into(),
            is_array: false,
            is_local: true,
            is_unknown: false,
            rules,
        }
    }

    /// Sentinel for schema shapes that are not modelled
    pub fn unknown(rules: Vec<ValidationRule>) -> Self {
        Self {
            type_name: "unknown".to_string(),
            is_array: false,
            is_local: false,
            is_unknown: true,
            rules,
        }
    }

    /// Whether the rule list starts with `required`
    pub fn is_required(&self) -> bool {
        matches!(self.rules.first(), Some(ValidationRule::Required))
    }

    /// Prepend the contextual `required` rule
    pub fn into_required(mut self, required: bool) -> Self {
        if required {
            self.rules.insert(0, ValidationRule::Required);
        }
        self
    }
}

pub type ReturnType = TypeDescriptor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub ty: TypeDescriptor,
}

/// Named definition or hoisted anonymous object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub properties: Vec<Property>,

    #[serde(default)]
    pub rules: Vec<ObjectValidationRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub ty: TypeDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<String>,
}
