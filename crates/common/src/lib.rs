//! Common types and utilities for swagger-ir
//!
//! This crate contains the service intermediate representation (IR) produced
//! by the parser, the validation-rule vocabulary attached to it, the HTTP
//! protocol metadata consumed by router generators, and the shared error type.
//!
//! The IR is plain data: every type derives `Serialize`/`Deserialize` and the
//! serialized field names are the contract towards code-generation backends.

mod ir;
mod protocol;
mod rules;

pub use ir::{
    Description, Enum, Interface, Method, Parameter, Property, ReturnType, Service, Type,
    TypeDescriptor,
};
pub use protocol::{
    CollectionFormat, HttpVerb, MethodSpec, ParameterLocation, ParameterSpec, PathSpec, Protocols,
};
pub use rules::{ObjectValidationRule, ValidationRule};

use thiserror::Error;

/// Errors that can occur while building the IR
#[derive(Error, Debug)]
pub enum IrError {
    #[error("Parse error: {0}")]
    Parse(String),

    /// A local `$ref` names a segment that does not exist in the document
    #[error("Unable to resolve reference '{pointer}'")]
    ReferenceResolution { pointer: String },

    #[error("External reference '{pointer}' is not supported")]
    ExternalReference { pointer: String },

    /// Nesting (or a reference cycle) went past the configured limit
    #[error("Schema nesting exceeds the maximum depth of {limit} at '{location}'")]
    DepthExceeded { limit: usize, location: String },

    #[error("Invalid semantic version '{version}': {source}")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for IR operations
pub type Result<T> = std::result::Result<T, IrError>;
