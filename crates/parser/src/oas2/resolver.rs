//! Local `$ref` resolution
//!
//! References are parsed once into a [`Pointer`]. Pointers into
//! `definitions`, `parameters` and `responses` are direct map lookups on the
//! typed document; anything else walks the raw JSON tree.

use super::types::{Parameter, RefOr, Response, Schema, SwaggerSpec};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use swagger_ir_common::{IrError, Result};

/// Longest reference chain followed before giving up
const MAX_REFERENCE_HOPS: usize = 32;

/// Parsed `$ref` target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pointer {
    /// `#/definitions/<name>`
    Definition(String),
    /// `#/parameters/<name>`
    Parameter(String),
    /// `#/responses/<name>`
    Response(String),
    /// Any other local pointer, kept raw
    Other(String),
}

impl Pointer {
    pub fn parse(raw: &str) -> Result<Self> {
        let segments = segments(raw)?;

        Ok(match segments.as_slice() {
            [section, name] if section == "definitions" => Pointer::Definition(name.clone()),
            [section, name] if section == "parameters" => Pointer::Parameter(name.clone()),
            [section, name] if section == "responses" => Pointer::Response(name.clone()),
            _ => Pointer::Other(raw.to_string()),
        })
    }
}

/// Split a local JSON pointer into unescaped segments
fn segments(raw: &str) -> Result<Vec<String>> {
    let path = raw.strip_prefix('#').ok_or_else(|| IrError::ExternalReference {
        pointer: raw.to_string(),
    })?;

    Ok(path
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect())
}

fn unresolved(raw: &str) -> IrError {
    IrError::ReferenceResolution {
        pointer: raw.to_string(),
    }
}

/// Dereferences `$ref` pointers against one document
pub struct Resolver<'a> {
    spec: &'a SwaggerSpec,
    document: &'a Value,
}

impl<'a> Resolver<'a> {
    pub fn new(spec: &'a SwaggerSpec, document: &'a Value) -> Self {
        Self { spec, document }
    }

    /// Resolve a schema node, following reference chains
    pub fn schema<'n>(&'n self, node: &'n RefOr<Schema>) -> Result<Cow<'n, Schema>> {
        match node {
            RefOr::Item(schema) => Ok(Cow::Borrowed(schema)),
            RefOr::Reference { ref_path } => self.lookup_schema(ref_path, 0),
        }
    }

    /// Resolve the schema a raw `$ref` string points at
    pub fn schema_at(&self, raw: &str) -> Result<Cow<'a, Schema>> {
        self.lookup_schema(raw, 0)
    }

    pub fn parameter<'n>(&'n self, node: &'n RefOr<Parameter>) -> Result<Cow<'n, Parameter>> {
        match node {
            RefOr::Item(param) => Ok(Cow::Borrowed(param)),
            RefOr::Reference { ref_path } => match Pointer::parse(ref_path)? {
                Pointer::Parameter(name) => self
                    .spec
                    .parameters
                    .get(&name)
                    .map(Cow::Borrowed)
                    .ok_or_else(|| unresolved(ref_path)),
                _ => self.deserialize_at(ref_path).map(Cow::Owned),
            },
        }
    }

    pub fn response<'n>(&'n self, node: &'n RefOr<Response>) -> Result<Cow<'n, Response>> {
        match node {
            RefOr::Item(response) => Ok(Cow::Borrowed(response)),
            RefOr::Reference { ref_path } => match Pointer::parse(ref_path)? {
                Pointer::Response(name) => self
                    .spec
                    .responses
                    .get(&name)
                    .map(Cow::Borrowed)
                    .ok_or_else(|| unresolved(ref_path)),
                _ => self.deserialize_at(ref_path).map(Cow::Owned),
            },
        }
    }

    fn lookup_schema(&self, raw: &str, hops: usize) -> Result<Cow<'a, Schema>> {
        if hops >= MAX_REFERENCE_HOPS {
            return Err(IrError::DepthExceeded {
                limit: MAX_REFERENCE_HOPS,
                location: raw.to_string(),
            });
        }

        match Pointer::parse(raw)? {
            Pointer::Definition(name) => self
                .spec
                .definitions
                .get(&name)
                .map(Cow::Borrowed)
                .ok_or_else(|| unresolved(raw)),
            Pointer::Parameter(name) => {
                let param = self.spec.parameters.get(&name).ok_or_else(|| unresolved(raw))?;
                match &param.schema {
                    Some(node) if param.is_body() => self.follow(node, hops),
                    _ => Ok(Cow::Borrowed(&param.fields)),
                }
            }
            Pointer::Response(name) => {
                let response = self.spec.responses.get(&name).ok_or_else(|| unresolved(raw))?;
                match &response.schema {
                    Some(node) => self.follow(node, hops),
                    None => Ok(Cow::Owned(Schema::default())),
                }
            }
            Pointer::Other(_) => {
                let value = self.walk(raw)?;
                if let Some(next) = value.get("$ref").and_then(Value::as_str) {
                    return self.lookup_schema(next, hops + 1);
                }
                // Fragments that are not schema-shaped carry no rules
                let schema = serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                    tracing::debug!(pointer = raw, error = %e, "reference target is not a schema");
                    Schema::default()
                });
                Ok(Cow::Owned(schema))
            }
        }
    }

    fn follow(&self, node: &'a RefOr<Schema>, hops: usize) -> Result<Cow<'a, Schema>> {
        match node {
            RefOr::Item(schema) => Ok(Cow::Borrowed(schema)),
            RefOr::Reference { ref_path } => self.lookup_schema(ref_path, hops + 1),
        }
    }

    fn deserialize_at<T: DeserializeOwned>(&self, raw: &str) -> Result<T> {
        let value = self.walk(raw)?;
        serde_json::from_value(value.clone()).map_err(|e| {
            IrError::Parse(format!("Reference '{}' has an unexpected shape: {}", raw, e))
        })
    }

    /// Walk the raw document segment by segment
    fn walk(&self, raw: &str) -> Result<&'a Value> {
        let mut current = self.document;

        for segment in segments(raw)? {
            current = match current {
                Value::Object(map) => map.get(&segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
            .ok_or_else(|| unresolved(raw))?;
        }

        Ok(current)
    }
}
