//! Swagger 2.0 type definitions
//!
//! Only the fields that feed the service IR are modelled. Maps use
//! `IndexMap` because document key order decides interface, method, property
//! and definition order in the output.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::{Number, Value};
use swagger_ir_common::{CollectionFormat, HttpVerb, ParameterLocation};

/// Swagger document root
#[derive(Debug, Clone, Deserialize)]
pub struct SwaggerSpec {
    /// Swagger version (should be "2.0")
    #[serde(default)]
    pub swagger: Option<String>,

    /// API metadata
    pub info: Info,

    /// API paths (endpoints)
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Named schemas, referenced via `#/definitions/<name>`
    #[serde(default)]
    pub definitions: IndexMap<String, Schema>,

    /// Shared parameters, referenced via `#/parameters/<name>`
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    /// Shared responses, referenced via `#/responses/<name>`
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// API information
#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    pub title: String,

    /// Semantic version string
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Inline value or `{ "$ref": "#/..." }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Item(T),
}

impl<T> RefOr<T> {
    pub fn reference(&self) -> Option<&str> {
        match self {
            RefOr::Reference { ref_path } => Some(ref_path),
            RefOr::Item(_) => None,
        }
    }
}

/// Operations for one path, in document order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct PathItem {
    /// Parameters shared by every operation under this path
    pub parameters: Vec<RefOr<Parameter>>,

    pub operations: Vec<(HttpVerb, Operation)>,
}

impl TryFrom<IndexMap<String, Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(fields: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let mut item = PathItem::default();

        for (key, value) in fields {
            if key == "parameters" {
                item.parameters = serde_json::from_value(value)?;
            } else if key == "$ref" {
                return Err(serde_json::Error::custom(format!(
                    "path item references are not supported: {}",
                    value
                )));
            } else if let Some(verb) = HttpVerb::from_key(&key) {
                let operation = serde_json::from_value(value).map_err(|e| {
                    serde_json::Error::custom(format!("invalid '{}' operation: {}", verb, e))
                })?;
                item.operations.push((verb, operation));
            }
        }

        Ok(item)
    }
}

/// HTTP operation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,

    /// Keyed by status code or `default`
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
}

/// Parameter definition
///
/// Non-body parameters carry their schema keywords inline, so those are
/// flattened into `fields`. Body parameters use `schema` instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Body parameters only
    #[serde(default)]
    pub schema: Option<RefOr<Schema>>,

    #[serde(default)]
    pub collection_format: Option<CollectionFormat>,

    #[serde(flatten)]
    pub fields: Schema,
}

impl Parameter {
    pub fn is_body(&self) -> bool {
        self.location == ParameterLocation::Body
    }
}

/// Response definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub schema: Option<RefOr<Schema>>,
}

/// Declared `type` of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Array,
    Object,
    /// `formData` uploads
    File,
    #[serde(other)]
    Unrecognized,
}

impl SchemaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Array => "array",
            Self::Object => "object",
            Self::File => "file",
            Self::Unrecognized => "unknown",
        }
    }
}

/// JSON-Schema-like node
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    pub description: Option<String>,

    // string
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,

    // number / integer
    pub multiple_of: Option<Number>,
    pub minimum: Option<Number>,
    pub exclusive_minimum: Option<bool>,
    pub maximum: Option<Number>,
    pub exclusive_maximum: Option<bool>,

    // array
    pub items: Option<Box<RefOr<Schema>>>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: Option<bool>,

    // object
    pub properties: IndexMap<String, RefOr<Schema>>,
    pub required: Vec<String>,
    pub all_of: Vec<RefOr<Schema>>,
    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,
    pub additional_properties: Option<Value>,
}

impl Schema {
    /// Declared kind; a missing `type` is unrecognized
    pub fn kind(&self) -> SchemaType {
        self.schema_type.unwrap_or(SchemaType::Unrecognized)
    }

    /// `enum` values rendered as strings
    pub fn enum_strings(&self) -> Option<Vec<String>> {
        self.enum_values.as_ref().map(|values| {
            values
                .iter()
                .map(|value| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
    }

    /// `additionalProperties: false`
    pub fn forbids_additional_properties(&self) -> bool {
        matches!(self.additional_properties, Some(Value::Bool(false)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_item_keeps_verb_order() {
        let item: PathItem = serde_json::from_str(
            r#"{
                "post": { "responses": {} },
                "parameters": [{ "name": "id", "in": "path", "type": "string", "required": true }],
                "x-internal": true,
                "get": { "responses": {} }
            }"#,
        )
        .unwrap();

        let verbs: Vec<HttpVerb> = item.operations.iter().map(|(verb, _)| *verb).collect();
        assert_eq!(verbs, vec![HttpVerb::Post, HttpVerb::Get]);
        assert_eq!(item.parameters.len(), 1);
    }

    #[test]
    fn test_non_body_parameter_flattens_schema() {
        let param: Parameter = serde_json::from_str(
            r#"{
                "name": "tags",
                "in": "query",
                "required": true,
                "type": "array",
                "items": { "type": "string" },
                "collectionFormat": "pipes",
                "maxItems": 6
            }"#,
        )
        .unwrap();

        assert!(param.required);
        assert!(!param.is_body());
        assert_eq!(param.fields.kind(), SchemaType::Array);
        assert_eq!(param.fields.max_items, Some(6));
        assert_eq!(param.collection_format, Some(CollectionFormat::Pipes));
        assert!(param.fields.required.is_empty());
    }

    #[test]
    fn test_reference_or_inline() {
        let node: RefOr<Schema> =
            serde_json::from_str(r##"{ "$ref": "#/definitions/widget" }"##).unwrap();
        assert_eq!(node.reference(), Some("#/definitions/widget"));

        let node: RefOr<Schema> = serde_json::from_str(r#"{ "type": "string" }"#).unwrap();
        assert!(node.reference().is_none());
    }

    #[test]
    fn test_unrecognized_type() {
        let schema: Schema = serde_json::from_str(r#"{ "type": "uuid" }"#).unwrap();
        assert_eq!(schema.kind(), SchemaType::Unrecognized);

        let schema: Schema = serde_json::from_str(r#"{ "description": "untyped" }"#).unwrap();
        assert_eq!(schema.kind(), SchemaType::Unrecognized);
    }
}
