//! Swagger 2.0 document parser

use super::context::ParseOptions;
use super::types::SwaggerSpec;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use swagger_ir_common::{IrError, Result, Service};

/// Swagger 2.0 parser
///
/// Holds a loaded document. [`Oas2Parser::parse`] keeps no state between
/// calls, so one parser can be parsed repeatedly with identical results.
#[derive(Debug, Clone)]
pub struct Oas2Parser {
    /// Typed view of the document
    spec: SwaggerSpec,

    /// Raw document, used to resolve references outside the typed sections
    document: Value,

    options: ParseOptions,
}

impl Oas2Parser {
    /// Load a Swagger document from a file path
    ///
    /// `.yaml` and `.yml` files are read as YAML, everything else as JSON.
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = Oas2Parser::from_file("petstore.json")?;
    /// let service = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            IrError::Parse(format!(
                "Failed to read Swagger file {}: {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Parse a Swagger document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_value(document)
    }

    /// Parse a Swagger document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(document)
    }

    /// Build a parser from an already-loaded document
    pub fn from_value(document: Value) -> Result<Self> {
        if document.get("openapi").is_some() && document.get("swagger").is_none() {
            return Err(IrError::Parse(
                "OpenAPI 3 documents are not supported, expected a Swagger 2.0 document"
                    .to_string(),
            ));
        }

        let spec = SwaggerSpec::deserialize(&document)
            .map_err(|e| IrError::Parse(format!("Failed to parse Swagger document: {}", e)))?;

        if let Some(version) = spec.swagger.as_deref().filter(|v| *v != "2.0") {
            tracing::warn!(%version, "unexpected swagger version, parsing as 2.0");
        }

        Ok(Self {
            spec,
            document,
            options: ParseOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Override the maximum schema nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Parse the document into the Service IR
    pub fn parse(&self) -> Result<Service> {
        super::converter::convert_swagger_to_service(&self.spec, &self.document, &self.options)
    }

    /// Get reference to the underlying Swagger document
    pub fn spec(&self) -> &SwaggerSpec {
        &self.spec
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_swagger() {
        let swagger_json = r#"{
            "swagger": "2.0",
            "info": {
                "title": "Test API",
                "version": "1.0.0"
            },
            "paths": {}
        }"#;

        let parser = Oas2Parser::from_json(swagger_json);
        assert!(parser.is_ok());

        let parser = parser.unwrap();
        assert_eq!(parser.spec().swagger.as_deref(), Some("2.0"));
        assert_eq!(parser.spec().info.title, "Test API");
        assert_eq!(parser.options().max_depth, 64);
    }

    #[test]
    fn test_rejects_openapi_3() {
        let result = Oas2Parser::from_json(
            r#"{ "openapi": "3.0.0", "info": { "title": "t", "version": "1.0.0" }, "paths": {} }"#,
        );
        assert!(matches!(result, Err(IrError::Parse(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = Oas2Parser::from_json("{ not json");
        assert!(matches!(result, Err(IrError::Json(_))));
    }

    #[test]
    fn test_missing_info_is_parse_error() {
        let result = Oas2Parser::from_json(r#"{ "swagger": "2.0", "paths": {} }"#);
        assert!(matches!(result, Err(IrError::Parse(_))));
    }

    #[test]
    fn test_with_max_depth() {
        let parser = Oas2Parser::from_json(r#"{ "info": { "title": "t", "version": "1.0.0" } }"#)
            .unwrap()
            .with_max_depth(8);
        assert_eq!(parser.options().max_depth, 8);
    }
}
