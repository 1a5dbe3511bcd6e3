//! Converts a Swagger 2.0 document to the Service IR

use super::classifier::Classifier;
use super::context::{ParseContext, ParseOptions};
use super::operations::InterfaceBuilder;
use super::resolver::Resolver;
use super::rules::object_rule_set;
use super::types::{SchemaType, SwaggerSpec};
use crate::naming::pascal_case;
use serde_json::Value;
use swagger_ir_common::{IrError, Result, Service, Type};

/// Convert a Swagger document to a [`Service`]
///
/// `document` is the raw JSON `spec` was deserialized from; it backs
/// references that point outside the modelled sections.
pub fn convert_swagger_to_service(
    spec: &SwaggerSpec,
    document: &Value,
    options: &ParseOptions,
) -> Result<Service> {
    let major_version = major_version(&spec.info.version)?;

    let resolver = Resolver::new(spec, document);
    let mut ctx = ParseContext::new(options);
    for (name, schema) in &spec.definitions {
        if schema.kind() == SchemaType::Object {
            ctx.reserve(name);
        }
    }

    let interfaces = InterfaceBuilder::new(spec, &resolver).build(&mut ctx)?;
    let mut types = definition_types(spec, &resolver, &mut ctx)?;

    let (anonymous_types, enums) = ctx.finish();
    types.extend(anonymous_types);

    tracing::debug!(
        interfaces = interfaces.len(),
        types = types.len(),
        enums = enums.len(),
        "converted swagger document"
    );

    Ok(Service {
        title: pascal_case(&spec.info.title),
        major_version,
        interfaces,
        types,
        enums,
    })
}

/// Named object definitions, in document order
fn definition_types(
    spec: &SwaggerSpec,
    resolver: &Resolver<'_>,
    ctx: &mut ParseContext,
) -> Result<Vec<Type>> {
    let classifier = Classifier::new(resolver);
    let mut types = Vec::new();

    for (name, schema) in &spec.definitions {
        if schema.kind() != SchemaType::Object {
            continue;
        }

        types.push(Type {
            name: name.clone(),
            description: schema.description.clone(),
            properties: classifier.properties(ctx, schema, name)?,
            rules: object_rule_set(schema),
        });
    }

    Ok(types)
}

fn major_version(version: &str) -> Result<u64> {
    semver::Version::parse(version.trim())
        .map(|v| v.major)
        .map_err(|source| IrError::InvalidVersion {
            version: version.to_string(),
            source,
        })
}
