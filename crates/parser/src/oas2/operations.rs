//! Interfaces, methods and parameters
//!
//! Paths are grouped by their first segment; every (path, verb) pair becomes
//! one method plus the matching HTTP protocol entry.

use super::classifier::Classifier;
use super::context::ParseContext;
use super::resolver::{Pointer, Resolver};
use super::types::{Operation, Parameter, PathItem, RefOr, Response, SchemaType, SwaggerSpec};
use crate::naming::singularize;
use indexmap::IndexMap;
use swagger_ir_common::{
    Description, HttpVerb, Interface, Method, MethodSpec, Parameter as IrParameter, ParameterSpec,
    PathSpec, Protocols, Result, ReturnType, TypeDescriptor,
};

/// Name used for operations without an `operationId`
pub const UNNAMED_METHOD: &str = "UNNAMED";

/// Local name for synthesized return types
const RESPONSE_LOCAL_NAME: &str = "response";

/// Which response entry describes success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessKey {
    Status(u16),
    Default,
}

/// First path segment: `/widgets/{id}` -> `widgets`
pub fn interface_segment(path: &str) -> &str {
    path.split('/').nth(1).unwrap_or_default()
}

/// Lowest 2xx status code, falling back to `default`
pub fn select_success<'o>(
    responses: &'o IndexMap<String, RefOr<Response>>,
) -> Option<(SuccessKey, &'o RefOr<Response>)> {
    responses
        .iter()
        .filter_map(|(key, response)| {
            key.parse::<u16>()
                .ok()
                .filter(|code| (200..300).contains(code))
                .map(|code| (code, response))
        })
        .min_by_key(|(code, _)| *code)
        .map(|(code, response)| (SuccessKey::Status(code), response))
        .or_else(|| {
            responses
                .get("default")
                .map(|response| (SuccessKey::Default, response))
        })
}

/// Status code a router should answer with on success
pub fn success_code(verb: HttpVerb, success: Option<SuccessKey>, has_schema: bool) -> u16 {
    match success {
        Some(SuccessKey::Status(code)) => code,
        Some(SuccessKey::Default) if has_schema => match verb {
            HttpVerb::Delete => 202,
            HttpVerb::Options => 204,
            HttpVerb::Post => 201,
            _ => 200,
        },
        Some(SuccessKey::Default) => 204,
        None => 200,
    }
}

pub struct InterfaceBuilder<'r, 'a> {
    spec: &'a SwaggerSpec,
    resolver: &'r Resolver<'a>,
    classifier: Classifier<'r, 'a>,
}

impl<'r, 'a> InterfaceBuilder<'r, 'a> {
    pub fn new(spec: &'a SwaggerSpec, resolver: &'r Resolver<'a>) -> Self {
        Self {
            spec,
            resolver,
            classifier: Classifier::new(resolver),
        }
    }

    /// One interface per distinct first path segment, in discovery order
    pub fn build(&self, ctx: &mut ParseContext) -> Result<Vec<Interface>> {
        let mut groups: IndexMap<&str, Vec<(&str, &PathItem)>> = IndexMap::new();
        for (path, item) in &self.spec.paths {
            groups
                .entry(interface_segment(path))
                .or_default()
                .push((path.as_str(), item));
        }

        let mut interfaces = Vec::with_capacity(groups.len());
        for (segment, paths) in groups {
            let name = singularize(segment);
            tracing::debug!(interface = %name, paths = paths.len(), "building interface");

            let mut methods = Vec::new();
            let mut http = Vec::with_capacity(paths.len());

            for (path, item) in paths {
                let mut path_spec = PathSpec {
                    path: path.to_string(),
                    methods: Vec::new(),
                };

                for (verb, operation) in &item.operations {
                    let (method, method_spec) =
                        self.build_method(ctx, *verb, operation, &item.parameters)?;
                    methods.push(method);
                    path_spec.methods.push(method_spec);
                }

                http.push(path_spec);
            }

            interfaces.push(Interface {
                name,
                methods,
                protocols: Protocols { http },
            });
        }

        Ok(interfaces)
    }

    fn build_method(
        &self,
        ctx: &mut ParseContext,
        verb: HttpVerb,
        operation: &Operation,
        shared_parameters: &[RefOr<Parameter>],
    ) -> Result<(Method, MethodSpec)> {
        let name = operation
            .operation_id
            .clone()
            .unwrap_or_else(|| UNNAMED_METHOD.to_string());
        let parent_name = operation.operation_id.as_deref().unwrap_or_default();
        tracing::debug!(method = %name, %verb, "building method");

        let mut parameters = Vec::new();
        let mut parameter_specs = Vec::new();
        for node in operation.parameters.iter().chain(shared_parameters) {
            let param = self.resolver.parameter(node)?;
            parameters.push(self.build_parameter(ctx, &param, parent_name)?);
            parameter_specs.push(parameter_spec(&param));
        }

        let success = select_success(&operation.responses);
        let (return_type, has_schema) = match success {
            Some((_, node)) => self.build_return_type(ctx, node, parent_name)?,
            None => (None, false),
        };

        let method = Method {
            name: name.clone(),
            description: Description::combine(
                operation.summary.as_deref(),
                operation.description.as_deref(),
            ),
            parameters,
            return_type,
        };
        let method_spec = MethodSpec {
            name,
            verb,
            parameters: parameter_specs,
            success_code: success_code(verb, success.map(|(key, _)| key), has_schema),
        };

        Ok((method, method_spec))
    }

    fn build_parameter(
        &self,
        ctx: &mut ParseContext,
        param: &Parameter,
        parent_name: &str,
    ) -> Result<IrParameter> {
        let ty = match (&param.schema, param.is_body()) {
            (Some(schema), true) => {
                self.classifier
                    .classify(ctx, schema, &param.name, parent_name)?
            }
            (None, true) => TypeDescriptor::unknown(Vec::new()),
            (_, false) => {
                self.classifier
                    .classify_schema(ctx, &param.fields, &param.name, parent_name)?
            }
        };

        Ok(IrParameter {
            name: param.name.clone(),
            description: param.description.clone(),
            ty: ty.into_required(param.required),
        })
    }

    /// Return type plus whether the response declares a schema
    fn build_return_type(
        &self,
        ctx: &mut ParseContext,
        node: &RefOr<Response>,
        operation_id: &str,
    ) -> Result<(Option<ReturnType>, bool)> {
        let response = self.resolver.response(node)?;
        let Some(schema) = &response.schema else {
            return Ok((None, false));
        };

        let named = match node.reference().map(Pointer::parse).transpose()? {
            Some(Pointer::Response(name)) => Some(name),
            _ => None,
        };
        let parent_name = named.as_deref().unwrap_or(operation_id);

        let return_type = self
            .classifier
            .classify(ctx, schema, RESPONSE_LOCAL_NAME, parent_name)?;
        Ok((Some(return_type), true))
    }
}

fn parameter_spec(param: &Parameter) -> ParameterSpec {
    let is_array = param.fields.kind() == SchemaType::Array;

    ParameterSpec {
        name: param.name.clone(),
        location: param.location,
        array: (is_array && param.location.is_delimited())
            .then(|| param.collection_format.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger_ir_common::CollectionFormat;

    fn responses(keys: &[&str]) -> IndexMap<String, RefOr<Response>> {
        keys.iter()
            .map(|key| (key.to_string(), RefOr::Item(Response::default())))
            .collect()
    }

    #[test]
    fn test_interface_segment() {
        assert_eq!(interface_segment("/widgets"), "widgets");
        assert_eq!(interface_segment("/widgets/{id}/parts"), "widgets");
        assert_eq!(interface_segment("widgets"), "");
        assert_eq!(interface_segment("/"), "");
    }

    #[test]
    fn test_select_lowest_success_status() {
        let resps0 = responses(&["default", "404", "202", "200"]);
        let picked = select_success(&resps0);
        assert_eq!(picked.map(|(key, _)| key), Some(SuccessKey::Status(200)));

        let resps1 = responses(&["2XX", "default"]);
        let picked = select_success(&resps1);
        assert_eq!(picked.map(|(key, _)| key), Some(SuccessKey::Default));

        let resps2 = responses(&["400", "500"]);
        let picked = select_success(&resps2);
        assert!(picked.is_none());
    }

    #[test]
    fn test_success_code_inference() {
        let status = Some(SuccessKey::Status(202));
        assert_eq!(success_code(HttpVerb::Get, status, true), 202);

        let default = Some(SuccessKey::Default);
        assert_eq!(success_code(HttpVerb::Delete, default, true), 202);
        assert_eq!(success_code(HttpVerb::Options, default, true), 204);
        assert_eq!(success_code(HttpVerb::Post, default, true), 201);
        assert_eq!(success_code(HttpVerb::Put, default, true), 200);
        assert_eq!(success_code(HttpVerb::Post, default, false), 204);

        assert_eq!(success_code(HttpVerb::Get, None, false), 200);
    }

    #[test]
    fn test_parameter_spec_records_collection_format() {
        let param: Parameter = serde_json::from_str(
            r#"{ "name": "tags", "in": "query", "type": "array", "items": { "type": "string" } }"#,
        )
        .unwrap();
        assert_eq!(parameter_spec(&param).array, Some(CollectionFormat::Csv));

        let param: Parameter = serde_json::from_str(
            r#"{ "name": "tags", "in": "formData", "type": "array", "items": { "type": "string" }, "collectionFormat": "multi" }"#,
        )
        .unwrap();
        assert_eq!(parameter_spec(&param).array, None);

        let param: Parameter =
            serde_json::from_str(r#"{ "name": "id", "in": "path", "type": "string" }"#).unwrap();
        assert_eq!(parameter_spec(&param).array, None);
    }
}
