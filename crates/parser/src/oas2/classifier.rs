//! Type classification and anonymous-type synthesis
//!
//! Turns schema nodes into [`TypeDescriptor`]s. Inline enums and inline
//! objects are hoisted into the [`ParseContext`] side tables under names
//! derived from their parent and local names.

use super::context::ParseContext;
use super::resolver::{Pointer, Resolver};
use super::rules;
use super::types::{RefOr, Schema, SchemaType};
use crate::naming::{camel_case, singularize};
use indexmap::IndexMap;
use swagger_ir_common::{Enum, Property, Result, Type, TypeDescriptor, ValidationRule};

pub struct Classifier<'r, 'a> {
    resolver: &'r Resolver<'a>,
}

impl<'r, 'a> Classifier<'r, 'a> {
    pub fn new(resolver: &'r Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Classify a node that may be a `$ref`
    pub fn classify(
        &self,
        ctx: &mut ParseContext,
        node: &RefOr<Schema>,
        local_name: &str,
        parent_name: &str,
    ) -> Result<TypeDescriptor> {
        ctx.enter(&location(parent_name, local_name))?;
        let descriptor = match node {
            RefOr::Reference { ref_path } => {
                self.classify_reference(ctx, ref_path, local_name, parent_name)
            }
            RefOr::Item(schema) => self.classify_inline(ctx, schema, local_name, parent_name),
        };
        ctx.leave();
        descriptor
    }

    /// Classify an already-resolved node
    pub fn classify_schema(
        &self,
        ctx: &mut ParseContext,
        schema: &Schema,
        local_name: &str,
        parent_name: &str,
    ) -> Result<TypeDescriptor> {
        ctx.enter(&location(parent_name, local_name))?;
        let descriptor = self.classify_inline(ctx, schema, local_name, parent_name);
        ctx.leave();
        descriptor
    }

    /// Properties of an object schema, merging `allOf` members
    pub fn properties(
        &self,
        ctx: &mut ParseContext,
        schema: &Schema,
        parent_name: &str,
    ) -> Result<Vec<Property>> {
        ctx.enter(parent_name)?;
        let properties = if schema.all_of.is_empty() {
            self.own_properties(ctx, &schema.properties, &schema.required, parent_name)
        } else {
            self.composed_properties(ctx, schema, parent_name)
        };
        ctx.leave();
        properties
    }

    fn classify_reference(
        &self,
        ctx: &mut ParseContext,
        ref_path: &str,
        local_name: &str,
        parent_name: &str,
    ) -> Result<TypeDescriptor> {
        let pointer = Pointer::parse(ref_path)?;
        let resolved = self.resolver.schema_at(ref_path)?;
        let rules = rules::rule_set(self.resolver, &resolved)?;

        let Pointer::Definition(name) = pointer else {
            return Ok(TypeDescriptor {
                type_name: ref_path.to_string(),
                is_array: false,
                is_local: true,
                is_unknown: true,
                rules,
            });
        };

        Ok(match resolved.kind() {
            SchemaType::Object => TypeDescriptor::local(name, rules),
            SchemaType::Array => {
                self.classify_array(ctx, &resolved, local_name, parent_name, rules)?
            }
            SchemaType::String
            | SchemaType::Number
            | SchemaType::Integer
            | SchemaType::Boolean
            | SchemaType::Null => TypeDescriptor::primitive(resolved.kind().as_str(), rules),
            SchemaType::File | SchemaType::Unrecognized => {
                tracing::warn!(definition = %name, "definition has no recognized type");
                TypeDescriptor::unknown(rules)
            }
        })
    }

    fn classify_inline(
        &self,
        ctx: &mut ParseContext,
        schema: &Schema,
        local_name: &str,
        parent_name: &str,
    ) -> Result<TypeDescriptor> {
        let rules = rules::rule_set(self.resolver, schema)?;

        Ok(match schema.kind() {
            SchemaType::String => match schema.enum_strings() {
                Some(values) if !values.is_empty() => {
                    let candidate =
                        camel_case(&format!("{}_{}", parent_name, singularize(local_name)));
                    let name = ctx.claim(candidate);
                    ctx.push_enum(Enum {
                        name: name.clone(),
                        values,
                    });
                    TypeDescriptor::local(name, rules)
                }
                _ => TypeDescriptor::primitive(SchemaType::String.as_str(), rules),
            },
            SchemaType::Number | SchemaType::Integer | SchemaType::Boolean | SchemaType::Null => {
                TypeDescriptor::primitive(schema.kind().as_str(), rules)
            }
            SchemaType::Array => self.classify_array(ctx, schema, local_name, parent_name, rules)?,
            SchemaType::Object => {
                let name = ctx.claim(camel_case(&format!("{}_{}", parent_name, local_name)));
                let properties = self.properties(ctx, schema, &name)?;
                ctx.push_type(Type {
                    name: name.clone(),
                    description: schema.description.clone(),
                    properties,
                    rules: rules::object_rule_set(schema),
                });
                TypeDescriptor::local(name, rules)
            }
            SchemaType::File | SchemaType::Unrecognized => {
                tracing::warn!(
                    parent = parent_name,
                    name = local_name,
                    "unrecognized schema kind, emitting unknown type"
                );
                TypeDescriptor::unknown(rules)
            }
        })
    }

    /// Item descriptor with `is_array` forced on; rules stay the array's own
    fn classify_array(
        &self,
        ctx: &mut ParseContext,
        schema: &Schema,
        local_name: &str,
        parent_name: &str,
        rules: Vec<ValidationRule>,
    ) -> Result<TypeDescriptor> {
        let item = match &schema.items {
            Some(items) => self.classify(ctx, items, local_name, parent_name)?,
            None => TypeDescriptor::unknown(Vec::new()),
        };

        Ok(TypeDescriptor {
            type_name: item.type_name,
            is_array: true,
            is_local: item.is_local,
            is_unknown: item.is_unknown,
            rules,
        })
    }

    /// `allOf` members concatenated in order, without deduplication
    ///
    /// Only the composed schema's `required` applies; a member's own
    /// `required` and nested `allOf` are ignored.
    fn composed_properties(
        &self,
        ctx: &mut ParseContext,
        schema: &Schema,
        parent_name: &str,
    ) -> Result<Vec<Property>> {
        let mut properties = Vec::new();
        for member in &schema.all_of {
            let member = self.resolver.schema(member)?;
            properties.extend(self.own_properties(
                ctx,
                &member.properties,
                &schema.required,
                parent_name,
            )?);
        }
        Ok(properties)
    }

    fn own_properties(
        &self,
        ctx: &mut ParseContext,
        nodes: &IndexMap<String, RefOr<Schema>>,
        required: &[String],
        parent_name: &str,
    ) -> Result<Vec<Property>> {
        let mut properties = Vec::with_capacity(nodes.len());

        for (name, node) in nodes {
            let resolved = self.resolver.schema(node)?;
            let ty = self
                .classify_schema(ctx, &resolved, name, parent_name)?
                .into_required(required.contains(name));

            properties.push(Property {
                name: name.clone(),
                description: resolved.description.clone(),
                ty,
            });
        }

        Ok(properties)
    }
}

fn location(parent_name: &str, local_name: &str) -> String {
    if parent_name.is_empty() {
        local_name.to_string()
    } else {
        format!("{}.{}", parent_name, local_name)
    }
}
