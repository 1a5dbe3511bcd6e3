//! Validation rule extraction
//!
//! Each schema category has one extraction function returning its rules in a
//! fixed order. `required` is never produced here: it depends on the
//! enclosing object or parameter and is prepended by the caller.

use super::resolver::Resolver;
use super::types::{Schema, SchemaType};
use swagger_ir_common::{ObjectValidationRule, Result, ValidationRule};

/// Node rules, followed by the item rules when the node is an array
pub fn rule_set(resolver: &Resolver<'_>, schema: &Schema) -> Result<Vec<ValidationRule>> {
    let mut rules = local_rules(schema);

    if schema.kind() == SchemaType::Array {
        if let Some(items) = &schema.items {
            let items = resolver.schema(items)?;
            rules.extend(local_rules(&items));
        }
    }

    Ok(rules)
}

/// Rules declared directly on this node
pub fn local_rules(schema: &Schema) -> Vec<ValidationRule> {
    match schema.kind() {
        SchemaType::String => string_rules(schema),
        SchemaType::Number => number_rules(schema),
        SchemaType::Array => array_rules(schema),
        SchemaType::Integer
        | SchemaType::Boolean
        | SchemaType::Null
        | SchemaType::Object
        | SchemaType::File
        | SchemaType::Unrecognized => Vec::new(),
    }
}

/// Object-level rules; empty for anything but objects
pub fn object_rule_set(schema: &Schema) -> Vec<ObjectValidationRule> {
    if schema.kind() != SchemaType::Object {
        return Vec::new();
    }

    let mut rules = Vec::new();

    if let Some(max) = schema.max_properties {
        rules.push(ObjectValidationRule::ObjectMaxProperties { max });
    }
    if let Some(min) = schema.min_properties {
        rules.push(ObjectValidationRule::ObjectMinProperties { min });
    }
    if schema.forbids_additional_properties() {
        rules.push(ObjectValidationRule::ObjectAdditionalProperties { forbidden: true });
    }

    rules
}

fn string_rules(schema: &Schema) -> Vec<ValidationRule> {
    let mut rules = Vec::new();

    if let Some(values) = schema.enum_strings() {
        rules.push(ValidationRule::StringEnum { values });
    }
    if let Some(format) = &schema.format {
        rules.push(ValidationRule::StringFormat {
            format: format.clone(),
        });
    }
    if let Some(length) = schema.max_length {
        rules.push(ValidationRule::StringMaxLength { length });
    }
    if let Some(length) = schema.min_length {
        rules.push(ValidationRule::StringMinLength { length });
    }
    if let Some(pattern) = &schema.pattern {
        rules.push(ValidationRule::StringPattern {
            pattern: pattern.clone(),
        });
    }

    rules
}

fn number_rules(schema: &Schema) -> Vec<ValidationRule> {
    let mut rules = Vec::new();

    if let Some(value) = &schema.multiple_of {
        rules.push(ValidationRule::NumberMultipleOf {
            value: value.clone(),
        });
    }
    if let Some(value) = schema.minimum.clone() {
        rules.push(if schema.exclusive_minimum.unwrap_or(false) {
            ValidationRule::NumberGt { value }
        } else {
            ValidationRule::NumberGte { value }
        });
    }
    if let Some(value) = schema.maximum.clone() {
        rules.push(if schema.exclusive_maximum.unwrap_or(false) {
            ValidationRule::NumberLt { value }
        } else {
            ValidationRule::NumberLte { value }
        });
    }

    rules
}

fn array_rules(schema: &Schema) -> Vec<ValidationRule> {
    let mut rules = Vec::new();

    if let Some(max) = schema.max_items {
        rules.push(ValidationRule::ArrayMaxItems { max });
    }
    if let Some(min) = schema.min_items {
        rules.push(ValidationRule::ArrayMinItems { min });
    }
    if schema.unique_items.unwrap_or(false) {
        rules.push(ValidationRule::ArrayUniqueItems);
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas2::types::SwaggerSpec;
    use serde_json::{json, Number, Value};

    fn schema(value: Value) -> Schema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_exclusive_minimum() {
        let rules = local_rules(&schema(
            json!({ "type": "number", "minimum": 0, "exclusiveMinimum": true }),
        ));
        assert_eq!(
            rules,
            vec![ValidationRule::NumberGt {
                value: Number::from(0)
            }]
        );

        let rules = local_rules(&schema(json!({ "type": "number", "minimum": 0 })));
        assert_eq!(
            rules,
            vec![ValidationRule::NumberGte {
                value: Number::from(0)
            }]
        );

        let rules = local_rules(&schema(
            json!({ "type": "number", "minimum": 0, "exclusiveMinimum": false }),
        ));
        assert_eq!(rules[0].id(), "number-gte");
    }

    #[test]
    fn test_integer_bounds_are_not_rules() {
        let rules = local_rules(&schema(
            json!({ "type": "integer", "multipleOf": 5, "maximum": 100, "exclusiveMaximum": true }),
        ));
        assert!(rules.is_empty());

        let rules = local_rules(&schema(json!({ "type": "integer", "minimum": 1, "multipleOf": 2 })));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_string_rule_order() {
        let rules = local_rules(&schema(json!({
            "type": "string",
            "pattern": "^[a-z]+$",
            "minLength": 1,
            "maxLength": 20,
            "format": "slug",
            "enum": ["a", "b"]
        })));
        let ids: Vec<&str> = rules.iter().map(ValidationRule::id).collect();
        assert_eq!(
            ids,
            vec![
                "string-enum",
                "string-format",
                "string-max-length",
                "string-min-length",
                "string-pattern"
            ]
        );
    }

    #[test]
    fn test_constraints_ignored_on_other_kinds() {
        let rules = local_rules(&schema(json!({ "type": "boolean", "maxLength": 3 })));
        assert!(rules.is_empty());

        let rules = local_rules(&schema(json!({ "type": "string", "minimum": 3 })));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_array_rules_append_item_rules() {
        let document = json!({ "info": { "title": "t", "version": "1.0.0" } });
        let spec: SwaggerSpec = serde_json::from_value(document.clone()).unwrap();
        let resolver = Resolver::new(&spec, &document);

        let rules = rule_set(
            &resolver,
            &schema(json!({
                "type": "array",
                "maxItems": 6,
                "minItems": 2,
                "uniqueItems": true,
                "items": { "type": "string", "maxLength": 8 }
            })),
        )
        .unwrap();

        assert_eq!(
            rules,
            vec![
                ValidationRule::ArrayMaxItems { max: 6 },
                ValidationRule::ArrayMinItems { min: 2 },
                ValidationRule::ArrayUniqueItems,
                ValidationRule::StringMaxLength { length: 8 },
            ]
        );
    }

    #[test]
    fn test_object_rules() {
        let rules = object_rule_set(&schema(json!({
            "type": "object",
            "minProperties": 1,
            "maxProperties": 4,
            "additionalProperties": false
        })));
        assert_eq!(
            rules,
            vec![
                ObjectValidationRule::ObjectMaxProperties { max: 4 },
                ObjectValidationRule::ObjectMinProperties { min: 1 },
                ObjectValidationRule::ObjectAdditionalProperties { forbidden: true },
            ]
        );

        let open = object_rule_set(&schema(
            json!({ "type": "object", "additionalProperties": { "type": "string" } }),
        ));
        assert!(open.is_empty());
    }
}
