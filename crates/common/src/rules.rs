//! Validation rule vocabulary
//!
//! Rules serialize as objects tagged by `id`, e.g.
//! `{"id":"string-max-length","length":20}`. Numeric bounds keep the number
//! exactly as written in the source document.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Per-field constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id", rename_all = "kebab-case")]
pub enum ValidationRule {
    /// Contextual: comes from the enclosing object or the parameter flag
    Required,
    StringMaxLength { length: u64 },
    StringMinLength { length: u64 },
    StringPattern { pattern: String },
    StringFormat { format: String },
    StringEnum { values: Vec<String> },
    NumberMultipleOf { value: Number },
    NumberGt { value: Number },
    NumberGte { value: Number },
    NumberLt { value: Number },
    NumberLte { value: Number },
    ArrayMinItems { min: u64 },
    ArrayMaxItems { max: u64 },
    ArrayUniqueItems,
}

impl ValidationRule {
    /// The serialized `id` discriminant
    pub fn id(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::StringMaxLength { .. } => "string-max-length",
            Self::StringMinLength { .. } => "string-min-length",
            Self::StringPattern { .. } => "string-pattern",
            Self::StringFormat { .. } => "string-format",
            Self::StringEnum { .. } => "string-enum",
            Self::NumberMultipleOf { .. } => "number-multiple-of",
            Self::NumberGt { .. } => "number-gt",
            Self::NumberGte { .. } => "number-gte",
            Self::NumberLt { .. } => "number-lt",
            Self::NumberLte { .. } => "number-lte",
            Self::ArrayMinItems { .. } => "array-min-items",
            Self::ArrayMaxItems { .. } => "array-max-items",
            Self::ArrayUniqueItems => "array-unique-items",
        }
    }
}

/// Object-level constraint, attached to `Type.rules` only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id", rename_all = "kebab-case")]
pub enum ObjectValidationRule {
    ObjectMinProperties { min: u64 },
    ObjectMaxProperties { max: u64 },
    /// `additionalProperties: false`
    ObjectAdditionalProperties { forbidden: bool },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_tags() {
        let rules = vec![
            ValidationRule::Required,
            ValidationRule::NumberGt {
                value: Number::from(0),
            },
            ValidationRule::ArrayUniqueItems,
        ];

        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            json!([
                { "id": "required" },
                { "id": "number-gt", "value": 0 },
                { "id": "array-unique-items" }
            ])
        );
    }

    #[test]
    fn test_id_matches_serialized_tag() {
        let rule = ValidationRule::StringPattern {
            pattern: "^[a-z]+$".to_string(),
        };
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["id"], rule.id());
    }

    #[test]
    fn test_object_rule_tags() {
        let rule = ObjectValidationRule::ObjectAdditionalProperties { forbidden: true };
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({ "id": "object-additional-properties", "forbidden": true })
        );
    }
}
