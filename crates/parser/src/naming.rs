//! Identifier helpers for synthesized names
//!
//! Interface names are singularized path segments; anonymous types and enums
//! are camelCased from `<parent>_<local>`; service titles are PascalCased.

/// Words that are the same in singular and plural
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "fish",
    "information",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("geese", "goose"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("women", "woman"),
];

/// Split an identifier into lowercase words
///
/// Boundaries are non-alphanumeric characters, lower-to-upper transitions and
/// the end of an acronym (`HTTPServer` -> `http`, `server`).
fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(ch.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `postThing_body` -> `postThingBody`
pub fn camel_case(s: &str) -> String {
    let mut result = String::new();
    for (i, word) in words(s).iter().enumerate() {
        if i == 0 {
            result.push_str(word);
        } else {
            result.push_str(&capitalize(word));
        }
    }
    result
}

/// `pet store` -> `PetStore`
pub fn pascal_case(s: &str) -> String {
    words(s).iter().map(|word| capitalize(word)).collect()
}

/// `widgets` -> `widget`, `statuses` -> `status`, `categories` -> `category`
///
/// Only the trailing word is inflected; the original casing is preserved.
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();

    if UNCOUNTABLE.iter().any(|u| lower.ends_with(u)) {
        return word.to_string();
    }

    for (plural, singular) in IRREGULAR {
        if lower == *plural {
            return singular.to_string();
        }
    }

    let strip = |n: usize| word[..word.len() - n].to_string();

    if lower.ends_with("ies") && lower.len() > 4 {
        return format!("{}y", strip(3));
    }
    for suffix in ["sses", "shes", "ches", "xes", "zzes", "uses"] {
        if lower.ends_with(suffix) {
            return strip(2);
        }
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return word.to_string();
    }
    if lower.ends_with('s') && lower.len() > 1 {
        return strip(1);
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("postThing_body"), "postThingBody");
        assert_eq!(camel_case("getWidgets_response"), "getWidgetsResponse");
        assert_eq!(camel_case("widget_status_code"), "widgetStatusCode");
        assert_eq!(camel_case("_body"), "body");
        assert_eq!(camel_case("HTTPServer_config"), "httpServerConfig");
        assert_eq!(camel_case("exhaustiveParams_query-enum"), "exhaustiveParamsQueryEnum");
        assert_eq!(camel_case("v1_api"), "v1Api");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("pet store"), "PetStore");
        assert_eq!(pascal_case("ility-example"), "IlityExample");
        assert_eq!(pascal_case("WidgetService"), "WidgetService");
        assert_eq!(pascal_case(""), "");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("widgets"), "widget");
        assert_eq!(singularize("things"), "thing");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("metadata"), "metadata");
        assert_eq!(singularize("id"), "id");
        assert_eq!(singularize("queryEnumArray"), "queryEnumArray");
        assert_eq!(singularize(""), "");
    }
}
