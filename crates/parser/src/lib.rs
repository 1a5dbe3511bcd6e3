//! Swagger parsing for the service IR
//!
//! This crate turns OpenAPI 2.0 (Swagger) documents into the intermediate
//! representation defined in `swagger-ir-common` (`Service`).
//!
//! ## Parsing Strategy
//!
//! - Path keys are grouped by their first segment into interfaces
//! - Every operation becomes a method whose parameters and return type are
//!   classified into type descriptors
//! - Named object definitions become types; inline objects and string enums
//!   are hoisted under names derived from where they appear
//!   (`postThing` + `body` -> `postThingBody`)

mod naming;
pub mod oas2;

pub use oas2::{Oas2Parser, ParseOptions};

use swagger_ir_common::{Result, Service};

/// Parse a Swagger 2.0 JSON document
///
/// # Returns
/// * `Service` - Intermediate representation of the API
pub fn parse_swagger_json(json: &str) -> Result<Service> {
    Oas2Parser::from_json(json)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_swagger_json() {
        let service = parse_swagger_json(
            r#"{ "swagger": "2.0", "info": { "title": "empty api", "version": "4.0.0" } }"#,
        )
        .unwrap();

        assert_eq!(service.title, "EmptyApi");
        assert_eq!(service.major_version, 4);
        assert!(service.interfaces.is_empty());
        assert!(service.types.is_empty());
        assert!(service.enums.is_empty());
    }
}
