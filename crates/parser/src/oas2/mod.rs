//! OpenAPI 2.0 (Swagger) parser
//!
//! Parses Swagger 2.0 documents into the Service IR.
//!
//! ## Pipeline
//! - `$ref` strings are parsed once into typed pointers and resolved by
//!   direct lookups into `definitions`, `parameters` and `responses`
//! - Schema nodes are classified into type descriptors; inline objects and
//!   string enums are hoisted into named types and enums
//! - Paths are grouped into interfaces by their first segment, and every
//!   operation yields a method plus HTTP protocol metadata
//!
//! ## Usage
//! ```rust,ignore
//! use swagger_ir_parser::oas2::Oas2Parser;
//!
//! let parser = Oas2Parser::from_file("petstore.json")?;
//! let service = parser.parse()?;
//! ```

mod classifier;
mod context;
mod converter;
mod operations;
mod parser;
mod resolver;
mod rules;
mod types;

pub use context::ParseOptions;
pub use operations::UNNAMED_METHOD;
pub use parser::Oas2Parser;
pub use resolver::Pointer;
pub use types::*;
