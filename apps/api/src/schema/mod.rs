// Schema Validator & Diagnostics: fixed resume schema, structural validation,
// human-readable error records and heuristic content-quality warnings.

pub mod definition;
pub mod diagnostics;
pub mod handlers;
pub mod validator;
pub mod warnings;

pub use definition::{schema_info, SchemaInfo};
pub use validator::{ResumeValidator, ValidationResult};
