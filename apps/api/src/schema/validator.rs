//! Structural validation of resume documents.
//!
//! The schema is compiled once per [`ResumeValidator`]. `validate` never fails:
//! every problem, including a panic inside the structural check, comes back as
//! data in the [`ValidationResult`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use jsonschema::{Draft, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::dates::is_flexible_date;
use crate::schema::definition::{self, SCHEMA_VERSION};
use crate::schema::diagnostics::{internal_error, to_record, ErrorRecord, Violation};
use crate::schema::warnings::{compute_warnings, WarningRecord};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema failed to compile: {0}")]
    Compile(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ErrorRecord>,
    pub warnings: Vec<WarningRecord>,
    /// Wall time spent validating, in milliseconds.
    pub validation_time: f64,
    pub schema_version: String,
}

impl ValidationResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub struct ResumeValidator {
    compiled: Validator,
    schema: Value,
}

impl std::fmt::Debug for ResumeValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeValidator")
            .field("schema_version", &SCHEMA_VERSION)
            .finish()
    }
}

impl ResumeValidator {
    /// Compiles the built-in resume schema.
    pub fn new() -> Result<Self, SchemaError> {
        Self::with_schema(definition::schema())
    }

    pub fn with_schema(schema: Value) -> Result<Self, SchemaError> {
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft7);
        opts.should_validate_formats(true);
        opts.with_format("date", is_flexible_date);

        let compiled = opts
            .build(&schema)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        debug!("Resume schema v{SCHEMA_VERSION} compiled");

        Ok(Self { compiled, schema })
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn validate(&self, document: &Value) -> ValidationResult {
        let started = Instant::now();

        let structural = panic::catch_unwind(AssertUnwindSafe(|| {
            self.compiled
                .iter_errors(document)
                .map(|e| to_record(Violation::from_error(&e)))
                .collect::<Vec<_>>()
        }));

        let errors = match structural {
            Ok(errors) => errors,
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                error!("Structural validation aborted: {reason}");
                vec![internal_error(&reason)]
            }
        };

        let warnings = compute_warnings(document);

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            validation_time: started.elapsed().as_secs_f64() * 1000.0,
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }
}

pub(crate) fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
