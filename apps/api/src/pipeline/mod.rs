//! Resume pipeline: raw JSON → repair → validate → enhance.
//!
//! Synchronous and CPU-bound. The only time dependency is the injected clock.

pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::enhance::EnhancementEngine;
use crate::models::resume::{EnhancedDocument, ResumeDocument};
use crate::repair::RepairEngine;
use crate::schema::{ResumeValidator, ValidationResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMetadata {
    pub loaded_at: DateTime<Utc>,
    pub processing_time_ms: f64,
    pub is_valid: bool,
    pub has_warnings: bool,
}

/// What the template layer receives.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedResume {
    pub data: EnhancedDocument,
    pub validation: ValidationResult,
    pub metadata: ProcessingMetadata,
}

#[derive(Clone)]
pub struct ResumePipeline {
    validator: Arc<ResumeValidator>,
    repair: RepairEngine,
    enhancement: EnhancementEngine,
    clock: Arc<dyn Clock>,
}

impl ResumePipeline {
    pub fn new(validator: Arc<ResumeValidator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            validator,
            repair: RepairEngine::new(clock.clone()),
            enhancement: EnhancementEngine::new(clock.clone()),
            clock,
        }
    }

    pub fn validator(&self) -> &ResumeValidator {
        &self.validator
    }

    pub fn repair(&self, raw: &Value) -> ResumeDocument {
        self.repair.apply_defaults(raw)
    }

    pub fn process(&self, raw: &Value) -> ProcessedResume {
        let started = Instant::now();

        let repaired = self.repair.apply_defaults(raw);
        let repaired_value = repaired.clone().into_value();
        let validation = self.validator.validate(&repaired_value);
        let data = self.enhancement.enhance(&repaired);

        let metadata = ProcessingMetadata {
            loaded_at: self.clock.now(),
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            is_valid: validation.is_valid,
            has_warnings: validation.has_warnings(),
        };

        if validation.is_valid {
            info!(
                "Processed resume '{}' in {:.2}ms ({} warnings)",
                repaired.name().unwrap_or_default(),
                metadata.processing_time_ms,
                validation.warnings.len()
            );
        } else {
            warn!(
                "Resume '{}' has {} validation errors; serving best-effort repaired view",
                repaired.name().unwrap_or_default(),
                validation.errors.len()
            );
        }

        ProcessedResume {
            data,
            validation,
            metadata,
        }
    }
}
