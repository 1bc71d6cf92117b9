//! Defaulting & Repair Engine.
//!
//! Takes any JSON value and returns a [`ResumeDocument`] in which every known
//! section exists with its correct container shape, malformed entries are gone
//! and `basics.name` is non-empty. Repair never fails: non-object input, an
//! internal inconsistency or a panic all yield the full default document.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::clock::Clock;
use crate::models::resume::{
    is_truthy, json_type_name, ResumeDocument, Section, SectionKind, SECTIONS,
};
use crate::repair::defaults::{ResumeDefaults, FALLBACK_NAME};
use crate::repair::predicates::{profile, retain_valid, rule_for};
use crate::schema::validator::panic_reason;

/// `basics` fields the schema types as strings.
pub const BASICS_STRING_FIELDS: &[&str] =
    &["name", "label", "image", "email", "phone", "url", "summary"];

#[derive(Debug, Error)]
pub enum RepairError {
    #[error("section '{section}' is {found} after repair, expected {expected:?}")]
    Shape {
        section: &'static str,
        expected: SectionKind,
        found: &'static str,
    },

    #[error("basics.name is empty after repair")]
    EmptyName,
}

/// Applies defaults with a clock for `meta.lastModified`.
#[derive(Clone)]
pub struct RepairEngine {
    clock: Arc<dyn Clock>,
}

impl RepairEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn apply_defaults(&self, raw: &Value) -> ResumeDocument {
        apply_defaults(raw, &ResumeDefaults::standard(self.clock.as_ref()))
    }
}

pub fn apply_defaults(raw: &Value, defaults: &ResumeDefaults) -> ResumeDocument {
    let Some(input) = raw.as_object() else {
        debug!(
            "Resume input is {}, using default document",
            json_type_name(raw)
        );
        return ResumeDocument::from_map(defaults.document());
    };

    match panic::catch_unwind(AssertUnwindSafe(|| repair_document(input, defaults))) {
        Ok(Ok(doc)) => doc,
        Ok(Err(e)) => {
            warn!("Resume repair failed, falling back to defaults: {e}");
            ResumeDocument::from_map(defaults.document())
        }
        Err(payload) => {
            error!(
                "Resume repair panicked, falling back to defaults: {}",
                panic_reason(payload.as_ref())
            );
            ResumeDocument::from_map(defaults.document())
        }
    }
}

fn default_for(section: &Section, defaults: &ResumeDefaults) -> Value {
    defaults
        .get(section.name)
        .cloned()
        .unwrap_or_else(|| match section.kind {
            SectionKind::Object => Value::Object(Map::new()),
            SectionKind::Array => Value::Array(Vec::new()),
        })
}

/// Shallow merge: default keys first, user keys win.
fn merge_over(default: Value, user: Map<String, Value>) -> Value {
    let mut merged = match default {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(user);
    Value::Object(merged)
}

fn repair_document(
    input: &Map<String, Value>,
    defaults: &ResumeDefaults,
) -> Result<ResumeDocument, RepairError> {
    let mut doc = input.clone();

    for section in SECTIONS {
        let default = default_for(section, defaults);
        let supplied = doc.remove(section.name).filter(|v| !v.is_null());

        let value = match (section.kind, supplied) {
            (_, None) => default,
            (SectionKind::Object, Some(Value::Object(user))) => merge_over(default, user),
            (SectionKind::Object, Some(other)) => {
                debug!(
                    "Section '{}' is {}, replacing with defaults",
                    section.name,
                    json_type_name(&other)
                );
                default
            }
            (SectionKind::Array, Some(Value::Array(items))) => {
                Value::Array(retain_valid(items, rule_for(section.name)))
            }
            (SectionKind::Array, Some(single)) => {
                Value::Array(retain_valid(vec![single], rule_for(section.name)))
            }
        };
        doc.insert(section.name.to_string(), value);
    }

    let basics_default = defaults.get("basics").and_then(Value::as_object);
    if let Some(Value::Object(basics)) = doc.get_mut("basics") {
        repair_basics(basics, basics_default);
        if !basics.get("name").is_some_and(is_truthy) {
            basics.insert("name".into(), Value::String(FALLBACK_NAME.into()));
        }
    }

    verify(&doc)?;
    Ok(ResumeDocument::from_map(doc))
}

/// Integers as written; integral floats without a trailing `.0`, so `0.0`
/// becomes `"0"`. Magnitudes past 1e21 keep serde_json's exponent form.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.abs() < 1e21 => f.to_string(),
        _ => n.to_string(),
    }
}

fn repair_basics(basics: &mut Map<String, Value>, defaults: Option<&Map<String, Value>>) {
    for field in BASICS_STRING_FIELDS {
        let replacement = match basics.get(*field) {
            None | Some(Value::String(_)) => continue,
            Some(Value::Number(n)) => Some(Value::String(number_text(n))),
            Some(Value::Bool(b)) => Some(Value::String(b.to_string())),
            // Not representable as a string; fall back to the field default, if any.
            Some(_) => defaults.and_then(|d| d.get(*field)).cloned(),
        };
        match replacement {
            Some(v) => {
                basics.insert(field.to_string(), v);
            }
            None => {
                basics.remove(*field);
            }
        }
    }

    if !basics.get("location").is_some_and(Value::is_object) {
        basics.insert("location".into(), Value::Object(Map::new()));
    }

    let profiles = match basics.remove("profiles") {
        Some(Value::Array(items)) => retain_valid(items, Some(profile)),
        _ => Vec::new(),
    };
    basics.insert("profiles".into(), Value::Array(profiles));
}

fn verify(doc: &Map<String, Value>) -> Result<(), RepairError> {
    for section in SECTIONS {
        let value = doc.get(section.name).unwrap_or(&Value::Null);
        let ok = match section.kind {
            SectionKind::Object => value.is_object(),
            SectionKind::Array => value.is_array(),
        };
        if !ok {
            return Err(RepairError::Shape {
                section: section.name,
                expected: section.kind,
                found: json_type_name(value),
            });
        }
    }

    let name_ok = doc
        .get("basics")
        .and_then(|b| b.get("name"))
        .and_then(Value::as_str)
        .is_some_and(|n| !n.is_empty());
    if name_ok {
        Ok(())
    } else {
        Err(RepairError::EmptyName)
    }
}
