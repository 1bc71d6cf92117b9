//! Turns raw schema violations into human-readable error records.
//!
//! Violations are first lifted into a crate-owned [`Violation`] so the message
//! templates below never depend on the validator library's error types.

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::resume::json_type_name;

/// One structural violation, reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// JSON Pointer into the document, `""` for the root.
    pub path: String,
    pub property: String,
    pub message: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    Required { property: String },
    Type { expected: String },
    Format { format: String },
    Enum { allowed: Vec<Value> },
    MinItems { limit: u64 },
    MaxItems { limit: u64 },
    Minimum { limit: String },
    Maximum { limit: String },
    AdditionalProperties { unexpected: Vec<String> },
    Other { detail: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub instance_path: String,
    pub keyword: String,
    pub kind: ViolationKind,
    pub value: Value,
}

impl Violation {
    pub fn from_error(error: &ValidationError<'_>) -> Self {
        let kind = match &error.kind {
            ValidationErrorKind::Required { property } => ViolationKind::Required {
                property: property
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| property.to_string()),
            },
            ValidationErrorKind::Type { kind } => ViolationKind::Type {
                expected: match kind {
                    TypeKind::Single(ty) => ty.to_string(),
                    TypeKind::Multiple(_) => "one of the allowed types".to_string(),
                },
            },
            ValidationErrorKind::Format { format } => ViolationKind::Format {
                format: format.to_string(),
            },
            ValidationErrorKind::Enum { options } => ViolationKind::Enum {
                allowed: options.as_array().cloned().unwrap_or_default(),
            },
            ValidationErrorKind::MinItems { limit } => ViolationKind::MinItems {
                limit: *limit as u64,
            },
            ValidationErrorKind::MaxItems { limit } => ViolationKind::MaxItems {
                limit: *limit as u64,
            },
            ValidationErrorKind::Minimum { limit } => ViolationKind::Minimum {
                limit: limit.to_string(),
            },
            ValidationErrorKind::Maximum { limit } => ViolationKind::Maximum {
                limit: limit.to_string(),
            },
            ValidationErrorKind::AdditionalProperties { unexpected } => {
                ViolationKind::AdditionalProperties {
                    unexpected: unexpected.clone(),
                }
            }
            _ => ViolationKind::Other {
                detail: error.to_string(),
            },
        };

        let schema_path = error.schema_path.to_string();
        let keyword = last_segment(&schema_path)
            .unwrap_or("unknown")
            .to_string();

        Violation {
            instance_path: error.instance_path.to_string(),
            keyword,
            kind,
            value: error.instance.clone().into_owned(),
        }
    }
}

/// Final segment of a JSON Pointer, unescaped. `None` for the root pointer.
pub fn last_segment(pointer: &str) -> Option<&str> {
    pointer.rsplit('/').next().filter(|s| !s.is_empty())
}

fn property_name(instance_path: &str) -> String {
    match last_segment(instance_path) {
        Some(seg) => seg.replace("~1", "/").replace("~0", "~"),
        None => "root".to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders the message for one violation.
pub fn format_message(property: &str, kind: &ViolationKind, value: &Value) -> String {
    match kind {
        ViolationKind::Required { property: missing } => {
            format!("Missing required property: {missing}")
        }
        ViolationKind::Type { expected } => format!(
            "Property '{property}' should be {expected}, but got {}",
            json_type_name(value)
        ),
        ViolationKind::Format { format } => {
            format!("Property '{property}' has invalid format. Expected: {format}")
        }
        ViolationKind::Enum { allowed } => format!(
            "Property '{property}' must be one of: {}",
            allowed.iter().map(display_value).collect::<Vec<_>>().join(", ")
        ),
        ViolationKind::MinItems { limit } => {
            format!("Property '{property}' must have at least {limit} item(s)")
        }
        ViolationKind::MaxItems { limit } => {
            format!("Property '{property}' must have at most {limit} item(s)")
        }
        ViolationKind::Minimum { limit } => {
            format!("Property '{property}' must be greater than or equal to {limit}")
        }
        ViolationKind::Maximum { limit } => {
            format!("Property '{property}' must be less than or equal to {limit}")
        }
        ViolationKind::AdditionalProperties { unexpected } => format!(
            "Property '{property}' has unexpected additional properties: {}",
            unexpected.join(", ")
        ),
        ViolationKind::Other { detail } => {
            format!("Validation error in '{property}': {detail}")
        }
    }
}

pub fn to_record(violation: Violation) -> ErrorRecord {
    let property = match &violation.kind {
        ViolationKind::Required { property } => property.clone(),
        _ => property_name(&violation.instance_path),
    };
    let message = format_message(
        &property_name(&violation.instance_path),
        &violation.kind,
        &violation.value,
    );
    let allowed_values = match &violation.kind {
        ViolationKind::Enum { allowed } => Some(allowed.clone()),
        _ => None,
    };

    ErrorRecord {
        path: violation.instance_path,
        property,
        message,
        value: violation.value,
        allowed_values,
        keyword: violation.keyword,
    }
}

/// Synthetic record for a failure inside the validator itself.
pub fn internal_error(reason: &str) -> ErrorRecord {
    ErrorRecord {
        path: String::new(),
        property: "root".to_string(),
        message: format!("Internal validation error: {reason}"),
        value: Value::Null,
        allowed_values: None,
        keyword: "internal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violation(path: &str, keyword: &str, kind: ViolationKind, value: Value) -> Violation {
        Violation {
            instance_path: path.to_string(),
            keyword: keyword.to_string(),
            kind,
            value,
        }
    }

    #[test]
    fn test_required_message_names_missing_property() {
        let r = to_record(violation(
            "/basics",
            "required",
            ViolationKind::Required {
                property: "name".into(),
            },
            json!({}),
        ));
        assert_eq!(r.message, "Missing required property: name");
        assert_eq!(r.property, "name");
    }

    #[test]
    fn test_type_message_reports_actual_type() {
        let r = to_record(violation(
            "/basics/name",
            "type",
            ViolationKind::Type {
                expected: "string".into(),
            },
            json!(42),
        ));
        assert_eq!(
            r.message,
            "Property 'name' should be string, but got integer"
        );
        assert_eq!(r.property, "name");
        assert_eq!(r.path, "/basics/name");
    }

    #[test]
    fn test_format_message() {
        let r = to_record(violation(
            "/basics/email",
            "format",
            ViolationKind::Format {
                format: "email".into(),
            },
            json!("nope"),
        ));
        assert_eq!(
            r.message,
            "Property 'email' has invalid format. Expected: email"
        );
    }

    #[test]
    fn test_enum_message_lists_allowed_values() {
        let r = to_record(violation(
            "/skills/0/level",
            "enum",
            ViolationKind::Enum {
                allowed: vec![json!("Beginner"), json!("Expert")],
            },
            json!("SuperExpert"),
        ));
        assert!(r.message.contains("must be one of: Beginner, Expert"));
        assert_eq!(r.allowed_values.unwrap().len(), 2);
        assert_eq!(r.keyword, "enum");
    }

    #[test]
    fn test_item_and_bound_messages() {
        let min = format_message("work", &ViolationKind::MinItems { limit: 1 }, &json!([]));
        assert_eq!(min, "Property 'work' must have at least 1 item(s)");
        let max = format_message("work", &ViolationKind::MaxItems { limit: 3 }, &json!([]));
        assert_eq!(max, "Property 'work' must have at most 3 item(s)");
        let lo = format_message(
            "score",
            &ViolationKind::Minimum { limit: "0".into() },
            &json!(-1),
        );
        assert!(lo.contains("greater than or equal to 0"));
        let hi = format_message(
            "score",
            &ViolationKind::Maximum { limit: "4".into() },
            &json!(5),
        );
        assert!(hi.contains("less than or equal to 4"));
    }

    #[test]
    fn test_additional_properties_message() {
        let msg = format_message(
            "basics",
            &ViolationKind::AdditionalProperties {
                unexpected: vec!["foo".into(), "bar".into()],
            },
            &json!({}),
        );
        assert_eq!(
            msg,
            "Property 'basics' has unexpected additional properties: foo, bar"
        );
    }

    #[test]
    fn test_unknown_kind_falls_back_to_generic() {
        let r = to_record(violation(
            "/work/0/name",
            "pattern",
            ViolationKind::Other {
                detail: "does not match".into(),
            },
            json!("x"),
        ));
        assert!(r.message.starts_with("Validation error in 'name'"));
    }

    #[test]
    fn test_root_property_is_named_root() {
        let r = to_record(violation(
            "",
            "type",
            ViolationKind::Type {
                expected: "object".into(),
            },
            json!(null),
        ));
        assert_eq!(r.property, "root");
        assert_eq!(r.message, "Property 'root' should be object, but got null");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("/a/b/enum"), Some("enum"));
        assert_eq!(last_segment(""), None);
    }
}
