//! Content-quality heuristics. Independent of structural validity and never blocking.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::resume::{has_any, is_truthy};

/// Summaries shorter than this are flagged.
pub const MIN_SUMMARY_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: Severity,
}

impl WarningRecord {
    fn new(kind: &str, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.into(),
            severity,
        }
    }
}

fn non_empty_array<'a>(doc: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    doc.get(key)
        .and_then(Value::as_array)
        .filter(|a| !a.is_empty())
}

/// Computes heuristic warnings. Non-object documents get none: they are already
/// structurally invalid and every heuristic would fire at once.
pub fn compute_warnings(document: &Value) -> Vec<WarningRecord> {
    let Some(doc) = document.as_object() else {
        return Vec::new();
    };
    let mut warnings = Vec::new();

    let basics = doc
        .get("basics")
        .and_then(Value::as_object)
        .filter(|b| !b.is_empty());

    match basics {
        None => {
            warnings.push(WarningRecord::new(
                "missing_basics",
                "Basics section is missing",
                Severity::High,
            ));
            warnings.push(WarningRecord::new(
                "missing_name",
                "Name is missing",
                Severity::High,
            ));
            warnings.push(WarningRecord::new(
                "missing_email",
                "Email address is missing",
                Severity::Medium,
            ));
        }
        Some(basics) => {
            if !has_any(basics, &["name"]) {
                warnings.push(WarningRecord::new(
                    "missing_name",
                    "Name is missing",
                    Severity::High,
                ));
            }
            if !has_any(basics, &["email"]) {
                warnings.push(WarningRecord::new(
                    "missing_email",
                    "Email address is missing",
                    Severity::Medium,
                ));
            }
            let summary_len = basics
                .get("summary")
                .and_then(Value::as_str)
                .map(|s| s.trim().chars().count())
                .unwrap_or(0);
            if summary_len < MIN_SUMMARY_CHARS {
                warnings.push(WarningRecord::new(
                    "short_summary",
                    format!(
                        "Summary is too short ({summary_len} characters, at least {MIN_SUMMARY_CHARS} recommended)"
                    ),
                    Severity::Low,
                ));
            }
        }
    }

    match non_empty_array(doc, "work") {
        None => warnings.push(WarningRecord::new(
            "missing_work",
            "No work experience listed",
            Severity::Medium,
        )),
        Some(work) => {
            for (i, entry) in work.iter().filter_map(Value::as_object).enumerate() {
                let label = entry
                    .get("name")
                    .or_else(|| entry.get("company"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", i + 1));
                if !entry.get("startDate").is_some_and(is_truthy) {
                    warnings.push(WarningRecord::new(
                        "missing_start_date",
                        format!("Work entry '{label}' has no start date"),
                        Severity::Low,
                    ));
                }
                if !has_any(entry, &["summary"]) && !non_empty_highlights(entry) {
                    warnings.push(WarningRecord::new(
                        "missing_work_details",
                        format!("Work entry '{label}' has no summary or highlights"),
                        Severity::Low,
                    ));
                }
            }
        }
    }

    if non_empty_array(doc, "skills").is_none() {
        warnings.push(WarningRecord::new(
            "missing_skills",
            "No skills listed",
            Severity::Low,
        ));
    }

    warnings
}

fn non_empty_highlights(entry: &Map<String, Value>) -> bool {
    entry
        .get("highlights")
        .and_then(Value::as_array)
        .is_some_and(|h| !h.is_empty())
}
