use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::resume::{json_type_name, COMPUTED_KEY, SECTIONS};

/// Presence facts for one top-level section, so renderers can show or hide it
/// without re-deriving the rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMeta {
    pub exists: bool,
    pub is_empty: bool,
    pub item_count: usize,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn describe(value: &Value) -> SectionMeta {
    let item_count = match value {
        Value::Array(items) => items.len(),
        Value::Object(fields) => fields.values().filter(|v| has_content(v)).count(),
        other => usize::from(has_content(other)),
    };
    SectionMeta {
        exists: true,
        is_empty: item_count == 0,
        item_count,
        kind: json_type_name(value),
    }
}

/// Metadata for every known section plus any other non-computed top-level key.
pub fn section_metadata(document: &Map<String, Value>) -> BTreeMap<String, SectionMeta> {
    let mut out = BTreeMap::new();

    for section in SECTIONS {
        let meta = match document.get(section.name) {
            Some(value) => describe(value),
            None => SectionMeta {
                exists: false,
                is_empty: true,
                item_count: 0,
                kind: "undefined",
            },
        };
        out.insert(section.name.to_string(), meta);
    }

    for (key, value) in document {
        if key != COMPUTED_KEY && !out.contains_key(key) {
            out.insert(key.clone(), describe(value));
        }
    }

    out
}
