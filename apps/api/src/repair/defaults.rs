use chrono::SecondsFormat;
use serde_json::{json, Map, Value};

use crate::clock::Clock;
use crate::models::resume::{SectionKind, SECTIONS};

pub const CANONICAL_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/jsonresume/resume-schema/master/schema.json";
pub const DEFAULT_META_VERSION: &str = "v1.0.0";
pub const FALLBACK_NAME: &str = "Resume";

/// The default-value table: what each known section looks like when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeDefaults {
    sections: Map<String, Value>,
}

impl ResumeDefaults {
    /// Standard defaults, with `meta.lastModified` stamped from `clock`.
    pub fn standard(clock: &dyn Clock) -> Self {
        let mut sections = Map::new();
        for section in SECTIONS {
            let value = match (section.name, section.kind) {
                ("basics", _) => json!({
                    "name": "",
                    "label": "",
                    "summary": "",
                    "location": {},
                    "profiles": []
                }),
                ("meta", _) => json!({
                    "canonical": CANONICAL_SCHEMA_URL,
                    "version": DEFAULT_META_VERSION,
                    "lastModified": clock.now().to_rfc3339_opts(SecondsFormat::Secs, true)
                }),
                (_, SectionKind::Object) => json!({}),
                (_, SectionKind::Array) => json!([]),
            };
            sections.insert(section.name.to_string(), value);
        }
        Self { sections }
    }

    pub fn get(&self, section: &str) -> Option<&Value> {
        self.sections.get(section)
    }

    /// A complete default document, with the name invariant already satisfied.
    pub fn document(&self) -> Map<String, Value> {
        let mut doc = self.sections.clone();
        if let Some(Value::Object(basics)) = doc.get_mut("basics") {
            basics.insert("name".into(), Value::String(FALLBACK_NAME.into()));
        }
        doc
    }
}
