use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Container shape of a top-level resume section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub kind: SectionKind,
}

const fn object(name: &'static str) -> Section {
    Section {
        name,
        kind: SectionKind::Object,
    }
}

const fn array(name: &'static str) -> Section {
    Section {
        name,
        kind: SectionKind::Array,
    }
}

/// Every known section, in canonical document order.
pub const SECTIONS: &[Section] = &[
    object("basics"),
    array("work"),
    array("volunteer"),
    array("education"),
    array("awards"),
    array("certificates"),
    array("publications"),
    array("skills"),
    array("languages"),
    array("interests"),
    array("references"),
    array("projects"),
    object("meta"),
];

/// Key under which derived data is attached to an enhanced document.
pub const COMPUTED_KEY: &str = "_computed";

/// A repaired resume: a JSON object in which every known section is present with
/// its correct container shape. Unknown top-level keys are carried through.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeDocument(Map<String, Value>);

impl ResumeDocument {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn section(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn basics(&self) -> Option<&Map<String, Value>> {
        self.section("basics").and_then(Value::as_object)
    }

    /// Entries of an array section; empty when the section is missing or not an array.
    pub fn entries(&self, name: &str) -> &[Value] {
        self.0
            .get(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn name(&self) -> Option<&str> {
        self.basics()
            .and_then(|b| b.get("name"))
            .and_then(Value::as_str)
    }
}

/// A repaired document plus its `_computed` side channel.
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedDocument {
    #[serde(flatten)]
    pub document: Map<String, Value>,
    #[serde(rename = "_computed")]
    pub computed: Value,
}

impl EnhancedDocument {
    #[cfg(test)]
    pub fn entries(&self, name: &str) -> &[Value] {
        self.document
            .get(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// JavaScript-style truthiness, which is what resume authors implicitly rely on
/// when they leave `""`, `0` or `null` in a field.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// True when `entry` has a truthy value under any of `keys`.
pub fn has_any(entry: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().any(|k| entry.get(*k).is_some_and(is_truthy))
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Generators of arbitrary, resume-ish JSON shared by the property tests.
#[cfg(test)]
pub(crate) mod strategies {
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    use super::SECTIONS;

    const FIELD_NAMES: &[&str] = &[
        "name", "company", "organization", "institution", "title", "language",
        "reference", "network", "url", "email", "label", "summary", "location",
        "profiles", "startDate", "endDate", "level", "keywords", "_computed",
    ];

    const DATE_TEXT: &[&str] = &["2020", "2020-12", "2021-02-30", "present", ""];

    fn key() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(SECTIONS).prop_map(|s| s.name.to_string()),
            prop::sample::select(FIELD_NAMES).prop_map(str::to_string),
            "[a-z]{1,8}",
        ]
    }

    /// Arbitrary nested JSON whose object keys are biased towards known
    /// section and field names.
    pub fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            (-1.0e9f64..1.0e9).prop_map(Value::from),
            "[a-zA-Z0-9 @.:/-]{0,16}".prop_map(Value::String),
            prop::sample::select(DATE_TEXT).prop_map(|s| Value::String(s.to_string())),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map(key(), inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
            ]
        })
    }

    /// Mostly objects keyed by section names, sometimes any JSON at all.
    pub fn resume_input() -> impl Strategy<Value = Value> {
        prop_oneof![
            3 => prop::collection::btree_map(key(), json_value(), 0..10)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
            1 => json_value(),
        ]
    }
}
