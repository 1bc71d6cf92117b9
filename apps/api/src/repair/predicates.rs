//! Minimal-content rules per array section. An entry that fails its section's
//! rule carries nothing worth rendering and is dropped.

use serde_json::{Map, Value};

use crate::models::resume::has_any;

pub type EntryRule = fn(&Map<String, Value>) -> bool;

fn work(e: &Map<String, Value>) -> bool {
    has_any(e, &["name", "company", "organization"])
}

fn volunteer(e: &Map<String, Value>) -> bool {
    has_any(e, &["organization", "name"])
}

fn education(e: &Map<String, Value>) -> bool {
    has_any(e, &["institution", "area", "studyType"])
}

fn award(e: &Map<String, Value>) -> bool {
    has_any(e, &["title"])
}

fn language(e: &Map<String, Value>) -> bool {
    has_any(e, &["language"])
}

fn reference(e: &Map<String, Value>) -> bool {
    has_any(e, &["name", "reference"])
}

fn named(e: &Map<String, Value>) -> bool {
    has_any(e, &["name"])
}

/// Profiles need somewhere to link to or at least a network label.
pub fn profile(e: &Map<String, Value>) -> bool {
    has_any(e, &["network", "url"])
}

pub const ENTRY_RULES: &[(&str, EntryRule)] = &[
    ("work", work),
    ("volunteer", volunteer),
    ("education", education),
    ("awards", award),
    ("certificates", named),
    ("publications", named),
    ("skills", named),
    ("languages", language),
    ("interests", named),
    ("references", reference),
    ("projects", named),
];

pub fn rule_for(section: &str) -> Option<EntryRule> {
    ENTRY_RULES
        .iter()
        .find(|(name, _)| *name == section)
        .map(|(_, rule)| *rule)
}

/// Keeps object entries that satisfy `rule`, preserving order.
pub fn retain_valid(entries: Vec<Value>, rule: Option<EntryRule>) -> Vec<Value> {
    entries
        .into_iter()
        .filter(|entry| match entry.as_object() {
            Some(obj) => rule.map_or(true, |r| r(obj)),
            None => false,
        })
        .collect()
}
