//! Enhancement/Derivation Engine.
//!
//! Adds display-oriented derived data on top of a repaired document. Purely
//! additive: per-entry fields are only inserted where the entry does not
//! already carry them, and everything else lives under `_computed`.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::clock::Clock;
use crate::enhance::duration::{calculate_duration, Duration};
use crate::enhance::formatting::format_date_range;
use crate::enhance::sections::section_metadata;
use crate::enhance::skills::categorize_skills;
use crate::models::dates::is_present_marker;
use crate::models::resume::{EnhancedDocument, ResumeDocument, COMPUTED_KEY};

/// Sections whose entries carry `startDate`/`endDate`.
pub const DATED_SECTIONS: &[&str] = &["work", "education", "volunteer", "projects"];

#[derive(Clone)]
pub struct EnhancementEngine {
    clock: Arc<dyn Clock>,
}

impl EnhancementEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn enhance(&self, document: &ResumeDocument) -> EnhancedDocument {
        enhance(document, self.clock.today())
    }
}

fn date_field<'a>(entry: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    entry.get(key).and_then(Value::as_str)
}

fn is_open_ended(entry: &Map<String, Value>) -> bool {
    match date_field(entry, "endDate").map(str::trim) {
        None | Some("") => true,
        Some(end) => is_present_marker(end),
    }
}

fn annotate_entry(section: &str, entry: &mut Map<String, Value>, today: NaiveDate) {
    let start = date_field(entry, "startDate");
    let end = date_field(entry, "endDate");
    let duration = calculate_duration(start, end, today);
    let formatted = format_date_range(start, end);
    let current = is_open_ended(entry);

    entry
        .entry("duration")
        .or_insert_with(|| serde_json::to_value(duration).unwrap_or(Value::Null));
    entry
        .entry("formattedDates")
        .or_insert_with(|| Value::String(formatted));
    if section == "work" {
        entry
            .entry("isCurrentJob")
            .or_insert(Value::Bool(current));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalExperience {
    pub total_months: u32,
    pub years: u32,
    pub months: u32,
    pub human_readable: String,
}

/// Sum of work-entry durations, saturating. Entries with unusable dates contribute nothing.
pub fn total_experience(work: &[Value], today: NaiveDate) -> TotalExperience {
    let total_months = work
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|e| calculate_duration(date_field(e, "startDate"), date_field(e, "endDate"), today))
        .map(|d| d.total_months)
        .fold(0u32, u32::saturating_add);
    let Duration {
        total_months,
        years,
        months,
        human_readable,
    } = Duration::from_months(total_months);
    TotalExperience {
        total_months,
        years,
        months,
        human_readable,
    }
}

/// `network` (lower-cased) → profile URL.
pub fn profile_urls(document: &ResumeDocument) -> BTreeMap<String, String> {
    document
        .basics()
        .and_then(|b| b.get("profiles"))
        .and_then(Value::as_array)
        .map(|profiles| {
            profiles
                .iter()
                .filter_map(|p| {
                    let network = p.get("network")?.as_str()?.trim();
                    let url = p.get("url")?.as_str()?.trim();
                    (!network.is_empty() && !url.is_empty())
                        .then(|| (network.to_lowercase(), url.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn enhance(document: &ResumeDocument, today: NaiveDate) -> EnhancedDocument {
    let mut data = document.as_map().clone();
    data.remove(COMPUTED_KEY);

    for section in DATED_SECTIONS {
        if let Some(Value::Array(entries)) = data.get_mut(*section) {
            for entry in entries.iter_mut().filter_map(Value::as_object_mut) {
                annotate_entry(section, entry, today);
            }
        }
    }

    let computed = json!({
        "totalExperience": total_experience(document.entries("work"), today),
        "skillCategories": categorize_skills(document.entries("skills")),
        "profileUrls": profile_urls(document),
        "sections": section_metadata(document.as_map()),
    });

    EnhancedDocument {
        document: data,
        computed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::repair::engine::RepairEngine;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn repaired(raw: Value) -> ResumeDocument {
        RepairEngine::new(Arc::new(FixedClock::on(2024, 1, 1))).apply_defaults(&raw)
    }

    #[test]
    fn test_work_entries_get_duration_dates_and_current_flag() {
        let doc = repaired(json!({"work": [
            {"name": "Acme", "startDate": "2020-01-01", "endDate": "2022-12-31"},
            {"name": "Now Inc", "startDate": "2023-01"}
        ]}));
        let out = enhance(&doc, today());
        let work = out.entries("work");

        assert_eq!(work[0]["duration"]["years"], 2);
        assert_eq!(work[0]["formattedDates"], "Jan 2020 - Dec 2022");
        assert_eq!(work[0]["isCurrentJob"], false);

        assert_eq!(work[1]["formattedDates"], "Jan 2023 - Present");
        assert_eq!(work[1]["isCurrentJob"], true);
        assert_eq!(work[1]["duration"]["humanReadable"], "11 months");
    }

    #[test]
    fn test_invalid_dates_give_null_duration() {
        let doc = repaired(json!({"education": [{"institution": "MIT", "startDate": "whenever"}]}));
        let out = enhance(&doc, today());
        let edu = &out.entries("education")[0];
        assert!(edu["duration"].is_null());
        assert!(edu.get("isCurrentJob").is_none());
    }

    #[test]
    fn test_existing_fields_are_not_overwritten() {
        let doc = repaired(json!({"work": [
            {"name": "Acme", "startDate": "2020", "duration": "forever", "isCurrentJob": "maybe"}
        ]}));
        let out = enhance(&doc, today());
        let entry = &out.entries("work")[0];
        assert_eq!(entry["duration"], "forever");
        assert_eq!(entry["isCurrentJob"], "maybe");
        assert!(entry.get("formattedDates").is_some());
    }

    #[test]
    fn test_enhancement_is_additive() {
        let doc = repaired(json!({
            "basics": {"name": "Ada"},
            "work": [{"name": "Acme", "startDate": "2020"}],
            "skills": [{"name": "Rust", "keywords": ["rust"]}]
        }));
        let out = enhance(&doc, today());
        for (key, value) in doc.as_map() {
            let enhanced = &out.document[key];
            match (value, enhanced) {
                (Value::Array(before), Value::Array(after)) => {
                    assert_eq!(before.len(), after.len());
                    for (b, a) in before.iter().zip(after) {
                        for (field, v) in b.as_object().unwrap() {
                            assert_eq!(&a[field], v, "{key}.{field}");
                        }
                    }
                }
                _ => assert_eq!(value, enhanced, "{key}"),
            }
        }
    }

    #[test]
    fn test_total_experience_sums_work_months() {
        let work = vec![
            json!({"name": "A", "startDate": "2020-01-01", "endDate": "2022-12-31"}),
            json!({"name": "B", "startDate": "2023-01-01", "endDate": "2023-07-01"}),
            json!({"name": "C", "startDate": "bogus"}),
        ];
        let total = total_experience(&work, today());
        // 35 + 5 (181 days)
        assert_eq!(total.total_months, 40);
        assert_eq!(total.years, 3);
        assert_eq!(total.months, 4);
        assert_eq!(total.human_readable, "3 years, 4 months");
    }

    #[test]
    fn test_total_experience_saturates_on_huge_histories() {
        let work: Vec<Value> = (0..36_000)
            .map(|_| json!({"name": "Forever Inc", "startDate": "0001", "endDate": "9999"}))
            .collect();
        let total = total_experience(&work, today());
        assert_eq!(total.total_months, u32::MAX);
        assert_eq!(total.years, u32::MAX / 12);
    }

    #[test]
    fn test_computed_side_channel() {
        let doc = repaired(json!({
            "basics": {"name": "Ada", "profiles": [
                {"network": "GitHub", "url": "https://github.com/ada"},
                {"network": "Mastodon"}
            ]},
            "skills": [{"name": "Rust", "level": "Expert", "keywords": ["Rust"]}]
        }));
        let out = enhance(&doc, today());
        let c = &out.computed;
        assert_eq!(c["profileUrls"]["github"], "https://github.com/ada");
        assert!(c["profileUrls"].get("mastodon").is_none());
        assert_eq!(
            c["skillCategories"]["byType"]["Programming Languages"][0]["name"],
            "Rust"
        );
        assert_eq!(c["sections"]["skills"]["itemCount"], 1);
        assert_eq!(c["sections"]["work"]["isEmpty"], true);
        assert_eq!(c["totalExperience"]["humanReadable"], "Less than a month");
    }

    #[test]
    fn test_engine_reads_clock() {
        let engine = EnhancementEngine::new(Arc::new(FixedClock::on(2021, 1, 1)));
        let doc = repaired(json!({"work": [{"name": "A", "startDate": "2020-01-01"}]}));
        let out = engine.enhance(&doc);
        assert_eq!(out.entries("work")[0]["duration"]["totalMonths"], 12);
    }
}
