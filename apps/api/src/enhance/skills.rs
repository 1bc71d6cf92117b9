//! Skill categorisation: by declared level, and by a category inferred from keywords.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

pub const UNSPECIFIED_LEVEL: &str = "Unspecified";
pub const OTHER_CATEGORY: &str = "Other";

/// Checked in order; the first category with a term found in a skill's joined
/// keywords wins. Terms are matched as lower-case substrings, so very short
/// terms ("go", "r") are deliberately absent.
pub const KEYWORD_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Programming Languages",
        &[
            "javascript", "typescript", "python", "java", "rust", "golang", "c++", "c#",
            "ruby", "php", "swift", "kotlin", "scala", "haskell", "elixir", "perl",
        ],
    ),
    (
        "Frameworks & Libraries",
        &[
            "react", "vue", "angular", "svelte", "django", "flask", "spring", "express",
            "rails", "laravel", "next.js", "node", ".net", "tensorflow", "pytorch", "jquery",
        ],
    ),
    (
        "Databases",
        &[
            "sql", "postgres", "mysql", "mongodb", "redis", "sqlite", "oracle", "cassandra",
            "dynamodb", "elasticsearch", "mariadb",
        ],
    ),
    (
        "Cloud & DevOps",
        &[
            "aws", "azure", "gcp", "google cloud", "docker", "kubernetes", "terraform",
            "ansible", "jenkins", "ci/cd", "heroku", "devops", "linux",
        ],
    ),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategories {
    pub by_level: BTreeMap<String, Vec<Value>>,
    pub by_type: BTreeMap<String, Vec<Value>>,
}

fn joined_keywords(skill: &Value) -> Option<String> {
    let joined = skill
        .get("keywords")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    (!joined.trim().is_empty()).then_some(joined)
}

/// Category inferred from a skill's keywords; `None` when it has no keywords.
pub fn infer_category(skill: &Value) -> Option<&'static str> {
    let joined = joined_keywords(skill)?;
    let category = KEYWORD_CATEGORIES
        .iter()
        .find(|(_, terms)| terms.iter().any(|t| joined.contains(t)))
        .map(|(name, _)| *name)
        .unwrap_or(OTHER_CATEGORY);
    Some(category)
}

pub fn categorize_skills(skills: &[Value]) -> SkillCategories {
    let mut categories = SkillCategories::default();

    for skill in skills.iter().filter(|s| s.is_object()) {
        let level = skill
            .get("level")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(UNSPECIFIED_LEVEL);
        categories
            .by_level
            .entry(level.to_string())
            .or_default()
            .push(skill.clone());

        if let Some(category) = infer_category(skill) {
            categories
                .by_type
                .entry(category.to_string())
                .or_default()
                .push(skill.clone());
        }
    }

    categories
}
