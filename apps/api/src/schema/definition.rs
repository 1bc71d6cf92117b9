//! The resume document schema.
//!
//! One fixed shape modelled on the public JSON Resume schema. Unknown properties
//! are allowed everywhere, and all `*Date` fields use the flexible `date` format
//! registered by the validator rather than strict RFC 3339 dates.

use serde::Serialize;
use serde_json::{json, Value};

pub const SCHEMA_VERSION: &str = "1.0.0";
pub const SCHEMA_NAME: &str = "JSON Resume Schema";
pub const SCHEMA_URL: &str = "https://jsonresume.org/schema/";
pub const SCHEMA_DESCRIPTION: &str =
    "Structural schema for resume documents: basics, work history, education, skills and related sections";

pub const SKILL_LEVELS: &[&str] = &[
    "Beginner",
    "Novice",
    "Intermediate",
    "Advanced",
    "Expert",
    "Master",
];

pub const LANGUAGE_FLUENCIES: &[&str] = &[
    "Elementary",
    "Limited Working",
    "Professional Working",
    "Full Professional",
    "Native or Bilingual",
    "Native speaker",
    "Fluent",
    "Conversational",
    "Basic",
];

#[derive(Debug, Clone, Serialize)]
pub struct SchemaInfo {
    pub version: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub fn schema_info() -> SchemaInfo {
    SchemaInfo {
        version: SCHEMA_VERSION,
        name: SCHEMA_NAME,
        url: SCHEMA_URL,
        description: SCHEMA_DESCRIPTION,
    }
}

fn string() -> Value {
    json!({ "type": "string" })
}

fn formatted(format: &str) -> Value {
    json!({ "type": "string", "format": format })
}

fn string_list() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn entries(properties: Value) -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "additionalProperties": true,
            "properties": properties
        }
    })
}

/// Entry shape shared by `work` and `volunteer`.
fn engagement() -> Value {
    entries(json!({
        "name": string(),
        "organization": string(),
        "location": string(),
        "description": string(),
        "position": string(),
        "url": formatted("uri"),
        "startDate": formatted("date"),
        "endDate": formatted("date"),
        "summary": string(),
        "highlights": string_list()
    }))
}

/// Builds the full schema document. Cheap enough to call per request; the
/// validator compiles it once.
pub fn schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": SCHEMA_NAME,
        "type": "object",
        "additionalProperties": true,
        "properties": {
            "basics": {
                "type": "object",
                "additionalProperties": true,
                "properties": {
                    "name": string(),
                    "label": string(),
                    "image": string(),
                    "email": formatted("email"),
                    "phone": string(),
                    "url": formatted("uri"),
                    "summary": string(),
                    "location": {
                        "type": "object",
                        "additionalProperties": true,
                        "properties": {
                            "address": string(),
                            "postalCode": string(),
                            "city": string(),
                            "countryCode": string(),
                            "region": string()
                        }
                    },
                    "profiles": entries(json!({
                        "network": string(),
                        "username": string(),
                        "url": formatted("uri")
                    }))
                }
            },
            "work": engagement(),
            "volunteer": engagement(),
            "education": entries(json!({
                "institution": string(),
                "url": formatted("uri"),
                "area": string(),
                "studyType": string(),
                "startDate": formatted("date"),
                "endDate": formatted("date"),
                "score": string(),
                "courses": string_list()
            })),
            "awards": entries(json!({
                "title": string(),
                "date": formatted("date"),
                "awarder": string(),
                "summary": string()
            })),
            "certificates": entries(json!({
                "name": string(),
                "date": formatted("date"),
                "url": formatted("uri"),
                "issuer": string()
            })),
            "publications": entries(json!({
                "name": string(),
                "publisher": string(),
                "releaseDate": formatted("date"),
                "url": formatted("uri"),
                "summary": string()
            })),
            "skills": entries(json!({
                "name": string(),
                "level": { "type": "string", "enum": SKILL_LEVELS },
                "keywords": string_list()
            })),
            "languages": entries(json!({
                "language": string(),
                "fluency": { "type": "string", "enum": LANGUAGE_FLUENCIES }
            })),
            "interests": entries(json!({
                "name": string(),
                "keywords": string_list()
            })),
            "references": entries(json!({
                "name": string(),
                "reference": string()
            })),
            "projects": entries(json!({
                "name": string(),
                "description": string(),
                "highlights": string_list(),
                "keywords": string_list(),
                "startDate": formatted("date"),
                "endDate": formatted("date"),
                "url": formatted("uri"),
                "roles": string_list(),
                "entity": string(),
                "type": string()
            })),
            "meta": {
                "type": "object",
                "additionalProperties": true,
                "properties": {
                    "canonical": formatted("uri"),
                    "version": string(),
                    "lastModified": string()
                }
            }
        }
    })
}
