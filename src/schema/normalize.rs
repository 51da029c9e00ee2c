//! Shape repair for analysis entries, including older stored layouts

use super::{
    final_score_for, AnalysisEntry, ChecklistRound, Confidence, PlanDay, RoundMapping, SkillCategories,
    DEFAULT_SKILLS, MAX_QUESTIONS,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Category keys from earlier schema generations mapped onto canonical keys.
/// Keys not listed here fold into `other`.
pub const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("coreCS", "coreCS"),
    ("coreCs", "coreCS"),
    ("languages", "languages"),
    ("web", "web"),
    ("webDevelopment", "web"),
    ("data", "data"),
    ("dataDatabases", "data"),
    ("cloud", "cloud"),
    ("cloudDevOps", "cloud"),
    ("testing", "testing"),
    ("other", "other"),
    ("general", "other"),
];

// Field lookups, earliest match wins.
const ROUND_TITLE_FIELDS: &[&str] = &["name", "roundTitle"];
const ROUND_FOCUS_FIELDS: &[&str] = &["skillsTested", "focusAreas"];
const CHECKLIST_TITLE_FIELDS: &[&str] = &["round", "roundTitle"];
const PLAN_FIELDS: &[&str] = &["plan", "plan7Days"];
const BASE_SCORE_FIELDS: &[&str] = &["baseScore", "readinessScore"];

fn canonical_category(key: &str) -> &'static str {
    CATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
        .unwrap_or("other")
}

fn first_field<'a>(obj: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields.iter().find_map(|f| obj.get(*f).filter(|v| !v.is_null()))
}

fn first_text(obj: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|f| obj.get(*f).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(items) => items.iter().filter_map(Value::as_str).map(str::to_string).collect(),
        None => Vec::new(),
    }
}

fn text_field(obj: &Map<String, Value>, field: &str) -> String {
    obj.get(field).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn score_field(value: Option<&Value>) -> Option<u8> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, 100.0) as u8)
}

/// RFC 3339 text, or a number of epoch milliseconds.
fn timestamp_field(obj: &Map<String, Value>, field: &str) -> Option<DateTime<Utc>> {
    match obj.get(field)? {
        Value::String(s) => DateTime::parse_from_rfc3339(s).ok().map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Creation time for a stored record that lacks a readable `createdAt`.
/// Older ids were epoch milliseconds; anything else pins to the epoch.
fn stored_created_at(obj: &Map<String, Value>) -> DateTime<Utc> {
    let millis = match obj.get("id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse::<i64>().ok(),
        _ => None,
    };
    millis
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn id_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Map any grouped skills object onto the seven canonical categories.
///
/// Values may be plain arrays or `{ name, skills }` objects. Keys that alias
/// the same category are merged without duplicates. When nothing survives,
/// `other` receives [`DEFAULT_SKILLS`].
pub fn normalize_skill_categories(raw: Option<&Value>) -> SkillCategories {
    let mut normalized = SkillCategories::default();

    if let Some(obj) = raw.and_then(Value::as_object) {
        for (key, value) in obj {
            let skills = match value {
                Value::Array(_) => string_list(Some(value)),
                Value::Object(inner) => string_list(inner.get("skills")),
                _ => continue,
            };

            if let Some(bucket) = normalized.get_mut(canonical_category(key)) {
                for skill in skills {
                    if !bucket.contains(&skill) {
                        bucket.push(skill);
                    }
                }
            }
        }
    }

    if normalized.is_empty() {
        normalized.other = DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect();
    }

    normalized
}

pub fn normalize_round_mapping(raw: Option<&Value>) -> Vec<RoundMapping> {
    let rounds = match raw.and_then(Value::as_array) {
        Some(rounds) if !rounds.is_empty() => rounds,
        _ => {
            return vec![RoundMapping {
                round_title: "Technical Interview".to_string(),
                focus_areas: vec!["Problem solving".to_string(), "Coding".to_string()],
                why_it_matters: "Core assessment of technical abilities.".to_string(),
            }]
        }
    };

    let empty = Map::new();
    rounds
        .iter()
        .map(|round| {
            let obj = round.as_object().unwrap_or(&empty);
            let round_title = first_text(obj, ROUND_TITLE_FIELDS).unwrap_or_else(|| {
                let number = obj.get("round").and_then(Value::as_u64).filter(|n| *n > 0).unwrap_or(1);
                format!("Round {}", number)
            });
            RoundMapping {
                round_title,
                focus_areas: string_list(first_field(obj, ROUND_FOCUS_FIELDS)),
                why_it_matters: first_text(obj, &["whyItMatters"])
                    .unwrap_or_else(|| "Assessment of candidate fit.".to_string()),
            }
        })
        .collect()
}

pub fn normalize_checklist(raw: Option<&Value>) -> Vec<ChecklistRound> {
    let rounds = match raw.and_then(Value::as_array) {
        Some(rounds) if !rounds.is_empty() => rounds,
        _ => {
            return vec![ChecklistRound {
                round_title: "General Preparation".to_string(),
                items: vec![
                    "Review basics".to_string(),
                    "Practice coding".to_string(),
                    "Prepare projects".to_string(),
                ],
            }]
        }
    };

    let empty = Map::new();
    rounds
        .iter()
        .map(|round| {
            let obj = round.as_object().unwrap_or(&empty);
            ChecklistRound {
                round_title: first_text(obj, CHECKLIST_TITLE_FIELDS).unwrap_or_else(|| "Preparation".to_string()),
                items: string_list(obj.get("items")),
            }
        })
        .collect()
}

pub fn normalize_plan_7_days(raw: Option<&Value>) -> Vec<PlanDay> {
    let days = match raw.and_then(Value::as_array) {
        Some(days) if !days.is_empty() => days,
        _ => {
            return (1..=7)
                .map(|i| PlanDay {
                    day: format!("Day {}", i),
                    focus: "General preparation".to_string(),
                    tasks: vec!["Study".to_string(), "Practice".to_string(), "Review".to_string()],
                })
                .collect()
        }
    };

    let empty = Map::new();
    days.iter()
        .enumerate()
        .map(|(index, day)| {
            let obj = day.as_object().unwrap_or(&empty);
            PlanDay {
                day: first_text(obj, &["day"]).unwrap_or_else(|| format!("Day {}", index + 1)),
                focus: first_text(obj, &["focus"]).unwrap_or_else(|| "Preparation".to_string()),
                tasks: string_list(obj.get("tasks")),
            }
        })
        .collect()
}

/// Every skill gets an entry; supplied levels survive, unknown ones become `practice`.
fn normalize_confidence_map(raw: Option<&Value>, all_skills: &[String]) -> BTreeMap<String, Confidence> {
    let supplied = raw.and_then(Value::as_object);
    all_skills
        .iter()
        .map(|skill| {
            let level = supplied
                .and_then(|m| m.get(skill))
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<Confidence>().ok())
                .unwrap_or(Confidence::Practice);
            (skill.clone(), level)
        })
        .collect()
}

/// Build a canonical entry from any raw object, filling defaults for every
/// missing field. Applying it to its own serialized output is a no-op.
pub fn create_analysis_entry(raw: &Value) -> AnalysisEntry {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);
    let now = Utc::now();

    let extracted_skills = normalize_skill_categories(obj.get("extractedSkills"));
    let all_skills = extracted_skills.all_skills();

    let round_mapping_raw = obj
        .get("roundMapping")
        .filter(|v| !v.is_null())
        .or_else(|| obj.get("companyIntel").and_then(|intel| intel.get("roundMapping")));

    let mut questions = string_list(obj.get("questions"));
    questions.truncate(MAX_QUESTIONS);

    let base_score = first_field(obj, BASE_SCORE_FIELDS)
        .and_then(|v| score_field(Some(v)))
        .unwrap_or(0);
    let skill_confidence_map = normalize_confidence_map(obj.get("skillConfidenceMap"), &all_skills);
    let final_score = final_score_for(base_score, &skill_confidence_map);

    let created_at = timestamp_field(obj, "createdAt").unwrap_or(now);

    AnalysisEntry {
        id: id_field(obj).unwrap_or_else(generate_id),
        created_at,
        updated_at: timestamp_field(obj, "updatedAt").unwrap_or(created_at),
        company: text_field(obj, "company"),
        role: text_field(obj, "role"),
        jd_text: text_field(obj, "jdText"),
        extracted_skills,
        all_skills,
        round_mapping: normalize_round_mapping(round_mapping_raw),
        checklist: normalize_checklist(obj.get("checklist")),
        plan_7_days: normalize_plan_7_days(first_field(obj, PLAN_FIELDS)),
        questions,
        base_score,
        skill_confidence_map,
        final_score,
    }
}

/// Like [`create_analysis_entry`], for records read back from storage.
///
/// A missing or unreadable `createdAt` is filled from the record itself
/// rather than the clock, so repeated reads agree.
pub fn restore_analysis_entry(raw: &Value) -> AnalysisEntry {
    match raw.as_object() {
        Some(obj) if timestamp_field(obj, "createdAt").is_none() => {
            let mut pinned = obj.clone();
            pinned.insert(
                "createdAt".to_string(),
                Value::String(stored_created_at(obj).to_rfc3339()),
            );
            create_analysis_entry(&Value::Object(pinned))
        }
        _ => create_analysis_entry(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_category_keys_are_mapped() {
        let normalized = normalize_skill_categories(Some(&json!({
            "coreCs": ["DSA"],
            "webDevelopment": { "name": "Web Development", "skills": ["React"] },
            "general": ["General fresher stack"],
            "mystery": ["Haskell"]
        })));

        assert_eq!(normalized.core_cs, vec!["DSA"]);
        assert_eq!(normalized.web, vec!["React"]);
        assert_eq!(normalized.other, vec!["General fresher stack", "Haskell"]);
    }

    #[test]
    fn test_empty_categories_get_default_skills() {
        let normalized = normalize_skill_categories(Some(&json!({ "web": [] })));
        assert_eq!(normalized.other, DEFAULT_SKILLS.to_vec());

        let from_garbage = normalize_skill_categories(Some(&json!("not an object")));
        assert_eq!(from_garbage.other, DEFAULT_SKILLS.to_vec());
    }

    #[test]
    fn test_legacy_round_fields_are_renamed() {
        let rounds = normalize_round_mapping(Some(&json!([
            { "round": 1, "name": "Online Assessment", "skillsTested": ["DSA"], "whyItMatters": "Filters." },
            { "round": 3 }
        ])));

        assert_eq!(rounds[0].round_title, "Online Assessment");
        assert_eq!(rounds[0].focus_areas, vec!["DSA"]);
        assert_eq!(rounds[1].round_title, "Round 3");
        assert_eq!(rounds[1].why_it_matters, "Assessment of candidate fit.");
    }

    #[test]
    fn test_missing_collections_get_defaults() {
        assert_eq!(normalize_round_mapping(None).len(), 1);
        assert_eq!(normalize_checklist(Some(&json!([])))[0].round_title, "General Preparation");

        let plan = normalize_plan_7_days(None);
        assert_eq!(plan.len(), 7);
        assert_eq!(plan[6].day, "Day 7");
    }

    #[test]
    fn test_legacy_checklist_and_plan_fields() {
        let checklist = normalize_checklist(Some(&json!([{ "round": "Round 1: Aptitude", "items": ["a", 5, "b"] }])));
        assert_eq!(checklist[0].round_title, "Round 1: Aptitude");
        assert_eq!(checklist[0].items, vec!["a", "b"]);

        let entry = create_analysis_entry(&json!({
            "id": "legacy",
            "jdText": "",
            "plan": [{ "focus": "Basics", "tasks": ["x"] }],
            "readinessScore": 72,
            "companyIntel": { "roundMapping": [{ "name": "HR" }] }
        }));
        assert_eq!(entry.plan_7_days[0].day, "Day 1");
        assert_eq!(entry.plan_7_days[0].focus, "Basics");
        assert_eq!(entry.base_score, 72);
        assert_eq!(entry.round_mapping[0].round_title, "HR");
    }

    #[test]
    fn test_create_fills_every_field() {
        let entry = create_analysis_entry(&json!({}));

        assert!(!entry.id.is_empty());
        assert_eq!(entry.company, "");
        assert_eq!(entry.all_skills, DEFAULT_SKILLS.to_vec());
        assert_eq!(entry.skill_confidence_map.len(), 4);
        assert!(entry.skill_confidence_map.values().all(|c| *c == Confidence::Practice));
        assert_eq!(entry.base_score, 0);
        assert_eq!(entry.final_score, 0);
        assert_eq!(entry.updated_at, entry.created_at);
    }

    #[test]
    fn test_create_is_idempotent() {
        let raw = json!({
            "id": "abc",
            "company": "Acme",
            "jdText": "Python and Docker",
            "extractedSkills": { "languages": ["Python"], "cloud": ["Docker"], "general": ["Python"] },
            "questions": (0..14).map(|i| format!("Q{}", i)).collect::<Vec<_>>(),
            "baseScore": 65.4,
            "skillConfidenceMap": { "Python": "know", "Ghost": "know" }
        });

        let once = create_analysis_entry(&raw);
        let twice = create_analysis_entry(&serde_json::to_value(&once).unwrap());

        assert_eq!(once, twice);
        assert_eq!(once.questions.len(), MAX_QUESTIONS);
        assert_eq!(once.base_score, 65);
        assert!(!once.skill_confidence_map.contains_key("Ghost"));
    }

    #[test]
    fn test_final_score_follows_confidence_map() {
        let entry = create_analysis_entry(&json!({
            "id": "s",
            "jdText": "",
            "extractedSkills": { "languages": ["Go", "Rust"] },
            "baseScore": 50,
            "finalScore": 99,
            "skillConfidenceMap": { "Go": "know", "Rust": "practice" }
        }));

        assert_eq!(entry.final_score, 50);
    }

    #[test]
    fn test_restored_entry_without_creation_time_is_stable() {
        let raw = json!({ "id": "x", "jdText": "React", "createdAt": "yesterday", "baseScore": 50 });
        let first = restore_analysis_entry(&raw);
        let second = restore_analysis_entry(&raw);

        assert_eq!(first.created_at, DateTime::UNIX_EPOCH);
        assert_eq!(first, second);
        assert_eq!(first.updated_at, first.created_at);
    }

    #[test]
    fn test_restored_numeric_id_dates_the_entry() {
        let entry = restore_analysis_entry(&json!({ "id": 1700000000000u64, "jdText": "x" }));
        assert_eq!(entry.created_at.timestamp_millis(), 1_700_000_000_000);

        let kept = restore_analysis_entry(&json!({ "id": 5, "jdText": "x", "createdAt": "2024-02-01T00:00:00Z" }));
        assert_eq!(kept.created_at.to_rfc3339(), "2024-02-01T00:00:00+00:00");
    }

    #[test]
    fn test_numeric_ids_are_kept_as_text() {
        let entry = create_analysis_entry(&json!({ "id": 1700000000000u64, "jdText": "x" }));
        assert_eq!(entry.id, "1700000000000");
    }
}
