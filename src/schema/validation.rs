//! Schema validation with strict and lenient entry points

use super::normalize::restore_analysis_entry;
use super::AnalysisEntry;
use crate::error::{Result, ReadinessError};
use serde_json::Value;

pub const REQUIRED_FIELDS: [&str; 5] = ["id", "createdAt", "jdText", "extractedSkills", "baseScore"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Object,
    Array,
}

impl FieldKind {
    fn of(value: &Value) -> &'static str {
        match value {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
        }
    }
}

pub const FIELD_KINDS: &[(&str, FieldKind)] = &[
    ("id", FieldKind::String),
    ("createdAt", FieldKind::String),
    ("updatedAt", FieldKind::String),
    ("company", FieldKind::String),
    ("role", FieldKind::String),
    ("jdText", FieldKind::String),
    ("extractedSkills", FieldKind::Object),
    ("roundMapping", FieldKind::Array),
    ("checklist", FieldKind::Array),
    ("plan7Days", FieldKind::Array),
    ("questions", FieldKind::Array),
    ("baseScore", FieldKind::Number),
    ("skillConfidenceMap", FieldKind::Object),
    ("finalScore", FieldKind::Number),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Present whenever `id` and `jdText` exist, even if `errors` is non-empty.
    /// Built with [`restore_analysis_entry`](super::normalize::restore_analysis_entry).
    pub normalized: Option<AnalysisEntry>,
}

pub fn validate_analysis_entry(raw: &Value) -> ValidationReport {
    let obj = match raw.as_object() {
        Some(obj) => obj,
        None => {
            return ValidationReport {
                is_valid: false,
                errors: vec!["Entry is not an object".to_string()],
                normalized: None,
            }
        }
    };

    let mut errors = Vec::new();

    for field in REQUIRED_FIELDS {
        if obj.get(field).map_or(true, Value::is_null) {
            errors.push(format!("Missing required field: {}", field));
        }
    }

    for (field, kind) in FIELD_KINDS {
        if let Some(value) = obj.get(*field).filter(|v| !v.is_null()) {
            let actual = FieldKind::of(value);
            if actual != kind.name() {
                errors.push(format!("Field {} should be {}, got {}", field, kind.name(), actual));
            }
        }
    }

    let has_id = match obj.get("id") {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    };
    let normalized = if has_id && obj.contains_key("jdText") {
        Some(restore_analysis_entry(raw))
    } else {
        None
    };

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        normalized,
    }
}

/// Accept only entries that pass every schema check.
pub fn normalize_strict(raw: &Value) -> Result<AnalysisEntry> {
    let report = validate_analysis_entry(raw);
    match report.normalized {
        Some(entry) if report.is_valid => Ok(entry),
        _ => Err(ReadinessError::InvalidEntry(report.errors)),
    }
}

/// Accept any entry that can be normalized, ignoring reported schema errors.
pub fn normalize_lenient(raw: &Value) -> Option<AnalysisEntry> {
    validate_analysis_entry(raw).normalized
}
