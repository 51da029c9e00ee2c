//! Canonical analysis entry schema
//!
//! Every entry, whether freshly generated or read back from storage, passes
//! through [`normalize::create_analysis_entry`] before it is used.

pub mod normalize;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use crate::processing::skill_extractor::DEFAULT_SKILLS;
pub use normalize::{create_analysis_entry, normalize_skill_categories, restore_analysis_entry};
pub use validation::{normalize_lenient, normalize_strict, validate_analysis_entry, ValidationReport};

/// Canonical category keys, in flattening order.
pub const CANONICAL_CATEGORIES: [&str; 7] = ["coreCS", "languages", "web", "data", "cloud", "testing", "other"];

/// Interview questions kept per entry.
pub const MAX_QUESTIONS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategories {
    #[serde(rename = "coreCS", default)]
    pub core_cs: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub web: Vec<String>,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub cloud: Vec<String>,
    #[serde(default)]
    pub testing: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

impl SkillCategories {
    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        match key {
            "coreCS" => Some(&self.core_cs),
            "languages" => Some(&self.languages),
            "web" => Some(&self.web),
            "data" => Some(&self.data),
            "cloud" => Some(&self.cloud),
            "testing" => Some(&self.testing),
            "other" => Some(&self.other),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Vec<String>> {
        match key {
            "coreCS" => Some(&mut self.core_cs),
            "languages" => Some(&mut self.languages),
            "web" => Some(&mut self.web),
            "data" => Some(&mut self.data),
            "cloud" => Some(&mut self.cloud),
            "testing" => Some(&mut self.testing),
            "other" => Some(&mut self.other),
            _ => None,
        }
    }

    /// Categories in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Vec<String>)> + '_ {
        CANONICAL_CATEGORIES
            .iter()
            .filter_map(move |key| self.get(key).map(|skills| (*key, skills)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, skills)| skills.is_empty())
    }

    /// Non-empty categories other than the `other` fallback bucket.
    pub fn matched_category_count(&self) -> usize {
        self.iter()
            .filter(|(key, skills)| *key != "other" && !skills.is_empty())
            .count()
    }

    /// Flattened skills in canonical order, never empty.
    pub fn all_skills(&self) -> Vec<String> {
        let skills: Vec<String> = self.iter().flat_map(|(_, skills)| skills.iter().cloned()).collect();
        if skills.is_empty() {
            DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
        } else {
            skills
        }
    }

    /// Exact, case-insensitive skill lookup.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.iter()
            .flat_map(|(_, skills)| skills.iter())
            .any(|s| s.eq_ignore_ascii_case(skill))
    }

    /// Case-insensitive lookup that also accepts skills containing `skill`.
    pub fn mentions_skill(&self, skill: &str) -> bool {
        let needle = skill.to_lowercase();
        self.iter()
            .flat_map(|(_, skills)| skills.iter())
            .any(|s| s.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundMapping {
    pub round_title: String,
    pub focus_areas: Vec<String>,
    pub why_it_matters: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistRound {
    pub round_title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    pub day: String,
    pub focus: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Know,
    Practice,
}

impl Confidence {
    pub fn toggled(self) -> Self {
        match self {
            Confidence::Know => Confidence::Practice,
            Confidence::Practice => Confidence::Know,
        }
    }

    /// Contribution of one skill to the final score.
    pub fn adjustment(self) -> i32 {
        match self {
            Confidence::Know => 2,
            Confidence::Practice => -2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Know => "know",
            Confidence::Practice => "practice",
        }
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "know" => Ok(Confidence::Know),
            "practice" => Ok(Confidence::Practice),
            _ => Err(format!("Invalid confidence: {}. Supported: know, practice", s)),
        }
    }
}

/// The canonical persisted unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company: String,
    pub role: String,
    pub jd_text: String,
    pub extracted_skills: SkillCategories,
    pub all_skills: Vec<String>,
    pub round_mapping: Vec<RoundMapping>,
    pub checklist: Vec<ChecklistRound>,
    #[serde(rename = "plan7Days")]
    pub plan_7_days: Vec<PlanDay>,
    pub questions: Vec<String>,
    pub base_score: u8,
    pub skill_confidence_map: BTreeMap<String, Confidence>,
    pub final_score: u8,
}

/// `clamp(base + Σ adjustment, 0, 100)`.
pub fn final_score_for(base_score: u8, confidence: &BTreeMap<String, Confidence>) -> u8 {
    let adjustment: i32 = confidence.values().map(|c| c.adjustment()).sum();
    (i32::from(base_score) + adjustment).clamp(0, 100) as u8
}

impl AnalysisEntry {
    /// Re-derive `final_score` from `base_score` and the confidence map.
    /// The only place a final score changes after creation.
    pub fn recalculate_final_score(&mut self) {
        self.final_score = final_score_for(self.base_score, &self.skill_confidence_map);
    }

    pub fn set_skill_confidence(&mut self, skill: &str, confidence: Confidence) -> bool {
        match self.skill_confidence_map.get_mut(skill) {
            Some(current) => {
                *current = confidence;
                self.recalculate_final_score();
                true
            }
            None => false,
        }
    }

    /// Flip know/practice for `skill`. Returns false when the skill is unknown.
    pub fn toggle_skill_confidence(&mut self, skill: &str) -> bool {
        match self.skill_confidence_map.get(skill).copied() {
            Some(current) => self.set_skill_confidence(skill, current.toggled()),
            None => false,
        }
    }

    pub fn weak_skills(&self) -> Vec<&str> {
        self.all_skills
            .iter()
            .filter(|skill| self.skill_confidence_map.get(skill.as_str()) != Some(&Confidence::Know))
            .map(|s| s.as_str())
            .collect()
    }

    pub fn known_skills(&self) -> Vec<&str> {
        self.all_skills
            .iter()
            .filter(|skill| self.skill_confidence_map.get(skill.as_str()) == Some(&Confidence::Know))
            .map(|s| s.as_str())
            .collect()
    }
}
