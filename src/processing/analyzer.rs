//! End-to-end job description analysis

use crate::config::AnalysisConfig;
use crate::error::{Result, ReadinessError};
use crate::processing::company_intel::{generate_company_intel, generate_round_mapping, CompanyClassifier, CompanyIntel, CompanySize};
use crate::processing::content::{generate_checklist, generate_questions, generate_seven_day_plan};
use crate::processing::readiness::{ReadinessScorer, ScoreBreakdown};
use crate::processing::skill_extractor::SkillExtractor;
use crate::schema::normalize::generate_id;
use crate::schema::{create_analysis_entry, normalize_skill_categories, AnalysisEntry};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub company: String,
    pub role: String,
    pub jd_text: String,
    /// Forces a size tier instead of classifying the company name
    pub company_size: Option<CompanySize>,
}

impl AnalysisRequest {
    pub fn new(company: impl Into<String>, role: impl Into<String>, jd_text: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            jd_text: jd_text.into(),
            company_size: None,
        }
    }

    pub fn with_company_size(mut self, size: CompanySize) -> Self {
        self.company_size = Some(size);
        self
    }
}

/// Non-blocking input advisories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputWarning {
    ShortDescription { length: usize, minimum: usize },
}

impl std::fmt::Display for InputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputWarning::ShortDescription { length, minimum } => write!(
                f,
                "Job description is short ({} characters, at least {} recommended); results may be less specific",
                length, minimum
            ),
        }
    }
}

/// Rejects empty descriptions and warns on short ones.
pub fn check_jd_input(jd_text: &str, min_chars: usize) -> Result<Vec<InputWarning>> {
    if jd_text.trim().is_empty() {
        return Err(ReadinessError::InvalidInput("Please provide a job description".to_string()));
    }

    let length = jd_text.chars().count();
    let mut warnings = Vec::new();
    if length < min_chars {
        warnings.push(InputWarning::ShortDescription { length, minimum: min_chars });
    }
    Ok(warnings)
}

/// Runs extraction, scoring and content generation, then normalizes the result.
pub struct Analyzer {
    extractor: SkillExtractor,
    scorer: ReadinessScorer,
    classifier: CompanyClassifier,
    short_jd_warning_chars: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&crate::config::Config::default().analysis)
    }
}

impl Analyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            extractor: SkillExtractor::new(),
            scorer: ReadinessScorer::new(config.scoring.clone()),
            classifier: CompanyClassifier::new(),
            short_jd_warning_chars: config.short_jd_warning_chars,
        }
    }

    pub fn check_input(&self, jd_text: &str) -> Result<Vec<InputWarning>> {
        check_jd_input(jd_text, self.short_jd_warning_chars)
    }

    pub fn company_size(&self, company: &str, size_override: Option<CompanySize>) -> CompanySize {
        size_override.unwrap_or_else(|| self.classifier.classify(company))
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisEntry {
        let extracted = self.extractor.extract(&request.jd_text);
        let skills = normalize_skill_categories(Some(&extracted.to_value()));
        let base_score = self.scorer.score(&skills, &request.company, &request.role, &request.jd_text);
        let size = self.company_size(&request.company, request.company_size);

        debug!(
            "Extracted {} skills across {} categories, company size {}",
            skills.all_skills().len(),
            skills.matched_category_count(),
            size
        );

        let raw = json!({
            "id": generate_id(),
            "createdAt": Utc::now().to_rfc3339(),
            "company": request.company,
            "role": request.role,
            "jdText": request.jd_text,
            "extractedSkills": skills,
            "allSkills": skills.all_skills(),
            "baseScore": base_score,
            "roundMapping": generate_round_mapping(size, &skills),
            "checklist": generate_checklist(&skills),
            "plan7Days": generate_seven_day_plan(&skills),
            "questions": generate_questions(&skills),
        });

        let entry = create_analysis_entry(&raw);
        info!("Analysis {} complete: base score {}", entry.id, entry.base_score);
        entry
    }

    pub fn score_breakdown(&self, entry: &AnalysisEntry) -> ScoreBreakdown {
        self.scorer
            .breakdown(&entry.extracted_skills, &entry.company, &entry.role, &entry.jd_text)
    }

    /// Company intel for a stored entry.
    pub fn company_intel(&self, entry: &AnalysisEntry, size_override: Option<CompanySize>) -> CompanyIntel {
        let size = self.company_size(&entry.company, size_override);
        generate_company_intel(&entry.company, &entry.jd_text, &entry.extracted_skills, Some(size))
    }
}

/// Analyze with default configuration.
pub fn analyze_jd(company: &str, role: &str, jd_text: &str) -> AnalysisEntry {
    Analyzer::default().analyze(&AnalysisRequest::new(company, role, jd_text))
}
