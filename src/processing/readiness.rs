//! Heuristic readiness scoring

use crate::config::ScoringConfig;
use crate::schema::SkillCategories;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-component view of a readiness score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub category_bonus: u32,
    pub category_count: usize,
    pub company_bonus: u32,
    pub role_bonus: u32,
    pub jd_length_bonus: u32,
    pub total: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLevel {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ReadinessLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ReadinessLevel::Excellent,
            60..=79 => ReadinessLevel::Good,
            40..=59 => ReadinessLevel::Fair,
            _ => ReadinessLevel::NeedsWork,
        }
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReadinessLevel::Excellent => "Excellent",
            ReadinessLevel::Good => "Good",
            ReadinessLevel::Fair => "Fair",
            ReadinessLevel::NeedsWork => "Needs Work",
        };
        f.write_str(label)
    }
}

pub struct ReadinessScorer {
    config: ScoringConfig,
}

impl Default for ReadinessScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl ReadinessScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn breakdown(&self, skills: &SkillCategories, company: &str, role: &str, jd_text: &str) -> ScoreBreakdown {
        let cfg = &self.config;
        let category_count = skills.matched_category_count();
        let category_bonus = cfg
            .per_category
            .saturating_mul(category_count as u32)
            .min(cfg.category_cap);
        let company_bonus = if company.trim().is_empty() { 0 } else { cfg.company_bonus };
        let role_bonus = if role.trim().is_empty() { 0 } else { cfg.role_bonus };
        let jd_length_bonus = if jd_text.chars().count() > cfg.long_jd_threshold {
            cfg.long_jd_bonus
        } else {
            0
        };

        let sum = [category_bonus, company_bonus, role_bonus, jd_length_bonus]
            .into_iter()
            .fold(cfg.base, u32::saturating_add);

        ScoreBreakdown {
            base: cfg.base,
            category_bonus,
            category_count,
            company_bonus,
            role_bonus,
            jd_length_bonus,
            total: sum.min(cfg.max_score).min(100) as u8,
        }
    }

    pub fn score(&self, skills: &SkillCategories, company: &str, role: &str, jd_text: &str) -> u8 {
        self.breakdown(skills, company, role, jd_text).total
    }
}

/// Score with the default weights.
pub fn calculate_readiness_score(skills: &SkillCategories, company: &str, role: &str, jd_text: &str) -> u8 {
    ReadinessScorer::default().score(skills, company, role, jd_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(categories: usize) -> SkillCategories {
        let mut skills = SkillCategories::default();
        let buckets = [
            &mut skills.core_cs,
            &mut skills.languages,
            &mut skills.web,
            &mut skills.data,
            &mut skills.cloud,
            &mut skills.testing,
        ];
        for bucket in buckets.into_iter().take(categories) {
            bucket.push("skill".to_string());
        }
        skills
    }

    #[test]
    fn test_minimum_score_is_base() {
        assert_eq!(calculate_readiness_score(&skills(0), "", "", "short"), 35);
    }

    #[test]
    fn test_fallback_bucket_earns_no_category_bonus() {
        let mut fallback = SkillCategories::default();
        fallback.other.push("Communication".to_string());
        assert_eq!(calculate_readiness_score(&fallback, "  ", "\t", ""), 35);
    }

    #[test]
    fn test_all_components() {
        let jd = "x".repeat(900);
        assert_eq!(calculate_readiness_score(&skills(3), "Google", "SWE", &jd), 80);
    }

    #[test]
    fn test_jd_length_threshold_is_exclusive() {
        let at = "x".repeat(800);
        let over = "x".repeat(801);
        assert_eq!(calculate_readiness_score(&skills(0), "", "", &at), 35);
        assert_eq!(calculate_readiness_score(&skills(0), "", "", &over), 45);
    }

    #[test]
    fn test_category_bonus_is_capped_and_total_bounded() {
        let scorer = ReadinessScorer::default();
        let breakdown = scorer.breakdown(&skills(6), "Acme", "Dev", &"x".repeat(1000));
        assert_eq!(breakdown.category_bonus, 30);
        assert_eq!(breakdown.total, 95);

        let generous = ReadinessScorer::new(ScoringConfig {
            per_category: 20,
            category_cap: 120,
            ..ScoringConfig::default()
        });
        assert_eq!(generous.score(&skills(6), "Acme", "Dev", ""), 100);
    }

    #[test]
    fn test_oversized_weights_saturate() {
        let scorer = ReadinessScorer::new(ScoringConfig {
            base: u32::MAX,
            per_category: u32::MAX,
            category_cap: u32::MAX,
            company_bonus: u32::MAX,
            ..ScoringConfig::default()
        });
        let breakdown = scorer.breakdown(&skills(6), "Acme", "Dev", "");
        assert_eq!(breakdown.category_bonus, u32::MAX);
        assert_eq!(breakdown.total, 100);
    }

    #[test]
    fn test_deterministic() {
        let s = skills(2);
        let a = calculate_readiness_score(&s, "Acme", "", "jd");
        let b = calculate_readiness_score(&s, "Acme", "", "jd");
        assert_eq!(a, b);
    }

    #[test]
    fn test_readiness_levels() {
        assert_eq!(ReadinessLevel::from_score(80), ReadinessLevel::Excellent);
        assert_eq!(ReadinessLevel::from_score(60), ReadinessLevel::Good);
        assert_eq!(ReadinessLevel::from_score(59), ReadinessLevel::Fair);
        assert_eq!(ReadinessLevel::from_score(39).to_string(), "Needs Work");
    }
}
