//! Job description analysis module

pub mod skill_extractor;
pub mod readiness;
pub mod company_intel;
pub mod content;
pub mod analyzer;

pub use analyzer::{analyze_jd, check_jd_input, AnalysisRequest, Analyzer, InputWarning};
pub use company_intel::{CompanyIntel, CompanySize};
pub use readiness::{calculate_readiness_score, ReadinessLevel, ScoreBreakdown};
pub use skill_extractor::{extract_skills, ExtractedSkills};
