//! Plain-text export of an analysis

use crate::error::{Result, ReadinessError};
use crate::processing::ReadinessLevel;
use crate::schema::{AnalysisEntry, ChecklistRound, Confidence, PlanDay, RoundMapping};
use askama::Template;
use log::info;
use std::path::{Path, PathBuf};

struct SkillLine {
    name: String,
    confidence: &'static str,
}

#[derive(Template)]
#[template(source = r#"PLACEMENT PREPARATION PLAN
Company: {{ company }}
Role: {{ role }}
Analyzed: {{ created }}
Readiness score: {{ final_score }}/100 ({{ level }}), base score {{ base_score }}

SKILLS
{%- for skill in skills %}
- {{ skill.name }} ({{ skill.confidence }})
{%- endfor %}

WEAK SKILLS
{%- if weak_skills.is_empty() %}
- None
{%- else %}
{%- for skill in weak_skills %}
- {{ skill }}
{%- endfor %}
{%- endif %}

ROUND MAPPING
{%- for round in rounds %}
{{ loop.index }}. {{ round.round_title }}
   Focus: {{ round.focus_areas|join(", ") }}
   Why it matters: {{ round.why_it_matters }}
{%- endfor %}

PREPARATION CHECKLIST
{%- for round in checklist %}

{{ round.round_title }}
{%- for item in round.items %}
  [ ] {{ item }}
{%- endfor %}
{%- endfor %}

7-DAY PLAN
{%- for day in plan %}

{{ day.day }}: {{ day.focus }}
{%- for task in day.tasks %}
  - {{ task }}
{%- endfor %}
{%- endfor %}

INTERVIEW QUESTIONS
{%- for question in questions %}
{{ loop.index }}. {{ question }}
{%- endfor %}
"#, ext = "txt")]
struct ExportTemplate<'a> {
    company: &'a str,
    role: &'a str,
    created: String,
    base_score: u8,
    final_score: u8,
    level: String,
    skills: Vec<SkillLine>,
    weak_skills: Vec<&'a str>,
    rounds: &'a [RoundMapping],
    checklist: &'a [ChecklistRound],
    plan: &'a [PlanDay],
    questions: &'a [String],
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not specified"
    } else {
        value
    }
}

pub fn render_export(entry: &AnalysisEntry) -> Result<String> {
    let skills = entry
        .all_skills
        .iter()
        .map(|skill| SkillLine {
            name: skill.clone(),
            confidence: entry
                .skill_confidence_map
                .get(skill)
                .copied()
                .unwrap_or(Confidence::Practice)
                .as_str(),
        })
        .collect();

    let template = ExportTemplate {
        company: or_placeholder(&entry.company),
        role: or_placeholder(&entry.role),
        created: entry.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        base_score: entry.base_score,
        final_score: entry.final_score,
        level: ReadinessLevel::from_score(entry.final_score).to_string(),
        skills,
        weak_skills: entry.weak_skills(),
        rounds: &entry.round_mapping,
        checklist: &entry.checklist,
        plan: &entry.plan_7_days,
        questions: &entry.questions,
    };

    template
        .render()
        .map_err(|e| ReadinessError::OutputFormatting(e.to_string()))
}

/// `placement-prep-<slug>.txt`, slugged from the company name.
pub fn export_file_name(company: &str) -> String {
    let mut slug = String::new();
    for c in company.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "analysis" } else { slug };
    format!("placement-prep-{}.txt", slug)
}

pub fn write_export(entry: &AnalysisEntry, dir: &Path) -> Result<PathBuf> {
    let content = render_export(entry)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(&entry.company));
    std::fs::write(&path, content)?;
    info!("Exported analysis {} to {}", entry.id, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyze_jd;
    use tempfile::TempDir;

    #[test]
    fn test_file_names() {
        assert_eq!(export_file_name("Goldman Sachs & Co."), "placement-prep-goldman-sachs-co.txt");
        assert_eq!(export_file_name("  "), "placement-prep-analysis.txt");
        assert_eq!(export_file_name("!!!"), "placement-prep-analysis.txt");
        assert_eq!(export_file_name("Zoho"), "placement-prep-zoho.txt");
    }

    #[test]
    fn test_export_contains_every_section() {
        let mut entry = analyze_jd("Amazon", "SDE Intern", "Java, SQL and AWS with React on the frontend.");
        entry.set_skill_confidence("Java", Confidence::Know);
        let text = render_export(&entry).unwrap();

        assert!(text.starts_with("PLACEMENT PREPARATION PLAN\nCompany: Amazon\nRole: SDE Intern"));
        assert!(text.contains("- Java (know)"));
        assert!(text.contains("- SQL (practice)"));
        assert!(text.contains("1. Online Assessment"));
        assert!(text.contains("Day 7:"));
        assert!(text.contains(&format!("1. {}", entry.questions[0])));

        let weak = text.split("WEAK SKILLS").nth(1).unwrap();
        let weak = weak.split("ROUND MAPPING").next().unwrap();
        assert!(weak.contains("- SQL"));
        assert!(!weak.contains("- Java"));
    }

    #[test]
    fn test_export_without_company() {
        let entry = analyze_jd("", "", "Python scripting");
        let text = render_export(&entry).unwrap();
        assert!(text.contains("Company: Not specified"));
    }

    #[test]
    fn test_write_export() {
        let dir = TempDir::new().unwrap();
        let entry = analyze_jd("Acme Labs", "Dev", "Docker and Kubernetes");
        let path = write_export(&entry, &dir.path().join("exports")).unwrap();
        assert_eq!(path.file_name().unwrap(), "placement-prep-acme-labs.txt");
        assert!(std::fs::read_to_string(path).unwrap().contains("Role: Dev"));
    }
}
