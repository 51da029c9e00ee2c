//! Console and JSON rendering of analyses, history and the test checklist

use crate::error::Result;
use crate::processing::{CompanyIntel, ReadinessLevel, ScoreBreakdown};
use crate::schema::{AnalysisEntry, Confidence};
use crate::storage::TestChecklistItem;
use colored::{Color, Colorize};
use serde::Serialize;

/// Everything shown for one analysis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<'a> {
    pub entry: &'a AnalysisEntry,
    pub company_intel: CompanyIntel,
    pub score_breakdown: ScoreBreakdown,
}

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
    /// Also emit company intel and the score breakdown
    with_context: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_level_badge(&self, score: u8) -> String {
        let level = ReadinessLevel::from_score(score);
        let color = match level {
            ReadinessLevel::Excellent => Color::Green,
            ReadinessLevel::Good => Color::BrightGreen,
            ReadinessLevel::Fair => Color::Yellow,
            ReadinessLevel::NeedsWork => Color::Red,
        };
        let label = level.to_string().to_uppercase();

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_confidence(&self, confidence: Confidence) -> String {
        match confidence {
            Confidence::Know => self.colorize("✓ know", Color::Green),
            Confidence::Practice => self.colorize("○ practice", Color::Yellow),
        }
    }

    pub fn format_history(&self, entries: &[AnalysisEntry]) -> String {
        let mut output = self.format_header("Analysis History", 1);
        if entries.is_empty() {
            output.push_str("No saved analyses yet.\n");
            return output;
        }

        for entry in entries {
            let company = if entry.company.is_empty() { "(no company)" } else { entry.company.as_str() };
            output.push_str(&format!(
                "{}  {}  {:<24} {:<20} {:>3}/100\n",
                self.colorize(&entry.id, Color::Cyan),
                entry.created_at.format("%Y-%m-%d %H:%M"),
                company,
                entry.role,
                entry.final_score
            ));
        }
        output.push_str(&format!("\n{} saved analyses\n", entries.len()));
        output
    }

    pub fn format_checklist(&self, items: &[TestChecklistItem]) -> String {
        let passed = items.iter().filter(|item| item.checked).count();
        let mut output = self.format_header("Test Checklist", 1);

        for item in items {
            let mark = if item.checked {
                self.colorize("[x]", Color::Green)
            } else {
                "[ ]".to_string()
            };
            output.push_str(&format!("{} {} ({})\n", mark, item.label, self.colorize(&item.id, Color::Cyan)));
            if self.detailed {
                output.push_str(&format!("      {}\n", item.hint));
            }
        }

        let summary = format!("\n{} / {} tests passed\n", passed, items.len());
        if !items.is_empty() && passed == items.len() {
            output.push_str(&self.colorize(&summary, Color::Green));
        } else {
            output.push_str(&summary);
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let entry = report.entry;
        let intel = &report.company_intel;
        let mut output = String::new();

        output.push_str(&self.format_header("PLACEMENT READINESS ANALYSIS", 1));
        output.push_str(&format!("ID: {}\n", self.colorize(&entry.id, Color::Cyan)));
        output.push_str(&format!(
            "Company: {} ({}, {})\n",
            intel.name, intel.size, intel.industry
        ));
        if !entry.role.is_empty() {
            output.push_str(&format!("Role: {}\n", entry.role));
        }
        output.push_str(&format!("Analyzed: {}\n", entry.created_at.format("%Y-%m-%d %H:%M:%S UTC")));

        output.push_str(&self.format_header("Readiness", 2));
        output.push_str(&format!(
            "Score: {}/100 {} (base {})\n",
            entry.final_score,
            self.format_level_badge(entry.final_score),
            entry.base_score
        ));
        if self.detailed {
            let b = &report.score_breakdown;
            output.push_str(&format!("  Base:            +{}\n", b.base));
            output.push_str(&format!("  Categories ({}):  +{}\n", b.category_count, b.category_bonus));
            output.push_str(&format!("  Company given:   +{}\n", b.company_bonus));
            output.push_str(&format!("  Role given:      +{}\n", b.role_bonus));
            output.push_str(&format!("  Detailed JD:     +{}\n", b.jd_length_bonus));
        }

        output.push_str(&self.format_header("Skills", 2));
        for (key, skills) in entry.extracted_skills.iter() {
            if skills.is_empty() {
                continue;
            }
            output.push_str(&format!("{}:\n", self.colorize(key, Color::Magenta)));
            for skill in skills {
                let confidence = entry
                    .skill_confidence_map
                    .get(skill)
                    .copied()
                    .unwrap_or(Confidence::Practice);
                output.push_str(&format!("  • {} {}\n", skill, self.format_confidence(confidence)));
            }
        }

        let weak = entry.weak_skills();
        if !weak.is_empty() {
            output.push_str(&format!("\nNeeds practice: {}\n", self.colorize(&weak.join(", "), Color::Yellow)));
        }

        output.push_str(&self.format_header(&format!("Hiring Focus: {}", intel.hiring_focus.title), 2));
        output.push_str(&format!("{}\n", intel.hiring_focus.description));
        if self.detailed {
            for area in &intel.hiring_focus.key_areas {
                output.push_str(&format!("  • {}\n", area));
            }
        }

        output.push_str(&self.format_header("Interview Rounds", 2));
        for (i, round) in entry.round_mapping.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, self.colorize(&round.round_title, Color::Cyan)));
            output.push_str(&format!("   Focus: {}\n", round.focus_areas.join(", ")));
            if self.detailed {
                output.push_str(&format!("   Why it matters: {}\n", round.why_it_matters));
            }
        }

        output.push_str(&self.format_header("Preparation Checklist", 2));
        for round in &entry.checklist {
            output.push_str(&format!("{}\n", self.colorize(&round.round_title, Color::Cyan)));
            for item in &round.items {
                output.push_str(&format!("  [ ] {}\n", item));
            }
        }

        output.push_str(&self.format_header("7-Day Plan", 2));
        for day in &entry.plan_7_days {
            output.push_str(&format!("{}: {}\n", self.colorize(&day.day, Color::Cyan), day.focus));
            if self.detailed {
                for task in &day.tasks {
                    output.push_str(&format!("  - {}\n", task));
                }
            }
        }

        output.push_str(&self.format_header("Interview Questions", 2));
        for (i, question) in entry.questions.iter().enumerate() {
            output.push_str(&format!("{:>2}. {}\n", i + 1, question));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool, with_context: bool) -> Self {
        Self { pretty, with_context }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let json = match (self.with_context, self.pretty) {
            (true, true) => serde_json::to_string_pretty(report)?,
            (true, false) => serde_json::to_string(report)?,
            (false, true) => serde_json::to_string_pretty(report.entry)?,
            (false, false) => serde_json::to_string(report.entry)?,
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{AnalysisRequest, Analyzer};
    use crate::storage::test_checklist::default_items;

    fn report(entry: &AnalysisEntry) -> AnalysisReport<'_> {
        let analyzer = Analyzer::default();
        AnalysisReport {
            entry,
            company_intel: analyzer.company_intel(entry, None),
            score_breakdown: analyzer.score_breakdown(entry),
        }
    }

    fn sample() -> AnalysisEntry {
        Analyzer::default().analyze(&AnalysisRequest::new("Google", "SWE", "DSA, Python, React and PostgreSQL"))
    }

    #[test]
    fn test_console_report_without_colors() {
        let entry = sample();
        let text = ConsoleFormatter::new(false, true).format_report(&report(&entry)).unwrap();

        assert!(text.contains("Company: Google (Enterprise, Technology Services)"));
        assert!(text.contains(&format!("Score: {}/100", entry.final_score)));
        assert!(text.contains("  • Python ○ practice"));
        assert!(text.contains("Categories (4):  +20"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_json_report_is_the_entry() {
        let entry = sample();
        let json = JsonFormatter::new(false, false).format_report(&report(&entry)).unwrap();
        let parsed: AnalysisEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);

        let with_context = JsonFormatter::new(true, true).format_report(&report(&entry)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&with_context).unwrap();
        assert_eq!(value["companyIntel"]["size"], "Enterprise");
        assert_eq!(value["scoreBreakdown"]["total"], entry.base_score);
    }

    #[test]
    fn test_history_and_checklist_rendering() {
        let formatter = ConsoleFormatter::new(false, false);
        assert!(formatter.format_history(&[]).contains("No saved analyses yet."));
        assert!(formatter.format_history(&[sample()]).contains("1 saved analyses"));

        let mut items = default_items();
        items[0].checked = true;
        let text = formatter.format_checklist(&items);
        assert!(text.contains("[x] JD required validation works (jd-required)"));
        assert!(text.contains("1 / 10 tests passed"));
    }
}
