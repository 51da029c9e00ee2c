//! CLI interface for the placement readiness tool

use crate::processing::CompanySize;
use crate::schema::Confidence;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "placement-readiness")]
#[command(about = "Job description analysis and interview preparation planner")]
#[command(long_about = "Extract skills from a job description, score placement readiness, and generate interview rounds, a checklist, a 7-day plan and practice questions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a job description
    Analyze {
        /// Path to job description file (TXT, MD, PDF), or - for stdin
        #[arg(short, long, conflicts_with = "text")]
        jd: Option<String>,

        /// Job description text
        #[arg(short, long)]
        text: Option<String>,

        /// Company name
        #[arg(long, default_value = "")]
        company: String,

        /// Role title
        #[arg(long, default_value = "")]
        role: String,

        /// Override company size: startup, mid-size, enterprise
        #[arg(long)]
        size: Option<String>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        /// Do not save the analysis to history
        #[arg(long)]
        no_save: bool,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Saved analyses
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Mark a skill as known or needing practice (toggles when no flag is given)
    Confidence {
        /// Analysis ID
        id: String,

        /// Skill name as shown in the analysis
        skill: String,

        #[arg(long, conflicts_with = "practice")]
        know: bool,

        #[arg(long)]
        practice: bool,
    },

    /// Export an analysis as a plain-text preparation plan
    Export {
        /// Analysis ID
        id: String,

        /// Output directory (defaults to output.export_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Manual test checklist
    Checklist {
        #[command(subcommand)]
        action: Option<ChecklistAction>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved analyses, newest first
    List,

    /// Show one analysis
    Show {
        /// Analysis ID
        id: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Delete one analysis
    Delete {
        /// Analysis ID
        id: String,
    },

    /// Delete all saved analyses
    Clear,
}

#[derive(Subcommand)]
pub enum ChecklistAction {
    /// Show checklist progress
    Show {
        /// Include hints
        #[arg(short, long)]
        detailed: bool,
    },

    /// Toggle one item
    Toggle {
        /// Item ID, e.g. "skill-toggles"
        id: String,
    },

    /// Uncheck every item
    Reset,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate a company size override
pub fn parse_company_size(size: &str) -> Result<CompanySize, String> {
    size.parse()
}

/// `None` means toggle.
pub fn confidence_choice(know: bool, practice: bool) -> Option<Confidence> {
    match (know, practice) {
        (true, _) => Some(Confidence::Know),
        (false, true) => Some(Confidence::Practice),
        (false, false) => None,
    }
}
