//! Placement readiness: job description analysis and interview preparation planner

use clap::Parser;
use log::{error, info, warn};
use placement_readiness::cli::{self, ChecklistAction, Cli, Commands, ConfigAction, HistoryAction};
use placement_readiness::config::Config;
use placement_readiness::error::{ReadinessError, Result};
use placement_readiness::input::{load_jd, JdSource};
use placement_readiness::output::{render_export, write_export, AnalysisReport, ConsoleFormatter, JsonFormatter, OutputFormatter};
use placement_readiness::processing::{AnalysisRequest, Analyzer, CompanySize};
use placement_readiness::schema::AnalysisEntry;
use placement_readiness::storage::{FileStore, HistoryStore, TestChecklist};
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if let Err(e) = run_command(cli.command, config, &config_path) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    let store = FileStore::new(config.storage.data_dir.clone());
    let history = HistoryStore::with_capacity(store.clone(), config.storage.max_history);
    let analyzer = Analyzer::new(&config.analysis);

    match command {
        Commands::Analyze {
            jd,
            text,
            company,
            role,
            size,
            json,
            no_save,
            detailed,
        } => {
            let jd_text = match (jd, text) {
                (Some(source), _) => load_jd(&JdSource::from_arg(&source))?,
                (None, Some(text)) => load_jd(&JdSource::Inline(text))?,
                (None, None) => {
                    return Err(ReadinessError::InvalidInput(
                        "Provide a job description with --jd <file> or --text <text>".to_string(),
                    ))
                }
            };

            for warning in analyzer.check_input(&jd_text)? {
                warn!("{}", warning);
            }

            let company_size = size
                .as_deref()
                .map(cli::parse_company_size)
                .transpose()
                .map_err(ReadinessError::InvalidInput)?;

            let request = AnalysisRequest {
                company,
                role,
                jd_text,
                company_size,
            };
            info!("Analyzing job description ({} characters)", request.jd_text.chars().count());
            let mut entry = analyzer.analyze(&request);

            if !no_save {
                entry = history.save_analysis(&entry)?;
            }

            print_analysis(&analyzer, &entry, company_size, json, detailed, config.output.color_output)?;
            if !no_save && !json {
                println!("\n💾 Saved as {}", entry.id);
            }
        }

        Commands::History { action } => match action {
            HistoryAction::List => {
                let entries = history.history();
                if history.had_corrupted_entries() {
                    println!(
                        "⚠️  {} saved analyses could not be read and were skipped.",
                        history.corrupted_count()
                    );
                    history.clear_corrupted_flag()?;
                }
                let formatter = ConsoleFormatter::new(config.output.color_output, false);
                print!("{}", formatter.format_history(&entries));
            }

            HistoryAction::Show { id, json, detailed } => {
                let entry = find_entry(&history, &id)?;
                print_analysis(&analyzer, &entry, None, json, detailed, config.output.color_output)?;
            }

            HistoryAction::Delete { id } => {
                if history.delete_analysis(&id)? {
                    println!("🗑️  Deleted {}", id);
                } else {
                    return Err(ReadinessError::NotFound(id));
                }
            }

            HistoryAction::Clear => {
                history.clear_history()?;
                println!("🗑️  History cleared");
            }
        },

        Commands::Confidence { id, skill, know, practice } => {
            let choice = cli::confidence_choice(know, practice);
            let entry = history.update_skill_confidence(&id, &skill, choice)?;
            let state = entry
                .skill_confidence_map
                .get(&skill)
                .map(|c| c.as_str())
                .unwrap_or("practice");
            println!("✅ {} marked as {}", skill, state);
            println!("Final score: {}/100 (base {})", entry.final_score, entry.base_score);
        }

        Commands::Export { id, out, stdout } => {
            let entry = find_entry(&history, &id)?;
            if stdout {
                print!("{}", render_export(&entry)?);
            } else {
                let dir = out.unwrap_or_else(|| config.output.export_dir.clone());
                let path = write_export(&entry, &dir)?;
                println!("📄 Exported to {}", path.display());
            }
        }

        Commands::Checklist { action } => {
            let checklist = TestChecklist::new(store);
            let (items, detailed) = match action {
                Some(ChecklistAction::Show { detailed }) => (checklist.get_checklist(), detailed),
                None => (checklist.get_checklist(), false),
                Some(ChecklistAction::Toggle { id }) => {
                    if !checklist.get_checklist().iter().any(|item| item.id == id) {
                        return Err(ReadinessError::NotFound(format!("checklist item {}", id)));
                    }
                    (checklist.toggle_test_item(&id)?, false)
                }
                Some(ChecklistAction::Reset) => (checklist.reset_checklist()?, false),
            };

            let formatter = ConsoleFormatter::new(config.output.color_output, detailed);
            print!("{}", formatter.format_checklist(&items));
            if checklist.is_complete() {
                println!("🚀 All tests passed. Ready to ship!");
            } else {
                println!("Completion: {:.0}%", checklist.completion_percentage());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ReadinessError::Configuration(e.to_string()))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn find_entry(history: &HistoryStore<FileStore>, id: &str) -> Result<AnalysisEntry> {
    history
        .analysis_by_id(id)
        .ok_or_else(|| ReadinessError::NotFound(id.to_string()))
}

fn print_analysis(
    analyzer: &Analyzer,
    entry: &AnalysisEntry,
    size_override: Option<CompanySize>,
    json: bool,
    detailed: bool,
    use_colors: bool,
) -> Result<()> {
    let report = AnalysisReport {
        entry,
        company_intel: analyzer.company_intel(entry, size_override),
        score_breakdown: analyzer.score_breakdown(entry),
    };

    let output = if json {
        JsonFormatter::new(true, detailed).format_report(&report)?
    } else {
        ConsoleFormatter::new(use_colors, detailed).format_report(&report)?
    };
    println!("{}", output);
    Ok(())
}
