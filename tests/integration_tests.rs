//! Integration tests for the placement readiness pipeline

use placement_readiness::config::Config;
use placement_readiness::error::ReadinessError;
use placement_readiness::input::load_jd_file;
use placement_readiness::output::{export_file_name, write_export};
use placement_readiness::processing::{AnalysisRequest, Analyzer};
use placement_readiness::schema::{create_analysis_entry, validate_analysis_entry, Confidence};
use placement_readiness::storage::history::{CORRUPTED_KEY, HISTORY_KEY};
use placement_readiness::storage::{FileStore, HistoryStore, KeyValueStore, TestChecklist};
use std::path::Path;
use tempfile::TempDir;

fn sample_jd() -> String {
    load_jd_file(Path::new("tests/fixtures/sample_jd.txt")).unwrap()
}

#[test]
fn test_text_extraction_from_txt() {
    let text = sample_jd();
    assert!(text.contains("Software Development Engineer"));
    assert!(text.contains("Node.js"));
}

#[test]
fn test_text_extraction_from_markdown() {
    let text = load_jd_file(Path::new("tests/fixtures/sample_jd.md")).unwrap();
    assert!(text.contains("Frontend Engineer"));
    assert!(text.contains("GraphQL over Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[test]
fn test_unsupported_file_type() {
    let result = load_jd_file(Path::new("tests/fixtures/unsupported.xyz"));
    assert!(matches!(result, Err(ReadinessError::UnsupportedFormat(_))));
}

#[test]
fn test_nonexistent_file() {
    assert!(load_jd_file(Path::new("tests/fixtures/nonexistent.txt")).is_err());
}

#[test]
fn test_full_analysis_of_fixture() {
    let analyzer = Analyzer::default();
    let entry = analyzer.analyze(&AnalysisRequest::new("Amazon", "SDE", sample_jd()));

    assert_eq!(entry.extracted_skills.core_cs, vec!["DSA", "OOP", "DBMS"]);
    assert_eq!(entry.extracted_skills.languages, vec!["Java", "Python"]);
    assert_eq!(entry.extracted_skills.web, vec!["React", "Node.js", "REST"]);
    assert_eq!(entry.extracted_skills.data, vec!["SQL", "MongoDB"]);
    assert_eq!(entry.extracted_skills.cloud, vec!["AWS", "Docker"]);
    assert_eq!(entry.extracted_skills.testing, vec!["Jest"]);
    assert!(entry.extracted_skills.other.is_empty());
    assert_eq!(entry.all_skills.len(), 13);

    // 35 + 6 categories (capped 30) + company + role + long description
    assert_eq!(entry.base_score, 95);
    assert_eq!(entry.final_score, 95 - 2 * 13);

    assert_eq!(entry.round_mapping.len(), 4);
    assert_eq!(entry.checklist.len(), 4);
    assert_eq!(entry.plan_7_days.len(), 7);
    assert_eq!(entry.questions.len(), 10);

    let report = validate_analysis_entry(&serde_json::to_value(&entry).unwrap());
    assert!(report.is_valid, "{:?}", report.errors);
    assert_eq!(create_analysis_entry(&serde_json::to_value(&entry).unwrap()), entry);
}

#[test]
fn test_markdown_fixture_scores_fewer_categories() {
    let text = load_jd_file(Path::new("tests/fixtures/sample_jd.md")).unwrap();
    let analyzer = Analyzer::default();
    let entry = analyzer.analyze(&AnalysisRequest::new("", "", text));

    assert_eq!(entry.extracted_skills.web, vec!["React", "Node.js", "GraphQL"]);
    assert_eq!(entry.extracted_skills.testing, vec!["Cypress"]);
    // coreCS, languages, web, testing
    assert_eq!(entry.base_score, 55);
    assert_eq!(entry.round_mapping.len(), 3);
}

#[test]
fn test_history_persists_across_store_instances() {
    let dir = TempDir::new().unwrap();
    let analyzer = Analyzer::default();
    let entry = analyzer.analyze(&AnalysisRequest::new("Amazon", "SDE", sample_jd()));

    let saved = {
        let history = HistoryStore::new(FileStore::new(dir.path()));
        history.save_analysis(&entry).unwrap()
    };

    let reopened = HistoryStore::new(FileStore::new(dir.path()));
    assert_eq!(reopened.history_count(), 1);
    assert_eq!(reopened.analysis_by_id(&saved.id).unwrap(), saved);

    let updated = reopened
        .update_skill_confidence(&saved.id, "Java", Some(Confidence::Know))
        .unwrap();
    assert_eq!(updated.final_score, saved.final_score + 4);

    let again = HistoryStore::new(FileStore::new(dir.path()));
    let stored = again.analysis_by_id(&saved.id).unwrap();
    assert_eq!(stored.skill_confidence_map["Java"], Confidence::Know);
    assert_eq!(stored.final_score, updated.final_score);
    assert!(stored.updated_at >= stored.created_at);
}

#[test]
fn test_history_respects_configured_capacity() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.storage.data_dir = dir.path().to_path_buf();
    config.storage.max_history = 3;

    let analyzer = Analyzer::new(&config.analysis);
    let history = HistoryStore::with_capacity(FileStore::new(&config.storage.data_dir), config.storage.max_history);

    let mut ids = Vec::new();
    for company in ["A Corp", "B Corp", "C Corp", "D Corp"] {
        let entry = analyzer.analyze(&AnalysisRequest::new(company, "Dev", "Python and SQL"));
        ids.push(history.save_analysis(&entry).unwrap().id);
    }

    let entries = history.history();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].id, ids[3]);
    assert_eq!(entries[2].id, ids[1]);
    assert!(history.analysis_by_id(&ids[0]).is_none());
}

#[test]
fn test_corrupted_file_entries_are_skipped() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    let entry = Analyzer::default().analyze(&AnalysisRequest::new("Acme", "", "React"));

    let raw = serde_json::json!([
        serde_json::to_value(&entry).unwrap(),
        42,
        { "jdText": "missing id" }
    ]);
    store.set(HISTORY_KEY, &raw.to_string()).unwrap();

    let history = HistoryStore::new(store.clone());
    let entries = history.history();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, entry.id);
    assert_eq!(store.get(CORRUPTED_KEY).unwrap().as_deref(), Some("2"));
    assert!(history.had_corrupted_entries());

    history.clear_corrupted_flag().unwrap();
    assert!(!history.had_corrupted_entries());
}

#[test]
fn test_export_written_to_directory() {
    let dir = TempDir::new().unwrap();
    let entry = Analyzer::default().analyze(&AnalysisRequest::new("Amazon", "SDE", sample_jd()));

    let path = write_export(&entry, dir.path()).unwrap();
    assert_eq!(path, dir.path().join(export_file_name("Amazon")));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("Company: Amazon"));
    assert!(content.contains("WEAK SKILLS"));
    assert!(content.contains("INTERVIEW QUESTIONS"));
}

#[test]
fn test_checklist_persists_across_store_instances() {
    let dir = TempDir::new().unwrap();
    TestChecklist::new(FileStore::new(dir.path()))
        .toggle_test_item("score-deterministic")
        .unwrap();

    let checklist = TestChecklist::new(FileStore::new(dir.path()));
    assert_eq!(checklist.passed_count(), 1);
    assert_eq!(checklist.total_count(), 10);
    assert!(!checklist.is_complete());

    checklist.reset_checklist().unwrap();
    assert_eq!(TestChecklist::new(FileStore::new(dir.path())).passed_count(), 0);
}
