//! Persisted manual test checklist

use super::KeyValueStore;
use crate::error::Result;
use log::{error, warn};
use serde::{Deserialize, Serialize};

pub const CHECKLIST_KEY: &str = "placement_readiness_test_checklist";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestChecklistItem {
    pub id: String,
    pub label: String,
    pub hint: String,
    pub checked: bool,
}

/// `(id, label, hint)` for the fixed item set.
pub const DEFAULT_TEST_ITEMS: &[(&str, &str, &str)] = &[
    (
        "jd-required",
        "JD required validation works",
        "Run analyze with an empty description. Should be rejected with a required-input error.",
    ),
    (
        "short-jd-warning",
        "Short JD warning shows for <200 chars",
        "Analyze a description under 200 characters. Should print a short-description warning.",
    ),
    (
        "skills-extraction",
        "Skills extraction groups correctly",
        "Analyze a JD with React, SQL, AWS. Check skills appear in correct categories.",
    ),
    (
        "round-mapping",
        "Round mapping changes based on company + skills",
        "Compare Amazon (Enterprise) vs Unknown Startup. Should show different round counts.",
    ),
    (
        "score-deterministic",
        "Score calculation is deterministic",
        "Analyze same JD twice. Base score should be identical.",
    ),
    (
        "skill-toggles",
        "Skill toggles update score live",
        "Toggle a skill with the confidence command. Final score should change by 4.",
    ),
    (
        "persist-refresh",
        "Changes persist after restart",
        "Toggle skills, then show the analysis again. Toggles and score should remain.",
    ),
    (
        "history-save-load",
        "History saves and loads correctly",
        "Create an analysis, list history, then show it by id. Should load correctly.",
    ),
    (
        "export-buttons",
        "Export writes the correct content",
        "Export an analysis and open the file to verify plan, checklist and questions.",
    ),
    (
        "no-console-errors",
        "No errors on core commands",
        "Run every subcommand with --verbose. Check for error log lines.",
    ),
];

pub fn default_items() -> Vec<TestChecklistItem> {
    DEFAULT_TEST_ITEMS
        .iter()
        .map(|(id, label, hint)| TestChecklistItem {
            id: id.to_string(),
            label: label.to_string(),
            hint: hint.to_string(),
            checked: false,
        })
        .collect()
}

#[derive(Deserialize)]
struct StoredItem {
    id: String,
    #[serde(default)]
    checked: bool,
}

pub struct TestChecklist<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TestChecklist<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The default items with any persisted `checked` flags applied by id.
    pub fn get_checklist(&self) -> Vec<TestChecklistItem> {
        let mut items = default_items();

        let data = match self.store.get(CHECKLIST_KEY) {
            Ok(Some(data)) => data,
            Ok(None) => return items,
            Err(e) => {
                error!("Failed to read test checklist: {}", e);
                return items;
            }
        };

        // Entries are parsed one by one so a single bad record does not
        // discard the rest.
        let stored: Vec<StoredItem> = match serde_json::from_str::<Vec<serde_json::Value>>(&data) {
            Ok(values) => values
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
            Err(e) => {
                warn!("Stored test checklist is unreadable: {}", e);
                return items;
            }
        };

        for item in &mut items {
            if let Some(saved) = stored.iter().find(|s| s.id == item.id) {
                item.checked = saved.checked;
            }
        }
        items
    }

    fn save(&self, items: &[TestChecklistItem]) -> Result<()> {
        let data = serde_json::to_string(items)?;
        self.store.set(CHECKLIST_KEY, &data).map_err(|e| {
            error!("Failed to save test checklist: {}", e);
            e
        })
    }

    /// Unknown ids leave the checklist unchanged.
    pub fn toggle_test_item(&self, id: &str) -> Result<Vec<TestChecklistItem>> {
        let mut items = self.get_checklist();
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => item.checked = !item.checked,
            None => {
                warn!("Unknown test checklist item: {}", id);
                return Ok(items);
            }
        }
        self.save(&items)?;
        Ok(items)
    }

    pub fn reset_checklist(&self) -> Result<Vec<TestChecklistItem>> {
        let items = default_items();
        self.save(&items)?;
        Ok(items)
    }

    pub fn passed_count(&self) -> usize {
        self.get_checklist().iter().filter(|item| item.checked).count()
    }

    pub fn total_count(&self) -> usize {
        DEFAULT_TEST_ITEMS.len()
    }

    pub fn is_complete(&self) -> bool {
        self.passed_count() == self.total_count()
    }

    pub fn completion_percentage(&self) -> f64 {
        self.passed_count() as f64 / self.total_count() as f64 * 100.0
    }
}
