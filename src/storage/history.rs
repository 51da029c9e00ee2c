//! Bounded, newest-first analysis history

use super::KeyValueStore;
use crate::error::{Result, ReadinessError};
use crate::schema::{create_analysis_entry, normalize_lenient, normalize_strict, AnalysisEntry, Confidence};
use chrono::Utc;
use log::{debug, error, info, warn};
use serde_json::Value;

pub const HISTORY_KEY: &str = "placement_readiness_history_v2";
/// Read when `HISTORY_KEY` is absent; never written.
pub const LEGACY_HISTORY_KEY: &str = "placement_readiness_history";
pub const CORRUPTED_KEY: &str = "placement_readiness_corrupted_entries";
pub const DEFAULT_MAX_HISTORY: usize = 50;

pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    max_history: usize,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, DEFAULT_MAX_HISTORY)
    }

    pub fn with_capacity(store: S, max_history: usize) -> Self {
        Self {
            store,
            max_history: max_history.max(1),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All readable entries, newest first.
    ///
    /// Never fails: unreadable storage yields an empty list. Entries that
    /// cannot be normalized are dropped and their count is recorded under
    /// [`CORRUPTED_KEY`].
    pub fn history(&self) -> Vec<AnalysisEntry> {
        let raw_entries = match self.read_raw() {
            Some(entries) => entries,
            None => return Vec::new(),
        };

        let total = raw_entries.len();
        let entries: Vec<AnalysisEntry> = raw_entries.iter().filter_map(normalize_lenient).collect();

        let dropped = total - entries.len();
        if dropped > 0 {
            warn!("Dropped {} corrupted history entries", dropped);
            if let Err(e) = self.store.set(CORRUPTED_KEY, &dropped.to_string()) {
                error!("Failed to record corrupted entry count: {}", e);
            }
        }

        entries
    }

    fn read_raw(&self) -> Option<Vec<Value>> {
        let data = match self.store.get(HISTORY_KEY) {
            Ok(Some(data)) => data,
            Ok(None) => match self.store.get(LEGACY_HISTORY_KEY) {
                Ok(Some(data)) => {
                    info!("Reading history from legacy key {}", LEGACY_HISTORY_KEY);
                    data
                }
                Ok(None) => return None,
                Err(e) => {
                    error!("Failed to read legacy history: {}", e);
                    return None;
                }
            },
            Err(e) => {
                error!("Failed to read history: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&data) {
            Ok(Value::Array(entries)) => Some(entries),
            Ok(_) => {
                warn!("Stored history is not a list, ignoring it");
                None
            }
            Err(e) => {
                warn!("Stored history is not valid JSON: {}", e);
                None
            }
        }
    }

    fn write_history(&self, entries: &[AnalysisEntry]) -> Result<()> {
        let data = serde_json::to_string(entries)?;
        self.store.set(HISTORY_KEY, &data).map_err(|e| {
            error!("Failed to persist history: {}", e);
            e
        })
    }

    /// Number of entries dropped by the most recent read that found any.
    pub fn corrupted_count(&self) -> usize {
        match self.store.get(CORRUPTED_KEY) {
            Ok(Some(value)) => value.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn had_corrupted_entries(&self) -> bool {
        self.corrupted_count() > 0
    }

    pub fn clear_corrupted_flag(&self) -> Result<()> {
        self.store.remove(CORRUPTED_KEY)
    }

    /// Normalize, prepend and evict past capacity in a single write.
    pub fn save_analysis(&self, entry: &AnalysisEntry) -> Result<AnalysisEntry> {
        let normalized = create_analysis_entry(&serde_json::to_value(entry)?);

        let mut history = self.history();
        history.retain(|existing| existing.id != normalized.id);
        history.insert(0, normalized.clone());
        if history.len() > self.max_history {
            debug!("Evicting {} oldest entries", history.len() - self.max_history);
            history.truncate(self.max_history);
        }

        self.write_history(&history)?;
        info!("Saved analysis {}", normalized.id);
        Ok(normalized)
    }

    pub fn analysis_by_id(&self, id: &str) -> Option<AnalysisEntry> {
        self.history().into_iter().find(|entry| entry.id == id)
    }

    /// Returns whether an entry was removed.
    pub fn delete_analysis(&self, id: &str) -> Result<bool> {
        let mut history = self.history();
        let before = history.len();
        history.retain(|entry| entry.id != id);

        if history.len() == before {
            return Ok(false);
        }
        self.write_history(&history)?;
        info!("Deleted analysis {}", id);
        Ok(true)
    }

    pub fn clear_history(&self) -> Result<()> {
        self.store.remove(HISTORY_KEY)?;
        self.store.remove(LEGACY_HISTORY_KEY)?;
        info!("Cleared analysis history");
        Ok(())
    }

    pub fn history_count(&self) -> usize {
        self.history().len()
    }

    /// Merge `partial` over the stored entry and persist the result.
    ///
    /// `id` and `createdAt` are preserved, `updatedAt` is stamped and the
    /// final score is re-derived. Nothing is written when the id is unknown
    /// or the merged entry fails validation.
    pub fn update_analysis(&self, id: &str, partial: &Value) -> Result<AnalysisEntry> {
        let updates = partial
            .as_object()
            .ok_or_else(|| ReadinessError::InvalidInput("Update must be a JSON object".to_string()))?;

        let mut history = self.history();
        let position = history
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| ReadinessError::NotFound(id.to_string()))?;

        let existing = &history[position];
        let mut merged = serde_json::to_value(existing)?;
        if let Some(obj) = merged.as_object_mut() {
            for (key, value) in updates {
                obj.insert(key.clone(), value.clone());
            }
            obj.insert("id".to_string(), Value::String(existing.id.clone()));
            obj.insert("createdAt".to_string(), Value::String(existing.created_at.to_rfc3339()));
            obj.insert("updatedAt".to_string(), Value::String(Utc::now().to_rfc3339()));
        }

        let updated = normalize_strict(&merged)?;
        history[position] = updated.clone();
        self.write_history(&history)?;
        debug!("Updated analysis {}", id);
        Ok(updated)
    }

    /// Set or, with `None`, toggle one skill's confidence.
    pub fn update_skill_confidence(&self, id: &str, skill: &str, confidence: Option<Confidence>) -> Result<AnalysisEntry> {
        let mut entry = self
            .analysis_by_id(id)
            .ok_or_else(|| ReadinessError::NotFound(id.to_string()))?;

        let changed = match confidence {
            Some(confidence) => entry.set_skill_confidence(skill, confidence),
            None => entry.toggle_skill_confidence(skill),
        };
        if !changed {
            return Err(ReadinessError::InvalidInput(format!(
                "Skill '{}' is not part of analysis {}",
                skill, id
            )));
        }

        let partial = serde_json::json!({ "skillConfidenceMap": entry.skill_confidence_map });
        self.update_analysis(id, &partial)
    }
}
