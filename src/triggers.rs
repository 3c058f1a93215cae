//! Trigger and symptom frequency ranking
//!
//! Counts how many episodes each factor co-occurs with. Ties keep the order in
//! which factors were first encountered.

use crate::config::AnalysisConfig;
use crate::types::{Episode, FactorCount};
use std::collections::HashMap;

/// Display key for the skipped-meal flag
pub const SKIPPED_MEAL: &str = "Skipped meal";

/// Display key for a stress rating at or above the configured cutoff
pub const HIGH_STRESS: &str = "High stress";

/// Insertion-ordered frequency table
#[derive(Debug, Default)]
struct FrequencyTable {
    entries: Vec<FactorCount>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    fn record(&mut self, name: String) {
        match self.index.get(&name) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(FactorCount { name, count: 1 });
            }
        }
    }

    /// Top `limit` entries by count; `sort_by` is stable so ties keep first-seen order
    fn top(mut self, limit: usize) -> Vec<FactorCount> {
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries.truncate(limit);
        self.entries
    }
}

/// Rank environmental, dietary and behavioural factors by episode count
pub fn rank_triggers(episodes: &[Episode], config: &AnalysisConfig, limit: usize) -> Vec<FactorCount> {
    let mut table = FrequencyTable::default();

    for episode in episodes {
        let Some(detail) = &episode.retrospective else {
            continue;
        };

        // Each factor counts once per episode
        let mut seen: Vec<String> = Vec::new();
        let mut note = |name: String| {
            if !seen.contains(&name) {
                seen.push(name);
            }
        };

        for trigger in &detail.environmental_triggers {
            note(trigger.display_name().to_string());
        }
        for food in &detail.foods {
            if let Some(name) = normalize_food(food) {
                note(name);
            }
        }
        if detail.skipped_meal {
            note(SKIPPED_MEAL.to_string());
        }
        if detail
            .stress_level
            .is_some_and(|s| s >= config.medication.high_stress_level)
        {
            note(HIGH_STRESS.to_string());
        }

        for name in seen {
            table.record(name);
        }
    }

    table.top(limit)
}

/// Rank symptoms by episode count
pub fn rank_symptoms(episodes: &[Episode], limit: usize) -> Vec<FactorCount> {
    let mut table = FrequencyTable::default();

    for episode in episodes {
        let mut seen = Vec::new();
        for symptom in episode.symptoms() {
            if !seen.contains(symptom) {
                seen.push(*symptom);
                table.record(symptom.display_name().to_string());
            }
        }
    }

    table.top(limit)
}

/// Normalise free-text food entries to a display form: trimmed, lowercased,
/// first letter capitalised. Blank entries are dropped.
pub fn normalize_food(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    let mut chars = lowered.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
