//! Episode ingestion
//!
//! Decodes episode histories handed over by the host (JSON array or NDJSON)
//! and reports records that break the episode invariants. Validation is
//! advisory: the analyzers tolerate bad records by excluding them from the
//! aggregates they would distort.

use crate::error::AnalysisError;
use crate::types::Episode;
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

/// Adapter for decoding episode histories
pub struct EpisodeAdapter;

impl EpisodeAdapter {
    /// Parse a JSON string containing an array of episodes
    pub fn parse_array(json: &str) -> Result<Vec<Episode>, AnalysisError> {
        let episodes: Vec<Episode> = serde_json::from_str(json)?;
        Ok(episodes)
    }

    /// Parse NDJSON (one episode per line)
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<Episode>, AnalysisError> {
        let mut episodes = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Episode>(trimmed) {
                Ok(episode) => episodes.push(episode),
                Err(e) => {
                    return Err(AnalysisError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(episodes)
    }

    /// Check a batch of episodes, returning one entry per problem found
    pub fn validate_episodes(episodes: &[Episode]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut seen: HashSet<Uuid> = HashSet::with_capacity(episodes.len());

        for (index, episode) in episodes.iter().enumerate() {
            if !seen.insert(episode.id) {
                issues.push(ValidationIssue::new(index, episode.id, IssueKind::DuplicateId));
            }

            if let Some(ended_at) = episode.ended_at {
                if ended_at < episode.started_at {
                    issues.push(ValidationIssue::new(
                        index,
                        episode.id,
                        IssueKind::EndsBeforeStart,
                    ));
                }
            }

            let Some(detail) = &episode.retrospective else {
                continue;
            };

            let ratings = [
                (
                    "medication.effectiveness",
                    detail.medication.as_ref().and_then(|m| m.effectiveness),
                ),
                ("stress_level", detail.stress_level),
                ("sleep_quality", detail.sleep_quality),
            ];
            for (field, value) in ratings {
                if let Some(value) = value {
                    if !(1..=5).contains(&value) {
                        issues.push(ValidationIssue::new(
                            index,
                            episode.id,
                            IssueKind::RatingOutOfRange { field, value },
                        ));
                    }
                }
            }

            if let Some(medication) = &detail.medication {
                if medication.name.trim().is_empty() {
                    issues.push(ValidationIssue::new(
                        index,
                        episode.id,
                        IssueKind::EmptyMedicationName,
                    ));
                }
            }
        }

        issues
    }
}

/// A single problem found in an episode record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub index: usize,
    pub episode_id: Uuid,
    pub kind: IssueKind,
}

impl ValidationIssue {
    fn new(index: usize, episode_id: Uuid, kind: IssueKind) -> Self {
        Self {
            index,
            episode_id,
            kind,
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            IssueKind::DuplicateId => "duplicate episode id".to_string(),
            IssueKind::EndsBeforeStart => "resolution precedes onset".to_string(),
            IssueKind::RatingOutOfRange { field, value } => {
                AnalysisError::InvalidRating {
                    field: *field,
                    value: *value,
                }
                .to_string()
            }
            IssueKind::EmptyMedicationName => "medication logged without a name".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum IssueKind {
    DuplicateId,
    EndsBeforeStart,
    RatingOutOfRange { field: &'static str, value: u8 },
    EmptyMedicationName,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "6f1c2a9e-8d3b-4c1e-9a4f-2b7d5e6c8a01",
        "started_at": "2024-03-01T08:15:00Z",
        "ended_at": "2024-03-01T11:45:00Z",
        "severity": 3,
        "onset_speed": "gradual",
        "weather": {
            "temperature_c": 12.5,
            "humidity_pct": 78.0,
            "pressure_hpa": 1004.0,
            "pressure_trend": "falling",
            "uv_index": 2.0,
            "condition": "rain"
        },
        "retrospective": {
            "foods": ["chocolate", "Red wine"],
            "stress_level": 4,
            "symptoms": ["nausea", "light_sensitivity"],
            "medication": {"name": "Ibuprofen", "effectiveness": 4, "is_acute": true}
        }
    }"#;

    #[test]
    fn test_parse_array() {
        let json = format!("[{SAMPLE}]");
        let episodes = EpisodeAdapter::parse_array(&json).unwrap();
        assert_eq!(episodes.len(), 1);
        let episode = &episodes[0];
        assert!(episode.is_resolved());
        assert!(!episode.safety_acknowledged);
        assert_eq!(episode.symptoms().len(), 2);
        assert_eq!(episode.medication().unwrap().effectiveness, Some(4));
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let line = SAMPLE.replace('\n', " ");
        let ndjson = format!("{line}\n\nnot json\n");
        let err = EpisodeAdapter::parse_ndjson(&ndjson).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_parse_rejects_bad_severity() {
        let json = format!("[{}]", SAMPLE.replace("\"severity\": 3", "\"severity\": 7"));
        assert!(EpisodeAdapter::parse_array(&json).is_err());
    }

    #[test]
    fn test_validate_flags_problems() {
        let mut episodes = EpisodeAdapter::parse_array(&format!("[{SAMPLE}]")).unwrap();
        let mut bad = episodes[0].clone();
        bad.ended_at = Some(bad.started_at - chrono::Duration::minutes(5));
        if let Some(detail) = bad.retrospective.as_mut() {
            detail.stress_level = Some(9);
        }
        episodes.push(bad);

        let issues = EpisodeAdapter::validate_episodes(&episodes);
        let kinds: Vec<&IssueKind> = issues.iter().map(|i| &i.kind).collect();
        assert!(kinds.contains(&&IssueKind::DuplicateId));
        assert!(kinds.contains(&&IssueKind::EndsBeforeStart));
        assert!(kinds.contains(&&IssueKind::RatingOutOfRange {
            field: "stress_level",
            value: 9
        }));
        assert!(issues.iter().all(|i| i.index == 1));
    }
}
