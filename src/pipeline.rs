//! Engine orchestration
//!
//! This module provides the public API for Headache Insights. `InsightsEngine`
//! holds a configuration and exposes the report, red-flag and overuse entry
//! points; the free functions take raw JSON for hosts that talk in strings.
//!
//! Nothing here keeps state between calls. Every entry point works on the
//! snapshot it is given and may be called concurrently.

use crate::clock::ReferenceTime;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::export::{ExportDocument, ReportEncoder};
use crate::ingest::EpisodeAdapter;
use crate::medication;
use crate::red_flag;
use crate::report::ReportBuilder;
use crate::types::{Episode, OveruseStatus, RedFlagAssessment, Report};

/// Build a report from a JSON array of episodes.
///
/// # Arguments
/// * `episodes_json` - JSON array of episodes
/// * `now` - Reference time, RFC 3339 with the user's local offset
///
/// # Example
/// ```ignore
/// let report_json = episodes_to_report_json(&episodes_json, "2024-03-20T18:00:00+01:00")?;
/// ```
pub fn episodes_to_report_json(episodes_json: &str, now: &str) -> Result<String, AnalysisError> {
    let engine = InsightsEngine::default();
    let episodes = EpisodeAdapter::parse_array(episodes_json)?;
    let reference = ReferenceTime::parse(now)?;
    let report = engine.build_report(&episodes, &reference);
    serde_json::to_string_pretty(&report).map_err(AnalysisError::Json)
}

/// Build an export document from a JSON array of episodes
pub fn episodes_to_export_json(episodes_json: &str, now: &str) -> Result<String, AnalysisError> {
    let engine = InsightsEngine::default();
    let episodes = EpisodeAdapter::parse_array(episodes_json)?;
    let reference = ReferenceTime::parse(now)?;
    engine.export_json(&episodes, &reference)
}

/// Configured entry point for all analyses
#[derive(Debug, Clone, Default)]
pub struct InsightsEngine {
    config: AnalysisConfig,
}

impl InsightsEngine {
    /// Create an engine with a validated configuration
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an engine from a JSON configuration
    pub fn from_config_json(json: &str) -> Result<Self, AnalysisError> {
        Ok(Self {
            config: AnalysisConfig::from_json(json)?,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn build_report(&self, episodes: &[Episode], reference: &ReferenceTime) -> Report {
        ReportBuilder::new(&self.config).build(episodes, reference)
    }

    /// Red-flag tier for a single episode. Not gated by sample size.
    pub fn evaluate_red_flag(&self, episode: &Episode) -> RedFlagAssessment {
        red_flag::evaluate(episode)
    }

    /// Every episode that should currently show a safety banner
    pub fn active_red_flags(&self, episodes: &[Episode]) -> Vec<RedFlagAssessment> {
        red_flag::active_red_flags(episodes)
    }

    /// Acute-medication days this month. Not gated by sample size.
    pub fn check_medication_overuse(
        &self,
        episodes: &[Episode],
        reference: &ReferenceTime,
    ) -> OveruseStatus {
        medication::medication_overuse(episodes, reference, &self.config)
    }

    pub fn export(&self, episodes: &[Episode], reference: &ReferenceTime) -> ExportDocument {
        let builder = ReportBuilder::new(&self.config);
        ReportEncoder::new().encode(
            builder.build(episodes, reference),
            builder.trigger_shares(episodes),
            self.check_medication_overuse(episodes, reference),
            reference,
        )
    }

    pub fn export_json(
        &self,
        episodes: &[Episode],
        reference: &ReferenceTime,
    ) -> Result<String, AnalysisError> {
        serde_json::to_string_pretty(&self.export(episodes, reference)).map_err(AnalysisError::Json)
    }
}
