//! Report assembly
//!
//! `ReportBuilder` runs every analyzer once over a snapshot of the episode
//! history and assembles an immutable [`Report`]. Below the minimum-sample gate
//! it returns the "keep logging" shape with only `total_logs` set.

use crate::aggregator;
use crate::clock::ReferenceTime;
use crate::config::AnalysisConfig;
use crate::medication;
use crate::sleep;
use crate::temporal;
use crate::triggers;
use crate::types::{Episode, FactorCount, Report};
use crate::weather;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Builds reports under a fixed configuration
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, episodes: &[Episode], reference: &ReferenceTime) -> Report {
        let config = self.config;
        let total_logs = episodes.len();

        if total_logs < config.report.min_episodes {
            debug!(
                total_logs,
                required = config.report.min_episodes,
                "Not enough episodes for a report"
            );
            return Report::insufficient(total_logs);
        }

        let top = config.report.top_factor_count;
        let report = Report {
            total_logs,
            has_enough_data: true,
            average_severity: aggregator::average_severity(episodes),
            average_duration_minutes: aggregator::average_duration_minutes(episodes),
            headache_free_streak_days: Some(aggregator::headache_free_streak(
                episodes,
                reference,
                config.report.streak_cap_days,
            )),
            top_triggers: triggers::rank_triggers(episodes, config, top),
            top_symptoms: triggers::rank_symptoms(episodes, top),
            severity_by_weekday: temporal::severity_by_weekday(episodes, reference),
            severity_by_time_of_day: temporal::severity_by_time_of_day(episodes, reference),
            weather_correlations: weather::weather_correlations(episodes, &config.weather),
            sleep_correlation: sleep::sleep_correlation(episodes, &config.sleep),
            medication_effectiveness: medication::medication_effectiveness(
                episodes,
                config.medication.min_uses_for_ranking,
            ),
            daily_frequency: aggregator::daily_frequency(
                episodes,
                reference,
                config.report.frequency_window_days,
            ),
        };

        debug!(
            total_logs,
            triggers = report.top_triggers.len(),
            weather_correlations = report.weather_correlations.len(),
            has_sleep_correlation = report.sleep_correlation.is_some(),
            ranked_medications = report.medication_effectiveness.len(),
            "Built report"
        );

        report
    }

    /// Trigger ranking for exported documents, with co-occurrence percentages.
    ///
    /// Empty below the minimum-sample gate.
    pub fn trigger_shares(&self, episodes: &[Episode]) -> Vec<TriggerShare> {
        let total = episodes.len();
        if total < self.config.report.min_episodes {
            return Vec::new();
        }

        triggers::rank_triggers(episodes, self.config, self.config.report.export_factor_count)
            .into_iter()
            .map(|factor| TriggerShare::new(factor, total))
            .collect()
    }
}

/// A ranked trigger with the share of all episodes it co-occurred with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerShare {
    pub name: String,
    pub count: u32,
    /// Percentage of all logged episodes, one decimal place
    pub percentage: f64,
}

impl TriggerShare {
    fn new(factor: FactorCount, total_logs: usize) -> Self {
        let percentage = if total_logs == 0 {
            0.0
        } else {
            (f64::from(factor.count) / total_logs as f64 * 1000.0).round() / 10.0
        };
        Self {
            name: factor.name,
            count: factor.count,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        OnsetSpeed, PressureTrend, RetrospectiveDetail, Severity, SkyCondition, WeatherSnapshot,
    };
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    fn reference() -> ReferenceTime {
        ReferenceTime::parse("2024-03-20T18:00:00Z").unwrap()
    }

    fn episode(days_ago: i64, severity: u8) -> Episode {
        let start = reference().now().with_timezone(&Utc) - Duration::days(days_ago);
        Episode::new(start, Severity::new(severity).unwrap(), OnsetSpeed::Gradual)
            .resolved_at(start + Duration::hours(2))
            .with_weather(WeatherSnapshot {
                temperature_c: 18.0,
                humidity_pct: 55.0,
                pressure_hpa: 1016.0,
                pressure_trend: PressureTrend::Falling,
                uv_index: 4.0,
                air_quality_index: Some(30),
                condition: SkyCondition::Clear,
            })
            .with_retrospective(RetrospectiveDetail {
                foods: vec!["Cheese".to_string()],
                ..Default::default()
            })
    }

    #[test]
    fn test_below_gate_returns_insufficient_shape() {
        let config = AnalysisConfig::default();
        let episodes: Vec<Episode> = (1..5).map(|d| episode(d, 5)).collect();
        let report = ReportBuilder::new(&config).build(&episodes, &reference());

        assert_eq!(report, Report::insufficient(4));
        assert!(!report.has_enough_data);
    }

    #[test]
    fn test_full_report() {
        let config = AnalysisConfig::default();
        let episodes: Vec<Episode> = [3, 4, 5, 6, 7]
            .into_iter()
            .zip([1, 3, 5, 3, 3])
            .map(|(d, s)| episode(d, s))
            .collect();

        let report = ReportBuilder::new(&config).build(&episodes, &reference());

        assert!(report.has_enough_data);
        assert_eq!(report.total_logs, 5);
        assert_eq!(report.average_severity, Some(3.0));
        assert_eq!(report.average_duration_minutes, Some(120.0));
        assert_eq!(report.headache_free_streak_days, Some(2));
        assert_eq!(report.top_triggers[0].name, "Cheese");
        assert_eq!(report.top_triggers[0].count, 5);
        assert_eq!(report.weather_correlations.len(), 1);
        assert_eq!(report.daily_frequency.values().sum::<u32>(), 5);
        assert!(report.sleep_correlation.is_none());
        assert!(report.medication_effectiveness.is_empty());
    }

    #[test]
    fn test_build_is_idempotent() {
        let config = AnalysisConfig::default();
        let episodes: Vec<Episode> = (1..=8).map(|d| episode(d, (d % 5 + 1) as u8)).collect();
        let builder = ReportBuilder::new(&config);

        let first = serde_json::to_string(&builder.build(&episodes, &reference())).unwrap();
        let second = serde_json::to_string(&builder.build(&episodes, &reference())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_trigger_shares() {
        let config = AnalysisConfig::default();
        let mut episodes: Vec<Episode> = (1..=6).map(|d| episode(d, 3)).collect();
        if let Some(detail) = episodes[0].retrospective.as_mut() {
            detail.skipped_meal = true;
        }

        let shares = ReportBuilder::new(&config).trigger_shares(&episodes);
        assert_eq!(shares[0].percentage, 100.0);
        assert_eq!(shares[1].name, "Skipped meal");
        assert_eq!(shares[1].percentage, 16.7);

        assert!(ReportBuilder::new(&config).trigger_shares(&episodes[..2]).is_empty());
    }
}
