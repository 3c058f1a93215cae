//! Analysis configuration
//!
//! Every threshold the analyzers use is a product-specified constant. They are
//! collected here as data so the host can persist or override them, while
//! `Default` reproduces the shipped values exactly.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Minimum number of episodes before any derived statistic is reported
pub const DEFAULT_MIN_EPISODES: usize = 5;

/// Safety bound on the headache-free streak walk
pub const DEFAULT_STREAK_CAP_DAYS: u32 = 365;

/// Report-level gates and list sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportThresholds {
    /// Episodes required before the report is populated
    pub min_episodes: usize,
    /// Length of the trigger and symptom rankings
    pub top_factor_count: usize,
    /// Length of the trigger ranking in exported documents
    pub export_factor_count: usize,
    /// Trailing window of the daily frequency map (days, including today)
    pub frequency_window_days: u32,
    pub streak_cap_days: u32,
}

impl Default for ReportThresholds {
    fn default() -> Self {
        Self {
            min_episodes: DEFAULT_MIN_EPISODES,
            top_factor_count: 5,
            export_factor_count: 10,
            frequency_window_days: 90,
            streak_cap_days: DEFAULT_STREAK_CAP_DAYS,
        }
    }
}

/// Gates for the four weather heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherThresholds {
    /// Episodes with a weather snapshot required before any check runs
    pub min_samples: usize,
    /// Falling-pressure rate must exceed this
    pub falling_pressure_rate: f64,
    /// Pressure below this counts as low (hPa)
    pub low_pressure_hpa: f64,
    /// Severity delta must exceed this (pressure and temperature checks)
    pub min_severity_delta: f64,
    /// Humidity above this counts as high (percent)
    pub high_humidity_pct: f64,
    /// High-humidity rate must exceed this
    pub high_humidity_rate: f64,
    pub high_humidity_min_count: usize,
    /// Temperature range across samples must exceed this (celsius)
    pub min_temperature_range_c: f64,
    /// Strength at or above this is labelled moderate
    pub moderate_strength: f64,
    /// Strength at or above this is labelled strong
    pub strong_strength: f64,
}

impl Default for WeatherThresholds {
    fn default() -> Self {
        Self {
            min_samples: 3,
            falling_pressure_rate: 0.20,
            low_pressure_hpa: 1013.0,
            min_severity_delta: 0.3,
            high_humidity_pct: 70.0,
            high_humidity_rate: 0.30,
            high_humidity_min_count: 2,
            min_temperature_range_c: 10.0,
            moderate_strength: 0.4,
            strong_strength: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepThresholds {
    /// Severity at or above this joins the high-severity group
    pub high_severity: u8,
    /// Severity at or below this joins the low-severity group
    pub low_severity: u8,
    /// Sleep readings required in each group
    pub min_points_per_group: usize,
    /// Differences within +/- this many hours are "no clear link"
    pub neutral_band_hours: f64,
}

impl Default for SleepThresholds {
    fn default() -> Self {
        Self {
            high_severity: 4,
            low_severity: 2,
            min_points_per_group: 2,
            neutral_band_hours: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicationThresholds {
    /// Recorded scores required before a medication is ranked
    pub min_uses_for_ranking: usize,
    /// Distinct acute-medication days per month that raise the overuse signal
    pub overuse_days_per_month: u32,
    /// Stress rating at or above this adds a "High stress" trigger
    pub high_stress_level: u8,
}

impl Default for MedicationThresholds {
    fn default() -> Self {
        Self {
            min_uses_for_ranking: 2,
            overuse_days_per_month: 10,
            high_stress_level: 4,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub report: ReportThresholds,
    #[serde(default)]
    pub weather: WeatherThresholds,
    #[serde(default)]
    pub sleep: SleepThresholds,
    #[serde(default)]
    pub medication: MedicationThresholds,
    /// Names treated as preventive when a log leaves the acute flag unset.
    /// Matched case-insensitively as substrings. Supplied by the host.
    #[serde(default)]
    pub preventive_medications: Vec<String>,
}

impl AnalysisConfig {
    pub fn with_preventive_medications<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preventive_medications = names.into_iter().map(Into::into).collect();
        self
    }

    /// Reject configurations that would make the analyzers meaningless
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let invalid = |msg: &str| -> Result<(), AnalysisError> {
            Err(AnalysisError::InvalidConfig(msg.to_string()))
        };

        if self.report.min_episodes == 0 {
            return invalid("report.min_episodes must be at least 1");
        }
        if self.report.top_factor_count == 0 || self.report.export_factor_count == 0 {
            return invalid("factor ranking sizes must be at least 1");
        }
        if self.report.frequency_window_days == 0 {
            return invalid("report.frequency_window_days must be at least 1");
        }
        if self.weather.min_samples == 0 {
            return invalid("weather.min_samples must be at least 1");
        }
        for (name, rate) in [
            ("weather.falling_pressure_rate", self.weather.falling_pressure_rate),
            ("weather.high_humidity_rate", self.weather.high_humidity_rate),
            ("weather.moderate_strength", self.weather.moderate_strength),
            ("weather.strong_strength", self.weather.strong_strength),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{name} must be within 0-1, got {rate}"
                )));
            }
        }
        if self.weather.moderate_strength >= self.weather.strong_strength {
            return invalid("weather.moderate_strength must be below weather.strong_strength");
        }
        if self.sleep.high_severity <= self.sleep.low_severity {
            return invalid("sleep.high_severity must be above sleep.low_severity");
        }
        if self.sleep.min_points_per_group == 0 || self.medication.min_uses_for_ranking == 0 {
            return invalid("minimum sample counts must be at least 1");
        }
        if self.medication.overuse_days_per_month == 0 {
            return invalid("medication.overuse_days_per_month must be at least 1");
        }
        Ok(())
    }

    /// Load and validate configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, AnalysisError> {
        serde_json::to_string_pretty(self).map_err(AnalysisError::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            AnalysisConfig::from_json(r#"{"preventive_medications": ["Topiramate"]}"#).unwrap();
        assert_eq!(config.report.min_episodes, 5);
        assert_eq!(config.weather.low_pressure_hpa, 1013.0);
        assert_eq!(config.preventive_medications, vec!["Topiramate".to_string()]);
    }

    #[test]
    fn test_partial_section_keeps_other_fields() {
        let config = AnalysisConfig::from_json(r#"{"medication": {"overuse_days_per_month": 8}}"#)
            .unwrap();
        assert_eq!(config.medication.overuse_days_per_month, 8);
        assert_eq!(config.medication.min_uses_for_ranking, 2);
    }

    #[test]
    fn test_rejects_inverted_strength_labels() {
        let mut config = AnalysisConfig::default();
        config.weather.moderate_strength = 0.8;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_sleep_groups() {
        let mut config = AnalysisConfig::default();
        config.sleep.high_severity = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AnalysisConfig::default().with_preventive_medications(["Propranolol"]);
        let loaded = AnalysisConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, loaded);
    }
}
