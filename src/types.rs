//! Core types for the Headache Insights engine
//!
//! This module defines the episode model consumed by the analyzers, the closed
//! vocabularies attached to episodes, and the report values the engine produces.

use crate::error::AnalysisError;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// Episode model
// ============================================================================

/// Headache severity on a 1-5 ordinal scale.
///
/// The capture UI only offers 1, 3 and 5, but imported histories may carry
/// any value in range, so the analyzers treat it as a plain ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MILD: Severity = Severity(1);
    pub const MODERATE: Severity = Severity(3);
    pub const SEVERE: Severity = Severity(5);

    /// Create a severity, rejecting values outside 1-5
    pub fn new(value: u8) -> Result<Self, AnalysisError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AnalysisError::InvalidSeverity(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Display label used by the presentation layer
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Mild",
            2 => "Mild-Moderate",
            3 => "Moderate",
            4 => "Moderate-Severe",
            _ => "Severe",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = AnalysisError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Severity::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

/// How quickly an episode reached peak intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnsetSpeed {
    Gradual,
    Moderate,
    Instantaneous,
    #[default]
    Unknown,
}

/// Barometric pressure trend at capture time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureTrend {
    Rising,
    Falling,
    Stable,
}

/// Categorical sky condition reported by the weather service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Thunderstorm,
    Snow,
    Fog,
    #[default]
    Unknown,
}

/// Weather conditions captured at episode onset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Air temperature (celsius)
    pub temperature_c: f64,
    /// Relative humidity (percentage, 0-100)
    pub humidity_pct: f64,
    /// Barometric pressure (hPa)
    pub pressure_hpa: f64,
    pub pressure_trend: PressureTrend,
    pub uv_index: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_quality_index: Option<u32>,
    #[serde(default)]
    pub condition: SkyCondition,
}

/// Physiological readings captured around episode onset.
///
/// Every field is independently optional; a missing reading is normal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate_bpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hrv_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_oxygen_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate_bpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count: Option<u32>,
    /// Sleep duration for the preceding night (hours)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
}

/// Symptom vocabulary offered by the capture UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Nausea,
    Vomiting,
    LightSensitivity,
    SoundSensitivity,
    SmellSensitivity,
    Aura,
    VisualDisturbance,
    Dizziness,
    NeckPain,
    Fatigue,
    Numbness,
    Confusion,
}

impl Symptom {
    pub fn display_name(self) -> &'static str {
        match self {
            Symptom::Nausea => "Nausea",
            Symptom::Vomiting => "Vomiting",
            Symptom::LightSensitivity => "Light sensitivity",
            Symptom::SoundSensitivity => "Sound sensitivity",
            Symptom::SmellSensitivity => "Smell sensitivity",
            Symptom::Aura => "Aura",
            Symptom::VisualDisturbance => "Visual disturbance",
            Symptom::Dizziness => "Dizziness",
            Symptom::NeckPain => "Neck pain",
            Symptom::Fatigue => "Fatigue",
            Symptom::Numbness => "Numbness",
            Symptom::Confusion => "Confusion",
        }
    }
}

/// Environmental trigger vocabulary offered by the capture UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalTrigger {
    BrightLight,
    LoudNoise,
    StrongSmell,
    ScreenTime,
    WeatherChange,
    Heat,
    Cold,
    Smoke,
    Travel,
    PhysicalExertion,
}

impl EnvironmentalTrigger {
    pub fn display_name(self) -> &'static str {
        match self {
            EnvironmentalTrigger::BrightLight => "Bright light",
            EnvironmentalTrigger::LoudNoise => "Loud noise",
            EnvironmentalTrigger::StrongSmell => "Strong smell",
            EnvironmentalTrigger::ScreenTime => "Screen time",
            EnvironmentalTrigger::WeatherChange => "Weather change",
            EnvironmentalTrigger::Heat => "Heat",
            EnvironmentalTrigger::Cold => "Cold",
            EnvironmentalTrigger::Smoke => "Smoke",
            EnvironmentalTrigger::Travel => "Travel",
            EnvironmentalTrigger::PhysicalExertion => "Physical exertion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadacheType {
    Migraine,
    Tension,
    Cluster,
    Sinus,
    MedicationOveruse,
    Other,
}

impl HeadacheType {
    pub fn display_name(self) -> &'static str {
        match self {
            HeadacheType::Migraine => "Migraine",
            HeadacheType::Tension => "Tension",
            HeadacheType::Cluster => "Cluster",
            HeadacheType::Sinus => "Sinus",
            HeadacheType::MedicationOveruse => "Medication overuse",
            HeadacheType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PainLocation {
    Forehead,
    Temples,
    LeftSide,
    RightSide,
    BehindEyes,
    BackOfHead,
    Whole,
}

impl PainLocation {
    pub fn display_name(self) -> &'static str {
        match self {
            PainLocation::Forehead => "Forehead",
            PainLocation::Temples => "Temples",
            PainLocation::LeftSide => "Left side",
            PainLocation::RightSide => "Right side",
            PainLocation::BehindEyes => "Behind eyes",
            PainLocation::BackOfHead => "Back of head",
            PainLocation::Whole => "Whole head",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    pub fn display_name(self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "Menstrual",
            CyclePhase::Follicular => "Follicular",
            CyclePhase::Ovulation => "Ovulation",
            CyclePhase::Luteal => "Luteal",
        }
    }
}

/// Acute vs preventive classification of a logged medication.
///
/// On the wire this is `true` / `false` / `null` (or absent). `Unset` is kept
/// distinct so the conservative fallback in
/// [`crate::medication::is_acute_use`] stays explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum MedicationClass {
    Acute,
    Preventive,
    #[default]
    Unset,
}

impl From<Option<bool>> for MedicationClass {
    fn from(is_acute: Option<bool>) -> Self {
        match is_acute {
            Some(true) => MedicationClass::Acute,
            Some(false) => MedicationClass::Preventive,
            None => MedicationClass::Unset,
        }
    }
}

impl From<MedicationClass> for Option<bool> {
    fn from(class: MedicationClass) -> Self {
        match class {
            MedicationClass::Acute => Some(true),
            MedicationClass::Preventive => Some(false),
            MedicationClass::Unset => None,
        }
    }
}

/// A medication taken for an episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationUse {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
    /// Self-reported effectiveness (1-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<u8>,
    #[serde(default, rename = "is_acute")]
    pub class: MedicationClass,
}

/// User-entered context recorded after an episode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrospectiveDetail {
    // Food and drink
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foods: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caffeine_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydration_glasses: Option<u32>,
    #[serde(default)]
    pub skipped_meal: bool,

    // Sleep and lifestyle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Sleep quality rating (1-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<u8>,
    /// Stress rating (1-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_time_hours: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication: Option<MedicationUse>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<Symptom>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environmental_triggers: Vec<EnvironmentalTrigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headache_type: Option<HeadacheType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PainLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_phase: Option<CyclePhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One recorded headache occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Absent while the episode is ongoing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub severity: Severity,
    #[serde(default)]
    pub onset_speed: OnsetSpeed,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrospective: Option<RetrospectiveDetail>,
    /// Set once the user dismisses the safety banner for this episode
    #[serde(default)]
    pub safety_acknowledged: bool,
}

impl Episode {
    /// Create an ongoing episode with a fresh identifier
    pub fn new(started_at: DateTime<Utc>, severity: Severity, onset_speed: OnsetSpeed) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at,
            ended_at: None,
            severity,
            onset_speed,
            weather: None,
            health: None,
            retrospective: None,
            safety_acknowledged: false,
        }
    }

    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_health(mut self, health: HealthSnapshot) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_retrospective(mut self, detail: RetrospectiveDetail) -> Self {
        self.retrospective = Some(detail);
        self
    }

    pub fn resolved_at(mut self, ended_at: DateTime<Utc>) -> Self {
        self.ended_at = Some(ended_at);
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Mark the episode as resolved
    pub fn resolve(&mut self, ended_at: DateTime<Utc>) {
        self.ended_at = Some(ended_at);
    }

    /// Record that the user dismissed this episode's safety banner
    pub fn acknowledge_safety(&mut self) {
        self.safety_acknowledged = true;
    }

    /// Elapsed time between onset and resolution.
    ///
    /// `None` while ongoing, or if the record violates end >= start.
    pub fn duration(&self) -> Option<Duration> {
        let ended_at = self.ended_at?;
        let duration = ended_at - self.started_at;
        (duration >= Duration::zero()).then_some(duration)
    }

    pub fn symptoms(&self) -> &[Symptom] {
        self.retrospective
            .as_ref()
            .map(|r| r.symptoms.as_slice())
            .unwrap_or(&[])
    }

    pub fn medication(&self) -> Option<&MedicationUse> {
        self.retrospective.as_ref()?.medication.as_ref()
    }

    /// Sleep before the episode: self-report first, wearable reading as fallback
    pub fn sleep_hours(&self) -> Option<f64> {
        self.retrospective
            .as_ref()
            .and_then(|r| r.sleep_hours)
            .or_else(|| self.health.as_ref().and_then(|h| h.sleep_hours))
    }
}

// ============================================================================
// Report values
// ============================================================================

/// A ranked factor with its co-occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorCount {
    pub name: String,
    pub count: u32,
}

/// Time-of-day bucket derived from the local onset hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 06:00-11:59
    Morning,
    /// 12:00-16:59
    Afternoon,
    /// 17:00-21:59
    Evening,
    /// 22:00-05:59
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

/// Qualitative label for a correlation strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

/// Weather factor a correlation entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherFactor {
    FallingPressure,
    LowPressure,
    HighHumidity,
    WarmerTemperatures,
    ColderTemperatures,
}

impl WeatherFactor {
    pub fn display_name(self) -> &'static str {
        match self {
            WeatherFactor::FallingPressure => "Falling pressure",
            WeatherFactor::LowPressure => "Low pressure",
            WeatherFactor::HighHumidity => "High humidity",
            WeatherFactor::WarmerTemperatures => "Warmer temperatures",
            WeatherFactor::ColderTemperatures => "Colder temperatures",
        }
    }
}

/// A heuristic weather association (frequency signal, not a coefficient)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCorrelation {
    pub factor: WeatherFactor,
    pub name: String,
    /// 0-1
    pub strength: f64,
    pub label: CorrelationStrength,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepFinding {
    /// Severe episodes follow shorter nights
    LessSleepBeforeSevere,
    /// Severe episodes follow longer nights
    MoreSleepBeforeSevere,
    NoClearLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepCorrelation {
    pub avg_sleep_high_severity: f64,
    pub avg_sleep_low_severity: f64,
    /// Low-severity mean minus high-severity mean (hours)
    pub difference_hours: f64,
    pub finding: SleepFinding,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationScore {
    pub name: String,
    pub average_effectiveness: f64,
    pub uses: u32,
}

/// Immutable analysis snapshot over an episode history.
///
/// When `has_enough_data` is false only `total_logs` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_logs: usize,
    pub has_enough_data: bool,
    pub average_severity: Option<f64>,
    pub average_duration_minutes: Option<f64>,
    pub headache_free_streak_days: Option<u32>,
    pub top_triggers: Vec<FactorCount>,
    pub top_symptoms: Vec<FactorCount>,
    /// 1 = Sunday ... 7 = Saturday
    pub severity_by_weekday: BTreeMap<u8, f64>,
    pub severity_by_time_of_day: BTreeMap<TimeOfDay, f64>,
    pub weather_correlations: Vec<WeatherCorrelation>,
    pub sleep_correlation: Option<SleepCorrelation>,
    pub medication_effectiveness: Vec<MedicationScore>,
    pub daily_frequency: BTreeMap<NaiveDate, u32>,
}

impl Report {
    /// The "keep logging" shape returned below the minimum-sample gate
    pub fn insufficient(total_logs: usize) -> Self {
        Self {
            total_logs,
            has_enough_data: false,
            average_severity: None,
            average_duration_minutes: None,
            headache_free_streak_days: None,
            top_triggers: Vec::new(),
            top_symptoms: Vec::new(),
            severity_by_weekday: BTreeMap::new(),
            severity_by_time_of_day: BTreeMap::new(),
            weather_correlations: Vec::new(),
            sleep_correlation: None,
            medication_effectiveness: Vec::new(),
            daily_frequency: BTreeMap::new(),
        }
    }
}

/// Urgency tier produced by the red-flag decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    #[default]
    None,
    Advisory,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagReason {
    /// Instantaneous ("thunderclap") onset
    SuddenOnset,
    AuraWithVisualDisturbance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlagAssessment {
    pub episode_id: Uuid,
    pub tier: UrgencyTier,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<RedFlagReason>,
    /// Display text of the symptoms that matched, for banner copy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_symptoms: Vec<String>,
}

impl RedFlagAssessment {
    pub fn none(episode_id: Uuid) -> Self {
        Self {
            episode_id,
            tier: UrgencyTier::None,
            reasons: Vec::new(),
            matched_symptoms: Vec::new(),
        }
    }

    pub fn should_surface(&self) -> bool {
        self.tier != UrgencyTier::None
    }
}

/// Acute-medication day count for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OveruseStatus {
    pub year: i32,
    pub month: u32,
    pub acute_days: u32,
    pub threshold: u32,
    pub exceeds_threshold: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_severity_bounds() {
        assert!(Severity::new(0).is_err());
        assert!(Severity::new(6).is_err());
        assert_eq!(Severity::new(4).unwrap().value(), 4);
        assert_eq!(Severity::SEVERE.label(), "Severe");
    }

    #[test]
    fn test_severity_rejects_out_of_range_json() {
        let result: Result<Severity, _> = serde_json::from_str("9");
        assert!(result.is_err());
        let ok: Severity = serde_json::from_str("3").unwrap();
        assert_eq!(ok, Severity::MODERATE);
    }

    #[test]
    fn test_medication_class_wire_format() {
        let json = r#"{"name": "Sumatriptan"}"#;
        let med: MedicationUse = serde_json::from_str(json).unwrap();
        assert_eq!(med.class, MedicationClass::Unset);

        let json = r#"{"name": "Topiramate", "is_acute": false}"#;
        let med: MedicationUse = serde_json::from_str(json).unwrap();
        assert_eq!(med.class, MedicationClass::Preventive);

        let value = serde_json::to_value(&MedicationUse {
            name: "Ibuprofen".to_string(),
            dose: None,
            effectiveness: Some(4),
            class: MedicationClass::Acute,
        })
        .unwrap();
        assert_eq!(value["is_acute"], true);
    }

    #[test]
    fn test_episode_duration_and_sleep_fallback() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let episode = Episode::new(start, Severity::MODERATE, OnsetSpeed::Gradual)
            .resolved_at(start + Duration::minutes(90))
            .with_health(HealthSnapshot {
                sleep_hours: Some(6.5),
                ..Default::default()
            });

        assert_eq!(episode.duration(), Some(Duration::minutes(90)));
        assert_eq!(episode.sleep_hours(), Some(6.5));

        let episode = episode.with_retrospective(RetrospectiveDetail {
            sleep_hours: Some(5.0),
            ..Default::default()
        });
        assert_eq!(episode.sleep_hours(), Some(5.0));
    }

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }
}
