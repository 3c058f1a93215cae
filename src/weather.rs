//! Weather association heuristics
//!
//! Four independent checks over episodes that carry a weather snapshot:
//! - Falling-pressure rate
//! - Low-pressure severity delta
//! - High-humidity rate
//! - Temperature-extremity severity delta
//!
//! Each check is gated on a sample size and an effect size and contributes at
//! most one entry. These are frequency signals, not statistical coefficients.

use crate::aggregator::{exceeds, mean};
use crate::config::WeatherThresholds;
use crate::types::{
    CorrelationStrength, Episode, PressureTrend, WeatherCorrelation, WeatherFactor,
    WeatherSnapshot,
};
use tracing::debug;

/// Run every weather check, in a fixed order
pub fn weather_correlations(
    episodes: &[Episode],
    thresholds: &WeatherThresholds,
) -> Vec<WeatherCorrelation> {
    let samples: Vec<(&WeatherSnapshot, f64)> = episodes
        .iter()
        .filter_map(|e| e.weather.as_ref().map(|w| (w, e.severity.as_f64())))
        .collect();

    if samples.len() < thresholds.min_samples {
        debug!(
            samples = samples.len(),
            required = thresholds.min_samples,
            "Skipping weather checks: not enough weather-linked episodes"
        );
        return Vec::new();
    }

    [
        falling_pressure(&samples, thresholds),
        low_pressure(&samples, thresholds),
        high_humidity(&samples, thresholds),
        temperature_extremes(&samples, thresholds),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Qualitative label: `[strong, 1]` strong, `[moderate, strong)` moderate, else weak
pub fn strength_label(strength: f64, thresholds: &WeatherThresholds) -> CorrelationStrength {
    if strength >= thresholds.strong_strength {
        CorrelationStrength::Strong
    } else if strength >= thresholds.moderate_strength {
        CorrelationStrength::Moderate
    } else {
        CorrelationStrength::Weak
    }
}

fn correlation(
    factor: WeatherFactor,
    strength: f64,
    description: String,
    thresholds: &WeatherThresholds,
) -> WeatherCorrelation {
    let strength = strength.clamp(0.0, 1.0);
    WeatherCorrelation {
        factor,
        name: factor.display_name().to_string(),
        strength,
        label: strength_label(strength, thresholds),
        description,
    }
}

fn falling_pressure(
    samples: &[(&WeatherSnapshot, f64)],
    thresholds: &WeatherThresholds,
) -> Option<WeatherCorrelation> {
    let falling = samples
        .iter()
        .filter(|(w, _)| w.pressure_trend == PressureTrend::Falling)
        .count();
    let rate = falling as f64 / samples.len() as f64;

    if !exceeds(rate, thresholds.falling_pressure_rate) {
        return None;
    }

    Some(correlation(
        WeatherFactor::FallingPressure,
        (rate * 2.0).min(1.0),
        format!(
            "{:.0}% of your headaches started while barometric pressure was falling.",
            rate * 100.0
        ),
        thresholds,
    ))
}

fn low_pressure(
    samples: &[(&WeatherSnapshot, f64)],
    thresholds: &WeatherThresholds,
) -> Option<WeatherCorrelation> {
    let cutoff = thresholds.low_pressure_hpa;
    let low = mean(
        samples
            .iter()
            .filter(|(w, _)| w.pressure_hpa < cutoff)
            .map(|(_, s)| *s),
    )?;
    let normal = mean(
        samples
            .iter()
            .filter(|(w, _)| w.pressure_hpa >= cutoff)
            .map(|(_, s)| *s),
    )?;
    let delta = low - normal;

    if !exceeds(delta, thresholds.min_severity_delta) {
        return None;
    }

    Some(correlation(
        WeatherFactor::LowPressure,
        (delta / 2.0).min(1.0),
        format!(
            "Headaches average {delta:.1} points more severe when pressure is below {cutoff:.0} hPa."
        ),
        thresholds,
    ))
}

fn high_humidity(
    samples: &[(&WeatherSnapshot, f64)],
    thresholds: &WeatherThresholds,
) -> Option<WeatherCorrelation> {
    let humid = samples
        .iter()
        .filter(|(w, _)| w.humidity_pct > thresholds.high_humidity_pct)
        .count();
    let rate = humid as f64 / samples.len() as f64;

    if !exceeds(rate, thresholds.high_humidity_rate)
        || humid < thresholds.high_humidity_min_count
    {
        return None;
    }

    Some(correlation(
        WeatherFactor::HighHumidity,
        (rate * 1.5).min(1.0),
        format!(
            "{:.0}% of your headaches occurred when humidity was above {:.0}%.",
            rate * 100.0,
            thresholds.high_humidity_pct
        ),
        thresholds,
    ))
}

/// Split at the median temperature: at or below the median is "colder",
/// above it is "warmer".
fn temperature_extremes(
    samples: &[(&WeatherSnapshot, f64)],
    thresholds: &WeatherThresholds,
) -> Option<WeatherCorrelation> {
    let mut temps: Vec<f64> = samples.iter().map(|(w, _)| w.temperature_c).collect();
    temps.sort_by(f64::total_cmp);

    let (lowest, highest) = (*temps.first()?, *temps.last()?);
    if !exceeds(highest - lowest, thresholds.min_temperature_range_c) {
        return None;
    }

    let mid = temps.len() / 2;
    let median = if temps.len() % 2 == 0 {
        (temps[mid - 1] + temps[mid]) / 2.0
    } else {
        temps[mid]
    };

    let warmer = mean(
        samples
            .iter()
            .filter(|(w, _)| w.temperature_c > median)
            .map(|(_, s)| *s),
    )?;
    let colder = mean(
        samples
            .iter()
            .filter(|(w, _)| w.temperature_c <= median)
            .map(|(_, s)| *s),
    )?;
    let delta = (warmer - colder).abs();

    if !exceeds(delta, thresholds.min_severity_delta) {
        return None;
    }

    let (factor, side) = if warmer > colder {
        (WeatherFactor::WarmerTemperatures, "warmer")
    } else {
        (WeatherFactor::ColderTemperatures, "colder")
    };

    Some(correlation(
        factor,
        (delta / 2.0).min(1.0),
        format!(
            "Headaches average {delta:.1} points more severe on {side} days (split at {median:.1}°C)."
        ),
        thresholds,
    ))
}
