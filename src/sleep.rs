//! Sleep vs severity comparison
//!
//! Compares mean sleep before high-severity episodes against mean sleep before
//! low-severity episodes. Episodes in between, or without any sleep reading,
//! are left out.

use crate::aggregator::{exceeds, mean};
use crate::config::SleepThresholds;
use crate::types::{Episode, SleepCorrelation, SleepFinding};

const LESS_SLEEP_DESCRIPTION: &str =
    "Your more severe headaches tend to follow nights with less sleep.";
const MORE_SLEEP_DESCRIPTION: &str =
    "Your more severe headaches tend to follow nights with more sleep than usual.";
const NO_LINK_DESCRIPTION: &str =
    "Sleep duration looks similar before mild and severe headaches.";

pub fn sleep_correlation(
    episodes: &[Episode],
    thresholds: &SleepThresholds,
) -> Option<SleepCorrelation> {
    let mut high = Vec::new();
    let mut low = Vec::new();

    for episode in episodes {
        let Some(hours) = episode.sleep_hours() else {
            continue;
        };
        let severity = episode.severity.value();
        if severity >= thresholds.high_severity {
            high.push(hours);
        } else if severity <= thresholds.low_severity {
            low.push(hours);
        }
    }

    if high.len() < thresholds.min_points_per_group || low.len() < thresholds.min_points_per_group
    {
        return None;
    }

    let avg_high = mean(high.into_iter())?;
    let avg_low = mean(low.into_iter())?;
    let difference = avg_low - avg_high;

    let (finding, description) = if exceeds(difference, thresholds.neutral_band_hours) {
        (SleepFinding::LessSleepBeforeSevere, LESS_SLEEP_DESCRIPTION)
    } else if exceeds(-difference, thresholds.neutral_band_hours) {
        (SleepFinding::MoreSleepBeforeSevere, MORE_SLEEP_DESCRIPTION)
    } else {
        (SleepFinding::NoClearLink, NO_LINK_DESCRIPTION)
    };

    Some(SleepCorrelation {
        avg_sleep_high_severity: avg_high,
        avg_sleep_low_severity: avg_low,
        difference_hours: difference,
        finding,
        description: description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HealthSnapshot, OnsetSpeed, RetrospectiveDetail, Severity};
    use chrono::{TimeZone, Utc};

    fn with_sleep(severity: u8, self_report: Option<f64>, wearable: Option<f64>) -> Episode {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Episode::new(start, Severity::new(severity).unwrap(), OnsetSpeed::Gradual)
            .with_retrospective(RetrospectiveDetail {
                sleep_hours: self_report,
                ..Default::default()
            })
            .with_health(HealthSnapshot {
                sleep_hours: wearable,
                ..Default::default()
            })
    }

    #[test]
    fn test_less_sleep_before_severe() {
        let episodes = vec![
            with_sleep(5, Some(5.0), None),
            with_sleep(4, None, Some(6.0)),
            with_sleep(1, Some(8.0), Some(4.0)),
            with_sleep(2, Some(7.0), None),
            with_sleep(3, Some(2.0), None),
        ];

        let result = sleep_correlation(&episodes, &SleepThresholds::default()).unwrap();
        assert_eq!(result.avg_sleep_high_severity, 5.5);
        assert_eq!(result.avg_sleep_low_severity, 7.5);
        assert_eq!(result.difference_hours, 2.0);
        assert_eq!(result.finding, SleepFinding::LessSleepBeforeSevere);
    }

    #[test]
    fn test_more_sleep_before_severe() {
        let episodes = vec![
            with_sleep(5, Some(9.0), None),
            with_sleep(5, Some(9.0), None),
            with_sleep(1, Some(7.0), None),
            with_sleep(1, Some(7.0), None),
        ];
        let result = sleep_correlation(&episodes, &SleepThresholds::default()).unwrap();
        assert_eq!(result.finding, SleepFinding::MoreSleepBeforeSevere);
    }

    #[test]
    fn test_within_band_is_no_link() {
        let episodes = vec![
            with_sleep(5, Some(7.0), None),
            with_sleep(5, Some(7.0), None),
            with_sleep(1, Some(7.5), None),
            with_sleep(1, Some(7.5), None),
        ];
        let result = sleep_correlation(&episodes, &SleepThresholds::default()).unwrap();
        assert_eq!(result.finding, SleepFinding::NoClearLink);
    }

    #[test]
    fn test_difference_at_band_edge_is_no_link() {
        // 6.65 - 6.15 is 0.5 up to rounding
        let episodes = vec![
            with_sleep(5, Some(6.1), None),
            with_sleep(4, Some(6.2), None),
            with_sleep(1, Some(6.6), None),
            with_sleep(2, Some(6.7), None),
        ];
        let result = sleep_correlation(&episodes, &SleepThresholds::default()).unwrap();
        assert_eq!(result.finding, SleepFinding::NoClearLink);

        let episodes = vec![
            with_sleep(5, Some(6.6), None),
            with_sleep(4, Some(6.7), None),
            with_sleep(1, Some(6.1), None),
            with_sleep(2, Some(6.2), None),
        ];
        let result = sleep_correlation(&episodes, &SleepThresholds::default()).unwrap();
        assert_eq!(result.finding, SleepFinding::NoClearLink);
    }

    #[test]
    fn test_requires_two_points_per_group() {
        let episodes = vec![
            with_sleep(5, Some(5.0), None),
            with_sleep(5, None, None),
            with_sleep(1, Some(8.0), None),
            with_sleep(1, Some(8.0), None),
        ];
        assert!(sleep_correlation(&episodes, &SleepThresholds::default()).is_none());
    }
}
