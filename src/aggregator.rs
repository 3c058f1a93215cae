//! Summary statistics over an episode history
//!
//! - Average severity across all episodes
//! - Average duration across resolved episodes
//! - Headache-free streak ending yesterday
//! - Daily episode counts over a trailing window

use crate::clock::ReferenceTime;
use crate::types::Episode;
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};

/// Mean severity over every episode, resolved or not
pub fn average_severity(episodes: &[Episode]) -> Option<f64> {
    mean(episodes.iter().map(|e| e.severity.as_f64()))
}

/// Mean onset-to-resolution time in minutes over resolved episodes only
pub fn average_duration_minutes(episodes: &[Episode]) -> Option<f64> {
    mean(
        episodes
            .iter()
            .filter_map(Episode::duration)
            .map(|d| d.num_seconds() as f64 / 60.0),
    )
}

/// Consecutive episode-free days immediately before today.
///
/// Today is never counted. An episode today ends the walk at zero; otherwise
/// the walk runs back from yesterday until it meets a day with an onset or
/// reaches `cap_days`.
pub fn headache_free_streak(episodes: &[Episode], reference: &ReferenceTime, cap_days: u32) -> u32 {
    let onset_days: HashSet<NaiveDate> = episodes
        .iter()
        .map(|e| reference.local_date(e.started_at))
        .collect();

    let today = reference.today();
    if onset_days.contains(&today) {
        return 0;
    }

    let mut streak = 0;
    let mut day = today;
    while streak < cap_days {
        day = match day.pred_opt() {
            Some(previous) => previous,
            None => break,
        };
        if onset_days.contains(&day) {
            break;
        }
        streak += 1;
    }
    streak
}

/// Episode count per local day for the trailing `window_days` (today included).
/// Days without episodes are absent.
pub fn daily_frequency(
    episodes: &[Episode],
    reference: &ReferenceTime,
    window_days: u32,
) -> BTreeMap<NaiveDate, u32> {
    let today = reference.today();
    let earliest = today - Duration::days(i64::from(window_days.saturating_sub(1)));

    let mut counts = BTreeMap::new();
    for episode in episodes {
        let day = reference.local_date(episode.started_at);
        if day >= earliest && day <= today {
            *counts.entry(day).or_insert(0) += 1;
        }
    }
    counts
}

/// Slack for strict gates over averaged values
const GATE_EPSILON: f64 = 1e-9;

/// Strict `value > threshold` that ignores rounding noise at the boundary,
/// so a mean difference of exactly the threshold never passes.
pub(crate) fn exceeds(value: f64, threshold: f64) -> bool {
    value > threshold + GATE_EPSILON
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
