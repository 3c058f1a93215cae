//! Weekday and time-of-day severity patterns

use crate::clock::ReferenceTime;
use crate::types::{Episode, TimeOfDay};
use std::collections::BTreeMap;

/// Mean severity per weekday (1 = Sunday ... 7 = Saturday). Empty days are absent.
pub fn severity_by_weekday(episodes: &[Episode], reference: &ReferenceTime) -> BTreeMap<u8, f64> {
    bucket_means(episodes, |e| reference.local_weekday(e.started_at))
}

/// Mean severity per time-of-day bucket of the local onset hour. Empty buckets are absent.
pub fn severity_by_time_of_day(
    episodes: &[Episode],
    reference: &ReferenceTime,
) -> BTreeMap<TimeOfDay, f64> {
    bucket_means(episodes, |e| {
        TimeOfDay::from_hour(reference.local_hour(e.started_at))
    })
}

fn bucket_means<K: Ord>(episodes: &[Episode], key: impl Fn(&Episode) -> K) -> BTreeMap<K, f64> {
    let mut sums: BTreeMap<K, (f64, u32)> = BTreeMap::new();
    for episode in episodes {
        let slot = sums.entry(key(episode)).or_insert((0.0, 0));
        slot.0 += episode.severity.as_f64();
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(k, (sum, n))| (k, sum / f64::from(n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OnsetSpeed, Severity};
    use chrono::{TimeZone, Utc};

    fn at(day: u32, hour: u32, severity: u8) -> Episode {
        let start = Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap();
        Episode::new(start, Severity::new(severity).unwrap(), OnsetSpeed::Gradual)
    }

    #[test]
    fn test_weekday_means() {
        let reference = ReferenceTime::parse("2024-03-31T12:00:00Z").unwrap();
        // 2024-03-04 and 2024-03-11 are Mondays, 2024-03-06 a Wednesday
        let episodes = vec![at(4, 9, 1), at(11, 9, 5), at(6, 9, 3)];
        let by_day = severity_by_weekday(&episodes, &reference);

        assert_eq!(by_day.len(), 2);
        assert_eq!(by_day.get(&2), Some(&3.0));
        assert_eq!(by_day.get(&4), Some(&3.0));
        assert!(by_day.get(&1).is_none());
    }

    #[test]
    fn test_time_of_day_means() {
        let reference = ReferenceTime::parse("2024-03-31T12:00:00Z").unwrap();
        let episodes = vec![at(4, 7, 1), at(5, 11, 3), at(6, 23, 5), at(7, 3, 3)];
        let by_time = severity_by_time_of_day(&episodes, &reference);

        assert_eq!(by_time.get(&TimeOfDay::Morning), Some(&2.0));
        assert_eq!(by_time.get(&TimeOfDay::Night), Some(&4.0));
        assert!(by_time.get(&TimeOfDay::Afternoon).is_none());
        assert!(by_time.get(&TimeOfDay::Evening).is_none());
    }

    #[test]
    fn test_time_of_day_follows_local_offset() {
        // 20:00 UTC is 06:00 the next day at +10:00
        let reference = ReferenceTime::parse("2024-03-31T12:00:00+10:00").unwrap();
        let by_time = severity_by_time_of_day(&[at(4, 20, 3)], &reference);
        assert_eq!(by_time.get(&TimeOfDay::Morning), Some(&3.0));
    }
}
