//! Medication effectiveness ranking and overuse detection
//!
//! Overuse counts distinct days in the current calendar month with acute
//! medication use. It does not check the three-consecutive-month duration
//! criterion; a single month over threshold raises the signal.

use crate::clock::ReferenceTime;
use crate::config::AnalysisConfig;
use crate::types::{Episode, MedicationClass, MedicationScore, MedicationUse, OveruseStatus};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Whether a logged medication counts as acute use.
///
/// An explicit flag wins. An unset flag is treated as acute unless the name
/// matches an entry of the host-supplied preventive list.
pub fn is_acute_use(medication: &MedicationUse, preventive_names: &[String]) -> bool {
    match medication.class {
        MedicationClass::Acute => true,
        MedicationClass::Preventive => false,
        MedicationClass::Unset => !matches_preventive(&medication.name, preventive_names),
    }
}

fn matches_preventive(name: &str, preventive_names: &[String]) -> bool {
    let name = name.trim().to_lowercase();
    preventive_names.iter().any(|p| {
        let p = p.trim().to_lowercase();
        !p.is_empty() && name.contains(&p)
    })
}

/// Rank medications by mean effectiveness, best first.
///
/// Names are grouped case-insensitively and shown with their first spelling.
/// Names with fewer than `min_uses` scored entries are dropped. Scores outside
/// 1-5 do not count as scored entries.
pub fn medication_effectiveness(episodes: &[Episode], min_uses: usize) -> Vec<MedicationScore> {
    struct Tally {
        name: String,
        total: f64,
        uses: u32,
    }

    let mut tallies: Vec<Tally> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for medication in episodes.iter().filter_map(Episode::medication) {
        let name = medication.name.trim();
        // Out-of-range scores are flagged by validation and left out here
        let Some(score) = medication.effectiveness.filter(|s| (1..=5).contains(s)) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let key = name.to_lowercase();
        let slot = *index.entry(key).or_insert_with(|| {
            tallies.push(Tally {
                name: name.to_string(),
                total: 0.0,
                uses: 0,
            });
            tallies.len() - 1
        });
        tallies[slot].total += f64::from(score);
        tallies[slot].uses += 1;
    }

    let mut ranked: Vec<MedicationScore> = tallies
        .into_iter()
        .filter(|t| t.uses as usize >= min_uses)
        .map(|t| MedicationScore {
            average_effectiveness: t.total / f64::from(t.uses),
            name: t.name,
            uses: t.uses,
        })
        .collect();
    ranked.sort_by(|a, b| b.average_effectiveness.total_cmp(&a.average_effectiveness));
    ranked
}

/// Count acute-medication days in the reference month and compare to threshold
pub fn medication_overuse(
    episodes: &[Episode],
    reference: &ReferenceTime,
    config: &AnalysisConfig,
) -> OveruseStatus {
    let days: BTreeSet<NaiveDate> = episodes
        .iter()
        .filter(|e| reference.in_current_month(e.started_at))
        .filter(|e| {
            e.medication()
                .is_some_and(|m| is_acute_use(m, &config.preventive_medications))
        })
        .map(|e| reference.local_date(e.started_at))
        .collect();

    let today = reference.today();
    let threshold = config.medication.overuse_days_per_month;
    let acute_days = days.len() as u32;
    let exceeds_threshold = acute_days >= threshold;

    if exceeds_threshold {
        debug!(
            acute_days,
            threshold, "Acute medication use reached the monthly overuse threshold"
        );
    }

    OveruseStatus {
        year: today.year(),
        month: today.month(),
        acute_days,
        threshold,
        exceeds_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OnsetSpeed, RetrospectiveDetail, Severity};
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn med(name: &str, effectiveness: Option<u8>, class: MedicationClass) -> MedicationUse {
        MedicationUse {
            name: name.to_string(),
            dose: None,
            effectiveness,
            class,
        }
    }

    fn episode_on(day: u32, month: u32, medication: MedicationUse) -> Episode {
        let start = Utc.with_ymd_and_hms(2024, month, day, 10, 0, 0).unwrap();
        Episode::new(start, Severity::MODERATE, OnsetSpeed::Gradual).with_retrospective(
            RetrospectiveDetail {
                medication: Some(medication),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_acute_classification() {
        let preventive = vec!["Topiramate".to_string(), "propranolol".to_string()];
        assert!(is_acute_use(&med("Topiramate", None, MedicationClass::Acute), &preventive));
        assert!(!is_acute_use(&med("Ibuprofen", None, MedicationClass::Preventive), &preventive));
        assert!(!is_acute_use(&med("topiramate 50mg", None, MedicationClass::Unset), &preventive));
        assert!(is_acute_use(&med("Sumatriptan", None, MedicationClass::Unset), &preventive));
        assert!(is_acute_use(&med("Propranolol", None, MedicationClass::Unset), &[]));
    }

    #[test]
    fn test_effectiveness_requires_repeat_use() {
        let episodes = vec![
            episode_on(1, 3, med("Ibuprofen", Some(3), MedicationClass::Acute)),
            episode_on(2, 3, med("ibuprofen", Some(5), MedicationClass::Acute)),
            episode_on(3, 3, med("Naproxen", Some(5), MedicationClass::Acute)),
            episode_on(4, 3, med("Sumatriptan", None, MedicationClass::Acute)),
            episode_on(5, 3, med("Sumatriptan", None, MedicationClass::Acute)),
        ];

        let ranked = medication_effectiveness(&episodes, 2);
        assert_eq!(
            ranked,
            vec![MedicationScore {
                name: "Ibuprofen".to_string(),
                average_effectiveness: 4.0,
                uses: 2,
            }]
        );
    }

    #[test]
    fn test_effectiveness_ignores_out_of_range_scores() {
        let episodes = vec![
            episode_on(1, 3, med("Ibuprofen", Some(4), MedicationClass::Acute)),
            episode_on(2, 3, med("Ibuprofen", Some(9), MedicationClass::Acute)),
            episode_on(3, 3, med("Ibuprofen", Some(2), MedicationClass::Acute)),
            episode_on(4, 3, med("Naproxen", Some(5), MedicationClass::Acute)),
            episode_on(5, 3, med("Naproxen", Some(0), MedicationClass::Acute)),
        ];

        let ranked = medication_effectiveness(&episodes, 2);
        assert_eq!(
            ranked,
            vec![MedicationScore {
                name: "Ibuprofen".to_string(),
                average_effectiveness: 3.0,
                uses: 2,
            }]
        );
    }

    #[test]
    fn test_effectiveness_sorted_descending() {
        let episodes = vec![
            episode_on(1, 3, med("A", Some(2), MedicationClass::Acute)),
            episode_on(2, 3, med("A", Some(2), MedicationClass::Acute)),
            episode_on(3, 3, med("B", Some(5), MedicationClass::Acute)),
            episode_on(4, 3, med("B", Some(4), MedicationClass::Acute)),
        ];
        let ranked = medication_effectiveness(&episodes, 2);
        let names: Vec<&str> = ranked.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_overuse_fires_at_threshold() {
        let reference = ReferenceTime::parse("2024-03-28T20:00:00Z").unwrap();
        let config = AnalysisConfig::default();

        let mut episodes: Vec<Episode> = (1..=9)
            .map(|d| episode_on(d, 3, med("Ibuprofen", None, MedicationClass::Acute)))
            .collect();
        // Same day twice counts once
        episodes.push(episode_on(9, 3, med("Ibuprofen", None, MedicationClass::Acute)));
        // Adjacent day in the prior month is excluded
        episodes.push(episode_on(29, 2, med("Ibuprofen", None, MedicationClass::Acute)));
        // Preventive use never counts
        episodes.push(episode_on(20, 3, med("Topiramate", None, MedicationClass::Preventive)));

        let status = medication_overuse(&episodes, &reference, &config);
        assert_eq!(status.acute_days, 9);
        assert!(!status.exceeds_threshold);

        episodes.push(episode_on(10, 3, med("Rizatriptan", None, MedicationClass::Unset)));
        let status = medication_overuse(&episodes, &reference, &config);
        assert_eq!(status.acute_days, 10);
        assert!(status.exceeds_threshold);
        assert_eq!((status.year, status.month), (2024, 3));
    }

    #[test]
    fn test_overuse_respects_preventive_list() {
        let reference = ReferenceTime::parse("2024-03-28T20:00:00Z").unwrap();
        let config = AnalysisConfig::default().with_preventive_medications(["Amitriptyline"]);
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        let episodes: Vec<Episode> = (0..12)
            .map(|d| {
                Episode::new(start + Duration::days(d), Severity::MILD, OnsetSpeed::Gradual)
                    .with_retrospective(RetrospectiveDetail {
                        medication: Some(med("Amitriptyline", None, MedicationClass::Unset)),
                        ..Default::default()
                    })
            })
            .collect();

        let status = medication_overuse(&episodes, &reference, &config);
        assert_eq!(status.acute_days, 0);
        assert!(!status.exceeds_threshold);
    }
}
