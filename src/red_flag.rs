//! Red-flag evaluation
//!
//! Stateless decision table over a single episode:
//!
//! | Condition                                   | Tier     |
//! |---------------------------------------------|----------|
//! | Instantaneous onset, severity >= 4          | urgent   |
//! | Instantaneous onset, severity < 4           | advisory |
//! | Aura together with visual disturbance       | advisory |
//! | Resolved or already acknowledged episode    | none     |
//!
//! The evaluator never writes the acknowledgement flag; the caller owns that.

use crate::types::{
    Episode, OnsetSpeed, RedFlagAssessment, RedFlagReason, Symptom, UrgencyTier,
};
use tracing::info;

/// Severity at or above which a sudden onset is urgent
pub const URGENT_SEVERITY: u8 = 4;

/// Evaluate one episode. Safe to call on every refresh.
pub fn evaluate(episode: &Episode) -> RedFlagAssessment {
    if episode.is_resolved() || episode.safety_acknowledged {
        return RedFlagAssessment::none(episode.id);
    }

    let mut tier = UrgencyTier::None;
    let mut reasons = Vec::new();
    let mut matched_symptoms = Vec::new();

    if episode.onset_speed == OnsetSpeed::Instantaneous {
        tier = if episode.severity.value() >= URGENT_SEVERITY {
            UrgencyTier::Urgent
        } else {
            UrgencyTier::Advisory
        };
        reasons.push(RedFlagReason::SuddenOnset);
    }

    let symptoms = episode.symptoms();
    if symptoms.contains(&Symptom::Aura) && symptoms.contains(&Symptom::VisualDisturbance) {
        tier = tier.max(UrgencyTier::Advisory);
        reasons.push(RedFlagReason::AuraWithVisualDisturbance);
        matched_symptoms.push(Symptom::Aura.display_name().to_string());
        matched_symptoms.push(Symptom::VisualDisturbance.display_name().to_string());
    }

    if tier != UrgencyTier::None {
        info!(episode_id = %episode.id, ?tier, ?reasons, "Red flag surfaced");
    }

    RedFlagAssessment {
        episode_id: episode.id,
        tier,
        reasons,
        matched_symptoms,
    }
}

/// Assessments that should currently be shown, in input order
pub fn active_red_flags(episodes: &[Episode]) -> Vec<RedFlagAssessment> {
    episodes
        .iter()
        .map(evaluate)
        .filter(RedFlagAssessment::should_surface)
        .collect()
}
