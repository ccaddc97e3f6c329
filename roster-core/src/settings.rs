//! Penalty weights and solver tuning knobs.
//!
//! This is the one plain struct the surrounding transport layer loads (from
//! environment, a config file, whatever it likes) and hands to the core —
//! the core itself owns no configuration-loading logic, per spec.md §1/§6.
//! Field names match the wire `Key` column of spec.md §6 verbatim so a
//! settings JSON blob can be deserialized directly into this struct.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Settings {
    pub penalty_unavailability: f64,
    pub penalty_zero_shifts: f64,
    pub penalty_above_ideal_strong: f64,
    pub penalty_below_ideal_strong: f64,
    pub penalty_consecutive_days: f64,
    pub penalty_ideal_soft: f64,
    pub penalty_history_fairness: f64,
    pub penalty_fairness_duty_type: f64,
    pub penalty_fairness_night: f64,
    pub penalty_fairness_weekend_slots: f64,
    pub penalty_weekly_clustering: f64,
    pub penalty_consecutive_nights: f64,
    pub penalty_two_shifts_same_day: f64,
    pub penalty_dislikes_weekend: f64,
    pub bonus_likes_night: f64,
    pub penalty_unavailability_fairness: f64,
    pub penalty_unavailability_violation: f64,
    pub scheduler_time_limit_seconds: u64,
    /// Round-tripped for wire compatibility; only influences the round-robin
    /// hint's tie-breaking order. See SPEC_FULL.md §4.6/§9.
    pub scheduler_random_seed: u64,
}

impl Settings {
    /// `penalty_total_minmax` is referenced by spec.md but never declared as
    /// its own settings field (an acknowledged open question); this crate
    /// resolves it by reusing `penalty_fairness_duty_type`, the default the
    /// spec itself suggests.
    pub fn penalty_total_minmax(&self) -> f64 {
        self.penalty_fairness_duty_type
    }

    /// Reduced weight set for the senior (A-only, MORNING/EVENING) variant.
    /// Same tier structure; consecutive-nights and weekend-dislike/night-bonus
    /// preferences don't apply (no C/F/D/E duty types exist in that variant),
    /// so those weights are irrelevant but kept at their full-variant values
    /// for wire consistency.
    pub fn senior_defaults() -> Self {
        Self {
            penalty_consecutive_days: 5_000.0,
            penalty_fairness_duty_type: 40_000.0,
            ..Self::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            penalty_unavailability: 200_000.0,
            penalty_zero_shifts: 80_000.0,
            penalty_above_ideal_strong: 60_000.0,
            penalty_below_ideal_strong: 60_000.0,
            penalty_consecutive_days: 7_000.0,
            penalty_ideal_soft: 4_000.0,
            penalty_history_fairness: 3_000.0,
            penalty_fairness_duty_type: 50_000.0,
            penalty_fairness_night: 50_000.0,
            penalty_fairness_weekend_slots: 25_000.0,
            penalty_weekly_clustering: 100.0,
            penalty_consecutive_nights: 100.0,
            penalty_two_shifts_same_day: 100.0,
            penalty_dislikes_weekend: 10.0,
            bonus_likes_night: 5.0,
            penalty_unavailability_fairness: 1_000.0,
            penalty_unavailability_violation: 25_000.0,
            scheduler_time_limit_seconds: 60,
            scheduler_random_seed: 42,
        }
    }
}
