//! Wire-facing data structures for the roster solver API.
//!
//! These mirror spec.md §3 and §6 exactly: camelCase field names, ISO dates,
//! uppercase enum tags. `Slot::required_count` is the single call site that
//! derives seat count from `seats.len()` so no second definition can drift
//! from it.

use crate::duty::{DayType, DutyType, SeatRole, SolverStatus};
use chrono::NaiveDate;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The calendar window a roster request covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Period {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Per-duty-type shift counts accumulated from prior periods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UserHistory {
    #[serde(default)]
    pub total_all_time: u32,
    /// Total base contribution across prior periods. Absent means 0.
    #[serde(default)]
    pub expected_total: Option<u32>,
    #[serde(default)]
    pub a: u32,
    #[serde(default)]
    pub b: u32,
    #[serde(default)]
    pub c: u32,
    #[serde(default)]
    pub d: u32,
    #[serde(default)]
    pub e: u32,
    #[serde(default)]
    pub f: u32,
}

impl UserHistory {
    /// Derived: C + F.
    pub fn night(&self) -> u32 {
        self.c + self.f
    }

    /// Derived: D + E + F.
    pub fn weekend(&self) -> u32 {
        self.d + self.e + self.f
    }
}

/// A staff member eligible for assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub likes_night: bool,
    #[serde(default)]
    pub dislikes_weekend: bool,
    #[serde(default)]
    pub history: UserHistory,
    /// Used only by the role assigner for A-slot DESK/OPERATOR balancing.
    #[serde(default)]
    pub history_desk: Option<u32>,
    #[serde(default)]
    pub history_operator: Option<u32>,
}

/// One seat within a slot. `role` is only meaningful for "A" duty slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Seat {
    pub id: String,
    #[serde(default)]
    pub role: Option<SeatRole>,
}

/// A single calendar slot requiring `seats.len()` people of one duty type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Slot {
    pub id: String,
    pub date: NaiveDate,
    pub duty_type: DutyType,
    pub day_type: DayType,
    pub seats: Vec<Seat>,
}

impl Slot {
    /// `requiredCount` per spec.md §3: the number of seats.
    pub fn required_count(&self) -> usize {
        self.seats.len()
    }
}

/// An advisory (u, s) pair declaring that a user has closed a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Unavailability {
    pub user_id: String,
    pub slot_id: String,
}

/// The complete input to a solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ScheduleRequest {
    pub period: Period,
    pub users: Vec<User>,
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub unavailability: Vec<Unavailability>,
}

/// One person bound to one concrete seat of one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Assignment {
    pub slot_id: String,
    pub seat_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_role: Option<SeatRole>,
    pub is_extra: bool,
}

/// Aggregate statistics and diagnostics about a solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ScheduleMeta {
    pub base: u32,
    pub max_shifts: u32,
    pub min_shifts: u32,
    pub total_slots: usize,
    pub total_assignments: usize,
    pub users_at_base_plus2: usize,
    pub unavailability_violations: usize,
    pub warnings: Vec<String>,
    pub solver_status: SolverStatus,
    pub solve_time_ms: f64,
}

/// The complete output of a solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ScheduleResponse {
    pub assignments: Vec<Assignment>,
    pub meta: ScheduleMeta,
}
