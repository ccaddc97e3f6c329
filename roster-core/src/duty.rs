//! The closed set of duty types and the coarse categories used for fairness.
//!
//! `DutyType` is represented as a fixed six-case enum rather than a string so
//! that dispatch (night/weekend/morning checks, category lookup) is O(1) and
//! checked at compile time, per the port's design notes.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One of the six duty types a slot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum DutyType {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl DutyType {
    pub const ALL: [DutyType; 6] = [
        DutyType::A,
        DutyType::B,
        DutyType::C,
        DutyType::D,
        DutyType::E,
        DutyType::F,
    ];

    /// Night duties are C and F.
    pub fn is_night(self) -> bool {
        matches!(self, DutyType::C | DutyType::F)
    }

    /// Weekend duties are D, E and F.
    pub fn is_weekend_duty(self) -> bool {
        matches!(self, DutyType::D | DutyType::E | DutyType::F)
    }

    /// Morning duties are A and D; used by the forbidden same-day transition rule.
    pub fn is_morning(self) -> bool {
        matches!(self, DutyType::A | DutyType::D)
    }

    /// The fairness category this duty type rolls up into.
    pub fn category(self) -> Category {
        match self {
            DutyType::A => Category::A,
            DutyType::B => Category::B,
            DutyType::C => Category::C,
            DutyType::D | DutyType::E | DutyType::F => Category::Weekend,
        }
    }
}

/// The coarse fairness categories from the glossary: A, B, C, and Weekend (D+E+F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum Category {
    A,
    B,
    C,
    Weekend,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::A, Category::B, Category::C, Category::Weekend];
}

/// Whether a calendar date falls on a weekday or a weekend, as declared on the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum DayType {
    Weekday,
    Weekend,
}

/// Post-solve seat role for "A" duties, assigned by the role assigner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum SeatRole {
    Desk,
    Operator,
}

/// Status of a solve attempt, reported back in `ScheduleMeta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    Timeout,
    Trivial,
}
