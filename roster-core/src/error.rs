//! Error taxonomy for the roster solver.
//!
//! Only `Validation` and `Internal` are ever returned as `Err` from
//! [`crate::solve`]; infeasibility, timeout, and the trivial empty-input case
//! are reported through `ScheduleMeta::solver_status` on an `Ok` response, per
//! the "caller always receives a well-formed response" contract.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while preparing or running a schedule solve.
#[derive(Error, Debug, Serialize)]
pub enum RosterError {
    /// A malformed request: missing fields, unknown ids, non-positive seat
    /// counts, or an inverted date range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Any fault that isn't a validation failure and doesn't fit the
    /// infeasible/timeout/trivial outcomes. The core never retries.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
