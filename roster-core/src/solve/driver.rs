//! Reads a finished `CpModel` solve back into per-slot user assignments.
//!
//! spec.md §4.6: "on `OPTIMAL` or `FEASIBLE`, extract every `(u,s)` with
//! `x[u,s] = 1`... on any other status, the response has no assignments and
//! records a warning." `good_lp`'s HiGHS binding collapses OPTIMAL/FEASIBLE
//! into one success outcome (it has no separate "feasible but not proven
//! optimal" status once `solve()` returns `Ok`), so this module only
//! distinguishes solved vs. not.

use super::cpmodel::{SolveOutcome, SolveStatus};
use super::variables::Variables;
use crate::context::Context;

pub enum DriverResult {
    /// `assigned[slot_idx]` is every user index with `x[u,s] = 1`, in
    /// ascending user-index order.
    Solved(Vec<Vec<usize>>),
    Infeasible,
    Timeout,
}

pub fn extract(outcome: &SolveOutcome, ctx: &Context, vars: &Variables) -> DriverResult {
    match &outcome.status {
        SolveStatus::Optimal => {
            let mut assigned = vec![Vec::new(); ctx.num_slots()];
            for (s, bucket) in assigned.iter_mut().enumerate() {
                for u in 0..ctx.num_users() {
                    if outcome.bool_value(vars.x(u, s)) {
                        bucket.push(u);
                    }
                }
            }
            DriverResult::Solved(assigned)
        }
        SolveStatus::Infeasible => DriverResult::Infeasible,
        SolveStatus::Error(message) => {
            if message.to_lowercase().contains("time") {
                DriverResult::Timeout
            } else {
                DriverResult::Infeasible
            }
        }
    }
}
