//! The full-variant solve pipeline: context → variables → hard constraints →
//! soft penalties → MILP solve → role assignment → response. spec.md §2's
//! data-flow line, one module per arrow.

pub mod cpmodel;
mod driver;
mod hard;
pub mod hint;
mod penalties;
mod response;
pub(crate) mod roles;
mod variables;

use crate::context::Context;
use crate::error::Result;
use crate::model::{ScheduleRequest, ScheduleResponse};
use crate::settings::Settings;
use cpmodel::CpModel;
use std::time::Instant;

/// Runs one full-variant solve. Never returns `Err` for infeasibility,
/// timeout, or an empty request — those are reported through
/// `ScheduleMeta::solver_status` on the `Ok` response, per spec.md §7.
pub fn solve(request: &ScheduleRequest, settings: &Settings) -> Result<ScheduleResponse> {
    let start = Instant::now();
    log::debug!("solving {} users across {} slots", request.users.len(), request.slots.len());
    let ctx = Context::build(request)?;

    if Context::is_trivial(request) {
        log::info!("trivial request, skipping the MILP solve");
        return Ok(response::trivial(&ctx, start.elapsed()));
    }

    if log::log_enabled!(log::Level::Debug) {
        let hint = hint::build(&ctx);
        let loads = hint.loads(ctx.num_users());
        let min = loads.iter().min().copied().unwrap_or(0);
        let max = loads.iter().max().copied().unwrap_or(0);
        log::debug!("round-robin hint load spread before solving: min={min} max={max}");
    }

    let mut model = CpModel::new();
    let vars = variables::build(&mut model, &ctx);
    hard::build(&mut model, &ctx, &vars);
    penalties::build(&mut model, &ctx, &vars, settings);

    let outcome = model.solve(settings.scheduler_time_limit_seconds);
    let result = driver::extract(&outcome, &ctx, &vars);
    log::debug!("solve finished in {:?}", start.elapsed());
    Ok(response::build(&ctx, result, start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duty::{DayType, DutyType, SeatRole, SolverStatus};
    use crate::model::{Period, Seat, Slot, Unavailability, User};
    use chrono::NaiveDate;

    fn period() -> Period {
        Period {
            id: "p1".into(),
            name: "December".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        }
    }

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            name: id.into(),
            likes_night: false,
            dislikes_weekend: false,
            history: Default::default(),
            history_desk: None,
            history_operator: None,
        }
    }

    fn slot(id: &str, date: NaiveDate, duty: DutyType, day: DayType, seat_ids: &[&str]) -> Slot {
        Slot {
            id: id.into(),
            date,
            duty_type: duty,
            day_type: day,
            seats: seat_ids
                .iter()
                .map(|sid| Seat {
                    id: (*sid).into(),
                    role: None,
                })
                .collect(),
        }
    }

    /// spec.md §8 scenario 1: a single user, single A-slot, single seat.
    #[test]
    fn trivial_single_seat_gets_operator_role() {
        let _ = env_logger::try_init();
        let request = ScheduleRequest {
            period: period(),
            users: vec![user("u1")],
            slots: vec![slot(
                "s1",
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                DutyType::A,
                DayType::Weekday,
                &["se1"],
            )],
            unavailability: Vec::new(),
        };
        let response = solve(&request, &Settings::default()).unwrap();
        assert_eq!(response.assignments.len(), 1);
        let a = &response.assignments[0];
        assert_eq!(a.user_id, "u1");
        assert_eq!(a.seat_role, Some(SeatRole::Operator));
        assert_eq!(response.meta.base, 1);
        assert_eq!(response.meta.solver_status, SolverStatus::Optimal);
    }

    /// spec.md §8 scenario 2: the same user can't cover both a C-slot and an
    /// A-slot on the same date.
    #[test]
    fn same_day_night_and_morning_go_to_different_users() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
        let request = ScheduleRequest {
            period: period(),
            users: vec![user("u1"), user("u2")],
            slots: vec![
                slot("c1", date, DutyType::C, DayType::Weekday, &["sc1"]),
                slot("a1", date, DutyType::A, DayType::Weekday, &["sa1"]),
            ],
            unavailability: Vec::new(),
        };
        let response = solve(&request, &Settings::default()).unwrap();
        let c_user = response.assignments.iter().find(|a| a.slot_id == "c1").unwrap().user_id.clone();
        let a_user = response.assignments.iter().find(|a| a.slot_id == "a1").unwrap().user_id.clone();
        assert_ne!(c_user, a_user);
    }

    /// spec.md §8 scenario 4: 4 users, 8 single-seat A-slots → each user gets
    /// exactly 2.
    #[test]
    fn minmax_total_spreads_shifts_evenly() {
        let mut slots = Vec::new();
        for day in 1..=8u32 {
            slots.push(slot(
                &format!("a{day}"),
                NaiveDate::from_ymd_opt(2025, 12, day as i32).unwrap(),
                DutyType::A,
                DayType::Weekday,
                &[&format!("sa{day}")],
            ));
        }
        let request = ScheduleRequest {
            period: period(),
            users: vec![user("u1"), user("u2"), user("u3"), user("u4")],
            slots,
            unavailability: Vec::new(),
        };
        let response = solve(&request, &Settings::default()).unwrap();
        let mut counts = std::collections::HashMap::new();
        for a in &response.assignments {
            *counts.entry(a.user_id.clone()).or_insert(0) += 1;
        }
        for count in counts.values() {
            assert_eq!(*count, 2);
        }
    }

    #[test]
    fn empty_users_is_trivial() {
        let request = ScheduleRequest {
            period: period(),
            users: Vec::new(),
            slots: vec![slot(
                "s1",
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                DutyType::A,
                DayType::Weekday,
                &["se1"],
            )],
            unavailability: Vec::new(),
        };
        let response = solve(&request, &Settings::default()).unwrap();
        assert!(response.assignments.is_empty());
        assert_eq!(response.meta.solver_status, SolverStatus::Trivial);
    }

    #[test]
    fn unavailability_does_not_block_a_feasible_solve() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let request = ScheduleRequest {
            period: period(),
            users: vec![user("u1")],
            slots: vec![slot("s1", date, DutyType::A, DayType::Weekday, &["se1"])],
            unavailability: vec![Unavailability {
                user_id: "u1".into(),
                slot_id: "s1".into(),
            }],
        };
        let response = solve(&request, &Settings::default()).unwrap();
        assert_eq!(response.assignments.len(), 1);
        assert_eq!(response.meta.unavailability_violations, 1);
    }
}
