//! Assembles the final `ScheduleResponse`: assignment list, role split, and
//! the statistics in `ScheduleMeta`. spec.md §4.8.

use super::driver::DriverResult;
use super::roles;
use crate::context::Context;
use crate::duty::{DutyType, SeatRole, SolverStatus};
use crate::model::{Assignment, ScheduleMeta, ScheduleResponse};
use std::time::Duration;

pub fn trivial(ctx: &Context, elapsed: Duration) -> ScheduleResponse {
    empty_response(
        ctx,
        SolverStatus::Trivial,
        "empty user or slot list: returning a trivial empty schedule",
        elapsed,
    )
}

pub fn build(ctx: &Context, result: DriverResult, elapsed: Duration) -> ScheduleResponse {
    match result {
        DriverResult::Infeasible => empty_response(
            ctx,
            SolverStatus::Infeasible,
            "solver reported the request as infeasible",
            elapsed,
        ),
        DriverResult::Timeout => empty_response(
            ctx,
            SolverStatus::Timeout,
            "solver exhausted its time limit with no feasible solution",
            elapsed,
        ),
        DriverResult::Solved(assigned) => solved_response(ctx, assigned, elapsed),
    }
}

fn empty_response(ctx: &Context, status: SolverStatus, warning: &str, elapsed: Duration) -> ScheduleResponse {
    ScheduleResponse {
        assignments: Vec::new(),
        meta: ScheduleMeta {
            base: ctx.base,
            max_shifts: 0,
            min_shifts: 0,
            total_slots: ctx.num_slots(),
            total_assignments: 0,
            users_at_base_plus2: 0,
            unavailability_violations: 0,
            warnings: vec![warning.to_string()],
            solver_status: status,
            solve_time_ms: elapsed.as_secs_f64() * 1000.0,
        },
    }
}

fn solved_response(ctx: &Context, assigned: Vec<Vec<usize>>, elapsed: Duration) -> ScheduleResponse {
    let nu = ctx.num_users();
    let mut running_count = vec![0u32; nu];
    let mut desk_so_far = vec![0u32; nu];
    let mut per_slot: Vec<Vec<Assignment>> = vec![Vec::new(); ctx.num_slots()];

    let mut slot_order = Vec::with_capacity(ctx.num_slots());
    for day_slots in &ctx.slots_by_date {
        slot_order.extend(day_slots.iter().copied());
    }

    for s in slot_order {
        let slot = &ctx.slots[s];
        let mut users_in_slot = assigned[s].clone();
        users_in_slot.sort_unstable();

        let role_by_user = if slot.duty_type == DutyType::A {
            Some(roles::assign_for_slot(
                &users_in_slot,
                &ctx.users,
                &mut desk_so_far,
                roles::desk_operator_counts,
            ))
        } else {
            None
        };

        for (seat, &u) in slot.seats.iter().zip(users_in_slot.iter()) {
            running_count[u] += 1;
            let is_extra = running_count[u] > ctx.base + 1;
            let seat_role: Option<SeatRole> = role_by_user
                .as_ref()
                .and_then(|roles| roles.iter().find(|(uu, _)| *uu == u).map(|(_, r)| *r));

            per_slot[s].push(Assignment {
                slot_id: slot.id.clone(),
                seat_id: seat.id.clone(),
                user_id: ctx.users[u].id.clone(),
                seat_role,
                is_extra,
            });
        }
    }

    let mut assignments = Vec::with_capacity(ctx.num_slots());
    let mut unavailability_violations = 0usize;
    for (s, bucket) in per_slot.into_iter().enumerate() {
        for a in &bucket {
            let u = ctx.user_id_to_idx[&a.user_id];
            if ctx.unavailable.contains(&(u, s)) {
                unavailability_violations += 1;
            }
        }
        assignments.extend(bucket);
    }

    let max_shifts = running_count.iter().copied().max().unwrap_or(0);
    let min_shifts = running_count.iter().copied().min().unwrap_or(0);
    let users_at_base_plus2 = running_count.iter().filter(|&&c| c > ctx.base + 1).count();
    let total_assignments = assignments.len();

    ScheduleResponse {
        assignments,
        meta: ScheduleMeta {
            base: ctx.base,
            max_shifts,
            min_shifts,
            total_slots: ctx.num_slots(),
            total_assignments,
            users_at_base_plus2,
            unavailability_violations,
            warnings: Vec::new(),
            solver_status: SolverStatus::Optimal,
            solve_time_ms: elapsed.as_secs_f64() * 1000.0,
        },
    }
}
