//! Senior variant: the same architecture as [`crate::solve`], but the only
//! duty type is a single role split into MORNING/EVENING segments, with no
//! forbidden-transition rule and a different role-assignment table.
//! spec.md §4.9.
//!
//! This is a smaller, self-contained pipeline rather than a reuse of
//! `solve::{hard, penalties, variables}` — those are built around the
//! six-case `DutyType`/`Category` fairness split that doesn't exist here
//! (one duty type, no weekend/night concept), so generalizing them would
//! have meant threading an unused category axis through every call site.
//! The post-solve role assigner (`solve::roles`) is genuinely shared, since
//! it only depends on a `(desk_count, operator_count)` table and a user's
//! `historyDesk`, both of which senior slots have too.

use crate::duty::{SeatRole, SolverStatus};
use crate::error::{Result, RosterError};
use crate::model::{Assignment, Period, ScheduleMeta, ScheduleResponse, Unavailability, User};
use crate::settings::Settings;
use crate::solve::cpmodel::CpModel;
use crate::solve::roles;
use chrono::{Duration, NaiveDate};
use good_lp::Expression;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Half of an A duty. spec.md glossary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum Segment {
    Morning,
    Evening,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SeniorSeat {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SeniorSlot {
    pub id: String,
    pub date: NaiveDate,
    pub segment: Segment,
    pub seats: Vec<SeniorSeat>,
}

impl SeniorSlot {
    pub fn required_count(&self) -> usize {
        self.seats.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SeniorScheduleRequest {
    pub period: Period,
    pub users: Vec<User>,
    pub slots: Vec<SeniorSlot>,
    #[serde(default)]
    pub unavailability: Vec<Unavailability>,
}

struct SeniorContext {
    users: Vec<User>,
    slots: Vec<SeniorSlot>,
    user_id_to_idx: HashMap<String, usize>,
    unavailable: HashSet<(usize, usize)>,
    dates: Vec<NaiveDate>,
    slots_by_date: Vec<Vec<usize>>,
    total_seats: usize,
    base: u32,
    period_start: NaiveDate,
    blocked: Vec<u32>,
    max_blocked: u32,
    user_ideal: Vec<i64>,
}

impl SeniorContext {
    fn build(req: &SeniorScheduleRequest) -> Result<SeniorContext> {
        validate_structure(req)?;

        let users = req.users.clone();
        let slots = req.slots.clone();

        let mut user_id_to_idx = HashMap::with_capacity(users.len());
        for (i, u) in users.iter().enumerate() {
            user_id_to_idx.insert(u.id.clone(), i);
        }
        let mut slot_id_to_idx = HashMap::with_capacity(slots.len());
        for (i, s) in slots.iter().enumerate() {
            slot_id_to_idx.insert(s.id.clone(), i);
        }

        let mut unavailable = HashSet::new();
        for entry in &req.unavailability {
            let u = *user_id_to_idx.get(&entry.user_id).ok_or_else(|| {
                RosterError::Validation(format!("unavailability references unknown user id: {}", entry.user_id))
            })?;
            let s = *slot_id_to_idx.get(&entry.slot_id).ok_or_else(|| {
                RosterError::Validation(format!("unavailability references unknown slot id: {}", entry.slot_id))
            })?;
            unavailable.insert((u, s));
        }

        let mut by_date: HashMap<NaiveDate, Vec<usize>> = HashMap::new();
        for (i, s) in slots.iter().enumerate() {
            by_date.entry(s.date).or_default().push(i);
        }
        let mut dates: Vec<NaiveDate> = by_date.keys().copied().collect();
        dates.sort();
        let slots_by_date: Vec<Vec<usize>> = dates.iter().map(|d| by_date[d].clone()).collect();

        let total_seats: usize = slots.iter().map(|s| s.required_count()).sum();
        let base = if users.is_empty() { 0 } else { (total_seats / users.len()) as u32 };

        let mut blocked = vec![0u32; users.len()];
        for &(u, _) in &unavailable {
            blocked[u] += 1;
        }
        let max_blocked = blocked.iter().copied().max().unwrap_or(0);

        let lower_clamp = base.saturating_sub(2) as i64;
        let upper_clamp = base as i64 + 2;
        let user_ideal = users
            .iter()
            .map(|u| {
                let expected = u.history.expected_total.unwrap_or(0) as i64;
                let raw = base as i64 - (u.history.total_all_time as i64 - expected);
                raw.clamp(lower_clamp, upper_clamp)
            })
            .collect();

        Ok(SeniorContext {
            users,
            slots,
            user_id_to_idx,
            unavailable,
            dates,
            slots_by_date,
            total_seats,
            base,
            period_start: req.period.start_date,
            blocked,
            max_blocked,
            user_ideal,
        })
    }

    fn num_users(&self) -> usize {
        self.users.len()
    }

    fn num_slots(&self) -> usize {
        self.slots.len()
    }
}

fn validate_structure(req: &SeniorScheduleRequest) -> Result<()> {
    if req.period.end_date < req.period.start_date {
        return Err(RosterError::Validation("period end_date precedes start_date".into()));
    }
    let mut seen_users = HashSet::new();
    for u in &req.users {
        if !seen_users.insert(&u.id) {
            return Err(RosterError::Validation(format!("duplicate user id: {}", u.id)));
        }
    }
    let mut seen_slots = HashSet::new();
    let mut seen_seats = HashSet::new();
    for s in &req.slots {
        if !seen_slots.insert(&s.id) {
            return Err(RosterError::Validation(format!("duplicate slot id: {}", s.id)));
        }
        if s.seats.is_empty() {
            return Err(RosterError::Validation(format!("slot {} has requiredCount 0 (no seats)", s.id)));
        }
        for seat in &s.seats {
            if !seen_seats.insert(&seat.id) {
                return Err(RosterError::Validation(format!("duplicate seat id: {}", seat.id)));
            }
        }
    }
    for entry in &req.unavailability {
        if !seen_users.contains(&entry.user_id) {
            return Err(RosterError::Validation(format!(
                "unavailability references unknown user id: {}",
                entry.user_id
            )));
        }
        if !seen_slots.contains(&entry.slot_id) {
            return Err(RosterError::Validation(format!(
                "unavailability references unknown slot id: {}",
                entry.slot_id
            )));
        }
    }
    Ok(())
}

fn is_next_day(dates: &[NaiveDate], i: usize) -> bool {
    dates[i + 1] - dates[i] == Duration::days(1)
}

/// Runs one senior-variant solve. Same error/outcome contract as
/// [`crate::solve::solve`]: only `Validation`/`Internal` are ever `Err`.
pub fn solve_senior(request: &SeniorScheduleRequest, settings: &Settings) -> Result<ScheduleResponse> {
    let start = Instant::now();
    log::debug!("solving senior variant: {} users across {} slots", request.users.len(), request.slots.len());
    let ctx = SeniorContext::build(request)?;

    if ctx.num_users() == 0 || ctx.num_slots() == 0 {
        log::info!("trivial senior request, skipping the MILP solve");
        return Ok(trivial_response(&ctx, start.elapsed()));
    }

    let nu = ctx.num_users();
    let ns = ctx.num_slots();

    let mut model = CpModel::new();
    let mut x = Vec::with_capacity(nu * ns);
    for _ in 0..nu * ns {
        x.push(model.new_bool_var());
    }
    let x_at = |u: usize, s: usize| x[u * ns + s];

    let mut count_total = Vec::with_capacity(nu);
    let mut count_day: Vec<Vec<_>> = Vec::with_capacity(nu);
    for u in 0..nu {
        let total_expr: Expression = (0..ns).fold(Expression::from(0.0), |acc, s| acc + Expression::from(x_at(u, s)));
        let total_var = model.new_int_var(0.0, ns as f64);
        model.add_eq(total_var, total_expr);
        count_total.push(total_var);

        let mut days = Vec::with_capacity(ctx.dates.len());
        for day_slots in &ctx.slots_by_date {
            let expr: Expression = day_slots
                .iter()
                .fold(Expression::from(0.0), |acc, &s| acc + Expression::from(x_at(u, s)));
            let var = model.new_int_var(0.0, 2.0_f64.min(day_slots.len() as f64));
            model.add_eq(var, expr);
            days.push(var);
        }
        count_day.push(days);
    }

    // Hard constraints: coverage and the global shift band. Per-day cap is
    // already enforced by `count_day`'s upper bound.
    for (s, slot) in ctx.slots.iter().enumerate() {
        let sum: Expression = (0..nu).fold(Expression::from(0.0), |acc, u| acc + Expression::from(x_at(u, s)));
        model.add_eq(sum, slot.required_count() as f64);
    }
    let lower = ctx.base.saturating_sub(2) as f64;
    let upper = ctx.base as f64 + 2.0;
    for u in 0..nu {
        model.add_ge(Expression::from(count_total[u]), lower);
        model.add_le(Expression::from(count_total[u]), upper);
    }

    // Tier 1: unavailability + zero shifts. No category split (one duty kind).
    let mut per_user_pairs: Vec<Vec<usize>> = vec![Vec::new(); nu];
    for &(u, s) in &ctx.unavailable {
        per_user_pairs[u].push(s);
        let fair = (ctx.max_blocked - ctx.blocked[u]) as f64 * settings.penalty_unavailability_fairness;
        model.minimize(Expression::from(x_at(u, s)) * (settings.penalty_unavailability + fair));
    }
    for (u, pairs) in per_user_pairs.iter().enumerate() {
        if pairs.len() < 2 {
            continue;
        }
        let v_expr: Expression = pairs
            .iter()
            .fold(Expression::from(0.0), |acc, &s| acc + Expression::from(x_at(u, s)));
        let excess = model.add_positive_part(v_expr - 1.0, (pairs.len() - 1) as f64);
        model.minimize(Expression::from(excess) * settings.penalty_unavailability_violation);
    }
    for u in 0..nu {
        let zero = model.new_bool_var();
        model.add_boundary_equality_bool(zero, count_total[u], 0.0, ns as f64, 0.0);
        model.minimize(Expression::from(zero) * settings.penalty_zero_shifts);
    }

    // Tier 2: three-consecutive-day streaks, "any segment present" per spec.md §4.9.
    if ctx.dates.len() >= 3 {
        for i in 0..ctx.dates.len() - 2 {
            if !is_next_day(&ctx.dates, i) || !is_next_day(&ctx.dates, i + 1) {
                continue;
            }
            for u in 0..nu {
                let h0 = or_of_x(&mut model, &x, ns, u, &ctx.slots_by_date[i]);
                let h1 = or_of_x(&mut model, &x, ns, u, &ctx.slots_by_date[i + 1]);
                let h2 = or_of_x(&mut model, &x, ns, u, &ctx.slots_by_date[i + 2]);
                if let (Some(h0), Some(h1), Some(h2)) = (h0, h1, h2) {
                    let streak = model.new_bool_var();
                    model.add_bool_and(streak, &[h0, h1, h2]);
                    model.minimize(Expression::from(streak) * settings.penalty_consecutive_days);
                }
            }
        }
    }

    // Tier 3: total MinMax fairness (the only axis that exists here).
    let total_terms: Vec<Expression> = (0..nu).map(|u| Expression::from(count_total[u])).collect();
    let max_v = model.new_int_var(0.0, ns as f64);
    let min_v = model.new_int_var(0.0, ns as f64);
    model.add_max_equality(max_v, &total_terms);
    model.add_min_equality(min_v, &total_terms);
    model.minimize((Expression::from(max_v) - Expression::from(min_v)) * settings.penalty_total_minmax());

    // Tier 3.5: ideal drift, soft band plus the above/below-ideal-strong escalation.
    for u in 0..nu {
        let ideal = ctx.user_ideal[u] as f64;
        let count = Expression::from(count_total[u]);
        let abs_var = model.new_int_var(0.0, ns as f64);
        model.add_abs_equality(abs_var, count.clone() - ideal);
        model.minimize(Expression::from(abs_var) * (settings.penalty_ideal_soft + settings.penalty_history_fairness));
        let above = model.add_positive_part(count.clone() - (ideal + 1.0), ns as f64);
        model.minimize(Expression::from(above) * settings.penalty_above_ideal_strong);
        let below = model.add_positive_part((ideal - 1.0) - count, ns as f64);
        model.minimize(Expression::from(below) * settings.penalty_below_ideal_strong);
    }

    // Tier 4: weekly clustering and two-shifts-same-day. No night duty here,
    // so consecutive-nights and Tier-5 preferences don't apply.
    let mut weeks: HashMap<i64, Vec<usize>> = HashMap::new();
    for (date_idx, &date) in ctx.dates.iter().enumerate() {
        let week = (date - ctx.period_start).num_days().div_euclid(7);
        weeks.entry(week).or_default().extend(&ctx.slots_by_date[date_idx]);
    }
    for slot_ids in weeks.values() {
        for u in 0..nu {
            let expr: Expression = slot_ids
                .iter()
                .fold(Expression::from(0.0), |acc, &s| acc + Expression::from(x_at(u, s)));
            let excess = model.add_positive_part(expr - 2.0, slot_ids.len() as f64);
            model.minimize(Expression::from(excess) * settings.penalty_weekly_clustering);
        }
    }
    for (d, day_slots) in ctx.slots_by_date.iter().enumerate() {
        if day_slots.len() < 2 {
            continue;
        }
        for u in 0..nu {
            let indicator = model.new_bool_var();
            model.add_boundary_equality_bool(indicator, count_day[u][d], 0.0, 2.0, 2.0);
            model.minimize(Expression::from(indicator) * settings.penalty_two_shifts_same_day);
        }
    }

    let outcome = model.solve(settings.scheduler_time_limit_seconds);
    use crate::solve::cpmodel::SolveStatus;
    let assigned = match &outcome.status {
        SolveStatus::Optimal => {
            let mut assigned = vec![Vec::new(); ns];
            for (s, bucket) in assigned.iter_mut().enumerate() {
                for u in 0..nu {
                    if outcome.bool_value(x_at(u, s)) {
                        bucket.push(u);
                    }
                }
            }
            Some(assigned)
        }
        SolveStatus::Infeasible => None,
        SolveStatus::Error(_) => None,
    };

    let Some(assigned) = assigned else {
        let status = match &outcome.status {
            SolveStatus::Error(m) if m.to_lowercase().contains("time") => SolverStatus::Timeout,
            _ => SolverStatus::Infeasible,
        };
        let warning = match status {
            SolverStatus::Timeout => "solver exhausted its time limit with no feasible solution",
            _ => "solver reported the request as infeasible",
        };
        return Ok(empty_response(&ctx, status, warning, start.elapsed()));
    };

    Ok(build_response(&ctx, assigned, start.elapsed()))
}

fn or_of_x(
    model: &mut CpModel,
    x: &[crate::solve::cpmodel::BoolVar],
    num_slots: usize,
    u: usize,
    slots: &[usize],
) -> Option<crate::solve::cpmodel::BoolVar> {
    if slots.is_empty() {
        return None;
    }
    if slots.len() == 1 {
        return Some(x[u * num_slots + slots[0]]);
    }
    let terms: Vec<_> = slots.iter().map(|&s| x[u * num_slots + s]).collect();
    let target = model.new_bool_var();
    model.add_bool_or(target, &terms);
    Some(target)
}

fn trivial_response(ctx: &SeniorContext, elapsed: std::time::Duration) -> ScheduleResponse {
    empty_response(
        ctx,
        SolverStatus::Trivial,
        "empty user or slot list: returning a trivial empty schedule",
        elapsed,
    )
}

fn empty_response(ctx: &SeniorContext, status: SolverStatus, warning: &str, elapsed: std::time::Duration) -> ScheduleResponse {
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

fn build_response(ctx: &SeniorContext, assigned: Vec<Vec<usize>>, elapsed: std::time::Duration) -> ScheduleResponse {
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

        let role_by_user = roles::assign_for_slot(&users_in_slot, &ctx.users, &mut desk_so_far, roles::senior_desk_operator_counts);

        for (seat, &u) in slot.seats.iter().zip(users_in_slot.iter()) {
            running_count[u] += 1;
            let is_extra = running_count[u] > ctx.base + 1;
            let seat_role: Option<SeatRole> = role_by_user.iter().find(|(uu, _)| *uu == u).map(|(_, r)| *r);
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
