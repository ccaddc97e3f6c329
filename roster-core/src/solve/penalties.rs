//! The six soft-penalty tiers from spec.md §4.4, each contributing weighted
//! terms into the single objective `CpModel::minimize` accumulates.
//!
//! Booleans and auxiliary integers here are built lazily, one per tier per
//! call site, rather than up front in `variables::build` — per spec.md §9's
//! guidance that auxiliaries should exist only where a penalty term actually
//! references them.

use super::cpmodel::{BoolVar, CpModel};
use super::variables::Variables;
use crate::context::Context;
use crate::duty::{Category, DutyType};
use crate::settings::Settings;
use chrono::Duration;
use good_lp::Expression;
use std::collections::HashMap;

pub fn build(model: &mut CpModel, ctx: &Context, vars: &Variables, settings: &Settings) {
    tier1_unavailability(model, ctx, vars, settings);
    tier2_consecutive_same_type(model, ctx, vars, settings);
    tier3_fairness(model, ctx, vars, settings);
    tier3_5_ideal_drift(model, ctx, vars, settings);
    tier4_comfort(model, ctx, vars, settings);
    tier5_preferences(model, ctx, vars, settings);
}

fn tier1_unavailability(model: &mut CpModel, ctx: &Context, vars: &Variables, settings: &Settings) {
    let cat_index = |c: Category| -> usize {
        match c {
            Category::A => 0,
            Category::B => 1,
            Category::C => 2,
            Category::Weekend => 3,
        }
    };

    let mut per_user_pairs: Vec<Vec<usize>> = vec![Vec::new(); ctx.num_users()];

    for &(u, s) in &ctx.unavailable {
        per_user_pairs[u].push(s);

        let cat = cat_index(ctx.slots[s].duty_type.category());
        let fair = (ctx.max_blocked_per_category[cat] - ctx.blocked_per_category[u][cat]) as f64
            * settings.penalty_unavailability_fairness;
        let fair_secondary = (ctx.max_total_blocked - ctx.total_blocked[u]) as f64
            * (settings.penalty_unavailability_fairness / 10.0);
        let weight = settings.penalty_unavailability + fair + fair_secondary;
        model.minimize(Expression::from(vars.x(u, s)) * weight);
    }

    for (u, pairs) in per_user_pairs.iter().enumerate() {
        if pairs.len() < 2 {
            continue;
        }
        let v_expr: Expression = pairs
            .iter()
            .fold(Expression::from(0.0), |acc, &s| acc + Expression::from(vars.x(u, s)));
        let excess = model.add_positive_part(v_expr - 1.0, (pairs.len() - 1) as f64);
        model.minimize(Expression::from(excess) * settings.penalty_unavailability_violation);
    }

    for u in 0..ctx.num_users() {
        let zero = model.new_bool_var();
        model.add_boundary_equality_bool(zero, vars.count_total[u], 0.0, ctx.num_slots() as f64, 0.0);
        model.minimize(Expression::from(zero) * settings.penalty_zero_shifts);
    }
}

/// `OR` of `x[u,s]` across `slots`. A single-element group is the variable
/// itself; no aux boolean needed.
fn or_of_x(model: &mut CpModel, vars: &Variables, u: usize, slots: &[usize]) -> BoolVar {
    if slots.len() == 1 {
        return vars.x(u, slots[0]);
    }
    let terms: Vec<BoolVar> = slots.iter().map(|&s| vars.x(u, s)).collect();
    let target = model.new_bool_var();
    model.add_bool_or(target, &terms);
    target
}

fn slots_of_type_on_date(ctx: &Context, date_idx: usize, duty: DutyType) -> Vec<usize> {
    ctx.slots_by_date[date_idx]
        .iter()
        .copied()
        .filter(|&s| ctx.slots[s].duty_type == duty)
        .collect()
}

fn is_next_day(ctx: &Context, i: usize) -> bool {
    ctx.dates[i + 1] - ctx.dates[i] == Duration::days(1)
}

fn tier2_consecutive_same_type(model: &mut CpModel, ctx: &Context, vars: &Variables, settings: &Settings) {
    if ctx.dates.len() < 3 {
        return;
    }
    for &duty in &DutyType::ALL {
        for i in 0..ctx.dates.len() - 2 {
            if !is_next_day(ctx, i) || !is_next_day(ctx, i + 1) {
                continue;
            }
            let day0 = slots_of_type_on_date(ctx, i, duty);
            let day1 = slots_of_type_on_date(ctx, i + 1, duty);
            let day2 = slots_of_type_on_date(ctx, i + 2, duty);
            if day0.is_empty() || day1.is_empty() || day2.is_empty() {
                continue;
            }
            for u in 0..ctx.num_users() {
                let h0 = or_of_x(model, vars, u, &day0);
                let h1 = or_of_x(model, vars, u, &day1);
                let h2 = or_of_x(model, vars, u, &day2);
                let streak = model.new_bool_var();
                model.add_bool_and(streak, &[h0, h1, h2]);
                model.minimize(Expression::from(streak) * settings.penalty_consecutive_days);
            }
        }
    }
}

fn minmax_penalty(model: &mut CpModel, terms: &[Expression], upper_bound: f64, weight: f64) {
    let max_v = model.new_int_var(0.0, upper_bound);
    let min_v = model.new_int_var(0.0, upper_bound);
    model.add_max_equality(max_v, terms);
    model.add_min_equality(min_v, terms);
    model.minimize((Expression::from(max_v) - Expression::from(min_v)) * weight);
}

fn tier3_fairness(model: &mut CpModel, ctx: &Context, vars: &Variables, settings: &Settings) {
    let nu = ctx.num_users();
    if nu == 0 {
        return;
    }

    let total_terms: Vec<Expression> = (0..nu).map(|u| Expression::from(vars.count_total[u])).collect();
    minmax_penalty(model, &total_terms, ctx.num_slots() as f64, settings.penalty_total_minmax());

    for (c, cat) in Category::ALL.iter().enumerate() {
        let terms: Vec<Expression> = (0..nu)
            .map(|u| Expression::from(vars.count_category_of(u, *cat)))
            .collect();
        minmax_penalty(model, &terms, ctx.category_seat_totals[c] as f64, settings.penalty_fairness_duty_type);
    }

    for &duty in &[DutyType::D, DutyType::E, DutyType::F] {
        let total: usize = ctx
            .slots
            .iter()
            .filter(|s| s.duty_type == duty)
            .map(|s| s.required_count())
            .sum();
        let terms: Vec<Expression> = (0..nu)
            .map(|u| Expression::from(vars.count_duty_of(u, duty)))
            .collect();
        minmax_penalty(model, &terms, total as f64, settings.penalty_fairness_weekend_slots);
    }

    let night_total: usize = ctx
        .slots
        .iter()
        .filter(|s| s.duty_type.is_night())
        .map(|s| s.required_count())
        .sum();
    let night_terms: Vec<Expression> = (0..nu).map(|u| vars.count_night_expr(u)).collect();
    minmax_penalty(model, &night_terms, night_total as f64, settings.penalty_fairness_night);
}

/// `ideal[u]` drift: a soft band at two low weights (`penalty_ideal_soft`,
/// `penalty_history_fairness`), and a "strong" escalation once the user lands
/// more than one shift outside the ideal, at the §6-listed
/// `penalty_above_ideal_strong`/`penalty_below_ideal_strong` weights. Both
/// read the same `ideal[u]` but the strong zone only starts charging past the
/// `ideal±1` slack band, consistent with the weight-ordering note that places
/// it near Tier 1 in severity.
fn tier3_5_ideal_drift(model: &mut CpModel, ctx: &Context, vars: &Variables, settings: &Settings) {
    let ns = ctx.num_slots() as f64;
    for u in 0..ctx.num_users() {
        let ideal = ctx.user_ideal[u] as f64;
        let count = Expression::from(vars.count_total[u]);

        let abs_var = model.new_int_var(0.0, ns);
        model.add_abs_equality(abs_var, count.clone() - ideal);
        model.minimize(Expression::from(abs_var) * (settings.penalty_ideal_soft + settings.penalty_history_fairness));

        let above = model.add_positive_part(count.clone() - (ideal + 1.0), ns);
        model.minimize(Expression::from(above) * settings.penalty_above_ideal_strong);

        let below = model.add_positive_part((ideal - 1.0) - count, ns);
        model.minimize(Expression::from(below) * settings.penalty_below_ideal_strong);
    }
}

fn tier4_comfort(model: &mut CpModel, ctx: &Context, vars: &Variables, settings: &Settings) {
    // Weekly clustering: 7-day buckets from the period start.
    let mut weeks: HashMap<i64, Vec<usize>> = HashMap::new();
    for (date_idx, &date) in ctx.dates.iter().enumerate() {
        let week = (date - ctx.period_start).num_days().div_euclid(7);
        weeks.entry(week).or_default().extend(&ctx.slots_by_date[date_idx]);
    }
    for slot_ids in weeks.values() {
        if slot_ids.is_empty() {
            continue;
        }
        for u in 0..ctx.num_users() {
            let expr: Expression = slot_ids
                .iter()
                .fold(Expression::from(0.0), |acc, &s| acc + Expression::from(vars.x(u, s)));
            let excess = model.add_positive_part(expr - 2.0, slot_ids.len() as f64);
            model.minimize(Expression::from(excess) * settings.penalty_weekly_clustering);
        }
    }

    // Consecutive nights.
    for i in 0..ctx.dates.len().saturating_sub(1) {
        if !is_next_day(ctx, i) {
            continue;
        }
        let night0: Vec<usize> = ctx.slots_by_date[i]
            .iter()
            .copied()
            .filter(|&s| ctx.slots[s].duty_type.is_night())
            .collect();
        let night1: Vec<usize> = ctx.slots_by_date[i + 1]
            .iter()
            .copied()
            .filter(|&s| ctx.slots[s].duty_type.is_night())
            .collect();
        if night0.is_empty() || night1.is_empty() {
            continue;
        }
        for u in 0..ctx.num_users() {
            let h0 = or_of_x(model, vars, u, &night0);
            let h1 = or_of_x(model, vars, u, &night1);
            let both = model.new_bool_var();
            model.add_bool_and(both, &[h0, h1]);
            model.minimize(Expression::from(both) * settings.penalty_consecutive_nights);
        }
    }

    // Two shifts same day.
    for (d, day_slots) in ctx.slots_by_date.iter().enumerate() {
        if day_slots.len() < 2 {
            continue;
        }
        for u in 0..ctx.num_users() {
            let indicator = model.new_bool_var();
            model.add_boundary_equality_bool(indicator, vars.count_day[u][d], 0.0, 2.0, 2.0);
            model.minimize(Expression::from(indicator) * settings.penalty_two_shifts_same_day);
        }
    }
}

fn tier5_preferences(model: &mut CpModel, ctx: &Context, vars: &Variables, settings: &Settings) {
    for (u, user) in ctx.users.iter().enumerate() {
        for (s, slot) in ctx.slots.iter().enumerate() {
            if user.dislikes_weekend && slot.duty_type.is_weekend_duty() {
                model.minimize(Expression::from(vars.x(u, s)) * settings.penalty_dislikes_weekend);
            }
            if user.likes_night && slot.duty_type.is_night() {
                model.minimize(Expression::from(vars.x(u, s)) * (-settings.bonus_likes_night));
            }
        }
    }
}
