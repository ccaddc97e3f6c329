//! The four inviolable hard constraints from spec.md §4.3.
//!
//! Any infeasibility reported by [`super::cpmodel::CpModel::solve`] after
//! these are in place means the request itself is unsatisfiable (e.g.
//! `requiredCount` summed over a date exceeds what two-per-day allows for the
//! pool of users available that day), not a bug in the builder.

use super::cpmodel::CpModel;
use super::variables::Variables;
use crate::context::Context;
use good_lp::Expression;

/// Coverage, forbidden same-day night→morning transition, and the global
/// shift band. The per-day cap is already enforced by the upper bound baked
/// into `Variables::count_day` (see `variables::build`), so it needs no
/// constraint of its own here.
pub fn build(model: &mut CpModel, ctx: &Context, vars: &Variables) {
    coverage(model, ctx, vars);
    forbidden_transition(model, ctx, vars);
    global_shift_band(model, ctx, vars);
}

fn coverage(model: &mut CpModel, ctx: &Context, vars: &Variables) {
    for (s, slot) in ctx.slots.iter().enumerate() {
        let sum: Expression = (0..ctx.num_users())
            .fold(Expression::from(0.0), |acc, u| acc + Expression::from(vars.x(u, s)));
        model.add_eq(sum, slot.required_count() as f64);
    }
}

fn forbidden_transition(model: &mut CpModel, ctx: &Context, vars: &Variables) {
    for day_slots in &ctx.slots_by_date {
        let nights: Vec<usize> = day_slots
            .iter()
            .copied()
            .filter(|&s| ctx.slots[s].duty_type.is_night())
            .collect();
        let mornings: Vec<usize> = day_slots
            .iter()
            .copied()
            .filter(|&s| ctx.slots[s].duty_type.is_morning())
            .collect();
        if nights.is_empty() || mornings.is_empty() {
            continue;
        }
        for u in 0..ctx.num_users() {
            for &n in &nights {
                for &m in &mornings {
                    let sum = Expression::from(vars.x(u, n)) + Expression::from(vars.x(u, m));
                    model.add_le(sum, 1.0);
                }
            }
        }
    }
}

fn global_shift_band(model: &mut CpModel, ctx: &Context, vars: &Variables) {
    let lower = ctx.base.saturating_sub(2) as f64;
    let upper = ctx.base as f64 + 2.0;
    for u in 0..ctx.num_users() {
        let count = Expression::from(vars.count_total[u]);
        model.add_ge(count.clone(), lower);
        model.add_le(count, upper);
    }
}
