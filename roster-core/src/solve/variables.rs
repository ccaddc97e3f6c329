//! Core decision variables shared by the hard-constraint and penalty builders.
//!
//! Per spec.md §9's design note, `x` is a flat buffer indexed by
//! `u * num_slots + s` rather than a nested `Vec<Vec<_>>`. The per-user
//! aggregate counts here are the ones enough tiers reuse to be worth
//! materializing once; anything tier-specific (the `has_t` booleans, the
//! zero-shift indicator, ...) is built lazily where it's consumed.

use super::cpmodel::{CpModel, IntVar};
use crate::context::Context;
use crate::duty::{Category, DutyType};
use good_lp::Expression;

pub struct Variables {
    num_slots: usize,
    pub x: Vec<super::cpmodel::BoolVar>,
    /// `count_total[u]`.
    pub count_total: Vec<IntVar>,
    /// `count_category[u][category_index]`.
    pub count_category: Vec<[IntVar; 4]>,
    /// `count_duty[u][duty_index]`.
    pub count_duty: Vec<[IntVar; 6]>,
    /// `count_day[u][date_index]`, bounded `[0, 2]`.
    pub count_day: Vec<Vec<IntVar>>,
}

impl Variables {
    pub fn x(&self, u: usize, s: usize) -> super::cpmodel::BoolVar {
        self.x[u * self.num_slots + s]
    }

    fn duty_index(d: DutyType) -> usize {
        match d {
            DutyType::A => 0,
            DutyType::B => 1,
            DutyType::C => 2,
            DutyType::D => 3,
            DutyType::E => 4,
            DutyType::F => 5,
        }
    }

    fn category_index(c: Category) -> usize {
        match c {
            Category::A => 0,
            Category::B => 1,
            Category::C => 2,
            Category::Weekend => 3,
        }
    }

    pub fn count_duty_of(&self, u: usize, d: DutyType) -> IntVar {
        self.count_duty[u][Self::duty_index(d)]
    }

    pub fn count_category_of(&self, u: usize, c: Category) -> IntVar {
        self.count_category[u][Self::category_index(c)]
    }

    /// `count_duty[C] + count_duty[F]` as an expression, the per-user night count.
    pub fn count_night_expr(&self, u: usize) -> Expression {
        Expression::from(self.count_duty_of(u, DutyType::C)) + Expression::from(self.count_duty_of(u, DutyType::F))
    }
}

pub fn build(model: &mut CpModel, ctx: &Context) -> Variables {
    let nu = ctx.num_users();
    let ns = ctx.num_slots();

    let mut x = Vec::with_capacity(nu * ns);
    for _ in 0..nu * ns {
        x.push(model.new_bool_var());
    }

    let mut duty_slot_counts = [0usize; 6];
    let mut category_slot_counts = [0usize; 4];
    for s in &ctx.slots {
        duty_slot_counts[Variables::duty_index(s.duty_type)] += s.required_count();
        category_slot_counts[Variables::category_index(s.duty_type.category())] += s.required_count();
    }

    let mut count_total = Vec::with_capacity(nu);
    let mut count_category = Vec::with_capacity(nu);
    let mut count_duty = Vec::with_capacity(nu);
    let mut count_day = Vec::with_capacity(nu);

    for u in 0..nu {
        let total_expr: Expression = (0..ns).fold(Expression::from(0.0), |acc, s| acc + Expression::from(x[u * ns + s]));
        let total_var = model.new_int_var(0.0, ns as f64);
        model.add_eq(total_var, total_expr);
        count_total.push(total_var);

        let mut cat_vars = [count_total[u]; 4];
        for (c, cat) in Category::ALL.iter().enumerate() {
            let slots_in_cat: Vec<usize> = ctx
                .slots
                .iter()
                .enumerate()
                .filter(|(_, s)| s.duty_type.category() == *cat)
                .map(|(i, _)| i)
                .collect();
            let expr: Expression = slots_in_cat
                .iter()
                .fold(Expression::from(0.0), |acc, &s| acc + Expression::from(x[u * ns + s]));
            let var = model.new_int_var(0.0, category_slot_counts[c] as f64);
            model.add_eq(var, expr);
            cat_vars[c] = var;
        }
        count_category.push(cat_vars);

        let mut duty_vars = [count_total[u]; 6];
        for (d, duty) in DutyType::ALL.iter().enumerate() {
            let slots_of_duty: Vec<usize> = ctx
                .slots
                .iter()
                .enumerate()
                .filter(|(_, s)| s.duty_type == *duty)
                .map(|(i, _)| i)
                .collect();
            let expr: Expression = slots_of_duty
                .iter()
                .fold(Expression::from(0.0), |acc, &s| acc + Expression::from(x[u * ns + s]));
            let var = model.new_int_var(0.0, duty_slot_counts[d] as f64);
            model.add_eq(var, expr);
            duty_vars[d] = var;
        }
        count_duty.push(duty_vars);

        let mut day_vars = Vec::with_capacity(ctx.dates.len());
        for day_slots in &ctx.slots_by_date {
            let expr: Expression = day_slots
                .iter()
                .fold(Expression::from(0.0), |acc, &s| acc + Expression::from(x[u * ns + s]));
            let var = model.new_int_var(0.0, 2.0_f64.min(day_slots.len() as f64));
            model.add_eq(var, expr);
            day_vars.push(var);
        }
        count_day.push(day_vars);
    }

    Variables {
        num_slots: ns,
        x,
        count_total,
        count_category,
        count_duty,
        count_day,
    }
}
