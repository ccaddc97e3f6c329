//! Context builder: turns a validated request into the indexed, precomputed
//! structure the constraint and penalty builders read from.
//!
//! `Context` exclusively owns `users` and `slots`; builders only ever borrow
//! it. Materialization order follows the request's own order (no HashMap
//! iteration is relied on for anything the solve must be deterministic
//! about), except the date→slots grouping, which is explicitly sorted by
//! calendar date.

use crate::duty::Category;
use crate::error::RosterError;
use crate::model::{ScheduleRequest, Slot, User};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Derived, single-use-per-solve view over a validated request.
pub struct Context {
    pub users: Vec<User>,
    pub slots: Vec<Slot>,
    pub user_id_to_idx: HashMap<String, usize>,
    pub slot_id_to_idx: HashMap<String, usize>,
    pub seat_id_to_slot_idx: HashMap<String, usize>,

    /// (user_idx, slot_idx) pairs the user has declared unavailable for.
    pub unavailable: HashSet<(usize, usize)>,

    /// Unique calendar dates in sorted order.
    pub dates: Vec<NaiveDate>,
    /// Slot indices for each date in `dates`, in input order.
    pub slots_by_date: Vec<Vec<usize>>,

    pub total_seats: usize,
    pub base: u32,

    /// The period's start date, the anchor for Tier-4 weekly-clustering buckets.
    pub period_start: NaiveDate,

    /// blocked_per_category[user][category] = number of unavailability
    /// entries that user has declared against slots of that category.
    pub blocked_per_category: Vec<[u32; 4]>,
    pub max_blocked_per_category: [u32; 4],
    pub total_blocked: Vec<u32>,
    pub max_total_blocked: u32,

    /// Per-category seat total, used for the fairness-ideal band `[T_c/N, ceil(T_c/N)]`.
    pub category_seat_totals: [usize; 4],

    /// Per-user, per-total-count ideal target (Tier 3.5), already clamped to
    /// `[max(0, base-2), base+2]`.
    pub user_ideal: Vec<i64>,
}

fn category_index(c: Category) -> usize {
    match c {
        Category::A => 0,
        Category::B => 1,
        Category::C => 2,
        Category::Weekend => 3,
    }
}

impl Context {
    pub fn build(req: &ScheduleRequest) -> Result<Context, RosterError> {
        validate_structure(req)?;

        let users = req.users.clone();
        let slots = req.slots.clone();

        let mut user_id_to_idx = HashMap::with_capacity(users.len());
        for (i, u) in users.iter().enumerate() {
            user_id_to_idx.insert(u.id.clone(), i);
        }

        let mut slot_id_to_idx = HashMap::with_capacity(slots.len());
        let mut seat_id_to_slot_idx = HashMap::new();
        for (i, s) in slots.iter().enumerate() {
            slot_id_to_idx.insert(s.id.clone(), i);
            for seat in &s.seats {
                seat_id_to_slot_idx.insert(seat.id.clone(), i);
            }
        }

        let mut unavailable = HashSet::new();
        for entry in &req.unavailability {
            let u = *user_id_to_idx
                .get(&entry.user_id)
                .ok_or_else(|| RosterError::Validation(format!(
                    "unavailability references unknown user id: {}",
                    entry.user_id
                )))?;
            let s = *slot_id_to_idx
                .get(&entry.slot_id)
                .ok_or_else(|| RosterError::Validation(format!(
                    "unavailability references unknown slot id: {}",
                    entry.slot_id
                )))?;
            unavailable.insert((u, s));
        }

        let mut by_date: HashMap<NaiveDate, Vec<usize>> = HashMap::new();
        for (i, s) in slots.iter().enumerate() {
            by_date.entry(s.date).or_default().push(i);
        }
        let mut dates: Vec<NaiveDate> = by_date.keys().copied().collect();
        dates.sort();
        let slots_by_date: Vec<Vec<usize>> = dates
            .iter()
            .map(|d| by_date.get(d).cloned().unwrap_or_default())
            .collect();

        let total_seats: usize = slots.iter().map(|s| s.required_count()).sum();
        let base = if users.is_empty() {
            0
        } else {
            (total_seats / users.len()) as u32
        };

        let mut blocked_per_category = vec![[0u32; 4]; users.len()];
        for &(u, s) in &unavailable {
            let cat = category_index(slots[s].duty_type.category());
            blocked_per_category[u][cat] += 1;
        }
        let mut max_blocked_per_category = [0u32; 4];
        for row in &blocked_per_category {
            for c in 0..4 {
                max_blocked_per_category[c] = max_blocked_per_category[c].max(row[c]);
            }
        }
        let total_blocked: Vec<u32> = blocked_per_category.iter().map(|r| r.iter().sum()).collect();
        let max_total_blocked = total_blocked.iter().copied().max().unwrap_or(0);

        let mut category_seat_totals = [0usize; 4];
        for s in &slots {
            category_seat_totals[category_index(s.duty_type.category())] += s.required_count();
        }

        let lower_clamp = base.saturating_sub(2) as i64;
        let upper_clamp = base as i64 + 2;
        let user_ideal: Vec<i64> = users
            .iter()
            .map(|u| {
                let expected = u.history.expected_total.unwrap_or(0) as i64;
                let history_total = u.history.total_all_time as i64;
                let raw = base as i64 - (history_total - expected);
                raw.clamp(lower_clamp, upper_clamp)
            })
            .collect();

        Ok(Context {
            users,
            slots,
            user_id_to_idx,
            slot_id_to_idx,
            seat_id_to_slot_idx,
            unavailable,
            dates,
            slots_by_date,
            total_seats,
            base,
            period_start: req.period.start_date,
            blocked_per_category,
            max_blocked_per_category,
            total_blocked,
            max_total_blocked,
            category_seat_totals,
            user_ideal,
        })
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Whether the request is trivially empty (spec.md §3 invariants).
    pub fn is_trivial(req: &ScheduleRequest) -> bool {
        req.users.is_empty() || req.slots.is_empty()
    }

    /// `[floor(T_c/N), ceil(T_c/N)]` fairness-ideal band for a category.
    pub fn fairness_ideal_band(&self, cat: Category) -> (u32, u32) {
        let n = self.users.len().max(1);
        let t = self.category_seat_totals[category_index(cat)];
        ((t / n) as u32, t.div_ceil(n) as u32)
    }
}

fn validate_structure(req: &ScheduleRequest) -> Result<(), RosterError> {
    if req.period.end_date < req.period.start_date {
        return Err(RosterError::Validation(
            "period end_date precedes start_date".into(),
        ));
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
            return Err(RosterError::Validation(format!(
                "slot {} has requiredCount 0 (no seats)",
                s.id
            )));
        }
        for seat in &s.seats {
            if !seen_seats.insert(&seat.id) {
                return Err(RosterError::Validation(format!(
                    "duplicate seat id: {}",
                    seat.id
                )));
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
