//! The round-robin solution hint from spec.md §4.5.
//!
//! Advisory only: it is never fed into `CpModel` as a warm start (`good_lp`'s
//! HiGHS binding has no public hook for that — see SPEC_FULL.md §4.5). Its one
//! live use is the `log_initial_state`-style debug line `solve()` emits before
//! the MILP runs, giving a cheap greedy estimate of the load spread a solved
//! schedule should land near.

use crate::context::Context;

/// `assigned[slot_idx]` is the list of user indices the hint packs into that
/// slot, in fill order.
pub struct Hint {
    pub assigned: Vec<Vec<usize>>,
}

impl Hint {
    /// Per-user total seat count the hint would produce, for a one-line
    /// min/max diagnostic before the real solve runs.
    pub fn loads(&self, num_users: usize) -> Vec<u32> {
        let mut loads = vec![0u32; num_users];
        for slot in &self.assigned {
            for &u in slot {
                loads[u] += 1;
            }
        }
        loads
    }
}

pub fn build(ctx: &Context) -> Hint {
    let nu = ctx.num_users();
    let ns = ctx.num_slots();
    let mut assigned = vec![Vec::new(); ns];
    if nu == 0 {
        return Hint { assigned };
    }

    let remainder = ctx.total_seats % nu;
    let mut targets = vec![ctx.base; nu];
    for t in targets.iter_mut().take(remainder) {
        *t += 1;
    }
    let mut loads = vec![0u32; nu];

    let mut slot_order = Vec::with_capacity(ns);
    for day_slots in &ctx.slots_by_date {
        slot_order.extend(day_slots.iter().copied());
    }

    for s in slot_order {
        let needed = ctx.slots[s].required_count();
        for _ in 0..needed {
            let pick = pick_user(&loads, &targets, &assigned[s]);
            if let Some(u) = pick {
                loads[u] += 1;
                assigned[s].push(u);
            }
        }
    }

    Hint { assigned }
}

/// Least-loaded user not already filling this slot, preferring one still
/// under its round-robin target; falls back to the least-loaded user overall
/// once everyone has met their target (keeps the hint total even when
/// `requiredCount` sums past `Σ targets`, which hard constraints alone decide
/// is feasible or not).
fn pick_user(loads: &[u32], targets: &[u32], already_in_slot: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (u, &load) in loads.iter().enumerate() {
        if already_in_slot.contains(&u) || load >= targets[u] {
            continue;
        }
        let better = match best {
            Some((_, b)) => load < b,
            None => true,
        };
        if better {
            best = Some((u, load));
        }
    }
    if let Some((u, _)) = best {
        return Some(u);
    }
    for (u, &load) in loads.iter().enumerate() {
        if already_in_slot.contains(&u) {
            continue;
        }
        let better = match best {
            Some((_, b)) => load < b,
            None => true,
        };
        if better {
            best = Some((u, load));
        }
    }
    best.map(|(u, _)| u)
}
