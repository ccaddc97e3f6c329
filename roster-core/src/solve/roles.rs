//! Post-solve DESK/OPERATOR role assignment for "A" slots, spec.md §4.7.
//!
//! Non-A slots never call into this module; the response builder leaves
//! their `seatRole` as `None`.

use crate::duty::SeatRole;
use crate::model::User;
use std::collections::HashSet;

/// `(desk_count, operator_count)` for `k` assignees on a full-variant A-slot.
pub fn desk_operator_counts(k: usize) -> (usize, usize) {
    match k {
        0 => (0, 0),
        1 => (0, 1),
        2 => (1, 1),
        3 => (1, 2),
        4 => (2, 2),
        5 => (3, 2),
        6 => (3, 3),
        7 => (4, 3),
        _ => {
            let desk = k.div_ceil(2);
            (desk, k - desk)
        }
    }
}

/// `(desk_count, operator_count)` for `k` assignees on a senior-variant slot,
/// spec.md §4.9.
pub fn senior_desk_operator_counts(k: usize) -> (usize, usize) {
    match k {
        0 => (0, 0),
        1 => (0, 1),
        2 => (1, 1),
        _ => (k - 1, 1),
    }
}

/// Assigns roles to one slot's assignees, in slot-arrival order, using
/// `counts_table` to decide how many of the `k` assignees take DESK.
///
/// DESK goes to the assignees with the lowest `historyDesk + desk_so_far`,
/// ties broken by lower `desk_so_far`; everyone else takes OPERATOR.
/// `desk_so_far` is updated in place so the running count carries across
/// slots processed in date order.
pub fn assign_for_slot(
    users_in_slot: &[usize],
    users: &[User],
    desk_so_far: &mut [u32],
    counts_table: impl Fn(usize) -> (usize, usize),
) -> Vec<(usize, SeatRole)> {
    let k = users_in_slot.len();
    let (desk_n, _operator_n) = counts_table(k);

    let mut order: Vec<usize> = users_in_slot.to_vec();
    order.sort_by_key(|&u| {
        let debt = users[u].history_desk.unwrap_or(0) + desk_so_far[u];
        (debt, desk_so_far[u])
    });
    let desk_set: HashSet<usize> = order.into_iter().take(desk_n).collect();

    let mut out = Vec::with_capacity(k);
    for &u in users_in_slot {
        if desk_set.contains(&u) {
            desk_so_far[u] += 1;
            out.push((u, SeatRole::Desk));
        } else {
            out.push((u, SeatRole::Operator));
        }
    }
    out
}
