//! End-to-end scenarios from spec.md §8 not already covered by the
//! solve-module unit tests (scenarios 1, 2, 4 live next to the pipeline
//! they exercise).

mod common;

use common::{day, period, slot, user};
use roster_core::duty::{DayType, DutyType};
use roster_core::model::{ScheduleRequest, Unavailability, User};
use roster_core::{solve, Settings};

/// spec.md §8 scenario 3: everyone is closed on c0, so the solver must still
/// fill it — it picks the user with the most category-C closures, since
/// that's who the unavailability-fairness tie-breaker favors placing there.
#[test]
fn unavailability_fairness_picks_the_most_blocked_user_for_the_forced_slot() {
    let start = day(2025, 12, 1);
    let request = ScheduleRequest {
        period: period(start, day(2025, 12, 31)),
        users: vec![user("u1"), user("u2"), user("u3")],
        slots: vec![
            slot("c0", day(2025, 12, 1), DutyType::C, DayType::Weekday, &["sc0"]),
            slot("c1", day(2025, 12, 2), DutyType::C, DayType::Weekday, &["sc1"]),
            slot("c2", day(2025, 12, 3), DutyType::C, DayType::Weekday, &["sc2"]),
            slot("c3", day(2025, 12, 4), DutyType::C, DayType::Weekday, &["sc3"]),
        ],
        unavailability: vec![
            Unavailability { user_id: "u2".into(), slot_id: "c0".into() },
            Unavailability { user_id: "u2".into(), slot_id: "c1".into() },
            Unavailability { user_id: "u2".into(), slot_id: "c2".into() },
            Unavailability { user_id: "u2".into(), slot_id: "c3".into() },
            Unavailability { user_id: "u3".into(), slot_id: "c0".into() },
            Unavailability { user_id: "u3".into(), slot_id: "c1".into() },
            Unavailability { user_id: "u1".into(), slot_id: "c0".into() },
        ],
    };
    let response = solve(&request, &Settings::default()).unwrap();
    let c0_user = response.assignments.iter().find(|a| a.slot_id == "c0").unwrap().user_id.clone();
    assert_eq!(c0_user, "u2");
}

/// spec.md §8 scenario 5: a likes-night user and a neutral user, one C-slot
/// and one A-slot with no conflicts — the bonus steers the C-slot to the
/// user who likes it.
#[test]
fn likes_night_preference_steers_the_night_slot() {
    let date = day(2025, 12, 15);
    let mut u1 = user("u1");
    u1.likes_night = true;
    let request = ScheduleRequest {
        period: period(day(2025, 12, 1), day(2025, 12, 31)),
        users: vec![u1, user("u2")],
        slots: vec![
            slot("c1", date, DutyType::C, DayType::Weekday, &["sc1"]),
            slot("a1", date, DutyType::A, DayType::Weekday, &["sa1"]),
        ],
        unavailability: Vec::new(),
    };
    let response = solve(&request, &Settings::default()).unwrap();
    let c_user = response.assignments.iter().find(|a| a.slot_id == "c1").unwrap().user_id.clone();
    assert_eq!(c_user, "u1");
}

/// spec.md §8 scenario 6: 2 users, one A-slot per day for 4 days — no user
/// ends up working all of any 3 consecutive days.
#[test]
fn three_consecutive_avoidance_breaks_up_runs() {
    let mut slots = Vec::new();
    for d in 1..=4u32 {
        slots.push(slot(&format!("a{d}"), day(2025, 12, d as i32), DutyType::A, DayType::Weekday, &[&format!("sa{d}")]));
    }
    let users: Vec<User> = vec![user("u1"), user("u2")];
    let request = ScheduleRequest {
        period: period(day(2025, 12, 1), day(2025, 12, 31)),
        users,
        slots,
        unavailability: Vec::new(),
    };
    let response = solve(&request, &Settings::default()).unwrap();

    let mut by_user: std::collections::HashMap<String, Vec<u32>> = std::collections::HashMap::new();
    for a in &response.assignments {
        let day_num: u32 = a.slot_id.trim_start_matches('a').parse().unwrap();
        by_user.entry(a.user_id.clone()).or_default().push(day_num);
    }
    for days in by_user.values() {
        let mut days = days.clone();
        days.sort_unstable();
        let has_three_run = days.windows(3).any(|w| w[2] - w[0] == 2);
        assert!(!has_three_run, "user worked a 3-day consecutive run: {days:?}");
    }

    let mut counts: Vec<usize> = by_user.values().map(|v| v.len()).collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![2, 2]);
}
