//! Shared test utilities for roster-core integration tests.

use chrono::NaiveDate;
use roster_core::duty::{DayType, DutyType};
use roster_core::model::{Period, Seat, Slot, User};

#[allow(dead_code)]
pub fn period(start: NaiveDate, end: NaiveDate) -> Period {
    Period {
        id: "p1".into(),
        name: "period".into(),
        start_date: start,
        end_date: end,
    }
}

#[allow(dead_code)]
pub fn user(id: &str) -> User {
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

#[allow(dead_code)]
pub fn slot(id: &str, date: NaiveDate, duty: DutyType, day: DayType, seat_ids: &[&str]) -> Slot {
    Slot {
        id: id.into(),
        date,
        duty_type: duty,
        day_type: day,
        seats: seat_ids.iter().map(|sid| Seat { id: (*sid).into(), role: None }).collect(),
    }
}

#[allow(dead_code)]
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
