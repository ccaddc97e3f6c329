//! Performance benchmarks for roster-core.
//!
//! Run with: cargo bench -p roster-core --bench solve_perf
//!
//! Results are stored in target/criterion/ for historical comparison.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use roster_core::duty::{DayType, DutyType};
use roster_core::model::{Period, Seat, ScheduleRequest, Slot, User};
use roster_core::{solve, Settings};

fn make_request(num_users: usize, num_days: usize) -> ScheduleRequest {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let users: Vec<User> = (0..num_users)
        .map(|i| User {
            id: format!("u{i}"),
            name: format!("u{i}"),
            likes_night: i % 5 == 0,
            dislikes_weekend: i % 7 == 0,
            history: Default::default(),
            history_desk: None,
            history_operator: None,
        })
        .collect();

    let mut slots = Vec::new();
    for day_idx in 0..num_days {
        let date = start + Duration::days(day_idx as i64);
        let is_weekend = date.format("%u").to_string().parse::<u32>().unwrap() >= 6;
        let day_type = if is_weekend { DayType::Weekend } else { DayType::Weekday };

        slots.push(make_slot(&format!("d{day_idx}a"), date, DutyType::A, day_type, 2));
        slots.push(make_slot(&format!("d{day_idx}c"), date, DutyType::C, day_type, 1));
        if is_weekend {
            slots.push(make_slot(&format!("d{day_idx}d"), date, DutyType::D, day_type, 1));
        }
    }

    ScheduleRequest {
        period: Period { id: "bench".into(), name: "bench".into(), start_date: start, end_date: start + Duration::days(num_days as i64) },
        users,
        slots,
        unavailability: Vec::new(),
    }
}

fn make_slot(id: &str, date: NaiveDate, duty: DutyType, day_type: DayType, seats: usize) -> Slot {
    Slot {
        id: id.into(),
        date,
        duty_type: duty,
        day_type,
        seats: (0..seats).map(|i| Seat { id: format!("{id}_se{i}"), role: None }).collect(),
    }
}

fn bench_problem_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("problem_sizes");
    let settings = Settings { scheduler_time_limit_seconds: 20, ..Settings::default() };

    let small = make_request(10, 30);
    let medium = make_request(25, 60);
    let large = make_request(40, 90);

    group.throughput(Throughput::Elements(1));
    group.bench_with_input(BenchmarkId::new("small", "10u/30d"), &small, |b, input| {
        b.iter(|| solve(black_box(input), black_box(&settings)))
    });
    group.bench_with_input(BenchmarkId::new("medium", "25u/60d"), &medium, |b, input| {
        b.iter(|| solve(black_box(input), black_box(&settings)))
    });
    group.bench_with_input(BenchmarkId::new("large", "40u/90d"), &large, |b, input| {
        b.iter(|| solve(black_box(input), black_box(&settings)))
    });

    group.finish();
}

fn bench_with_unavailability(c: &mut Criterion) {
    let mut group = c.benchmark_group("unavailability");
    let settings = Settings { scheduler_time_limit_seconds: 20, ..Settings::default() };

    let mut request = make_request(25, 60);
    for (i, slot) in request.slots.iter().enumerate().step_by(4) {
        let user_id = request.users[i % request.users.len()].id.clone();
        request.unavailability.push(roster_core::model::Unavailability { user_id, slot_id: slot.id.clone() });
    }

    group.bench_function("25u/60d_with_unavailability", |b| b.iter(|| solve(black_box(&request), black_box(&settings))));
    group.finish();
}

criterion_group!(benches, bench_problem_sizes, bench_with_unavailability);
criterion_main!(benches);
