//! # roster-core: duty-roster constraint-optimization engine
//!
//! Computes duty-roster assignments for a pool of staff across a period of
//! calendar slots: a hard-constraint layer rules out illegal assignments, a
//! weighted multi-tier soft-penalty layer encodes fairness and comfort, and a
//! post-solve pass splits "A" duty assignees into DESK/OPERATOR roles.
//!
//! ## Quick example
//!
//! ```no_run
//! use roster_core::{solve, model::*, settings::Settings};
//! use chrono::NaiveDate;
//!
//! let request = ScheduleRequest {
//!     period: Period {
//!         id: "p1".into(),
//!         name: "December".into(),
//!         start_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
//!         end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
//!     },
//!     users: vec![User {
//!         id: "u1".into(),
//!         name: "Alice".into(),
//!         likes_night: false,
//!         dislikes_weekend: false,
//!         history: UserHistory::default(),
//!         history_desk: None,
//!         history_operator: None,
//!     }],
//!     slots: vec![Slot {
//!         id: "s1".into(),
//!         date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
//!         duty_type: DutyType::A,
//!         day_type: DayType::Weekday,
//!         seats: vec![Seat { id: "se1".into(), role: None }],
//!     }],
//!     unavailability: vec![],
//! };
//!
//! match solve(&request, &Settings::default()) {
//!     Ok(response) => println!("assignments: {}", response.assignments.len()),
//!     Err(e) => eprintln!("error: {:?}", e),
//! }
//! ```
//!
//! There is exactly one entry point per variant: [`solve`] for the full
//! multi-duty scheduler, [`senior::solve_senior`] for the MORNING/EVENING
//! half-shift scheduler. Neither retries, logs, or loads configuration — that
//! is the surrounding transport's job.

pub mod context;
pub mod duty;
pub mod error;
pub mod model;
pub mod senior;
pub mod settings;
pub mod solve;

pub use error::{Result, RosterError};
pub use model::{ScheduleRequest, ScheduleResponse};
pub use settings::Settings;
pub use solve::solve;
