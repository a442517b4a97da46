//! Habit domain models and business logic
//!
//! This module contains the core habit data structures and the pure
//! streak/date computations. It is split into submodules:
//! - `day`: calendar-day normalization and comparison
//! - `record`: day records, statuses, and the single mutation function
//! - `streak`: run grouping and streak/count derivation
//! - `habit_data`: habit entities and the main data container
//! - `serde_impl`: serialization/deserialization implementations

pub mod day;
mod habit_data;
pub mod record;
mod serde_impl;
pub mod streak;

// Re-export all public types
pub use day::local_date_today;
pub use habit_data::{Habit, HabitData};
pub use record::{DayAction, DayRecord, DayStatus, DayUpdate, apply_day_update};
pub use streak::{DayCounts, Run, StreakSummary};
