//! Streak derivation over a habit's day records
//!
//! Everything here is a pure function of the record set (plus an explicit
//! `today` where relevance to the clock matters). The mutator keeps record
//! sets free of same-day duplicates, but these functions also accept data
//! loaded from outside and therefore de-duplicate defensively, last record
//! for a day winning.

use crate::habit::day::{is_next_day, is_yesterday, same_day};
use crate::habit::record::{DayRecord, DayStatus};
use chrono::NaiveDate;

/// A maximal sequence of consecutive calendar days all logged good
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub length: usize,
}

/// A streak reported to the user
///
/// `{ from: None, to: None, count: 0 }` is the canonical "no streak" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakSummary {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub count: usize,
}

impl StreakSummary {
    pub fn none() -> Self {
        Self {
            from: None,
            to: None,
            count: 0,
        }
    }

    fn from_run(run: &Run) -> Self {
        Self {
            from: Some(run.start),
            to: Some(run.end),
            count: run.length,
        }
    }
}

/// Totals of logged good and bad days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCounts {
    pub good: usize,
    pub bad: usize,
}

/// Sorted, de-duplicated days carrying the given status (last record wins)
fn days_with_status(records: &[DayRecord], status: DayStatus) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = Vec::new();
    for record in records.iter().filter(|r| r.status == status) {
        days.retain(|d| *d != record.date);
        days.push(record.date);
    }
    days.sort();
    days
}

/// Group the good days into maximal consecutive runs, earliest first
pub fn build_runs(records: &[DayRecord]) -> Vec<Run> {
    let good_days = days_with_status(records, DayStatus::good);

    let mut runs: Vec<Run> = Vec::new();
    for day in good_days {
        match runs.last_mut() {
            Some(run) if is_next_day(run.end, day) => {
                run.end = day;
                run.length += 1;
            }
            _ => runs.push(Run {
                start: day,
                end: day,
                length: 1,
            }),
        }
    }
    runs
}

/// The longest run; ties go to the earliest-starting one
pub fn longest_streak(records: &[DayRecord]) -> StreakSummary {
    let runs = build_runs(records);

    let mut longest: Option<&Run> = None;
    for run in &runs {
        // strictly greater, so the first run to reach a length keeps it
        if longest.is_none_or(|best| run.length > best.length) {
            longest = Some(run);
        }
    }

    longest.map_or_else(StreakSummary::none, StreakSummary::from_run)
}

/// The most recent run, counted only while it is still alive
///
/// The run is alive iff it reaches `today` or yesterday (the grace period
/// for a user who has not logged yet today). An explicit bad record dated
/// `today` breaks the streak regardless of the grace period.
pub fn current_streak(records: &[DayRecord], today: NaiveDate) -> StreakSummary {
    let runs = build_runs(records);
    let Some(last_run) = runs.last() else {
        return StreakSummary::none();
    };

    let active = same_day(last_run.end, today) || is_yesterday(last_run.end, today);
    let bad_today = records
        .iter()
        .any(|r| r.status == DayStatus::bad && same_day(r.date, today));

    if !active || bad_today {
        return StreakSummary::none();
    }

    StreakSummary::from_run(last_run)
}

/// Count good and bad days, same-day duplicates counted once
pub fn counts(records: &[DayRecord]) -> DayCounts {
    DayCounts {
        good: days_with_status(records, DayStatus::good).len(),
        bad: days_with_status(records, DayStatus::bad).len(),
    }
}

/// Share of logged days that were good, as a percentage with one decimal
///
/// `0.0` when nothing has been logged yet.
pub fn completion_rate(records: &[DayRecord]) -> f64 {
    let DayCounts { good, bad } = counts(records);
    let total = good + bad;
    if total == 0 {
        return 0.0;
    }
    (good as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Whether any record (good or bad) exists for the given day
///
/// This is the contract the reminder job relies on.
pub fn has_record_for(records: &[DayRecord], day: NaiveDate) -> bool {
    records.iter().any(|r| same_day(r.date, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(date: NaiveDate, status: DayStatus) -> DayRecord {
        DayRecord {
            date,
            status,
            notes: String::new(),
        }
    }

    // good 10th-11th, bad 12th, good 13th-14th
    fn february_records() -> Vec<DayRecord> {
        vec![
            rec(d(2025, 2, 10), DayStatus::good),
            rec(d(2025, 2, 11), DayStatus::good),
            rec(d(2025, 2, 12), DayStatus::bad),
            rec(d(2025, 2, 13), DayStatus::good),
            rec(d(2025, 2, 14), DayStatus::good),
        ]
    }

    #[test]
    fn test_build_runs_empty() {
        assert!(build_runs(&[]).is_empty());
    }

    #[test]
    fn test_build_runs_only_bad_days() {
        let records = vec![rec(d(2025, 2, 10), DayStatus::bad)];
        assert!(build_runs(&records).is_empty());
    }

    #[test]
    fn test_build_runs_splits_on_gap() {
        // Gap on the 11th: two single-day runs
        let records = vec![
            rec(d(2025, 2, 10), DayStatus::good),
            rec(d(2025, 2, 12), DayStatus::good),
        ];
        let runs = build_runs(&records);
        assert_eq!(
            runs,
            vec![
                Run { start: d(2025, 2, 10), end: d(2025, 2, 10), length: 1 },
                Run { start: d(2025, 2, 12), end: d(2025, 2, 12), length: 1 },
            ]
        );
        assert_eq!(longest_streak(&records).count, 1);
    }

    #[test]
    fn test_build_runs_unsorted_input() {
        let records = vec![
            rec(d(2025, 2, 12), DayStatus::good),
            rec(d(2025, 2, 10), DayStatus::good),
            rec(d(2025, 2, 11), DayStatus::good),
        ];
        let runs = build_runs(&records);
        assert_eq!(
            runs,
            vec![Run { start: d(2025, 2, 10), end: d(2025, 2, 12), length: 3 }]
        );
    }

    #[test]
    fn test_build_runs_across_month_boundary() {
        let records = vec![
            rec(d(2025, 1, 31), DayStatus::good),
            rec(d(2025, 2, 1), DayStatus::good),
        ];
        assert_eq!(build_runs(&records).len(), 1);
    }

    #[test]
    fn test_build_runs_deduplicates_same_day() {
        // Two records for the 10th can only come from corrupt external
        // data; they must count as one logical day, last one winning.
        let records = vec![
            rec(d(2025, 2, 10), DayStatus::good),
            rec(d(2025, 2, 10), DayStatus::good),
            rec(d(2025, 2, 11), DayStatus::good),
        ];
        let runs = build_runs(&records);
        assert_eq!(
            runs,
            vec![Run { start: d(2025, 2, 10), end: d(2025, 2, 11), length: 2 }]
        );
    }

    #[test]
    fn test_run_lengths_sum_to_unique_good_days() {
        let records = vec![
            rec(d(2025, 2, 10), DayStatus::good),
            rec(d(2025, 2, 10), DayStatus::good),
            rec(d(2025, 2, 12), DayStatus::good),
            rec(d(2025, 2, 13), DayStatus::bad),
            rec(d(2025, 2, 20), DayStatus::good),
        ];
        let total: usize = build_runs(&records).iter().map(|r| r.length).sum();
        assert_eq!(total, counts(&records).good);
        assert_eq!(total, 3);
    }

    #[test]
    fn test_longest_streak_first_run_wins_tie() {
        // Two 2-day runs: the earlier one is reported
        let summary = longest_streak(&february_records());
        assert_eq!(summary.from, Some(d(2025, 2, 10)));
        assert_eq!(summary.to, Some(d(2025, 2, 11)));
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_longest_streak_picks_strictly_longer_run() {
        let mut records = february_records();
        records.push(rec(d(2025, 2, 15), DayStatus::good));
        let summary = longest_streak(&records);
        assert_eq!(summary.from, Some(d(2025, 2, 13)));
        assert_eq!(summary.to, Some(d(2025, 2, 15)));
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_current_streak_active_today() {
        let summary = current_streak(&february_records(), d(2025, 2, 14));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.from, Some(d(2025, 2, 13)));
        assert_eq!(summary.to, Some(d(2025, 2, 14)));
    }

    #[test]
    fn test_current_streak_grace_period_yesterday() {
        // Nothing logged on the 15th yet; the run ending on the 14th
        // still counts.
        let summary = current_streak(&february_records(), d(2025, 2, 15));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.from, Some(d(2025, 2, 13)));
        assert_eq!(summary.to, Some(d(2025, 2, 14)));
    }

    #[test]
    fn test_current_streak_expires_after_grace_period() {
        let summary = current_streak(&february_records(), d(2025, 2, 16));
        assert_eq!(summary, StreakSummary::none());
    }

    #[test]
    fn test_current_streak_bad_today_overrides_grace() {
        // A bad record on the 14th breaks the streak even though the run
        // ending on the 13th would otherwise survive on the grace period.
        let mut records = february_records();
        records.retain(|r| r.date != d(2025, 2, 14));
        records.push(rec(d(2025, 2, 14), DayStatus::bad));

        let summary = current_streak(&records, d(2025, 2, 14));
        assert_eq!(summary, StreakSummary::none());
    }

    #[test]
    fn test_current_streak_old_bad_day_does_not_override() {
        // The bad record on the 12th is history, not "bad today"
        let summary = current_streak(&february_records(), d(2025, 2, 14));
        assert_ne!(summary.count, 0);
    }

    #[test]
    fn test_empty_records_yield_canonical_values() {
        assert_eq!(longest_streak(&[]), StreakSummary::none());
        assert_eq!(current_streak(&[], d(2025, 2, 15)), StreakSummary::none());
        assert_eq!(completion_rate(&[]), 0.0);
        assert_eq!(counts(&[]), DayCounts { good: 0, bad: 0 });
    }

    #[test]
    fn test_longest_is_never_shorter_than_current() {
        let records = february_records();
        for day in 10..=20 {
            let today = d(2025, 2, day);
            assert!(longest_streak(&records).count >= current_streak(&records, today).count);
        }
    }

    #[test]
    fn test_counts() {
        assert_eq!(counts(&february_records()), DayCounts { good: 4, bad: 1 });
    }

    #[test]
    fn test_completion_rate_rounds_to_one_decimal() {
        // 4 good / 5 logged
        assert_eq!(completion_rate(&february_records()), 80.0);

        // 1 good / 3 logged = 33.333... -> 33.3
        let records = vec![
            rec(d(2025, 2, 10), DayStatus::good),
            rec(d(2025, 2, 11), DayStatus::bad),
            rec(d(2025, 2, 12), DayStatus::bad),
        ];
        assert_eq!(completion_rate(&records), 33.3);

        // 2 good / 3 logged = 66.666... -> 66.7
        let records = vec![
            rec(d(2025, 2, 10), DayStatus::good),
            rec(d(2025, 2, 11), DayStatus::good),
            rec(d(2025, 2, 12), DayStatus::bad),
        ];
        assert_eq!(completion_rate(&records), 66.7);
    }

    #[test]
    fn test_has_record_for() {
        let records = february_records();
        assert!(has_record_for(&records, d(2025, 2, 12)));
        assert!(has_record_for(&records, d(2025, 2, 14)));
        assert!(!has_record_for(&records, d(2025, 2, 15)));
        assert!(!has_record_for(&[], d(2025, 2, 15)));
    }
}
