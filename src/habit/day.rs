use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};

/// Get the current date in local timezone
///
/// This is the only wall-clock read in the crate. Callers that derive
/// several values from "today" must call this once and pass the result
/// down, so a computation straddling midnight stays self-consistent.
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a calendar day from a `YYYY-MM-DD` string
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')", input))
}

/// Build a calendar day from an explicit year/month/day triple
///
/// Rejects out-of-range components (month 13, Feb 30, ...).
pub fn day_from_ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => Ok(d),
        None => bail!("Invalid date components: {:04}-{:02}-{:02}", year, month, day),
    }
}

/// Convert a unix-seconds timestamp to its UTC calendar day
///
/// Used only at the storage boundary: legacy data files carry
/// second-based timestamps instead of date strings.
pub fn day_from_timestamp(secs: i64) -> Result<NaiveDate> {
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(dt) => Ok(dt.date_naive()),
        None => bail!("Timestamp {} is out of range", secs),
    }
}

/// True iff both values denote the same calendar day
pub fn same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// True iff `b` is the calendar day immediately after `a`
///
/// Calendar succession, not 86400-second arithmetic, so month and year
/// rollover (and leap days) behave correctly.
pub fn is_next_day(a: NaiveDate, b: NaiveDate) -> bool {
    a.succ_opt() == Some(b)
}

/// True iff `a` is exactly one calendar day before `reference`
pub fn is_yesterday(a: NaiveDate, reference: NaiveDate) -> bool {
    a.succ_opt() == Some(reference)
}

/// True iff `a` is `reference`'s day or earlier (gates future-date edits)
pub fn is_on_or_before(a: NaiveDate, reference: NaiveDate) -> bool {
    a <= reference
}
