use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Persisted status of a logged day
///
/// A day that was never logged has no record at all; there is no stored
/// "unspecified" variant. Uses snake_case naming to match the TOML
/// serialization format.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStatus {
    /// The habit was kept that day
    good,
    /// The habit was broken that day
    bad,
}

impl FromStr for DayStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(DayStatus::good),
            "bad" => Ok(DayStatus::bad),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: good, bad",
                s
            )),
        }
    }
}

/// Update instruction for a single calendar day
///
/// This is the input vocabulary of [`apply_day_update`] only. The
/// `not_specified` variant means "clear the day" and is never persisted;
/// keeping it out of [`DayStatus`] keeps it out of the data file.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAction {
    good,
    bad,
    not_specified,
}

impl DayAction {
    /// The persisted status this action writes, if any
    pub fn status(self) -> Option<DayStatus> {
        match self {
            DayAction::good => Some(DayStatus::good),
            DayAction::bad => Some(DayStatus::bad),
            DayAction::not_specified => None,
        }
    }
}

impl FromStr for DayAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(DayAction::good),
            "bad" => Ok(DayAction::bad),
            "not_specified" => Ok(DayAction::not_specified),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: good, bad, not_specified",
                s
            )),
        }
    }
}

/// One logged day in a habit's record set
///
/// Invariant (maintained by [`apply_day_update`]): a record set holds at
/// most one record per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Calendar day (date only, no time-of-day or timezone)
    ///
    /// Serializes as `YYYY-MM-DD`; legacy files with second-based
    /// timestamps are converted on load.
    #[serde(deserialize_with = "crate::habit::serde_impl::flexible_day")]
    pub date: NaiveDate,
    /// Logged status for the day
    pub status: DayStatus,
    /// Free-text notes, may be empty
    #[serde(default)]
    pub notes: String,
}

/// Result of [`apply_day_update`]
///
/// `records` is the new set; `previous_records` is the untouched input,
/// kept so a caller doing an optimistic update can roll back when its
/// persistence write fails.
#[derive(Debug, Clone)]
pub struct DayUpdate {
    pub records: Vec<DayRecord>,
    pub previous_records: Vec<DayRecord>,
}

/// Apply a user's status change for one calendar day to a record set
///
/// - `not_specified` removes the day's record (no-op if absent)
/// - an existing record for the day is fully overwritten, notes included
/// - otherwise a new record is appended
///
/// Pure and infallible; performs no I/O. If the input already holds
/// duplicate records for the target day (corrupt external data), the
/// overwrite and remove paths collapse them, so the output satisfies the
/// one-record-per-day invariant for that day.
pub fn apply_day_update(
    records: &[DayRecord],
    date: NaiveDate,
    action: DayAction,
    notes: &str,
) -> DayUpdate {
    let previous_records = records.to_vec();

    let records = match action.status() {
        None => records.iter().filter(|r| r.date != date).cloned().collect(),
        Some(status) => {
            let new_record = DayRecord {
                date,
                status,
                notes: notes.to_string(),
            };

            if records.iter().any(|r| r.date == date) {
                let mut replaced = false;
                let mut out = Vec::with_capacity(records.len());
                for r in records {
                    if r.date == date {
                        if !replaced {
                            out.push(new_record.clone());
                            replaced = true;
                        }
                        // duplicate for the same day: drop it
                    } else {
                        out.push(r.clone());
                    }
                }
                out
            } else {
                let mut out = records.to_vec();
                out.push(new_record);
                out
            }
        }
    };

    DayUpdate {
        records,
        previous_records,
    }
}
