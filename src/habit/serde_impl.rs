//! Serialization and deserialization implementations for HabitData
//!
//! The id index is not part of the file format; it is rebuilt from the
//! habit list after deserialization. Record dates normally serialize as
//! `YYYY-MM-DD` strings, but older data files carry second-based unix
//! timestamps, so the date deserializer accepts both and converts at this
//! boundary.

use super::habit_data::{Habit, HabitData};
use crate::habit::day;
use chrono::NaiveDate;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

#[derive(Serialize)]
struct HabitDataFileRef<'a> {
    format_version: u32,
    habits: &'a [Habit],
}

#[derive(Deserialize)]
struct HabitDataFile {
    #[serde(default = "default_format_version")]
    format_version: u32,
    #[serde(default)]
    habits: Vec<Habit>,
}

fn default_format_version() -> u32 {
    1
}

impl Serialize for HabitData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        HabitDataFileRef {
            format_version: self.format_version,
            habits: &self.habits,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HabitData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let file = HabitDataFile::deserialize(deserializer)?;

        let habit_ids: HashSet<String> = file.habits.iter().map(|h| h.id.clone()).collect();

        Ok(HabitData {
            format_version: file.format_version,
            habits: file.habits,
            habit_ids,
        })
    }
}

/// Deserialize a calendar day from either a `YYYY-MM-DD` string or a
/// unix-seconds integer (legacy storage representation)
pub(crate) fn flexible_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    struct DayVisitor;

    impl Visitor<'_> for DayVisitor {
        type Value = NaiveDate;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a YYYY-MM-DD date string or a unix timestamp in seconds")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            day::parse_day(value).map_err(|e| E::custom(e.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            day::day_from_timestamp(value).map_err(|e| E::custom(e.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let secs = i64::try_from(value).map_err(|_| E::custom("timestamp out of range"))?;
            self.visit_i64(secs)
        }
    }

    deserializer.deserialize_any(DayVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::record::{DayRecord, DayStatus};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_habits_and_rebuilds_index() {
        let mut data = HabitData::new();
        data.add(Habit {
            id: "morning-run".to_string(),
            name: "Morning run".to_string(),
            description: "5k before breakfast".to_string(),
            records: vec![DayRecord {
                date: d(2025, 2, 10),
                status: DayStatus::good,
                notes: "cold but sunny".to_string(),
            }],
        });

        let toml_text = toml::to_string_pretty(&data).unwrap();
        let loaded: HabitData = toml::from_str(&toml_text).unwrap();

        assert_eq!(loaded.format_version, 1);
        assert!(loaded.contains("morning-run"));
        let habit = loaded.find_by_id("morning-run").unwrap();
        assert_eq!(habit.records.len(), 1);
        assert_eq!(habit.records[0].date, d(2025, 2, 10));
        assert_eq!(habit.records[0].status, DayStatus::good);
        assert_eq!(habit.records[0].notes, "cold but sunny");
    }

    #[test]
    fn test_empty_document_deserializes_to_defaults() {
        let loaded: HabitData = toml::from_str("").unwrap();
        assert_eq!(loaded.format_version, 1);
        assert_eq!(loaded.habit_count(), 0);
    }

    #[test]
    fn test_dates_serialize_as_strings() {
        let mut data = HabitData::new();
        data.add(Habit {
            id: "h".to_string(),
            name: "h".to_string(),
            description: String::new(),
            records: vec![DayRecord {
                date: d(2025, 2, 10),
                status: DayStatus::bad,
                notes: String::new(),
            }],
        });

        let toml_text = toml::to_string_pretty(&data).unwrap();
        assert!(toml_text.contains("\"2025-02-10\""));
    }

    #[test]
    fn test_legacy_timestamp_dates_accepted() {
        // 1739190896 = 2025-02-10T12:34:56Z
        let toml_text = r#"
format_version = 1

[[habits]]
id = "morning-run"
name = "Morning run"

[[habits.records]]
date = 1739190896
status = "good"
"#;
        let loaded: HabitData = toml::from_str(toml_text).unwrap();
        let habit = loaded.find_by_id("morning-run").unwrap();
        assert_eq!(habit.records[0].date, d(2025, 2, 10));
        assert_eq!(habit.records[0].notes, "");
    }

    #[test]
    fn test_unparseable_date_is_an_error() {
        let toml_text = r#"
[[habits]]
id = "h"
name = "h"

[[habits.records]]
date = "02/10/2025"
status = "good"
"#;
        assert!(toml::from_str::<HabitData>(toml_text).is_err());
    }
}
