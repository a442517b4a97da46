//! Formatting helper functions for the habit MCP server
//!
//! This module renders habits, streak statistics, reminders, and the
//! month calendar grid as plain text for tool responses.

use crate::habit::record::DayStatus;
use crate::habit::streak::{self, StreakSummary};
use crate::habit::{Habit, day};
use chrono::{Datelike, NaiveDate};

/// Pick the singular or plural noun for a count
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Render a streak as "N day(s) (from to to)" or "0 days"
pub fn format_streak(summary: &StreakSummary) -> String {
    match (summary.from, summary.to) {
        (Some(from), Some(to)) => format!(
            "{} {} ({} to {})",
            summary.count,
            pluralize(summary.count, "day", "days"),
            from,
            to
        ),
        _ => "0 days".to_string(),
    }
}

/// Render the stats block for one habit
pub fn format_stats(habit: &Habit, today: NaiveDate) -> String {
    let counts = streak::counts(&habit.records);
    let rate = streak::completion_rate(&habit.records);
    let longest = streak::longest_streak(&habit.records);
    let current = streak::current_streak(&habit.records, today);

    let mut result = format!("Habit: {} [{}]\n", habit.name, habit.id);
    if !habit.description.is_empty() {
        result.push_str(&format!("Description: {}\n", habit.description));
    }
    result.push_str(&format!("Good days: {}\n", counts.good));
    result.push_str(&format!("Bad days: {}\n", counts.bad));
    result.push_str(&format!("Completion rate: {:.1}%\n", rate));
    result.push_str(&format!("Longest streak: {}\n", format_streak(&longest)));
    result.push_str(&format!("Current streak: {}\n", format_streak(&current)));
    result
}

/// Render the habit overview list
pub fn format_habit_list(habits: &[Habit], today: NaiveDate) -> String {
    if habits.is_empty() {
        return "No habits found".to_string();
    }

    let mut result = format!(
        "Found {} {}:\n\n",
        habits.len(),
        pluralize(habits.len(), "habit", "habits")
    );
    for habit in habits {
        let counts = streak::counts(&habit.records);
        let current = streak::current_streak(&habit.records, today);
        result.push_str(&format!(
            "- [{}] {} (good: {}, bad: {}, current streak: {})\n",
            habit.id, habit.name, counts.good, counts.bad, current.count
        ));
        if !habit.description.is_empty() {
            result.push_str(&format!("  Description: {}\n", habit.description));
        }
    }
    result
}

/// Render the reminder summary: all habits, and the ones still unlogged today
pub fn format_reminders(habits: &[Habit], due: &[&Habit], today: NaiveDate) -> String {
    if habits.is_empty() {
        return "No habits found".to_string();
    }

    let mut result = format!(
        "Time to check in on your {} {} for today ({}).\n",
        habits.len(),
        pluralize(habits.len(), "habit", "habits"),
        today
    );

    if due.is_empty() {
        result.push_str("All habits are logged for today. Nice work!\n");
    } else {
        result.push_str(&format!(
            "Don't forget to log {} {} for today:\n",
            due.len(),
            pluralize(due.len(), "habit", "habits")
        ));
        for habit in due.iter() {
            result.push_str(&format!("- [{}] {}\n", habit.id, habit.name));
        }
    }
    result
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("validated year/month");
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("validated year/month");
    (next_first - first).num_days() as u32
}

/// Render a month grid for one habit
///
/// Each cell is the day number plus a status marker (`G` good, `B` bad,
/// `.` unmarked) and a `*` flag when the day carries notes. The first
/// week is padded so columns align with the weekday header.
pub fn format_calendar(habit: &Habit, year: i32, month: u32) -> String {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("validated year/month");
    let month_name = first.format("%B");

    let mut result = format!("{} {} - {} [{}]\n", month_name, year, habit.name, habit.id);
    result.push_str(" Mo   Tu   We   Th   Fr   Sa   Su\n");

    let offset = first.weekday().num_days_from_monday();
    let mut line = "     ".repeat(offset as usize);
    let mut column = offset;

    for day_number in 1..=days_in_month(year, month) {
        let date = NaiveDate::from_ymd_opt(year, month, day_number).expect("day within month");
        let record = habit.records.iter().rev().find(|r| day::same_day(r.date, date));

        let status_char = match record.map(|r| r.status) {
            Some(DayStatus::good) => 'G',
            Some(DayStatus::bad) => 'B',
            None => '.',
        };
        let notes_flag = if record.is_some_and(|r| !r.notes.is_empty()) {
            '*'
        } else {
            ' '
        };

        line.push_str(&format!("{:>2}{}{} ", day_number, status_char, notes_flag));
        column += 1;
        if column == 7 {
            line.truncate(line.trim_end().len());
            result.push_str(&line);
            result.push('\n');
            line = String::new();
            column = 0;
        }
    }

    if !line.trim().is_empty() {
        line.truncate(line.trim_end().len());
        result.push_str(&line);
        result.push('\n');
    }

    result.push_str("\nG = good, B = bad, . = not logged, * = has notes\n");
    result
}
