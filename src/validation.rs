//! Validation helper functions for the habit MCP server
//!
//! This module contains parameter parsing for day strings and status
//! actions, and the future-date gate applied by the mark_day tool.

use crate::habit::day;
use crate::habit::record::DayAction;
use chrono::NaiveDate;
use mcp_attr::Result as McpResult;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse and validate a day status action parameter
pub fn parse_action(action_str: &str) -> McpResult<DayAction> {
    action_str.parse::<DayAction>().map_err(|_| {
        invalid_params(format!(
            "Invalid status '{}'. Valid statuses: good, bad, not_specified",
            action_str
        ))
    })
}

/// Parse and validate a date parameter in YYYY-MM-DD format
pub fn parse_day_param(date_str: &str) -> McpResult<NaiveDate> {
    day::parse_day(date_str).map_err(|_| {
        invalid_params(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

/// Reject dates after the reference day
///
/// Habits are logged for days that have happened; backdating is fine,
/// future days are not.
pub fn reject_future_date(date: NaiveDate, today: NaiveDate) -> McpResult<()> {
    if day::is_on_or_before(date, today) {
        Ok(())
    } else {
        Err(invalid_params(format!(
            "Cannot log the future date {}. Today is {}.",
            date, today
        )))
    }
}

/// Validate a year/month pair for the calendar view
pub fn validate_year_month(year: i32, month: u32) -> McpResult<()> {
    if !(1..=12).contains(&month) {
        return Err(invalid_params(format!(
            "Invalid month {}. Use a value between 1 and 12.",
            month
        )));
    }
    if !(1970..=9999).contains(&year) {
        return Err(invalid_params(format!(
            "Invalid year {}. Use a value between 1970 and 9999.",
            year
        )));
    }
    Ok(())
}
