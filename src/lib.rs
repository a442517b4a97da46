//! Habit MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for daily
//! habit tracking. Users log one good/bad status per habit per calendar day
//! (with optional notes); the server derives completion rates, current and
//! longest streaks, a month calendar view, and reminder summaries, with
//! automatic Git-based version control of the data file.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `HabitServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `habit` module - Calendar-day normalization, streak
//!   derivation, and the day-record mutation function (all pure)
//! - **Persistence Layer**: `storage` module - File-based TOML storage with Git sync
//!
//! # Example
//!
//! ```no_run
//! use habit_mcp::HabitServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = HabitServerHandler::new("habits.toml", false)?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

mod formatting;
mod git_ops;
pub mod habit;
mod storage;
mod validation;

use anyhow::Result;

use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail};
use std::sync::Mutex;

// Re-export commonly used types
pub use habit::{
    DayAction, DayCounts, DayRecord, DayStatus, DayUpdate, Habit, HabitData, StreakSummary,
    apply_day_update, local_date_today,
};
pub use storage::Storage;

/// MCP Server handler for habit tracking
///
/// Provides an MCP interface to habit functionality: creating habits,
/// logging days, and reading streak statistics. All changes are persisted
/// to a TOML file and optionally synchronized with Git.
pub struct HabitServerHandler {
    pub(crate) data: Mutex<HabitData>,
    pub(crate) storage: Storage,
}

impl HabitServerHandler {
    /// Create a new habit server handler
    ///
    /// # Arguments
    /// * `storage_path` - Path to the habit data file (TOML format)
    /// * `sync_git` - Enable automatic Git synchronization
    ///
    /// # Example
    /// ```no_run
    /// # use habit_mcp::HabitServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = HabitServerHandler::new("habits.toml", false)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: &str, sync_git: bool) -> Result<Self> {
        let storage = Storage::new(storage_path, sync_git);
        // Pull from git before the first load if sync is enabled
        if let Err(e) = storage.startup() {
            eprintln!("Warning: Startup git sync failed: {}", e);
        }
        let data = Mutex::new(storage.load()?);
        Ok(Self { data, storage })
    }

    /// Save habit data with a custom commit message
    fn save_data_with_message(&self, message: &str) -> Result<()> {
        let data = self.data.lock().unwrap();
        self.storage.save_with_message(&data, message)?;
        Ok(())
    }
}

impl Drop for HabitServerHandler {
    fn drop(&mut self) {
        // Push to git on shutdown if sync is enabled
        if let Err(e) = self.storage.shutdown() {
            eprintln!("Warning: Shutdown git sync failed: {}", e);
        }
    }
}

/// Habit tracking server for building daily routines.
///
/// Each habit holds at most one record per calendar day, with status "good"
/// (habit kept) or "bad" (habit broken) plus optional notes. A day with no
/// record is simply not logged.
///
/// Key concepts:
/// - **current streak**: the most recent run of consecutive good days, still
///   counted while it reaches today or yesterday (one-day grace period for
///   users who have not logged today yet); a bad record for today breaks it
/// - **longest streak**: the longest run ever, ties going to the earliest
/// - **completion rate**: good days as a share of all logged days
///
/// Habit IDs: use meaningful slugs (e.g., "morning-run", "no-sugar").
#[mcp_server]
impl McpServer for HabitServerHandler {
    /// **Create**: Start tracking a new habit.
    /// **Workflow**: add_habit → mark_day daily → habit_stats / show_calendar to review.
    #[tool]
    pub async fn add_habit(
        &self,
        /// ID: any unique slug (e.g., "morning-run")
        id: String,
        /// Name: display name
        name: String,
        /// Description: what counts as keeping the habit (optional)
        description: Option<String>,
    ) -> McpResult<String> {
        let id = id.trim().to_string();
        if id.is_empty() {
            bail!("Habit ID must not be empty");
        }
        if name.trim().is_empty() {
            bail!("Habit name must not be empty");
        }

        let mut data = self.data.lock().unwrap();

        if data.contains(&id) {
            drop(data);
            bail!("Habit ID '{}' already exists. Please use a unique ID.", id);
        }

        data.add(Habit {
            id: id.clone(),
            name,
            description: description.unwrap_or_default(),
            records: Vec::new(),
        });
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Add habit {}", id)) {
            bail!("Failed to save: {}", e);
        }

        Ok(format!("Habit created with ID: {}", id))
    }

    /// **Review**: List all habits with day counts and current streaks.
    #[tool]
    pub async fn list_habits(&self) -> McpResult<String> {
        let today = habit::local_date_today();
        let data = self.data.lock().unwrap();
        let result = formatting::format_habit_list(data.all(), today);
        drop(data);
        Ok(result)
    }

    /// **Edit**: Update a habit's name or description.
    /// **Tip**: Use empty string "" to clear the description.
    #[tool]
    pub async fn update_habit(
        &self,
        /// ID of habit to update
        id: String,
        /// New name (optional)
        name: Option<String>,
        /// New description, ""=clear (optional)
        description: Option<String>,
    ) -> McpResult<String> {
        let mut data = self.data.lock().unwrap();

        let Some(habit) = data.find_by_id_mut(&id) else {
            drop(data);
            bail!("Habit '{}' not found", id);
        };

        if let Some(new_name) = name {
            if new_name.trim().is_empty() {
                drop(data);
                bail!("Habit name must not be empty");
            }
            habit.name = new_name;
        }

        if let Some(new_description) = description {
            habit.description = new_description;
        }
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Update habit {}", id)) {
            bail!("Failed to save: {}", e);
        }

        Ok(format!("Habit {} updated successfully", id))
    }

    /// **Delete**: Stop tracking a habit and discard its records.
    #[tool]
    pub async fn delete_habit(
        &self,
        /// ID of habit to delete
        id: String,
    ) -> McpResult<String> {
        let mut data = self.data.lock().unwrap();

        if data.remove(&id).is_none() {
            drop(data);
            bail!("Habit '{}' not found", id);
        }
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Delete habit {}", id)) {
            bail!("Failed to save: {}", e);
        }

        Ok(format!("Habit {} deleted", id))
    }

    /// **Log**: Record a day's status for a habit. The single write path for day records.
    /// **Status**: "good" (kept), "bad" (broken), or "not_specified" to clear the day.
    /// **Tip**: Logging a day that already has a record overwrites it, notes included.
    #[tool]
    pub async fn mark_day(
        &self,
        /// ID of the habit
        habit_id: String,
        /// Status: good/bad/not_specified
        status: String,
        /// Day to log, YYYY-MM-DD; defaults to today. Future dates are rejected. (optional)
        date: Option<String>,
        /// Notes for the day (optional)
        notes: Option<String>,
    ) -> McpResult<String> {
        let action = validation::parse_action(&status)?;

        let today = habit::local_date_today();
        let day = match date {
            Some(ref date_str) if !date_str.is_empty() => validation::parse_day_param(date_str)?,
            _ => today,
        };
        validation::reject_future_date(day, today)?;

        let mut data = self.data.lock().unwrap();

        let Some(habit) = data.find_by_id(&habit_id) else {
            drop(data);
            bail!("Habit '{}' not found", habit_id);
        };

        // Apply optimistically, keeping the previous set for rollback
        let update = apply_day_update(
            &habit.records,
            day,
            action,
            notes.as_deref().unwrap_or(""),
        );
        data.set_records(&habit_id, update.records);
        drop(data);

        let message = match action {
            DayAction::not_specified => format!("Clear {} for habit {}", day, habit_id),
            _ => format!("Mark {} as {} for habit {}", day, status, habit_id),
        };

        if let Err(e) = self.save_data_with_message(&message) {
            // Persistence rejected the write: roll back the in-memory state
            let mut data = self.data.lock().unwrap();
            data.set_records(&habit_id, update.previous_records);
            drop(data);
            bail!("Failed to save: {}", e);
        }

        Ok(match action {
            DayAction::not_specified => format!("Cleared {} for habit {}", day, habit_id),
            _ => format!("Marked {} as {} for habit {}", day, status, habit_id),
        })
    }

    /// **Stats**: Streak statistics for one habit: good/bad day counts,
    /// completion rate, longest streak, and current streak.
    #[tool]
    pub async fn habit_stats(
        &self,
        /// ID of the habit
        habit_id: String,
    ) -> McpResult<String> {
        let today = habit::local_date_today();
        let data = self.data.lock().unwrap();

        let Some(habit) = data.find_by_id(&habit_id) else {
            drop(data);
            bail!("Habit '{}' not found", habit_id);
        };

        let result = formatting::format_stats(habit, today);
        drop(data);
        Ok(result)
    }

    /// **Calendar**: Month grid for one habit showing logged days.
    #[tool]
    pub async fn show_calendar(
        &self,
        /// ID of the habit
        habit_id: String,
        /// Year, defaults to the current year (optional)
        year: Option<i32>,
        /// Month 1-12, defaults to the current month (optional)
        month: Option<u32>,
    ) -> McpResult<String> {
        let today = habit::local_date_today();
        let year = year.unwrap_or_else(|| chrono::Datelike::year(&today));
        let month = month.unwrap_or_else(|| chrono::Datelike::month(&today));
        validation::validate_year_month(year, month)?;

        let data = self.data.lock().unwrap();

        let Some(habit) = data.find_by_id(&habit_id) else {
            drop(data);
            bail!("Habit '{}' not found", habit_id);
        };

        let result = formatting::format_calendar(habit, year, month);
        drop(data);
        Ok(result)
    }

    /// **Reminders**: Which habits still need a log entry for today.
    /// Intended for scheduled check-in prompts; read-only.
    #[tool]
    pub async fn reminders(&self) -> McpResult<String> {
        let today = habit::local_date_today();
        let data = self.data.lock().unwrap();
        let due = data.due_on(today);
        Ok(formatting::format_reminders(data.all(), &due, today))
    }
}
