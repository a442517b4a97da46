use crate::habit::record::DayRecord;
use crate::habit::streak;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One tracked habit and its day records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier (e.g., "morning-run", "no-sugar")
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional longer description
    #[serde(default)]
    pub description: String,
    /// Logged days, at most one record per calendar day
    #[serde(default)]
    pub records: Vec<DayRecord>,
}

/// Container for all tracked habits
///
/// Vec is the primary storage: it keeps insertion order, so the TOML file
/// serializes stably and git diffs stay small. The HashSet of ids exists
/// only for O(1) duplicate detection on add; it is rebuilt from the Vec
/// during deserialization and never serialized.
pub struct HabitData {
    /// Format version for the TOML file (current: 1)
    pub format_version: u32,

    pub(crate) habits: Vec<Habit>,

    pub(crate) habit_ids: HashSet<String>,
}

impl Default for HabitData {
    fn default() -> Self {
        Self {
            format_version: 1,
            habits: Vec::new(),
            habit_ids: HashSet::new(),
        }
    }
}

// Serialize/Deserialize implementations are in serde_impl.rs

impl HabitData {
    /// Create a new empty HabitData instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn habit_count(&self) -> usize {
        self.habits.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.habit_ids.contains(id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.id == id)
    }

    /// Add a habit, keeping the id index in sync
    pub fn add(&mut self, habit: Habit) {
        self.habit_ids.insert(habit.id.clone());
        self.habits.push(habit);
    }

    /// Remove a habit and return it
    pub fn remove(&mut self, id: &str) -> Option<Habit> {
        if let Some(pos) = self.habits.iter().position(|h| h.id == id) {
            let habit = self.habits.remove(pos);
            self.habit_ids.remove(id);
            Some(habit)
        } else {
            None
        }
    }

    /// Replace a habit's record set (the mark-day write path)
    ///
    /// Returns `Some(())` if the habit exists, `None` otherwise.
    pub fn set_records(&mut self, id: &str, records: Vec<DayRecord>) -> Option<()> {
        let habit = self.find_by_id_mut(id)?;
        habit.records = records;
        Some(())
    }

    /// All habits in insertion order
    pub fn all(&self) -> &[Habit] {
        &self.habits
    }

    /// Habits with no record yet for the given day
    ///
    /// The reminder job's query: "who still needs to log today?"
    pub fn due_on(&self, day: NaiveDate) -> Vec<&Habit> {
        self.habits
            .iter()
            .filter(|h| !streak::has_record_for(&h.records, day))
            .collect()
    }
}
