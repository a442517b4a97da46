//! Common test utilities for integration tests

use habit_mcp::HabitServerHandler;
use tempfile::NamedTempFile;

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (HabitServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = HabitServerHandler::new(temp_file.path().to_str().unwrap(), false).unwrap();
    (handler, temp_file)
}

/// Create a test handler with one habit already added
pub async fn get_test_handler_with_habit(id: &str) -> (HabitServerHandler, NamedTempFile) {
    let (handler, temp_file) = get_test_handler();
    handler
        .add_habit(id.to_string(), format!("Habit {}", id), None)
        .await
        .unwrap();
    (handler, temp_file)
}
