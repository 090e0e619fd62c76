//! Database utility functions.

use chrono::Utc;

/// Current UTC datetime as a string in SQLite format.
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
