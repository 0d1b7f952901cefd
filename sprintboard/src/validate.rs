//! Input validation shared by commands

use crate::error::{Result, SprintboardError};
use crate::types::Project;
use chrono::{DateTime, Utc};

/// Trimmed project name of `Project::MIN_NAME_LEN..=Project::MAX_NAME_LEN` characters
pub fn project_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if !(Project::MIN_NAME_LEN..=Project::MAX_NAME_LEN).contains(&len) {
        return Err(SprintboardError::invalid_value(
            "name",
            format!(
                "project name must be {} to {} characters, got {}",
                Project::MIN_NAME_LEN,
                Project::MAX_NAME_LEN,
                len
            ),
        ));
    }
    Ok(trimmed.to_string())
}

/// Trimmed, non-empty text
pub fn non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SprintboardError::invalid_value(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// A sprint window must end after it starts
pub fn date_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if end <= start {
        return Err(SprintboardError::invalid_value(
            "end_date",
            format!("end date {} is not after start date {}", end, start),
        ));
    }
    Ok(())
}
