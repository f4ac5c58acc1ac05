use crate::error::{Result, StoreError};

/// Validate a task title: must contain at least one non-whitespace character.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation(
            "task title must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate a project name: non-empty after trimming.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(
            "project name must not be empty".to_string(),
        ));
    }
    Ok(())
}
