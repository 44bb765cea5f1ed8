//! User profile validation.

use crate::error::CoreError;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const DISPLAY_NAME_MAX_LEN: usize = 60;

/// Validate a username: lowercase ASCII letters, digits, and underscores,
/// starting with a letter.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }
    if !username.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(CoreError::Validation(
            "Username must start with a lowercase letter".into(),
        ));
    }
    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
    {
        return Err(CoreError::Validation(format!(
            "Username contains invalid character '{bad}'"
        )));
    }
    Ok(())
}

/// Trim a display name and reject blank or overlong values.
pub fn normalize_display_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Display name must not be blank".into()));
    }
    if trimmed.chars().count() > DISPLAY_NAME_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Display name must be at most {DISPLAY_NAME_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
