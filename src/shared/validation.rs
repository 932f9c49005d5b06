//! Input validation for account fields.

use super::error::SharedError;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Usernames are 3-30 characters of ASCII letters, digits or underscore.
pub fn validate_username(username: &str) -> Result<(), SharedError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(SharedError::validation(
            "username",
            format!(
                "Username must be between {} and {} characters",
                USERNAME_MIN_LEN, USERNAME_MAX_LEN
            ),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(SharedError::validation(
            "username",
            "Username may only contain letters, digits and underscores",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", PASSWORD_MIN_LEN),
        ));
    }
    Ok(())
}
