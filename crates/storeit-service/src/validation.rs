//! Input rules applied before any provider call.

use validator::ValidateEmail;

use storeit_core::error::AppError;

/// Longest accepted file name, in characters.
pub const MAX_FILE_NAME_LEN: usize = 255;

const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Rejects empty, overlong, or path-like file names.
pub fn validate_file_name(name: &str) -> Result<(), AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("File name must not be empty"));
    }
    if trimmed.chars().count() > MAX_FILE_NAME_LEN {
        return Err(AppError::validation(format!(
            "File name exceeds {MAX_FILE_NAME_LEN} characters"
        )));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(AppError::validation("File name is reserved"));
    }
    if let Some(c) = trimmed
        .chars()
        .find(|c| RESERVED.contains(c) || c.is_control())
    {
        return Err(AppError::validation(format!(
            "File name contains reserved character {c:?}"
        )));
    }
    Ok(())
}

/// Trims and lower-cases an email, rejecting malformed input.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if !email.validate_email() {
        return Err(AppError::validation(format!("Invalid email '{}'", raw.trim())));
    }
    Ok(email)
}
