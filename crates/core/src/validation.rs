//! Input validation applied before any call reaches the backend.
//!
//! Each function returns the normalized value on success so callers never
//! persist the raw input.

use crate::error::CoreError;

/// Maximum length of a playlist name (characters).
pub const MAX_PLAYLIST_NAME_LEN: usize = 120;

/// Maximum length of a screen name (characters).
pub const MAX_SCREEN_NAME_LEN: usize = 80;

/// Allowed pairing code length range (characters).
pub const PAIRING_CODE_LEN: std::ops::RangeInclusive<usize> = 4..=16;

/// Maximum length of a profile username (characters).
pub const MAX_USERNAME_LEN: usize = 50;

/// Minimum password length accepted by the identity service.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Trim `name` and require it to be non-empty and at most
/// [`MAX_PLAYLIST_NAME_LEN`] characters.
pub fn validate_playlist_name(name: &str) -> Result<String, CoreError> {
    require_text("Playlist name", name, MAX_PLAYLIST_NAME_LEN)
}

pub fn validate_screen_name(name: &str) -> Result<String, CoreError> {
    require_text("Screen name", name, MAX_SCREEN_NAME_LEN)
}

pub fn validate_username(username: &str) -> Result<String, CoreError> {
    require_text("Username", username, MAX_USERNAME_LEN)
}

/// Normalize a pairing code to upper case and check its shape.
///
/// Codes are 4 to 16 ASCII alphanumerics; surrounding whitespace is ignored.
pub fn normalize_pairing_code(code: &str) -> Result<String, CoreError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(CoreError::Validation("Pairing code is required".into()));
    }
    if !PAIRING_CODE_LEN.contains(&code.chars().count()) {
        return Err(CoreError::Validation(format!(
            "Pairing code must be between {} and {} characters",
            PAIRING_CODE_LEN.start(),
            PAIRING_CODE_LEN.end()
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(
            "Pairing code may only contain letters and digits".into(),
        ));
    }
    Ok(code.to_ascii_uppercase())
}

/// Check a password change request: both fields must match and the new
/// password must be at least [`MIN_PASSWORD_LEN`] characters.
pub fn validate_password_change(password: &str, confirm: &str) -> Result<(), CoreError> {
    if password != confirm {
        return Err(CoreError::Validation("Passwords don't match".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn require_text(field: &str, value: &str, max_len: usize) -> Result<String, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn playlist_name_is_trimmed() {
        assert_eq!(validate_playlist_name("  Lobby  ").unwrap(), "Lobby");
    }

    #[test]
    fn empty_playlist_name_is_rejected() {
        assert_matches!(validate_playlist_name("   "), Err(CoreError::Validation(_)));
        assert_matches!(validate_playlist_name(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_playlist_name_is_rejected() {
        let name = "x".repeat(MAX_PLAYLIST_NAME_LEN + 1);
        assert!(validate_playlist_name(&name).is_err());
        let name = "x".repeat(MAX_PLAYLIST_NAME_LEN);
        assert!(validate_playlist_name(&name).is_ok());
    }

    #[test]
    fn pairing_code_is_uppercased() {
        assert_eq!(normalize_pairing_code(" ab12cd ").unwrap(), "AB12CD");
    }

    #[test]
    fn pairing_code_shape() {
        assert!(normalize_pairing_code("abc").is_err());
        assert!(normalize_pairing_code(&"a".repeat(17)).is_err());
        assert!(normalize_pairing_code("ab-12").is_err());
        assert!(normalize_pairing_code("").is_err());
    }

    #[test]
    fn password_rules() {
        assert!(validate_password_change("secret1", "secret1").is_ok());
        let err = validate_password_change("secret1", "secret2").unwrap_err();
        assert!(err.to_string().contains("don't match"));
        assert!(validate_password_change("abc", "abc").is_err());
    }
}
