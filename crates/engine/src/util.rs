//! Internal helpers for model validation and normalization.

use crate::{EngineError, ResultEngine};

const USERNAME_MAX_LEN: usize = 150;

/// Trim a required text field and check it is non-empty and within `max_len`
/// characters.
pub(crate) fn required_field(value: &str, label: &str, max_len: usize) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(EngineError::Validation(format!(
            "{label} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Usernames allow letters, digits and `@ . + - _` only.
pub(crate) fn validate_username(value: &str) -> ResultEngine<String> {
    let username = required_field(value, "username", USERNAME_MAX_LEN)?;
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !valid {
        return Err(EngineError::Validation(
            "username may contain only letters, numbers, and @/./+/-/_ characters".to_string(),
        ));
    }
    Ok(username)
}

/// Lowercase the domain part of an email address. An empty email is allowed.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    match trimmed.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(format!("{local}@{}", domain.to_lowercase()))
        }
        _ => Err(EngineError::Validation(format!(
            "invalid email address: {trimmed}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_spaces_and_symbols() {
        assert!(validate_username("invalid user!").is_err());
        assert!(validate_username("").is_err());
        assert_eq!(validate_username(" jane.doe+1 ").unwrap(), "jane.doe+1");
    }

    #[test]
    fn username_length_is_bounded() {
        assert!(validate_username(&"a".repeat(150)).is_ok());
        assert!(validate_username(&"a".repeat(151)).is_err());
    }

    #[test]
    fn email_domain_is_lowercased() {
        assert_eq!(
            normalize_email("Jane.Doe@Example.COM").unwrap(),
            "Jane.Doe@example.com"
        );
        assert_eq!(normalize_email("  ").unwrap(), "");
        assert!(normalize_email("not-an-email").is_err());
    }
}
