//! Request field validation helpers
//!
//! Small and deliberate: each helper returns the normalized value or a
//! `ValidationFailed` error naming the field.

use shared::{AppError, AppResult, ErrorCode};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

/// Normalize and check an email address (trimmed, lowercased)
pub fn email(raw: &str) -> AppResult<String> {
    let normalized = raw.trim().to_lowercase();
    let valid = normalized.len() >= 5
        && normalized.len() <= 254
        && normalized.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        });
    if !valid {
        return Err(AppError::validation("Invalid email address").with_detail("field", "email"));
    }
    Ok(normalized)
}

/// Check password length bounds
pub fn password(raw: &str) -> AppResult<()> {
    if raw.len() < MIN_PASSWORD_LEN || raw.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be {MIN_PASSWORD_LEN} to {MAX_PASSWORD_LEN} characters"
        ))
        .with_detail("field", "password"));
    }
    Ok(())
}

/// Reject blank required fields
pub fn required(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalizes() {
        assert_eq!(email("  User@Example.COM ").unwrap(), "user@example.com");
    }

    #[test]
    fn test_email_rejects_bad_shapes() {
        for bad in ["", "plain", "a@b", "@example.com", "a@.com"] {
            assert!(email(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_password_bounds() {
        assert!(password("short").is_err());
        assert!(password("longenough").is_ok());
        assert!(password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_required() {
        assert!(required("  ", "name").is_err());
        assert!(required("ok", "name").is_ok());
    }
}
