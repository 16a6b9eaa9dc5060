//! Data structures for authentication forms and sessions.
//!
//! Form submissions arrive as raw `application/x-www-form-urlencoded` pairs.
//! A field that is missing, or submitted more than once, is coerced to the
//! empty string before validation.

use crate::utils::jwt::Claims;
use crate::utils::password::MAX_PASSWORD_BYTES;
use serde::Serialize;
use validator::Validate;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 20;
pub const PASSWORD_MIN_LENGTH: usize = 12;
pub const PASSWORD_MAX_LENGTH: usize = 70;

pub const USERNAME_TAKEN_MESSAGE: &str = "Username is already taken";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username/password";
pub const PASSWORD_TOO_LONG_MESSAGE: &str = "Password must be at most 72 bytes long";

/// Returns the single value submitted for `name`, or `""`.
fn scalar_field(pairs: &[(String, String)], name: &str) -> String {
    let mut values = pairs.iter().filter(|(key, _)| key == name);
    match (values.next(), values.next()) {
        (Some((_, value)), None) => value.clone(),
        _ => String::new(),
    }
}

/// Registration form payload
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Trimmed username
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            username: scalar_field(pairs, "username").trim().to_string(),
            password: scalar_field(pairs, "password"),
        }
    }

    /// Format checks on the username, in display order.
    pub fn username_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let username = self.username.as_str();

        if username.is_empty() {
            errors.push("Username is required".to_string());
            return errors;
        }

        let length = username.chars().count();
        if length < USERNAME_MIN_LENGTH {
            errors.push(format!(
                "Username must be at least {} characters long",
                USERNAME_MIN_LENGTH
            ));
        }
        if length > USERNAME_MAX_LENGTH {
            errors.push(format!(
                "Username must be at most {} characters long",
                USERNAME_MAX_LENGTH
            ));
        }
        if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push("Username can only contain letters and numbers".to_string());
        }

        errors
    }

    /// Format checks on the password, in display order.
    pub fn password_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.password.is_empty() {
            errors.push("Password is required".to_string());
            return errors;
        }

        let length = self.password.chars().count();
        if length < PASSWORD_MIN_LENGTH {
            errors.push(format!(
                "Password must be at least {} characters long",
                PASSWORD_MIN_LENGTH
            ));
        }
        if length > PASSWORD_MAX_LENGTH {
            errors.push(format!(
                "Password must be at most {} characters long",
                PASSWORD_MAX_LENGTH
            ));
        } else if self.password.len() > MAX_PASSWORD_BYTES {
            errors.push(PASSWORD_TOO_LONG_MESSAGE.to_string());
        }

        errors
    }
}

/// Login form payload
#[derive(Debug, Clone, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            username: scalar_field(pairs, "username").trim().to_string(),
            password: scalar_field(pairs, "password"),
        }
    }
}

/// Identity of a signed-in user as exposed to views.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

impl From<&Claims> for SessionUser {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.user_id(),
            username: claims.username().to_string(),
        }
    }
}

/// Outcome of a successful login or registration.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub user: SessionUser,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn register(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest::from_pairs(&pairs(&[("username", username), ("password", password)]))
    }

    #[test]
    fn missing_fields_coerce_to_empty() {
        let request = RegisterRequest::from_pairs(&[]);
        assert_eq!(request.username, "");
        assert_eq!(request.password, "");
    }

    #[test]
    fn repeated_fields_coerce_to_empty() {
        let request = RegisterRequest::from_pairs(&pairs(&[
            ("username", "alice"),
            ("username", "bob"),
            ("password", "correct-password-123"),
        ]));
        assert_eq!(request.username, "");
        assert_eq!(request.password, "correct-password-123");
    }

    #[test]
    fn username_is_trimmed() {
        assert_eq!(register("  alice \t", "x").username, "alice");
    }

    #[test]
    fn valid_input_has_no_errors() {
        let request = register("alice", "correct-password-123");
        assert!(request.username_errors().is_empty());
        assert!(request.password_errors().is_empty());
    }

    #[test]
    fn empty_username_only_reports_required() {
        assert_eq!(register("   ", "x").username_errors(), vec!["Username is required"]);
    }

    #[test]
    fn username_length_bounds() {
        assert!(register("abc", "").username_errors().is_empty());
        assert!(register(&"a".repeat(20), "").username_errors().is_empty());
        assert_eq!(
            register("ab", "").username_errors(),
            vec!["Username must be at least 3 characters long"]
        );
        assert_eq!(
            register(&"a".repeat(21), "").username_errors(),
            vec!["Username must be at most 20 characters long"]
        );
    }

    #[test]
    fn username_errors_accumulate_in_order() {
        assert_eq!(
            register("a!", "").username_errors(),
            vec![
                "Username must be at least 3 characters long",
                "Username can only contain letters and numbers",
            ]
        );
    }

    #[test]
    fn username_rejects_non_alphanumeric() {
        for name in ["ali ce", "alice_1", "al-ice", "élise", "bob!"] {
            assert_eq!(
                register(name, "").username_errors(),
                vec!["Username can only contain letters and numbers"],
                "{name}"
            );
        }
    }

    #[test]
    fn password_length_bounds() {
        assert!(register("", &"p".repeat(12)).password_errors().is_empty());
        assert!(register("", &"p".repeat(70)).password_errors().is_empty());
        assert_eq!(
            register("", &"p".repeat(11)).password_errors(),
            vec!["Password must be at least 12 characters long"]
        );
        assert_eq!(
            register("", &"p".repeat(71)).password_errors(),
            vec!["Password must be at most 70 characters long"]
        );
    }

    #[test]
    fn password_length_counts_characters() {
        // 12 characters, 24 bytes.
        assert!(register("", &"é".repeat(12)).password_errors().is_empty());
    }

    #[test]
    fn password_byte_length_is_bounded() {
        // 24 characters, 72 bytes.
        assert!(register("", &"€".repeat(24)).password_errors().is_empty());
        // 25 characters, 75 bytes.
        assert_eq!(
            register("", &"€".repeat(25)).password_errors(),
            vec![PASSWORD_TOO_LONG_MESSAGE]
        );
        // Over both bounds: only the character message.
        assert_eq!(
            register("", &"€".repeat(71)).password_errors(),
            vec!["Password must be at most 70 characters long"]
        );
    }

    #[test]
    fn empty_password_only_reports_required() {
        assert_eq!(register("", "").password_errors(), vec!["Password is required"]);
    }

    #[test]
    fn login_validation_requires_both_fields() {
        let ok = LoginRequest::from_pairs(&pairs(&[("username", "alice"), ("password", "pw")]));
        assert!(ok.validate().is_ok());

        let missing = LoginRequest::from_pairs(&pairs(&[("username", "alice")]));
        assert!(missing.validate().is_err());

        let blank = LoginRequest::from_pairs(&pairs(&[("username", "  "), ("password", "pw")]));
        assert!(blank.validate().is_err());
    }
}
