//! Password acceptance rules applied before a credential is derived.

use crate::validation::FieldError;

/// Password policy. The default requires six characters and a digit; upper
/// case and non-alphanumeric characters are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            require_digit: true,
            require_lowercase: false,
            require_uppercase: false,
            require_non_alphanumeric: false,
        }
    }
}

impl PasswordPolicy {
    /// Every rule `password` breaks, in a stable order. Empty when accepted.
    pub fn check(&self, password: &str) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if password.chars().count() < self.min_length {
            errors.push(FieldError::new(
                "password",
                format!("Passwords must be at least {} characters.", self.min_length),
            ));
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push(FieldError::new(
                "password",
                "Passwords must have at least one digit ('0'-'9').",
            ));
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
            errors.push(FieldError::new(
                "password",
                "Passwords must have at least one lowercase ('a'-'z').",
            ));
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            errors.push(FieldError::new(
                "password",
                "Passwords must have at least one uppercase ('A'-'Z').",
            ));
        }
        if self.require_non_alphanumeric && password.chars().all(|c| c.is_alphanumeric()) {
            errors.push(FieldError::new(
                "password",
                "Passwords must have at least one non alphanumeric character.",
            ));
        }
        errors
    }
}
