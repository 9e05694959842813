//! Validation helpers and messages for account handlers

use regex::Regex;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_EMAIL: &str = "Invalid Email Format";
pub const EMAIL_TAKEN: &str = "Email already exists, please try again with a different email.";
pub const USERNAME_TAKEN: &str =
    "Username already exists, please try again with a different username.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const INVALID_LOGIN: &str = "Invalid email or password";

pub const MIN_PASSWORD_LENGTH: usize = 6;

lazy_static::lazy_static! {
    /// Something@something.tld with no whitespace
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Length in characters, not bytes
pub fn is_long_enough_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// True when any field is empty or whitespace-only
pub fn any_blank(fields: &[&str]) -> bool {
    fields.iter().any(|f| f.trim().is_empty())
}
