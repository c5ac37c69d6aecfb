//! Client-side form validation
//!
//! Field checks run before any network call; failures carry per-field
//! messages and the request is never issued.

use once_cell::sync::Lazy;
use regex::Regex;

/// One failed field with its inline message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All failed fields for one form submission
pub type FieldErrors = Vec<FieldError>;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // same shape the backend accepts: local@domain.tld
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

fn check_email(errors: &mut FieldErrors, email: &str) {
    if !EMAIL_RE.is_match(email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.chars().count() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be atleast 6 characters long",
        ));
    }
}

/// Validate a signup form
pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if username.chars().count() < 3 {
        errors.push(FieldError::new(
            "username",
            "Username must be atleast 3 characters long",
        ));
    }
    check_email(&mut errors, email);
    check_password(&mut errors, password);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a login form
pub fn validate_login(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    check_email(&mut errors, email);
    check_password(&mut errors, password);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a profile update form
pub fn validate_profile(mobile_no: &str, location: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if mobile_no.chars().count() != 10 {
        errors.push(FieldError::new(
            "mobileNo",
            "Mobile number must be exactly 10 digits.",
        ));
    } else if !DIGITS_RE.is_match(mobile_no) {
        errors.push(FieldError::new(
            "mobileNo",
            "Mobile number must contain only digits.",
        ));
    }

    let len = location.chars().count();
    if len < 2 {
        errors.push(FieldError::new(
            "location",
            "Location must be at least 2 characters.",
        ));
    } else if len > 100 {
        errors.push(FieldError::new(
            "location",
            "Location cannot exceed 100 characters.",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
