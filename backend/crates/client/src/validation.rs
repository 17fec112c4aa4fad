//! Form Validation
//!
//! Client-side mirror of the server's input rules, so a form can reject
//! bad input before a round trip.

pub use platform::password::PasswordChecks;

pub const FIELDS_REQUIRED_MESSAGE: &str = "All fields are required.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const WEAK_PASSWORD_MESSAGE: &str = "Password must be at least 8 characters and include uppercase, lowercase, number, and special character.";

/// Trim and lowercase, as the server stores it
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `local@domain.tld` with no whitespace and a single `@`
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Each strength rule on its own
pub fn password_checks(password: &str) -> PasswordChecks {
    PasswordChecks::evaluate(password)
}

pub fn is_strong_password(password: &str) -> bool {
    password_checks(password).is_strong()
}
