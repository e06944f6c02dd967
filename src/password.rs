//! HANA password composition policy.

use crate::error::{HanaError, Result};

pub const PASSWORD_POLICY_MESSAGE: &str = "Password must contain characters from the following three categories:\n - Latin uppercase letters (A through Z)\n - Latin lowercase letters (a through z)\n - Base 10 digits (0 through 9).\n";

/// Checks that `password` contains a Latin uppercase letter, a Latin
/// lowercase letter and a base-10 digit.
pub fn validate_password(password: &str) -> Result<()> {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(HanaError::InvalidPassword)
    }
}
