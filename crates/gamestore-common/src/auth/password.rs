//! Password hashing and verification utilities
//!
//! Uses Argon2id with a random salt per hash. Stored hashes are PHC strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Verify a password, mapping a mismatch to `InvalidCredentials`
///
/// # Errors
/// Returns `AppError::InvalidCredentials` if the password doesn't match
pub fn check_password(password: &str, hash: &str) -> Result<(), AppError> {
    if verify_password(password, hash)? {
        Ok(())
    } else {
        Err(AppError::InvalidCredentials)
    }
}

/// Validate password strength
///
/// A password must have at least [`MIN_PASSWORD_LEN`] characters, at least
/// one letter and at least one digit. Every unmet rule is reported.
///
/// # Errors
/// Returns a validation error listing the unmet rules
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let mut problems = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LEN {
        problems.push(format!("at least {MIN_PASSWORD_LEN} characters"));
    }
    if !password.chars().any(char::is_alphabetic) {
        problems.push("a letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("a digit".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Password must contain {}",
            problems.join(", ")
        )))
    }
}
