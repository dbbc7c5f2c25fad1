//! Field validation for employee payloads.
//!
//! Centralized format rules shared by the HR sync and admin update paths:
//! emails are normalized to lowercase before any uniqueness check, phone
//! numbers are stored in canonical international form, PANs uppercased.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Indian PAN: five letters, four digits, one letter.
static PAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid regex"));

/// E.164 international form after separator stripping.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9][0-9]{7,14}$").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Invalid phone number format")]
    Phone,

    #[error("Invalid PAN format (ABCDE1234F)")]
    Pan,
}

/// Lowercase an email address for storage and uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Canonicalize a phone number to international form, dropping the usual
/// separators. Numbers without a country prefix are rejected.
pub fn canonical_phone(raw: &str) -> Result<String, FieldError> {
    let canonical: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    if PHONE_RE.is_match(&canonical) {
        Ok(canonical)
    } else {
        Err(FieldError::Phone)
    }
}

/// Uppercase a PAN and verify the format.
pub fn canonical_pan(raw: &str) -> Result<String, FieldError> {
    let upper = raw.trim().to_uppercase();

    if PAN_RE.is_match(&upper) {
        Ok(upper)
    } else {
        Err(FieldError::Pan)
    }
}
