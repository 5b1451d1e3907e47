//! Input validation for raw phone strings.

use crate::errors::AppError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static E164_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{10,15}$").expect("E.164 pattern compiles"));

/// A phone number that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    /// Input exactly as received.
    pub raw: String,
    /// Cleaned form: `+` followed by 10 to 15 digits.
    pub e164: String,
}

impl PhoneNumber {
    /// Digits only, without the leading `+`.
    pub fn digits(&self) -> &str {
        self.e164.trim_start_matches('+')
    }
}

/// Why a raw phone string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Missing,
    InvalidFormat,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Missing => write!(f, "Phone number is required"),
            ValidationError::InvalidFormat => write!(
                f,
                "Invalid phone number format. Use international format (e.g., +14155552671)"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Keep digits and `+`, drop everything else.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Validate a raw phone string into E.164 form.
///
/// Formatting characters (spaces, dashes, parentheses) are stripped first,
/// so `+1 (415) 555-2671` is accepted. A leading `+` is mandatory.
pub fn validate_phone_number(raw: Option<&str>) -> Result<PhoneNumber, ValidationError> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(ValidationError::Missing),
    };

    let cleaned = sanitize(raw);
    if !E164_PATTERN.is_match(&cleaned) {
        tracing::debug!("Rejected phone input of {} chars", raw.len());
        return Err(ValidationError::InvalidFormat);
    }

    Ok(PhoneNumber {
        raw: raw.to_string(),
        e164: cleaned,
    })
}
