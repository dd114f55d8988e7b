//! Client-side form checks. A failing check means no request is sent.

use crate::error::ApiError;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_FAULT_DESCRIPTION_LEN: usize = 5;
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("{field} must be at least {min} characters long.")]
    TooShort { field: &'static str, min: usize },
    #[error("Rating must be between 1 and 5.")]
    RatingOutOfRange,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Amount must not be negative.")]
    NegativeAmount,
    #[error("Enter a valid amount.")]
    InvalidAmount,
    #[error("Select at least one meal.")]
    EmptySelection,
    #[error("No student card found. Create one on your profile first.")]
    MissingCard,
    #[error("You do not have enough balance on your student card for this purchase!")]
    InsufficientBalance,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Returns the trimmed value, or `Required` when nothing is left.
pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(value)
    }
}

pub fn min_len<'a>(field: &'static str, value: &'a str, min: usize) -> Result<&'a str, ValidationError> {
    let value = required(field, value)?;
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(value)
}

pub fn rating(value: u8) -> Result<u8, ValidationError> {
    if RATING_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::RatingOutOfRange)
    }
}

/// Loose shape check: one `@`, something before it, a dot in the domain.
pub fn email(value: &str) -> Result<&str, ValidationError> {
    let value = required("Email", value)?;
    let shaped = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };
    if shaped {
        Ok(value)
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn non_negative(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NegativeAmount)
    }
}

/// Any finite, non-zero amount (balance corrections may be negative).
pub fn amount(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value != 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidAmount)
    }
}

/// Student first/last name pair for the admin "create student" form.
pub fn student_names<'a>(ime: &'a str, prezime: &'a str) -> Result<(&'a str, &'a str), ValidationError> {
    Ok((
        min_len("First name", ime, MIN_NAME_LEN)?,
        min_len("Last name", prezime, MIN_NAME_LEN)?,
    ))
}

pub fn fault_description(opis: &str) -> Result<&str, ValidationError> {
    min_len("Description", opis, MIN_FAULT_DESCRIPTION_LEN)
}
