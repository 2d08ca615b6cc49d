//! # Card Field Validation
//!
//! Pure checks run on the payment form before anything leaves the process.
//! The card number itself is not checked here; it only has to survive the
//! round trip through the secrets service.

use crate::error::ValidationError;
use crate::transaction::PaymentSubmission;
use chrono::{Datelike, Local, NaiveDate};

/// A CVV is three or four ASCII digits.
pub fn validate_cvv(cvv: &str) -> Result<(), ValidationError> {
    let all_digits = !cvv.is_empty() && cvv.bytes().all(|b| b.is_ascii_digit());
    if !all_digits || !(3..=4).contains(&cvv.len()) {
        return Err(ValidationError::InvalidCvv);
    }
    Ok(())
}

/// Validate an `MM/YY` expiry against the current local date.
pub fn validate_expiry(expiry: &str) -> Result<(), ValidationError> {
    validate_expiry_at(expiry, Local::now().date_naive())
}

/// Validate an `MM/YY` expiry against `today`.
///
/// The year is compared with `today`'s year modulo 100, so a card is valid
/// through the whole of its expiry month.
pub fn validate_expiry_at(expiry: &str, today: NaiveDate) -> Result<(), ValidationError> {
    let (month, year) = expiry
        .split_once('/')
        .ok_or(ValidationError::InvalidExpiryFormat)?;
    let month = parse_number(month)?;
    let year = parse_number(year)?;

    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidExpiryMonth);
    }

    let current_year = today.year().rem_euclid(100) as u32;
    let current_month = today.month();
    if year < current_year || (year == current_year && month < current_month) {
        return Err(ValidationError::CardExpired);
    }

    Ok(())
}

/// Run every form check in the order the customer sees them.
pub fn validate_submission(
    submission: &PaymentSubmission,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    validate_cvv(&submission.cvv)?;
    validate_expiry_at(&submission.expiry, today)
}

fn parse_number(part: &str) -> Result<u32, ValidationError> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidExpiryFormat);
    }
    // Too many digits for u32 saturates: an out-of-range month, a far-future year.
    Ok(part.parse().unwrap_or(u32::MAX))
}
