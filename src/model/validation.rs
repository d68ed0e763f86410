use thiserror::Error;

/// Upper bound of the rolling hours-of-service cycle, in hours.
pub const MAX_CYCLE_HOURS: f64 = 70.0;

/// Field-scoped validation failures for trip input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required")]
    Required,
    #[error("Must be 0–70 hours")]
    OutOfRange,
}

/// Validates a free-text location, returning it with surrounding whitespace removed.
pub fn validate_location(value: &str) -> Result<&str, ValidationError> {
    match value.trim() {
        "" => Err(ValidationError::Required),
        trimmed => Ok(trimmed),
    }
}

/// Validates the hours already used in the current cycle.
///
/// An empty string is `Required`. Anything else must parse as a finite
/// decimal within `0..=70`; whitespace-only input is treated as unparseable.
pub fn validate_cycle_used(value: &str) -> Result<f64, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required);
    }
    let hours: f64 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::OutOfRange)?;
    if hours.is_finite() && (0.0..=MAX_CYCLE_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(ValidationError::OutOfRange)
    }
}
