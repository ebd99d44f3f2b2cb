use crate::error::PileError;
use std::fmt::Display;

/// Validates a single optional numeric field against optional bounds,
/// returning a structured error.
///
/// # Arguments
/// * `field_name` - A name for the field (e.g. "cu")
/// * `value` - Option<T> to validate
/// * `min` - Optional minimum value (inclusive)
/// * `max` - Optional maximum value (inclusive)
/// * `error_code_prefix` - A short prefix for generating the error code, e.g., "soil_profile"
///
/// # Returns
/// Ok(()) if valid, Err(PileError::InvalidInput) otherwise
pub fn validate_field<T>(
    field_name: &str,
    value: Option<T>,
    min: Option<T>,
    max: Option<T>,
    error_code_prefix: &str,
) -> Result<(), PileError>
where
    T: PartialOrd + Display + Copy,
{
    let val = value.ok_or(PileError::invalid_input(
        format!("{}.{}.missing", error_code_prefix, field_name),
        format!("{} must be provided.", field_name),
    ))?;

    if let Some(min_val) = min {
        if val < min_val {
            return Err(PileError::invalid_input(
                format!("{}.{}.too_small.{}", error_code_prefix, field_name, min_val),
                format!(
                    "{} must be greater than or equal to {}.",
                    field_name, min_val
                ),
            ));
        }
    }

    if let Some(max_val) = max {
        if val > max_val {
            return Err(PileError::invalid_input(
                format!("{}.{}.too_large.{}", error_code_prefix, field_name, max_val),
                format!("{} must be less than or equal to {}.", field_name, max_val),
            ));
        }
    }

    Ok(())
}

/// Validates that a required value is finite (guards against NaN leaking
/// into a solve from caller-side arithmetic).
pub fn validate_finite(
    field_name: &str,
    value: f64,
    error_code_prefix: &str,
) -> Result<(), PileError> {
    if !value.is_finite() {
        return Err(PileError::invalid_input(
            format!("{}.{}.not_finite", error_code_prefix, field_name),
            format!("{} must be a finite number.", field_name),
        ));
    }
    Ok(())
}
