//! Field checks shared by every write path.
//!
//! Each helper names the offending field so the caller gets a
//! `Validation { field, message }` it can point at directly.

use crate::error::{AppError, AppResult};

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Unwrap a field that must be present.
pub fn required<T>(field: &str, value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| AppError::invalid(field, "is required"))
}

/// Trimmed, non-empty text.
pub fn required_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Blank strings become `None`.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn in_range(field: &str, value: f64, (min, max): (f64, f64)) -> AppResult<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(AppError::invalid(
            field,
            format!("must be within [{min}, {max}]"),
        ));
    }
    Ok(value)
}

pub fn latitude(field: &str, value: f64) -> AppResult<f64> {
    in_range(field, value, LATITUDE_RANGE)
}

pub fn longitude(field: &str, value: f64) -> AppResult<f64> {
    in_range(field, value, LONGITUDE_RANGE)
}

pub fn optional_latitude(field: &str, value: Option<f64>) -> AppResult<Option<f64>> {
    value.map(|v| latitude(field, v)).transpose()
}

pub fn optional_longitude(field: &str, value: Option<f64>) -> AppResult<Option<f64>> {
    value.map(|v| longitude(field, v)).transpose()
}

/// Pressures, depths and winch payouts.
pub fn non_negative(field: &str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid(field, "must be a non-negative number"));
    }
    Ok(value)
}

pub fn optional_non_negative(field: &str, value: Option<f64>) -> AppResult<Option<f64>> {
    value.map(|v| non_negative(field, v)).transpose()
}

/// Orders, sequences and counts that start at 1.
pub fn positive(field: &str, value: i32) -> AppResult<i32> {
    if value < 1 {
        return Err(AppError::invalid(field, "must be at least 1"));
    }
    Ok(value)
}

pub fn optional_positive(field: &str, value: Option<i32>) -> AppResult<Option<i32>> {
    value.map(|v| positive(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: AppError) -> String {
        match err {
            AppError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn coordinates_accept_inclusive_bounds() {
        assert_eq!(latitude("lat", 90.0).unwrap(), 90.0);
        assert_eq!(latitude("lat", -90.0).unwrap(), -90.0);
        assert_eq!(longitude("lon", 180.0).unwrap(), 180.0);
        assert_eq!(longitude("lon", -180.0).unwrap(), -180.0);
    }

    #[test]
    fn coordinates_reject_out_of_range_and_nan() {
        assert_eq!(field_of(latitude("begin_latitude", 90.01).unwrap_err()), "begin_latitude");
        assert_eq!(field_of(longitude("end_longitude", -180.5).unwrap_err()), "end_longitude");
        assert!(latitude("lat", f64::NAN).is_err());
        assert!(longitude("lon", f64::INFINITY).is_err());
    }

    #[test]
    fn optional_values_pass_through_none() {
        assert_eq!(optional_latitude("lat", None).unwrap(), None);
        assert_eq!(optional_non_negative("depth", None).unwrap(), None);
        assert_eq!(optional_positive("seq", None).unwrap(), None);
    }

    #[test]
    fn non_negative_and_positive() {
        assert_eq!(non_negative("pressure", 0.0).unwrap(), 0.0);
        assert!(non_negative("pressure", -0.1).is_err());
        assert_eq!(positive("cast_number", 1).unwrap(), 1);
        assert!(positive("cast_number", 0).is_err());
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(required_text("username", "  alice ").unwrap(), "alice");
        assert!(required_text("username", "   ").is_err());
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" note ".into())), Some("note".into()));
    }

    #[test]
    fn required_reports_field() {
        assert_eq!(field_of(required::<f64>("on_deck_latitude", None).unwrap_err()), "on_deck_latitude");
    }
}
