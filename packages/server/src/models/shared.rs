use crate::services::ServiceError;

/// Validate a required text field (1-`max` Unicode characters after trimming).
pub fn require_text(value: &str, field: &str, max: usize) -> Result<(), ServiceError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(ServiceError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate an optional text field (at most `max` characters when present).
pub fn optional_text(value: Option<&str>, field: &str, max: usize) -> Result<(), ServiceError> {
    if let Some(value) = value
        && value.trim().chars().count() > max
    {
        return Err(ServiceError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate a display order (must be >= 0).
pub fn validate_display_order(order: i32) -> Result<(), ServiceError> {
    if order < 0 {
        return Err(ServiceError::Validation("display_order must be >= 0".into()));
    }
    Ok(())
}

/// Validate a start/end year pair. The end year, when present, may not precede the start.
pub fn validate_year_range(start: i32, end: Option<i32>) -> Result<(), ServiceError> {
    const YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;
    if !YEARS.contains(&start) {
        return Err(ServiceError::Validation(
            "start_year must be between 1900 and 2100".into(),
        ));
    }
    if let Some(end) = end
        && (!YEARS.contains(&end) || end < start)
    {
        return Err(ServiceError::Validation(
            "end_year must be between start_year and 2100".into(),
        ));
    }
    Ok(())
}

/// Validate a status against its allowed values.
pub fn validate_status(status: &str, allowed: &[&str]) -> Result<(), ServiceError> {
    if !allowed.contains(&status) {
        return Err(ServiceError::Validation(format!(
            "status must be one of: {}",
            allowed.join(", ")
        )));
    }
    Ok(())
}

/// Trimmed value of a partial-update field; blank strings count as absent.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims_and_bounds() {
        assert!(require_text("  ok ", "title", 5).is_ok());
        assert!(require_text("   ", "title", 5).is_err());
        assert!(require_text("toolong", "title", 5).is_err());
    }

    #[test]
    fn year_range_rejects_end_before_start() {
        assert!(validate_year_range(2019, Some(2021)).is_ok());
        assert!(validate_year_range(2019, None).is_ok());
        assert!(validate_year_range(2021, Some(2019)).is_err());
        assert!(validate_year_range(1800, None).is_err());
    }

    #[test]
    fn blank_partial_fields_are_absent() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" x ")), Some("x".into()));
    }
}
