use crate::errors::EngineError;
use std::collections::HashMap;

/// Extract a parameter as usize with a default, validated against a range.
/// Missing keys take the default; present values must be finite, integral
/// after rounding tolerance, and inside `[min, max]`.
pub fn get_param_usize_in(
    params: &HashMap<String, f64>,
    key: &str,
    default: usize,
    min: usize,
    max: usize,
) -> Result<usize, EngineError> {
    let raw = match params.get(key) {
        Some(value) => *value,
        None => return Ok(default),
    };

    if !raw.is_finite() || raw.fract().abs() > 1e-9 {
        return Err(EngineError::Parameter(format!(
            "`{}` must be an integer, got {}",
            key, raw
        )));
    }

    let value = raw as i64;
    if value < min as i64 || value > max as i64 {
        return Err(EngineError::Parameter(format!(
            "`{}` must be between {} and {}, got {}",
            key, min, max, value
        )));
    }

    Ok(value as usize)
}

/// Extract a parameter as f64 with a default, validated against a range.
pub fn get_param_f64_in(
    params: &HashMap<String, f64>,
    key: &str,
    default: f64,
    min: f64,
    max: f64,
) -> Result<f64, EngineError> {
    let raw = match params.get(key) {
        Some(value) => *value,
        None => return Ok(default),
    };

    if !raw.is_finite() {
        return Err(EngineError::Parameter(format!(
            "`{}` must be finite, got {}",
            key, raw
        )));
    }

    if raw < min || raw > max {
        return Err(EngineError::Parameter(format!(
            "`{}` must be between {} and {}, got {}",
            key, min, max, raw
        )));
    }

    Ok(raw)
}

/// Extract a binary flag parameter (anything >= 0.5 counts as set).
pub fn get_param_flag(
    params: &HashMap<String, f64>,
    key: &str,
    default: bool,
) -> Result<bool, EngineError> {
    let raw = match params.get(key) {
        Some(value) => *value,
        None => return Ok(default),
    };

    if !raw.is_finite() {
        return Err(EngineError::Parameter(format!(
            "`{}` must be 0 or 1, got {}",
            key, raw
        )));
    }

    Ok(raw >= 0.5)
}
