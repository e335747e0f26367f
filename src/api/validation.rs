use crate::error::{TimelineError, TimelineResult};

pub(super) fn ensure_positive(name: &str, value: f64) -> TimelineResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TimelineError::InvalidData(format!(
            "`{name}` must be finite and > 0"
        )));
    }
    Ok(())
}

pub(super) fn ensure_non_negative(name: &str, value: f64) -> TimelineResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TimelineError::InvalidData(format!(
            "`{name}` must be finite and >= 0"
        )));
    }
    Ok(())
}
