use chrono::{DateTime, Months, TimeDelta, Utc};

/// Signed distance `end - start` in milliseconds.
#[must_use]
pub fn span_millis(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64
}

/// Adds whole days, saturating at chrono's representable range.
#[must_use]
pub fn add_days_saturating(time: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days)
        .and_then(|delta| time.checked_add_signed(delta))
        .unwrap_or_else(|| saturated_bound(days >= 0))
}

/// Adds calendar months, saturating at chrono's representable range.
///
/// Day-of-month is clamped to the target month's length (Jan 31 + 1 month is
/// the last day of February).
#[must_use]
pub fn add_months_saturating(time: DateTime<Utc>, months: i64) -> DateTime<Utc> {
    let Ok(magnitude) = u32::try_from(months.unsigned_abs()) else {
        return saturated_bound(months >= 0);
    };
    let shifted = if months >= 0 {
        time.checked_add_months(Months::new(magnitude))
    } else {
        time.checked_sub_months(Months::new(magnitude))
    };
    shifted.unwrap_or_else(|| saturated_bound(months >= 0))
}

fn saturated_bound(forward: bool) -> DateTime<Utc> {
    if forward {
        DateTime::<Utc>::MAX_UTC
    } else {
        DateTime::<Utc>::MIN_UTC
    }
}
