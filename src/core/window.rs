use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{add_days_saturating, add_months_saturating, span_millis};

/// Granularity of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
}

impl ViewMode {
    pub const ALL: [Self; 3] = [Self::Day, Self::Week, Self::Month];

    /// Reach of the window behind and ahead of the anchor.
    #[must_use]
    pub fn window_reach(self) -> (CalendarStep, CalendarStep) {
        match self {
            Self::Day => (CalendarStep::Days(-7), CalendarStep::Days(30)),
            Self::Week => (CalendarStep::Days(-14), CalendarStep::Days(60)),
            Self::Month => (CalendarStep::Months(-2), CalendarStep::Months(6)),
        }
    }

    /// Distance between consecutive header ticks.
    #[must_use]
    pub fn tick_step(self) -> CalendarStep {
        match self {
            Self::Day => CalendarStep::Days(1),
            Self::Week => CalendarStep::Days(7),
            Self::Month => CalendarStep::Months(1),
        }
    }

    /// Forward anchor shift applied by one `Next` navigation.
    #[must_use]
    pub fn navigation_step(self) -> CalendarStep {
        match self {
            Self::Day => CalendarStep::Days(7),
            Self::Week => CalendarStep::Days(14),
            Self::Month => CalendarStep::Months(1),
        }
    }
}

/// Signed calendar offset. Month offsets follow calendar arithmetic rather
/// than a fixed day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarStep {
    Days(i64),
    Months(i64),
}

impl CalendarStep {
    /// Applies the step `times` times in one shot, saturating at the
    /// representable range.
    #[must_use]
    pub fn apply(self, time: DateTime<Utc>, times: i64) -> DateTime<Utc> {
        match self {
            Self::Days(days) => add_days_saturating(time, days.saturating_mul(times)),
            Self::Months(months) => add_months_saturating(time, months.saturating_mul(times)),
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Days(days) => Self::Days(-days),
            Self::Months(months) => Self::Months(-months),
        }
    }
}

/// Contiguous time range rendered along the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ViewWindow {
    /// Builds a window as given. Degenerate or inverted windows are allowed
    /// here and rejected by layout instead.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span_millis(self) -> f64 {
        span_millis(self.start, self.end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.end <= self.start
    }

    #[must_use]
    pub fn contains(self, time: DateTime<Utc>) -> bool {
        time >= self.start && time <= self.end
    }

    /// Position of `time` as a fraction of the window, unclamped.
    ///
    /// Returns `None` for degenerate windows.
    #[must_use]
    pub fn fraction_of(self, time: DateTime<Utc>) -> Option<f64> {
        let span = self.span_millis();
        if span <= 0.0 {
            return None;
        }
        Some(span_millis(self.start, time) / span)
    }
}

/// Computes the visible window around `anchor` for `mode`.
///
/// The window always leans into the future: day mode covers 7 days back and
/// 30 ahead, week mode 14 back and 60 ahead, month mode 2 months back and 6
/// ahead.
#[must_use]
pub fn compute_window(anchor: DateTime<Utc>, mode: ViewMode) -> ViewWindow {
    let (behind, ahead) = mode.window_reach();
    ViewWindow {
        start: behind.apply(anchor, 1),
        end: ahead.apply(anchor, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid date")
    }

    #[test]
    fn month_window_uses_calendar_months() {
        let window = compute_window(utc(2024, 3, 31), ViewMode::Month);

        assert_eq!(window.start, utc(2024, 1, 31));
        assert_eq!(window.end, utc(2024, 9, 30));
    }

    #[test]
    fn window_saturates_at_representable_range() {
        let window = compute_window(DateTime::<Utc>::MAX_UTC, ViewMode::Week);
        assert_eq!(window.end, DateTime::<Utc>::MAX_UTC);
        assert!(window.start < window.end);

        let window = compute_window(DateTime::<Utc>::MIN_UTC, ViewMode::Month);
        assert_eq!(window.start, DateTime::<Utc>::MIN_UTC);
        assert!(window.start < window.end);
    }

    #[test]
    fn fraction_of_rejects_degenerate_window() {
        let at = utc(2024, 1, 1);
        assert_eq!(ViewWindow::new(at, at).fraction_of(at), None);
    }
}
