use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::render_model::is_current_period;
use crate::core::window::{ViewMode, ViewWindow};

/// Upper bound on ticks produced for a single window.
///
/// Windows from `compute_window` stay far below this (38 daily ticks at most);
/// the cap only bites on caller-built windows spanning decades in day mode.
pub const MAX_TICKS: usize = 4_096;

/// Header tick with its resolved label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTick {
    pub time: DateTime<Utc>,
    pub label: String,
    pub is_current: bool,
}

/// Tick instants from `window.start` up to and including the last one that is
/// `<= window.end`.
///
/// Each tick is derived from `window.start` directly (`start + i * step`), so
/// month ticks keep the start's day-of-month instead of drifting after a
/// short month.
#[must_use]
pub fn compute_ticks(window: ViewWindow, mode: ViewMode) -> Vec<DateTime<Utc>> {
    let step = mode.tick_step();
    let mut ticks = Vec::new();
    if window.end < window.start {
        return ticks;
    }

    for index in 0_i64.. {
        let tick = step.apply(window.start, index);
        if tick > window.end {
            break;
        }
        if ticks.last() == Some(&tick) {
            // Saturated at the representable range.
            break;
        }
        if ticks.len() == MAX_TICKS {
            warn!(
                mode = ?mode,
                max_ticks = MAX_TICKS,
                "tick generation truncated for oversized window"
            );
            break;
        }
        ticks.push(tick);
    }

    ticks
}

/// Header label for one tick.
///
/// Day ticks read `Jan 5`, month ticks `Jan 2024`. Week ticks read `Week N`
/// where `N` counts calendar weeks inside the tick's month, with weeks
/// starting on Sunday.
#[must_use]
pub fn tick_label(tick: DateTime<Utc>, mode: ViewMode) -> String {
    match mode {
        ViewMode::Day => tick.format("%b %-d").to_string(),
        ViewMode::Week => format!("Week {}", week_of_month(tick)),
        ViewMode::Month => tick.format("%b %Y").to_string(),
    }
}

/// Ticks plus labels and current-day highlighting, as drawn in the header.
#[must_use]
pub fn axis_ticks(window: ViewWindow, mode: ViewMode, now: DateTime<Utc>) -> Vec<AxisTick> {
    compute_ticks(window, mode)
        .into_iter()
        .map(|time| AxisTick {
            time,
            label: tick_label(time, mode),
            is_current: is_current_period(time, now),
        })
        .collect()
}

fn week_of_month(tick: DateTime<Utc>) -> u32 {
    let date = tick.date_naive();
    let first_weekday_offset = date
        .with_day(1)
        .map_or(0, |first| first.weekday().num_days_from_sunday());
    (date.day() + first_weekday_offset).div_ceil(7)
}
