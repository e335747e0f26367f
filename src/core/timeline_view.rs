use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ticks::{AxisTick, axis_ticks, compute_ticks};
use crate::core::window::{ViewMode, ViewWindow, compute_window};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.25;
pub const DEFAULT_ZOOM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigateDirection {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

/// User-controlled view parameters. Rebuilt fresh per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub anchor: DateTime<Utc>,
    pub mode: ViewMode,
    pub zoom: f64,
}

/// Owns `ViewState` and derives the window and ticks from it on demand.
///
/// Nothing derived is stored: every accessor recomputes from the current
/// anchor and mode, so a mode change and an anchor change landing together
/// can never observe a stale window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineView {
    state: ViewState,
}

impl TimelineView {
    #[must_use]
    pub fn new(anchor: DateTime<Utc>, mode: ViewMode) -> Self {
        Self {
            state: ViewState {
                anchor,
                mode,
                zoom: DEFAULT_ZOOM,
            },
        }
    }

    /// Restores a captured state. Zoom is snapped to the nearest
    /// `ZOOM_STEP` and clamped into `[MIN_ZOOM, MAX_ZOOM]`; a non-finite zoom
    /// falls back to `DEFAULT_ZOOM`.
    #[must_use]
    pub fn from_state(state: ViewState) -> Self {
        let zoom = if state.zoom.is_finite() {
            let steps = ((state.zoom - MIN_ZOOM) / ZOOM_STEP).round();
            (MIN_ZOOM + steps * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            DEFAULT_ZOOM
        };
        Self {
            state: ViewState { zoom, ..state },
        }
    }

    /// View anchored at the current wall-clock time in week mode.
    #[must_use]
    pub fn now() -> Self {
        Self::new(Utc::now(), ViewMode::Week)
    }

    #[must_use]
    pub fn state(self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn anchor(self) -> DateTime<Utc> {
        self.state.anchor
    }

    #[must_use]
    pub fn mode(self) -> ViewMode {
        self.state.mode
    }

    #[must_use]
    pub fn zoom_factor(self) -> f64 {
        self.state.zoom
    }

    #[must_use]
    pub fn window(self) -> ViewWindow {
        compute_window(self.state.anchor, self.state.mode)
    }

    #[must_use]
    pub fn ticks(self) -> Vec<DateTime<Utc>> {
        compute_ticks(self.window(), self.state.mode)
    }

    #[must_use]
    pub fn axis_ticks(self, now: DateTime<Utc>) -> Vec<AxisTick> {
        axis_ticks(self.window(), self.state.mode, now)
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        debug!(from = ?self.state.mode, to = ?mode, "view mode changed");
        self.state.mode = mode;
    }

    pub fn set_anchor(&mut self, anchor: DateTime<Utc>) {
        debug!(%anchor, "view anchor changed");
        self.state.anchor = anchor;
    }

    /// Shifts the anchor by the mode's navigation step (7 days, 14 days or
    /// one calendar month).
    pub fn navigate(&mut self, direction: NavigateDirection) {
        let step = match direction {
            NavigateDirection::Next => self.state.mode.navigation_step(),
            NavigateDirection::Prev => self.state.mode.navigation_step().reversed(),
        };
        self.state.anchor = step.apply(self.state.anchor, 1);
        debug!(
            ?direction,
            mode = ?self.state.mode,
            anchor = %self.state.anchor,
            "view navigated"
        );
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        self.state.zoom = match direction {
            ZoomDirection::In => (self.state.zoom + ZOOM_STEP).min(MAX_ZOOM),
            ZoomDirection::Out => (self.state.zoom - ZOOM_STEP).max(MIN_ZOOM),
        };
        debug!(?direction, zoom = self.state.zoom, "view zoomed");
    }

    /// Header caption for the anchor, e.g. `January 2024`.
    #[must_use]
    pub fn anchor_label(self) -> String {
        self.state.anchor.format("%B %Y").to_string()
    }

    /// Zoom caption as a whole percentage, e.g. `125%`.
    #[must_use]
    pub fn zoom_label(self) -> String {
        format!("{}%", (self.state.zoom * 100.0).round() as i64)
    }
}

impl Default for TimelineView {
    fn default() -> Self {
        Self::now()
    }
}
