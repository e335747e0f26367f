use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{NowMarkerPolicy, ViewMode, Viewport};
use crate::error::{TimelineError, TimelineResult};

use super::TimelineStyle;
use super::validation::{ensure_non_negative, ensure_positive};

/// Pixel metrics of the timeline layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineLayout {
    /// Width of the left column holding entry names, badges and assignees.
    pub label_column_width_px: f64,
    pub header_height_px: f64,
    pub row_height_px: f64,
    pub row_gap_px: f64,
    /// Vertical inset of a bar inside its row.
    pub bar_inset_px: f64,
    /// Bars narrower than this are widened so they stay clickable.
    pub min_bar_width_px: f64,
    /// Half-extent of milestone markers.
    pub milestone_size_px: f64,
    /// Height of the progress pill drawn inside bars.
    pub progress_pill_height_px: f64,
    pub progress_pill_padding_px: f64,
    /// How far dependency curves bow above their endpoints.
    pub dependency_lift_px: f64,
    pub font_size_px: f64,
    pub small_font_size_px: f64,
    pub legend_height_px: f64,
}

impl Default for TimelineLayout {
    fn default() -> Self {
        Self {
            label_column_width_px: 192.0,
            header_height_px: 40.0,
            row_height_px: 32.0,
            row_gap_px: 8.0,
            bar_inset_px: 4.0,
            min_bar_width_px: 2.0,
            milestone_size_px: 6.0,
            progress_pill_height_px: 8.0,
            progress_pill_padding_px: 8.0,
            dependency_lift_px: 10.0,
            font_size_px: 12.0,
            small_font_size_px: 10.0,
            legend_height_px: 28.0,
        }
    }
}

impl TimelineLayout {
    /// Vertical distance between the tops of consecutive rows.
    #[must_use]
    pub fn row_pitch_px(self) -> f64 {
        self.row_height_px + self.row_gap_px
    }

    pub fn validate(self) -> TimelineResult<Self> {
        for (name, value) in [
            ("header_height_px", self.header_height_px),
            ("row_height_px", self.row_height_px),
            ("min_bar_width_px", self.min_bar_width_px),
            ("milestone_size_px", self.milestone_size_px),
            ("progress_pill_height_px", self.progress_pill_height_px),
            ("font_size_px", self.font_size_px),
            ("small_font_size_px", self.small_font_size_px),
            ("legend_height_px", self.legend_height_px),
        ] {
            ensure_positive(name, value)?;
        }
        for (name, value) in [
            ("label_column_width_px", self.label_column_width_px),
            ("row_gap_px", self.row_gap_px),
            ("bar_inset_px", self.bar_inset_px),
            ("progress_pill_padding_px", self.progress_pill_padding_px),
            ("dependency_lift_px", self.dependency_lift_px),
        ] {
            ensure_non_negative(name, value)?;
        }
        if self.bar_inset_px * 2.0 >= self.row_height_px {
            return Err(TimelineError::InvalidData(
                "`bar_inset_px` must leave a visible bar inside the row".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist their timeline setup; every
/// field except `viewport` falls back to its default when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub initial_mode: ViewMode,
    /// Anchor used for the first window; the current time when absent.
    #[serde(default)]
    pub initial_anchor: Option<DateTime<Utc>>,
    #[serde(default)]
    pub layout: TimelineLayout,
    #[serde(default)]
    pub style: TimelineStyle,
    #[serde(default)]
    pub now_marker_policy: NowMarkerPolicy,
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
}

fn default_show_legend() -> bool {
    true
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            initial_mode: ViewMode::default(),
            initial_anchor: None,
            layout: TimelineLayout::default(),
            style: TimelineStyle::default(),
            now_marker_policy: NowMarkerPolicy::default(),
            show_legend: default_show_legend(),
        }
    }

    #[must_use]
    pub fn with_initial_mode(mut self, mode: ViewMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Pins the initial anchor instead of using the current time.
    #[must_use]
    pub fn with_initial_anchor(mut self, anchor: DateTime<Utc>) -> Self {
        self.initial_anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: TimelineLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: TimelineStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_now_marker_policy(mut self, policy: NowMarkerPolicy) -> Self {
        self.now_marker_policy = policy;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        validate_viewport(self.viewport, self.layout)?;
        self.layout.validate()?;
        self.style.validate()?;
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse engine config: {e}"))
        })?;
        config.validate()
    }
}

pub(super) fn validate_viewport(viewport: Viewport, layout: TimelineLayout) -> TimelineResult<()> {
    if !viewport.is_valid() {
        return Err(TimelineError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    if layout.label_column_width_px >= f64::from(viewport.width) {
        return Err(TimelineError::InvalidData(format!(
            "label column ({} px) leaves no plot area in a {} px viewport",
            layout.label_column_width_px, viewport.width
        )));
    }
    Ok(())
}
