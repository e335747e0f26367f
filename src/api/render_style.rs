use serde::{Deserialize, Serialize};

use crate::core::ColorToken;
use crate::error::TimelineResult;
use crate::render::{Color, MarkerShape};

/// Color palette and mark styling for one render frame.
///
/// Every field has a default so partial JSON configs stay loadable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineStyle {
    pub background_color: Color,
    pub header_background_color: Color,
    pub grid_line_color: Color,
    pub current_period_highlight_color: Color,
    pub label_text_color: Color,
    pub secondary_text_color: Color,
    pub badge_background_color: Color,
    pub milestone_badge_background_color: Color,
    /// Default fill for milestones.
    pub milestone_color: Color,
    /// Default fill for projects.
    pub primary_color: Color,
    /// Default fill for tasks.
    pub secondary_color: Color,
    pub progress_track_color: Color,
    pub progress_fill_color: Color,
    pub dependency_line_color: Color,
    pub dependency_line_width: f64,
    pub now_marker_color: Color,
    pub now_marker_width: f64,
    pub hover_border_color: Color,
    pub hover_border_width: f64,
    pub bar_corner_radius: f64,
    pub milestone_shape: MarkerShape,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb8(0xff, 0xff, 0xff),
            header_background_color: Color::rgb8(0xf8, 0xfa, 0xfc),
            grid_line_color: Color::rgb8(0xe2, 0xe8, 0xf0),
            current_period_highlight_color: Color::rgb8(0xef, 0xf6, 0xff),
            label_text_color: Color::rgb8(0x0f, 0x17, 0x2a),
            secondary_text_color: Color::rgb8(0x64, 0x74, 0x8b),
            badge_background_color: Color::rgb8(0xf1, 0xf5, 0xf9),
            milestone_badge_background_color: Color::rgb8(0xfe, 0xe2, 0xe2),
            milestone_color: Color::rgb8(0xa8, 0x55, 0xf7),
            primary_color: Color::rgb8(0x3b, 0x82, 0xf6),
            secondary_color: Color::rgb8(0x22, 0xc5, 0x5e),
            progress_track_color: Color::rgba(1.0, 1.0, 1.0, 0.2),
            progress_fill_color: Color::rgb(1.0, 1.0, 1.0),
            dependency_line_color: Color::rgb8(0x94, 0xa3, 0xb8),
            dependency_line_width: 1.0,
            now_marker_color: Color::rgb8(0x3b, 0x82, 0xf6),
            now_marker_width: 2.0,
            hover_border_color: Color::rgb8(0x1e, 0x29, 0x3b),
            hover_border_width: 2.0,
            bar_corner_radius: 4.0,
            milestone_shape: MarkerShape::Diamond,
        }
    }
}

impl TimelineStyle {
    #[must_use]
    pub fn resolve(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Override(color) => color,
            ColorToken::Milestone => self.milestone_color,
            ColorToken::Primary => self.primary_color,
            ColorToken::Secondary => self.secondary_color,
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        for color in [
            self.background_color,
            self.header_background_color,
            self.grid_line_color,
            self.current_period_highlight_color,
            self.label_text_color,
            self.secondary_text_color,
            self.badge_background_color,
            self.milestone_badge_background_color,
            self.milestone_color,
            self.primary_color,
            self.secondary_color,
            self.progress_track_color,
            self.progress_fill_color,
            self.dependency_line_color,
            self.now_marker_color,
            self.hover_border_color,
        ] {
            color.validate()?;
        }

        super::validation::ensure_positive("dependency_line_width", self.dependency_line_width)?;
        super::validation::ensure_positive("now_marker_width", self.now_marker_width)?;
        super::validation::ensure_positive("hover_border_width", self.hover_border_width)?;
        super::validation::ensure_non_negative("bar_corner_radius", self.bar_corner_radius)
    }
}
