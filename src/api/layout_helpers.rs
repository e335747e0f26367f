use crate::core::{EntryPlacement, Viewport};

use super::TimelineLayout;

/// Extra pixels around milestone markers that still count as a hit.
const MARKER_HIT_SLOP_PX: f64 = 2.0;

pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Deterministic, backend-independent estimate.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ' ' => 0.33,
            'A'..='Z' => 0.68,
            _ => 0.56,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PixelBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelBox {
    pub(super) fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub(super) fn center_y(self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Pixel-space frame of the timeline: label column on the left, header on
/// top, one row per entry below it.
///
/// Shared by the frame builder and hit testing so clicks resolve against the
/// exact boxes that were drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct FrameGeometry {
    pub plot_left: f64,
    pub plot_right: f64,
    pub layout: TimelineLayout,
}

impl FrameGeometry {
    pub(super) fn new(viewport: Viewport, layout: TimelineLayout) -> Self {
        Self {
            plot_left: layout.label_column_width_px,
            plot_right: f64::from(viewport.width),
            layout,
        }
    }

    pub(super) fn plot_width(self) -> f64 {
        (self.plot_right - self.plot_left).max(0.0)
    }

    pub(super) fn x_at(self, fraction: f64) -> f64 {
        self.plot_left + fraction * self.plot_width()
    }

    pub(super) fn clamp_x(self, x: f64) -> f64 {
        x.clamp(self.plot_left, self.plot_right)
    }

    pub(super) fn row_top(self, row: usize) -> f64 {
        self.layout.header_height_px + row as f64 * self.layout.row_pitch_px()
    }

    pub(super) fn row_center_y(self, row: usize) -> f64 {
        self.row_top(row) + self.layout.row_height_px / 2.0
    }

    pub(super) fn rows_bottom(self, row_count: usize) -> f64 {
        self.row_top(row_count)
    }

    /// Bar rectangle for a placed entry, clipped to the plot's right edge.
    pub(super) fn bar_box(self, placement: EntryPlacement, row: usize) -> Option<PixelBox> {
        let x = self.x_at(placement.left);
        let available = self.plot_right - x;
        if available <= 0.0 {
            return None;
        }

        let drawn = self.x_at(placement.left + placement.width) - x;
        let width = drawn.max(self.layout.min_bar_width_px).min(available);
        Some(PixelBox {
            x,
            y: self.row_top(row) + self.layout.bar_inset_px,
            width,
            height: self.layout.row_height_px - 2.0 * self.layout.bar_inset_px,
        })
    }

    /// Center of a milestone marker; `None` once it falls past the plot.
    pub(super) fn marker_center(self, placement: EntryPlacement, row: usize) -> Option<(f64, f64)> {
        let x = self.x_at(placement.left);
        if x > self.plot_right {
            return None;
        }
        Some((x, self.row_center_y(row)))
    }

    pub(super) fn marker_hit_box(self, center: (f64, f64)) -> PixelBox {
        let half = self.layout.milestone_size_px + MARKER_HIT_SLOP_PX;
        PixelBox {
            x: center.0 - half,
            y: center.1 - half,
            width: 2.0 * half,
            height: 2.0 * half,
        }
    }
}
