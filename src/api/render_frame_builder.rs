use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{
    EntryShape, TimelineEntry, ViewWindow, color_of, dependency_edges, intersects_window,
    kind_label, now_marker, position, shape_of,
};
use crate::error::TimelineResult;
use crate::render::{
    Color, CurvePrimitive, LinePrimitive, MarkerPrimitive, MarkerShape, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::TimelineEngine;
use super::layout_helpers::{FrameGeometry, PixelBox, estimate_label_text_width_px};

const LABEL_PADDING_PX: f64 = 8.0;
const BADGE_PADDING_X_PX: f64 = 4.0;
const BADGE_PADDING_Y_PX: f64 = 2.0;
const BADGE_GAP_PX: f64 = 6.0;
const LEGEND_SWATCH_PX: f64 = 10.0;
const LEGEND_ITEM_GAP_PX: f64 = 16.0;

impl<R: Renderer> TimelineEngine<R> {
    /// Materializes backend-agnostic primitives for one draw pass.
    ///
    /// `now` drives the current-period highlight and the now marker, so
    /// passing a fixed instant yields a fully deterministic frame.
    pub fn build_render_frame_at(&self, now: DateTime<Utc>) -> TimelineResult<RenderFrame> {
        let viewport = self.config.viewport;
        let style = self.config.style;
        let geometry = FrameGeometry::new(viewport, self.config.layout);
        let window = self.view.window();
        let zoom = self.view.zoom_factor();
        let rows_bottom = geometry.rows_bottom(self.entries.len());

        let mut frame = RenderFrame::new(viewport).with_rect(RectPrimitive::new(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
            style.background_color,
        ));

        self.push_header(&mut frame, geometry, window, rows_bottom, now);
        for (row, entry) in self.entries.iter().enumerate() {
            self.push_entry_label(&mut frame, geometry, row, entry);
            self.push_entry_mark(&mut frame, geometry, window, zoom, row, entry);
        }
        self.push_dependency_curves(&mut frame, geometry, window, zoom);

        if let Some(fraction) = now_marker(
            window,
            zoom,
            now,
            self.view.anchor(),
            self.config.now_marker_policy,
        ) {
            let x = geometry.x_at(fraction);
            if x <= geometry.plot_right && rows_bottom > geometry.layout.header_height_px {
                frame = frame.with_line(LinePrimitive::new(
                    x,
                    geometry.layout.header_height_px,
                    x,
                    rows_bottom,
                    style.now_marker_width,
                    style.now_marker_color,
                ));
            }
        }

        if self.config.show_legend {
            self.push_legend(&mut frame, geometry, rows_bottom);
        }

        frame.validate()?;
        debug!(
            rects = frame.rects.len(),
            curves = frame.curves.len(),
            markers = frame.markers.len(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "timeline frame built"
        );
        Ok(frame)
    }

    fn push_header(
        &self,
        frame: &mut RenderFrame,
        geometry: FrameGeometry,
        window: ViewWindow,
        rows_bottom: f64,
        now: DateTime<Utc>,
    ) {
        let layout = geometry.layout;
        let style = self.config.style;
        let header_height = layout.header_height_px;

        frame.rects.push(RectPrimitive::new(
            0.0,
            0.0,
            geometry.plot_right,
            header_height,
            style.header_background_color,
        ));
        frame.texts.push(TextPrimitive::new(
            self.view.anchor_label(),
            LABEL_PADDING_PX,
            LABEL_PADDING_PX / 2.0,
            layout.font_size_px,
            style.label_text_color,
            TextHAlign::Left,
        ));
        frame.texts.push(TextPrimitive::new(
            self.view.zoom_label(),
            LABEL_PADDING_PX,
            LABEL_PADDING_PX / 2.0 + layout.font_size_px + 2.0,
            layout.small_font_size_px,
            style.secondary_text_color,
            TextHAlign::Left,
        ));

        // Tick columns are laid out on the unzoomed axis; zoom only scales
        // entry geometry.
        let ticks = self.view.axis_ticks(now);
        for (index, tick) in ticks.iter().enumerate() {
            let Some(fraction) = window.fraction_of(tick.time) else {
                continue;
            };
            let column_left = geometry.x_at(fraction);
            let column_right = ticks
                .get(index + 1)
                .and_then(|next| window.fraction_of(next.time))
                .map_or(geometry.plot_right, |next| geometry.x_at(next));

            if tick.is_current {
                frame.rects.push(RectPrimitive::new(
                    column_left,
                    0.0,
                    (column_right - column_left).max(0.0),
                    rows_bottom.max(header_height),
                    style.current_period_highlight_color,
                ));
            }
            frame.lines.push(LinePrimitive::new(
                column_left,
                0.0,
                column_left,
                rows_bottom.max(header_height),
                1.0,
                style.grid_line_color,
            ));
            if !tick.label.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    tick.label.clone(),
                    (column_left + column_right) / 2.0,
                    (header_height - layout.small_font_size_px) / 2.0,
                    layout.small_font_size_px,
                    if tick.is_current {
                        style.label_text_color
                    } else {
                        style.secondary_text_color
                    },
                    TextHAlign::Center,
                ));
            }
        }

        frame.lines.push(LinePrimitive::new(
            0.0,
            header_height,
            geometry.plot_right,
            header_height,
            1.0,
            style.grid_line_color,
        ));
        frame.lines.push(LinePrimitive::new(
            geometry.plot_left,
            0.0,
            geometry.plot_left,
            rows_bottom.max(header_height),
            1.0,
            style.grid_line_color,
        ));
    }

    fn push_entry_label(
        &self,
        frame: &mut RenderFrame,
        geometry: FrameGeometry,
        row: usize,
        entry: &TimelineEntry,
    ) {
        let layout = geometry.layout;
        let style = self.config.style;
        let top = geometry.row_top(row);

        if !entry.name.is_empty() {
            frame.texts.push(TextPrimitive::new(
                entry.name.clone(),
                LABEL_PADDING_PX,
                top + 2.0,
                layout.font_size_px,
                style.label_text_color,
                TextHAlign::Left,
            ));
        }

        let badge_text = kind_label(entry.kind);
        let badge = PixelBox {
            x: LABEL_PADDING_PX,
            y: top + layout.font_size_px + 4.0,
            width: estimate_label_text_width_px(badge_text, layout.small_font_size_px)
                + 2.0 * BADGE_PADDING_X_PX,
            height: layout.small_font_size_px + 2.0 * BADGE_PADDING_Y_PX,
        };
        let badge_fill = if entry.is_milestone() {
            style.milestone_badge_background_color
        } else {
            style.badge_background_color
        };
        frame.rects.push(
            RectPrimitive::new(badge.x, badge.y, badge.width, badge.height, badge_fill)
                .with_corner_radius(badge.height / 2.0),
        );
        frame.texts.push(TextPrimitive::new(
            badge_text,
            badge.x + BADGE_PADDING_X_PX,
            badge.y + BADGE_PADDING_Y_PX,
            layout.small_font_size_px,
            style.secondary_text_color,
            TextHAlign::Left,
        ));

        if let Some(assignee) = entry.assignee.as_deref().filter(|name| !name.is_empty()) {
            frame.texts.push(TextPrimitive::new(
                assignee,
                badge.x + badge.width + BADGE_GAP_PX,
                badge.y + BADGE_PADDING_Y_PX,
                layout.small_font_size_px,
                style.secondary_text_color,
                TextHAlign::Left,
            ));
        }
    }

    fn push_entry_mark(
        &self,
        frame: &mut RenderFrame,
        geometry: FrameGeometry,
        window: ViewWindow,
        zoom: f64,
        row: usize,
        entry: &TimelineEntry,
    ) {
        if !intersects_window(entry, window) {
            return;
        }
        let Some(placement) = position(entry, window, zoom) else {
            return;
        };

        let style = self.config.style;
        let color = style.resolve(color_of(entry));
        let hovered = self.interaction.hovered_entry() == Some(row);

        match shape_of(entry) {
            EntryShape::Bar => {
                let Some(bar) = geometry.bar_box(placement, row) else {
                    return;
                };
                let mut rect = RectPrimitive::new(bar.x, bar.y, bar.width, bar.height, color)
                    .with_corner_radius(style.bar_corner_radius.min(bar.height / 2.0));
                if hovered {
                    rect = rect.with_border(style.hover_border_width, style.hover_border_color);
                }
                frame.rects.push(rect);
                self.push_progress_pill(frame, geometry, bar, entry.progress_ratio());
            }
            EntryShape::Diamond => {
                let Some((x, y)) = geometry.marker_center(placement, row) else {
                    return;
                };
                let mut marker = MarkerPrimitive::new(
                    x,
                    y,
                    geometry.layout.milestone_size_px,
                    style.milestone_shape,
                    color,
                );
                if hovered {
                    marker = marker.with_border(style.hover_border_width, style.hover_border_color);
                }
                frame.markers.push(marker);
            }
        }
    }

    fn push_progress_pill(
        &self,
        frame: &mut RenderFrame,
        geometry: FrameGeometry,
        bar: PixelBox,
        progress_ratio: f64,
    ) {
        let layout = geometry.layout;
        let style = self.config.style;
        let track_width = bar.width - 2.0 * layout.progress_pill_padding_px;
        let pill_height = layout.progress_pill_height_px.min(bar.height);
        if track_width <= 0.0 {
            return;
        }

        let track = PixelBox {
            x: bar.x + layout.progress_pill_padding_px,
            y: bar.center_y() - pill_height / 2.0,
            width: track_width,
            height: pill_height,
        };
        frame.rects.push(
            RectPrimitive::new(
                track.x,
                track.y,
                track.width,
                track.height,
                style.progress_track_color,
            )
            .with_corner_radius(pill_height / 2.0),
        );
        if progress_ratio > 0.0 {
            frame.rects.push(
                RectPrimitive::new(
                    track.x,
                    track.y,
                    track.width * progress_ratio,
                    track.height,
                    style.progress_fill_color,
                )
                .with_corner_radius(pill_height / 2.0),
            );
        }
    }

    fn push_dependency_curves(
        &self,
        frame: &mut RenderFrame,
        geometry: FrameGeometry,
        window: ViewWindow,
        zoom: f64,
    ) {
        let style = self.config.style;
        for resolved in dependency_edges(&self.entries, window, zoom) {
            // Both ends must be on screen; edges into off-window rows would
            // point at bars that are not drawn.
            if !intersects_window(&self.entries[resolved.from_index], window)
                || !intersects_window(&self.entries[resolved.to_index], window)
            {
                continue;
            }

            let x1 = geometry.clamp_x(geometry.x_at(resolved.edge.start_x));
            let x2 = geometry.clamp_x(geometry.x_at(resolved.edge.end_x));
            let y1 = geometry.row_center_y(resolved.from_index);
            let y2 = geometry.row_center_y(resolved.to_index);
            frame.curves.push(CurvePrimitive {
                x1,
                y1,
                cx: (x1 + x2) / 2.0,
                cy: y1.min(y2) - geometry.layout.dependency_lift_px,
                x2,
                y2,
                stroke_width: style.dependency_line_width,
                color: style.dependency_line_color,
                arrow_head: true,
            });
        }
    }

    fn push_legend(&self, frame: &mut RenderFrame, geometry: FrameGeometry, top: f64) {
        let layout = geometry.layout;
        let style = self.config.style;
        let height = layout.legend_height_px;
        let center_y = top + height / 2.0;

        frame.rects.push(RectPrimitive::new(
            0.0,
            top,
            geometry.plot_right,
            height,
            style.header_background_color,
        ));

        let items: [(&str, Color, bool); 4] = [
            ("Project", style.primary_color, false),
            ("Task", style.secondary_color, false),
            ("Milestone", style.milestone_color, true),
            ("Today", style.now_marker_color, false),
        ];
        let mut x = LABEL_PADDING_PX;
        for (label, color, is_marker) in items {
            if is_marker {
                frame.markers.push(MarkerPrimitive::new(
                    x + LEGEND_SWATCH_PX / 2.0,
                    center_y,
                    LEGEND_SWATCH_PX / 2.0,
                    MarkerShape::Circle,
                    color,
                ));
            } else {
                frame.rects.push(
                    RectPrimitive::new(
                        x,
                        center_y - LEGEND_SWATCH_PX / 2.0,
                        LEGEND_SWATCH_PX,
                        LEGEND_SWATCH_PX,
                        color,
                    )
                    .with_corner_radius(2.0),
                );
            }
            let text_x = x + LEGEND_SWATCH_PX + BADGE_GAP_PX;
            frame.texts.push(TextPrimitive::new(
                label,
                text_x,
                center_y - layout.small_font_size_px / 2.0,
                layout.small_font_size_px,
                style.secondary_text_color,
                TextHAlign::Left,
            ));
            x = text_x
                + estimate_label_text_width_px(label, layout.small_font_size_px)
                + LEGEND_ITEM_GAP_PX;
        }

        let summary = self.progress_summary();
        frame.texts.push(TextPrimitive::new(
            format!(
                "{} completed, {} in progress, {} not started",
                summary.completed, summary.in_progress, summary.not_started
            ),
            geometry.plot_right - LABEL_PADDING_PX,
            center_y - layout.small_font_size_px / 2.0,
            layout.small_font_size_px,
            style.secondary_text_color,
            TextHAlign::Right,
        ));
    }
}
