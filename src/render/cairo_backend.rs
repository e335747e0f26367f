use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{TimelineError, TimelineResult};
use crate::render::{
    Color, CurvePrimitive, MarkerPrimitive, MarkerShape, RectPrimitive, RenderFrame, Renderer,
    TextHAlign,
};

const ARROW_HEAD_LENGTH_PX: f64 = 6.0;
const ARROW_HEAD_HALF_WIDTH_PX: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub curves_drawn: usize,
    pub markers_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can paint into a Cairo context owned by the host
/// (for example a toolkit draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> TimelineResult<()>;
}

/// Cairo + Pango renderer.
///
/// `Renderer::render` paints into an owned offscreen image surface;
/// `CairoContextRenderer` paints into a caller-provided context.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> TimelineResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(TimelineError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> TimelineResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the offscreen surface as PNG.
    pub fn write_png(&self, writer: &mut impl std::io::Write) -> TimelineResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| TimelineError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> TimelineResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            draw_rect(context, *rect)?;
            stats.rects_drawn += 1;
        }

        for curve in &frame.curves {
            draw_curve(context, *curve)?;
            stats.curves_drawn += 1;
        }

        for marker in &frame.markers {
            draw_marker(context, *marker)?;
            stats.markers_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> TimelineResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> TimelineResult<()> {
    append_rect_path(context, rect);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn draw_curve(context: &Context, curve: CurvePrimitive) -> TimelineResult<()> {
    // Cairo only has cubic curves; elevate the quadratic control point.
    let c1x = curve.x1 + (curve.cx - curve.x1) * (2.0 / 3.0);
    let c1y = curve.y1 + (curve.cy - curve.y1) * (2.0 / 3.0);
    let c2x = curve.x2 + (curve.cx - curve.x2) * (2.0 / 3.0);
    let c2y = curve.y2 + (curve.cy - curve.y2) * (2.0 / 3.0);

    apply_color(context, curve.color);
    context.set_line_width(curve.stroke_width);
    context.move_to(curve.x1, curve.y1);
    context.curve_to(c1x, c1y, c2x, c2y, curve.x2, curve.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke curve", err))?;

    if !curve.arrow_head {
        return Ok(());
    }

    let (dx, dy) = (curve.x2 - curve.cx, curve.y2 - curve.cy);
    let length = dx.hypot(dy);
    if length <= f64::EPSILON {
        return Ok(());
    }
    let (ux, uy) = (dx / length, dy / length);
    let base_x = curve.x2 - ux * ARROW_HEAD_LENGTH_PX;
    let base_y = curve.y2 - uy * ARROW_HEAD_LENGTH_PX;

    context.move_to(curve.x2, curve.y2);
    context.line_to(
        base_x - uy * ARROW_HEAD_HALF_WIDTH_PX,
        base_y + ux * ARROW_HEAD_HALF_WIDTH_PX,
    );
    context.line_to(
        base_x + uy * ARROW_HEAD_HALF_WIDTH_PX,
        base_y - ux * ARROW_HEAD_HALF_WIDTH_PX,
    );
    context.close_path();
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill arrow head", err))
}

fn draw_marker(context: &Context, marker: MarkerPrimitive) -> TimelineResult<()> {
    match marker.shape {
        MarkerShape::Diamond => {
            context.move_to(marker.x, marker.y - marker.size);
            context.line_to(marker.x + marker.size, marker.y);
            context.line_to(marker.x, marker.y + marker.size);
            context.line_to(marker.x - marker.size, marker.y);
            context.close_path();
        }
        MarkerShape::Circle => {
            context.new_sub_path();
            context.arc(marker.x, marker.y, marker.size, 0.0, 2.0 * PI);
        }
    }

    apply_color(context, marker.fill_color);
    if marker.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill marker", err))?;
        apply_color(context, marker.border_color);
        context.set_line_width(marker.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke marker border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill marker", err))
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> TimelineError {
    TimelineError::InvalidData(format!("{prefix}: {err}"))
}
