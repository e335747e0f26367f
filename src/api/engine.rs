use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{TimelineEntry, TimelineView};
use crate::error::TimelineResult;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::TimelineEngineConfig;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Callback fired when the user activates (clicks) an entry.
pub type EntryActivatedCallback = Box<dyn FnMut(&TimelineEntry)>;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the view state, the entry collection and pointer
/// state, and turns them into `RenderFrame`s for its renderer.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimelineEngineConfig,
    pub(super) view: TimelineView,
    pub(super) entries: Vec<TimelineEntry>,
    pub(super) interaction: InteractionState,
    pub(super) on_entry_activated: Option<EntryActivatedCallback>,
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn new(renderer: R, config: TimelineEngineConfig) -> TimelineResult<Self> {
        let config = config.validate()?;
        let anchor = config.initial_anchor.unwrap_or_else(Utc::now);
        let view = TimelineView::new(anchor, config.initial_mode);
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            mode = ?config.initial_mode,
            %anchor,
            "timeline engine created"
        );

        Ok(Self {
            renderer,
            config,
            view,
            entries: Vec::new(),
            interaction: InteractionState::default(),
            on_entry_activated: None,
        })
    }

    /// Builds and renders a frame against the current wall-clock time.
    pub fn render(&mut self) -> TimelineResult<()> {
        self.render_at(Utc::now())
    }

    /// Builds and renders a frame with `now` as the reference instant for
    /// the today highlight and the now marker.
    pub fn render_at(&mut self, now: DateTime<Utc>) -> TimelineResult<()> {
        let frame = self.build_render_frame_at(now)?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        now: DateTime<Utc>,
    ) -> TimelineResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame_at(now)?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
