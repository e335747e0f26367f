use approx::assert_relative_eq;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use gantt_rs::api::{TimelineEngine, TimelineEngineConfig, TimelineStyle};
use gantt_rs::core::{NowMarkerPolicy, TimelineEntry, Viewport};
use gantt_rs::render::{MarkerShape, NullRenderer, RenderFrame};

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn config() -> TimelineEngineConfig {
    TimelineEngineConfig::new(Viewport::new(1000, 400))
        .with_initial_anchor(utc(2024, 6, 15))
        .with_legend(false)
}

fn engine_with(config: TimelineEngineConfig) -> TimelineEngine<NullRenderer> {
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_entries(vec![
        TimelineEntry::task("1", "Design", utc(2024, 6, 11), utc(2024, 6, 21))
            .with_progress(50)
            .with_assignee("alex"),
        TimelineEntry::milestone("2", "Review", utc(2024, 6, 30)).with_dependency("1"),
        TimelineEntry::task("3", "Out of range", utc(2025, 1, 1), utc(2025, 1, 10)),
        TimelineEntry::task("4", "Polish", utc(2024, 6, 20), utc(2024, 6, 25)).with_dependency("99"),
    ]);
    engine
}

fn has_text(frame: &RenderFrame, text: &str) -> bool {
    frame.texts.iter().any(|primitive| primitive.text == text)
}

#[test]
fn frame_contains_header_captions_and_tick_labels() {
    let frame = engine_with(config())
        .build_render_frame_at(utc(2024, 6, 20))
        .expect("frame");

    assert!(has_text(&frame, "June 2024"));
    assert!(has_text(&frame, "100%"));
    assert!(has_text(&frame, "Week 1"));
    assert!(has_text(&frame, "Week 2"));
}

#[test]
fn frame_contains_entry_labels_badges_and_assignee() {
    let frame = engine_with(config())
        .build_render_frame_at(utc(2024, 6, 20))
        .expect("frame");

    for text in ["Design", "Review", "Out of range", "Polish", "task", "milestone", "alex"] {
        assert!(has_text(&frame, text), "missing text `{text}`");
    }
}

#[test]
fn bars_are_drawn_only_for_visible_entries() {
    let engine = engine_with(config());
    let style = engine.style();
    let frame = engine.build_render_frame_at(utc(2024, 6, 20)).expect("frame");

    let task_bars: Vec<_> = frame
        .rects
        .iter()
        .filter(|rect| rect.fill_color == style.secondary_color)
        .collect();
    assert_eq!(task_bars.len(), 2);

    // Row 0: 10/74 .. 20/74 of an 808 px plot starting at x = 192.
    let design = task_bars[0];
    assert_relative_eq!(design.x, 192.0 + 808.0 * 10.0 / 74.0, epsilon = 1e-9);
    assert_relative_eq!(design.width, 808.0 * 10.0 / 74.0, epsilon = 1e-9);
    assert_relative_eq!(design.y, 44.0, epsilon = 1e-9);
    assert_relative_eq!(design.height, 24.0, epsilon = 1e-9);
}

#[test]
fn milestone_is_drawn_as_marker() {
    let engine = engine_with(config());
    let style = engine.style();
    let frame = engine.build_render_frame_at(utc(2024, 6, 20)).expect("frame");

    assert_eq!(frame.markers.len(), 1);
    let marker = frame.markers[0];
    assert_eq!(marker.shape, MarkerShape::Diamond);
    assert_eq!(marker.fill_color, style.milestone_color);
    assert_relative_eq!(marker.x, 192.0 + 808.0 * 29.0 / 74.0, epsilon = 1e-9);
    assert_relative_eq!(marker.y, 96.0, epsilon = 1e-9);
}

#[test]
fn dependency_curve_connects_bar_end_to_milestone() {
    let frame = engine_with(config())
        .build_render_frame_at(utc(2024, 6, 20))
        .expect("frame");

    assert_eq!(frame.curves.len(), 1);
    let curve = frame.curves[0];
    assert_relative_eq!(curve.x1, 192.0 + 808.0 * 20.0 / 74.0, epsilon = 1e-9);
    assert_relative_eq!(curve.x2, 192.0 + 808.0 * 29.0 / 74.0, epsilon = 1e-9);
    assert_relative_eq!(curve.y1, 56.0, epsilon = 1e-9);
    assert_relative_eq!(curve.y2, 96.0, epsilon = 1e-9);
    assert!(curve.cy < curve.y1);
    assert!(curve.arrow_head);
}

#[test]
fn now_marker_follows_policy() {
    let now = utc(2024, 6, 20);
    let now_lines = |frame: &RenderFrame, style: TimelineStyle| {
        frame
            .lines
            .iter()
            .filter(|line| {
                line.color == style.now_marker_color && line.stroke_width == style.now_marker_width
            })
            .count()
    };

    let engine = engine_with(config());
    let frame = engine.build_render_frame_at(now).expect("frame");
    assert_eq!(now_lines(&frame, engine.style()), 1);

    let engine = engine_with(config().with_now_marker_policy(NowMarkerPolicy::AnchorIsToday));
    let frame = engine.build_render_frame_at(now).expect("frame");
    assert_eq!(now_lines(&frame, engine.style()), 0);

    let frame = engine
        .build_render_frame_at(utc(2024, 6, 15) + TimeDelta::hours(10))
        .expect("frame");
    assert_eq!(now_lines(&frame, engine.style()), 1);
}

#[test]
fn current_day_column_is_highlighted() {
    let engine = engine_with(config());
    let highlight = engine.style().current_period_highlight_color;

    let on_tick = engine
        .build_render_frame_at(utc(2024, 6, 15) + TimeDelta::hours(9))
        .expect("frame");
    assert_eq!(
        on_tick
            .rects
            .iter()
            .filter(|rect| rect.fill_color == highlight)
            .count(),
        1
    );

    let between_ticks = engine.build_render_frame_at(utc(2024, 6, 20)).expect("frame");
    assert!(
        between_ticks
            .rects
            .iter()
            .all(|rect| rect.fill_color != highlight)
    );
}

#[test]
fn hovered_bar_gets_border() {
    let mut engine = engine_with(config());
    let style = engine.style();
    engine.pointer_move(350.0, 56.0);

    let frame = engine.build_render_frame_at(utc(2024, 6, 20)).expect("frame");
    let bordered: Vec<_> = frame
        .rects
        .iter()
        .filter(|rect| rect.border_width > 0.0)
        .collect();
    assert_eq!(bordered.len(), 1);
    assert_eq!(bordered[0].border_color, style.hover_border_color);
    assert_eq!(bordered[0].fill_color, style.secondary_color);
}

#[test]
fn legend_adds_swatches_and_summary() {
    let without = engine_with(config())
        .build_render_frame_at(utc(2024, 6, 20))
        .expect("frame");
    let with = engine_with(config().with_legend(true))
        .build_render_frame_at(utc(2024, 6, 20))
        .expect("frame");

    assert_eq!(with.markers.len(), without.markers.len() + 1);
    assert!(has_text(&with, "Project"));
    assert!(has_text(&with, "Today"));
    assert!(has_text(&with, "0 completed, 1 in progress, 3 not started"));
    assert!(!has_text(&without, "Today"));
}

#[test]
fn frame_build_is_deterministic() {
    let engine = engine_with(config());
    let first = engine.build_render_frame_at(utc(2024, 6, 20)).expect("first");
    let second = engine.build_render_frame_at(utc(2024, 6, 20)).expect("second");
    assert_eq!(first, second);
    first.validate().expect("frame is valid");
}

#[test]
fn bars_past_the_plot_edge_are_clipped() {
    let mut engine = TimelineEngine::new(NullRenderer::default(), config()).expect("engine init");
    engine.set_entries(vec![TimelineEntry::task(
        "1",
        "Long",
        utc(2024, 6, 20),
        utc(2024, 9, 1),
    )]);
    for _ in 0..4 {
        engine.zoom(gantt_rs::core::ZoomDirection::In);
    }

    let frame = engine.build_render_frame_at(utc(2024, 6, 20)).expect("frame");
    let style = engine.style();
    let bars: Vec<_> = frame
        .rects
        .iter()
        .filter(|rect| rect.fill_color == style.secondary_color)
        .collect();
    assert_eq!(bars.len(), 1);
    assert_relative_eq!(bars[0].x + bars[0].width, 1000.0, epsilon = 1e-9);
}
