use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use gantt_rs::core::{
    CalendarStep, MAX_TICKS, MAX_ZOOM, MIN_ZOOM, NavigateDirection, TimelineView, ViewMode,
    ViewState, ViewWindow, ZoomDirection, axis_ticks, compute_ticks, compute_window, tick_label,
};

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

#[test]
fn window_reach_per_mode() {
    let anchor = utc(2024, 6, 15);

    let day = compute_window(anchor, ViewMode::Day);
    assert_eq!(day.start, utc(2024, 6, 8));
    assert_eq!(day.end, utc(2024, 7, 15));

    let week = compute_window(anchor, ViewMode::Week);
    assert_eq!(week.start, utc(2024, 6, 1));
    assert_eq!(week.end, utc(2024, 8, 14));

    let month = compute_window(anchor, ViewMode::Month);
    assert_eq!(month.start, utc(2024, 4, 15));
    assert_eq!(month.end, utc(2024, 12, 15));
}

#[test]
fn ticks_cover_window_inclusive_per_mode() {
    let anchor = utc(2024, 6, 15);

    let day_ticks = TimelineView::new(anchor, ViewMode::Day).ticks();
    assert_eq!(day_ticks.len(), 38);
    assert_eq!(day_ticks.first(), Some(&utc(2024, 6, 8)));
    assert_eq!(day_ticks.last(), Some(&utc(2024, 7, 15)));

    let week_ticks = TimelineView::new(anchor, ViewMode::Week).ticks();
    assert_eq!(week_ticks.len(), 11);
    assert_eq!(week_ticks.last(), Some(&utc(2024, 8, 10)));
    assert!(
        week_ticks
            .windows(2)
            .all(|pair| pair[1] - pair[0] == TimeDelta::days(7))
    );

    let month_ticks = TimelineView::new(anchor, ViewMode::Month).ticks();
    assert_eq!(month_ticks.len(), 9);
    assert_eq!(month_ticks.last(), Some(&utc(2024, 12, 15)));
}

#[test]
fn month_ticks_keep_day_of_month_after_short_months() {
    let ticks = TimelineView::new(utc(2024, 3, 31), ViewMode::Month).ticks();

    assert_eq!(
        ticks,
        vec![
            utc(2024, 1, 31),
            utc(2024, 2, 29),
            utc(2024, 3, 31),
            utc(2024, 4, 30),
            utc(2024, 5, 31),
            utc(2024, 6, 30),
            utc(2024, 7, 31),
            utc(2024, 8, 31),
            utc(2024, 9, 30),
        ]
    );
}

#[test]
fn tick_labels_per_mode() {
    assert_eq!(tick_label(utc(2024, 6, 8), ViewMode::Day), "Jun 8");
    assert_eq!(tick_label(utc(2024, 6, 1), ViewMode::Week), "Week 1");
    assert_eq!(tick_label(utc(2024, 6, 8), ViewMode::Week), "Week 2");
    assert_eq!(tick_label(utc(2024, 6, 30), ViewMode::Week), "Week 6");
    assert_eq!(tick_label(utc(2024, 4, 15), ViewMode::Month), "Apr 2024");
}

#[test]
fn axis_ticks_flag_only_the_current_day() {
    let window = compute_window(utc(2024, 6, 15), ViewMode::Week);
    let now = utc(2024, 6, 15) + TimeDelta::hours(9);

    let ticks = axis_ticks(window, ViewMode::Week, now);
    let current: Vec<_> = ticks.iter().filter(|tick| tick.is_current).collect();

    assert_eq!(current.len(), 1);
    assert_eq!(current[0].time, utc(2024, 6, 15));
    assert_eq!(current[0].label, "Week 3");
}

#[test]
fn ticks_for_caller_built_windows() {
    let start = utc(2024, 1, 1);
    let degenerate = ViewWindow::new(start, start);
    assert_eq!(compute_ticks(degenerate, ViewMode::Day), vec![start]);

    let inverted = ViewWindow::new(utc(2024, 2, 1), start);
    assert!(compute_ticks(inverted, ViewMode::Week).is_empty());

    let huge = ViewWindow::new(utc(1900, 1, 1), utc(2100, 1, 1));
    assert_eq!(compute_ticks(huge, ViewMode::Day).len(), MAX_TICKS);
}

#[test]
fn navigate_week_shifts_fourteen_days() {
    let mut view = TimelineView::new(utc(2024, 6, 15), ViewMode::Week);

    view.navigate(NavigateDirection::Next);
    assert_eq!(view.anchor(), utc(2024, 6, 29));
    view.navigate(NavigateDirection::Next);
    assert_eq!(view.anchor(), utc(2024, 7, 13));

    view.navigate(NavigateDirection::Prev);
    view.navigate(NavigateDirection::Prev);
    assert_eq!(view.anchor(), utc(2024, 6, 15));
}

#[test]
fn navigate_day_and_month_steps() {
    let mut day = TimelineView::new(utc(2024, 6, 15), ViewMode::Day);
    day.navigate(NavigateDirection::Prev);
    assert_eq!(day.anchor(), utc(2024, 6, 8));

    let mut month = TimelineView::new(utc(2024, 1, 31), ViewMode::Month);
    month.navigate(NavigateDirection::Next);
    assert_eq!(month.anchor(), utc(2024, 2, 29));
}

#[test]
fn navigate_recomputes_window_from_new_anchor() {
    let mut view = TimelineView::new(utc(2024, 6, 15), ViewMode::Week);
    view.navigate(NavigateDirection::Next);

    assert_eq!(view.window(), compute_window(utc(2024, 6, 29), ViewMode::Week));
}

#[test]
fn zoom_clamps_to_bounds() {
    let mut view = TimelineView::new(utc(2024, 6, 15), ViewMode::Week);
    for _ in 0..7 {
        view.zoom(ZoomDirection::In);
    }
    assert_eq!(view.zoom_factor(), MAX_ZOOM);
    assert_eq!(view.zoom_label(), "200%");

    for _ in 0..10 {
        view.zoom(ZoomDirection::Out);
    }
    assert_eq!(view.zoom_factor(), MIN_ZOOM);
    assert_eq!(view.zoom_label(), "50%");
}

#[test]
fn zoom_does_not_change_window() {
    let mut view = TimelineView::new(utc(2024, 6, 15), ViewMode::Week);
    let before = view.window();
    view.zoom(ZoomDirection::In);

    assert_eq!(view.window(), before);
    assert_eq!(view.zoom_label(), "125%");
}

#[test]
fn mode_change_keeps_anchor_and_zoom() {
    let mut view = TimelineView::new(utc(2024, 6, 15), ViewMode::Week);
    view.zoom(ZoomDirection::In);
    view.set_mode(ViewMode::Month);

    assert_eq!(view.anchor(), utc(2024, 6, 15));
    assert_eq!(view.zoom_factor(), 1.25);
    assert_eq!(view.window(), compute_window(utc(2024, 6, 15), ViewMode::Month));
}

#[test]
fn anchor_label_reads_month_and_year() {
    let view = TimelineView::new(utc(2024, 6, 15), ViewMode::Day);
    assert_eq!(view.anchor_label(), "June 2024");
}

#[test]
fn restored_state_clamps_zoom() {
    let view = TimelineView::from_state(ViewState {
        anchor: utc(2024, 6, 15),
        mode: ViewMode::Day,
        zoom: 9.0,
    });
    assert_eq!(view.zoom_factor(), MAX_ZOOM);

    let view = TimelineView::from_state(ViewState {
        anchor: utc(2024, 6, 15),
        mode: ViewMode::Day,
        zoom: f64::NAN,
    });
    assert_eq!(view.zoom_factor(), 1.0);

    let mut view = TimelineView::from_state(ViewState {
        anchor: utc(2024, 6, 15),
        mode: ViewMode::Day,
        zoom: 0.8,
    });
    assert_eq!(view.zoom_factor(), 0.75);
    view.zoom(ZoomDirection::In);
    assert_eq!(view.zoom_factor(), 1.0);

    let view = TimelineView::from_state(ViewState {
        anchor: utc(2024, 6, 15),
        mode: ViewMode::Day,
        zoom: 0.1,
    });
    assert_eq!(view.zoom_factor(), MIN_ZOOM);
}

#[test]
fn calendar_steps_reverse() {
    assert_eq!(CalendarStep::Days(14).reversed(), CalendarStep::Days(-14));
    assert_eq!(
        CalendarStep::Months(1).apply(utc(2024, 1, 31), 2),
        utc(2024, 3, 31)
    );
}

#[test]
fn view_mode_serializes_lowercase() {
    let json = serde_json::to_string(&ViewMode::ALL).expect("serialize modes");
    assert_eq!(json, r#"["day","week","month"]"#);
}
