use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{EntryKind, TimelineEntry};
use crate::render::Color;

/// Symbolic color resolved against the active style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColorToken {
    Override(Color),
    Milestone,
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryShape {
    Bar,
    Diamond,
}

#[must_use]
pub fn color_of(entry: &TimelineEntry) -> ColorToken {
    if let Some(color) = entry.color {
        return ColorToken::Override(color);
    }
    match entry.kind {
        EntryKind::Milestone => ColorToken::Milestone,
        EntryKind::Project => ColorToken::Primary,
        EntryKind::Task => ColorToken::Secondary,
    }
}

#[must_use]
pub fn shape_of(entry: &TimelineEntry) -> EntryShape {
    match entry.kind {
        EntryKind::Milestone => EntryShape::Diamond,
        EntryKind::Task | EntryKind::Project => EntryShape::Bar,
    }
}

/// Badge text shown under the entry name.
#[must_use]
pub fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Task => "task",
        EntryKind::Milestone => "milestone",
        EntryKind::Project => "project",
    }
}

/// True when `instant` falls on the same UTC calendar day as `reference_now`.
#[must_use]
pub fn is_current_period(instant: DateTime<Utc>, reference_now: DateTime<Utc>) -> bool {
    instant.date_naive() == reference_now.date_naive()
}
