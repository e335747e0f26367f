use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::span_millis;
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Closed tag deciding how an entry is colored and shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Task,
    Milestone,
    Project,
}

/// One visualized unit of work on the timeline.
///
/// Entries are owned by the caller and treated as an immutable snapshot for
/// one render pass. `dependencies` may reference ids that do not exist in the
/// current collection; those references are ignored during layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub dependencies: SmallVec<[String; 4]>,
    #[serde(default)]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl TimelineEntry {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: EntryKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            progress: 0,
            dependencies: SmallVec::new(),
            kind,
            assignee: None,
            color: None,
        }
    }

    #[must_use]
    pub fn task(
        id: impl Into<String>,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self::new(id, name, EntryKind::Task, start, end)
    }

    #[must_use]
    pub fn project(
        id: impl Into<String>,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self::new(id, name, EntryKind::Project, start, end)
    }

    /// Zero-length entry anchored at `at`.
    #[must_use]
    pub fn milestone(id: impl Into<String>, name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(id, name, EntryKind::Milestone, at, at)
    }

    /// Sets progress, clamped to `0..=100`.
    #[must_use]
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }

    #[must_use]
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn is_milestone(&self) -> bool {
        matches!(self.kind, EntryKind::Milestone)
    }

    /// Progress as a `0.0..=1.0` ratio, tolerating out-of-range deserialized values.
    #[must_use]
    pub fn progress_ratio(&self) -> f64 {
        f64::from(self.progress.min(100)) / 100.0
    }

    /// Entry duration in milliseconds; inverted ranges collapse to zero.
    #[must_use]
    pub fn duration_millis(&self) -> f64 {
        span_millis(self.start, self.end).max(0.0)
    }

    #[must_use]
    pub fn has_inverted_range(&self) -> bool {
        self.end < self.start
    }
}
