use serde::{Deserialize, Serialize};

use crate::core::types::TimelineEntry;

/// Completion breakdown over an entry collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl ProgressSummary {
    #[must_use]
    pub fn from_entries(entries: &[TimelineEntry]) -> Self {
        entries
            .iter()
            .fold(Self::default(), |mut summary, entry| {
                summary.total += 1;
                match entry.progress.min(100) {
                    0 => summary.not_started += 1,
                    100 => summary.completed += 1,
                    _ => summary.in_progress += 1,
                }
                summary
            })
    }
}
