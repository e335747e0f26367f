use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::TimelineEntry;
use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::{EngineSnapshot, TimelineEngine};

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;
pub const TIMELINE_ENTRIES_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

/// Versioned envelope for persisted entry collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntriesJsonContractV1 {
    pub schema_version: u32,
    pub entries: Vec<TimelineEntry>,
}

impl EngineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a v1 envelope.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<EngineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: EngineSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != ENGINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(TimelineError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

pub fn entries_to_json_contract_v1_pretty(entries: &[TimelineEntry]) -> TimelineResult<String> {
    let payload = TimelineEntriesJsonContractV1 {
        schema_version: TIMELINE_ENTRIES_JSON_SCHEMA_V1,
        entries: entries.to_vec(),
    };
    serde_json::to_string_pretty(&payload).map_err(|e| {
        TimelineError::InvalidData(format!("failed to serialize entries contract v1: {e}"))
    })
}

/// Accepts either a bare entry array or a v1 envelope.
pub fn entries_from_json_compat_str(input: &str) -> TimelineResult<Vec<TimelineEntry>> {
    if let Ok(entries) = serde_json::from_str::<Vec<TimelineEntry>>(input) {
        return Ok(entries);
    }
    let payload: TimelineEntriesJsonContractV1 = serde_json::from_str(input).map_err(|e| {
        TimelineError::InvalidData(format!("failed to parse entries json payload: {e}"))
    })?;
    if payload.schema_version != TIMELINE_ENTRIES_JSON_SCHEMA_V1 {
        return Err(TimelineError::InvalidData(format!(
            "unsupported entries schema version: {}",
            payload.schema_version
        )));
    }
    Ok(payload.entries)
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn snapshot_json_contract_v1_pretty_at(&self, now: DateTime<Utc>) -> TimelineResult<String> {
        self.snapshot_at(now).to_json_contract_v1_pretty()
    }

    pub fn entries_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        entries_to_json_contract_v1_pretty(&self.entries)
    }
}
