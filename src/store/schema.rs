use serde::{Deserialize, Serialize};

use crate::engine::stats::StatsMap;
use crate::store::StoreError;

/// Fixed key naming the single storage slot.
pub const STATS_KEY: &str = "sentence-practice-stats-v1";

const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsData {
    pub schema_version: u32,
    pub entries: StatsMap,
}

impl StatsData {
    pub fn new(entries: StatsMap) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries,
        }
    }
}

/// Accepts both the versioned envelope and a bare id→entry map with
/// `times` counters, as older stats files were written.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredStats {
    Versioned(StatsData),
    Bare(StatsMap),
}

pub fn decode(content: &str) -> Result<StatsMap, StoreError> {
    let mut entries = match serde_json::from_str::<StoredStats>(content) {
        Ok(StoredStats::Versioned(data)) => {
            if data.schema_version != SCHEMA_VERSION {
                return Err(StoreError::UnsupportedVersion {
                    found: data.schema_version,
                    expected: SCHEMA_VERSION,
                });
            }
            data.entries
        }
        Ok(StoredStats::Bare(entries)) => entries,
        // Re-parse as the envelope so the error names the real problem.
        Err(_) => serde_json::from_str::<StatsData>(content)?.entries,
    };
    for entry in entries.values_mut() {
        entry.correct = entry.correct.min(entry.attempts);
    }
    Ok(entries)
}

pub fn encode(entries: &StatsMap) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(&StatsData::new(entries.clone()))?)
}
