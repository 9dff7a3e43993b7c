pub mod json_store;
pub mod memory;
pub mod schema;

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::stats::StatsMap;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stats file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stats file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported stats schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Storage slot holding the serialized stats mapping.
pub trait StatsPort {
    fn load(&self) -> Result<StatsMap, StoreError>;
    fn save(&mut self, entries: &StatsMap) -> Result<(), StoreError>;
}

/// Per-user data directory, also home to the log file.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sentdrill")
}
