use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::engine::stats::StatsMap;
use crate::store::schema::{self, STATS_KEY};
use crate::store::{StatsPort, StoreError, data_dir};

/// Stats slot kept as one JSON file named after [`STATS_KEY`].
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self, StoreError> {
        Self::with_base_dir(data_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn file_path(&self) -> PathBuf {
        self.base_dir.join(format!("{STATS_KEY}.json"))
    }
}

impl StatsPort for JsonStore {
    fn load(&self) -> Result<StatsMap, StoreError> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(StatsMap::new());
        }
        let content = fs::read_to_string(&path)?;
        schema::decode(&content)
    }

    fn save(&mut self, entries: &StatsMap) -> Result<(), StoreError> {
        let path = self.file_path();
        let tmp_path = path.with_extension("json.tmp");

        let json = schema::encode(entries)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::engine::stats::{StatsEntry, StatsStore};

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = make_test_store();
        assert!(!store.file_path().exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn file_is_named_after_fixed_key() {
        let (_dir, store) = make_test_store();
        let name = store.file_path().file_name().unwrap().to_string_lossy().to_string();
        assert_eq!(name, "sentence-practice-stats-v1.json");
    }

    #[test]
    fn save_then_load() {
        let (_dir, mut store) = make_test_store();
        let mut entries = StatsMap::new();
        entries.insert(
            "busy-morning".into(),
            StatsEntry {
                attempts: 4,
                correct: 3,
                last_practiced: None,
            },
        );
        store.save(&entries).unwrap();
        assert_eq!(store.load().unwrap(), entries);
    }

    #[test]
    fn save_leaves_no_tmp_file() {
        let (dir, mut store) = make_test_store();
        store.save(&StatsMap::new()).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn corrupt_file_is_an_error_and_stats_store_starts_empty() {
        let (dir, store) = make_test_store();
        fs::write(store.file_path(), "{ this is not json").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Malformed(_))));

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let stats = StatsStore::open(Box::new(reopened));
        assert!(stats.entries().is_empty());
    }

    #[test]
    fn stats_survive_reopen() {
        let (dir, store) = make_test_store();
        let mut stats = StatsStore::open(Box::new(store));
        stats.record("driver-no-change", true);
        stats.record("driver-no-change", false);
        drop(stats);

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let stats = StatsStore::open(Box::new(reopened));
        let entry = stats.entry("driver-no-change");
        assert_eq!(entry.attempts, 2);
        assert_eq!(entry.correct, 1);
        assert_eq!(stats.accuracy_for("driver-no-change"), "50%");
    }

    #[test]
    fn save_fails_when_directory_vanishes() {
        let (dir, _) = make_test_store();
        let gone = dir.path().join("nonexistent_subdir");
        let mut bad_store = JsonStore {
            base_dir: gone.clone(),
        };
        assert!(matches!(bad_store.save(&StatsMap::new()), Err(StoreError::Io(_))));
        assert!(!gone.exists());
    }
}
