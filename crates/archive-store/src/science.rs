use std::fs;
use std::io::Write;
use std::path::Path;

use archive_types::models::ScienceCounts;
use serde::Serialize;
use tracing::debug;

use crate::{Result, SCIENCE_FILE, Store, StoreError, read_json_opt};

impl Store {
    /// Current usage counters. A missing science file means nothing has been recorded yet.
    pub fn load_science(&self) -> Result<ScienceCounts> {
        Ok(read_json_opt(&self.path(SCIENCE_FILE))?.unwrap_or_default())
    }

    /// Increment `metric` by one and return the new count.
    ///
    /// The read-modify-write runs under `science_lock`, so concurrent callers
    /// sharing this `Store` never lose an increment. The file is replaced
    /// atomically, so readers see either the old or the new counters.
    pub fn record_metric(&self, metric: &str) -> Result<u64> {
        let _guard = self
            .science_lock
            .lock()
            .map_err(|_| StoreError::Poisoned)?;

        let mut counts = self.load_science()?;
        let count = counts.entry(metric.to_string()).or_insert(0);
        *count += 1;
        let count = *count;

        write_json_atomic(&self.path(SCIENCE_FILE), &counts)?;

        debug!("Metric '{}' is now {}", metric, count);
        Ok(count)
    }
}

/// Write to a sibling temp file, fsync, then rename over `path`.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let payload = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp_path).map_err(io_err)?;
        file.write_all(&payload).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
    }
    fs::rename(&tmp_path, path).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_record_creates_and_increments() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();

        assert!(store.load_science().unwrap().is_empty());
        assert_eq!(store.record_metric("visited").unwrap(), 1);
        assert_eq!(store.record_metric("visited").unwrap(), 2);
        assert_eq!(store.record_metric("clicked").unwrap(), 1);

        let counts = store.load_science().unwrap();
        assert_eq!(counts["visited"], 2);
        assert_eq!(counts["clicked"], 1);
        assert!(!tmp.path().join("science.json.tmp").exists());
    }

    #[test]
    fn test_existing_counters_are_kept() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(SCIENCE_FILE), r#"{"visited": 41, "other": 3}"#).unwrap();
        let store = Store::open(tmp.path()).unwrap();

        assert_eq!(store.record_metric("visited").unwrap(), 42);
        assert_eq!(store.load_science().unwrap()["other"], 3);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Arc::new(Store::open(tmp.path()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        store.record_metric("visited").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.load_science().unwrap()["visited"], 200);
    }

    #[test]
    fn test_corrupt_science_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(SCIENCE_FILE), "[1, 2").unwrap();
        let store = Store::open(tmp.path()).unwrap();
        assert!(matches!(
            store.record_metric("visited"),
            Err(StoreError::Parse { .. })
        ));
    }
}
