use crate::dashboard::*;

use std::collections::HashMap;
use std::time::SystemTime;

/// Read-through cache over parsed submission files.
///
/// Entries are keyed on the canonical path and invalidated when the file's
/// modification time changes, so a reload of an unchanged dataset reuses
/// the parsed records. There is a single consumer at a time, so no locking.
pub struct DatasetCache {
    entries: HashMap<PathBuf, (SystemTime, Vec<Record>)>,
}

impl DatasetCache {
    pub fn new() -> DatasetCache {
        DatasetCache {
            entries: HashMap::new(),
        }
    }

    pub fn load<F>(&mut self, path: &str, loader: F) -> DashResult<Vec<Record>>
    where
        F: FnOnce(&str) -> DashResult<Vec<Record>>,
    {
        let key: PathBuf = fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
        let mtime = fs::metadata(path)
            .and_then(|m| m.modified())
            .context(ReadingMetadataSnafu { path })?;

        if let Some((cached_mtime, records)) = self.entries.get(&key) {
            if *cached_mtime == mtime {
                info!("DatasetCache: reusing {:?} ({:?} records)", path, records.len());
                return Ok(records.clone());
            }
            info!("DatasetCache: {:?} changed on disk, reloading", path);
        }

        let records = loader(path)?;
        self.entries.insert(key, (mtime, records.clone()));
        Ok(records)
    }
}
