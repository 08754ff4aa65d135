use marquee_core::{RecordStore, StoreError};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Record store keeping one JSON document per collection under a data
/// directory. Writes land in a temp file first and are renamed into place,
/// so a crash mid-write never corrupts a collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let path = self.path_for(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)
            .map_err(|e| StoreError::Backend(format!("read {}: {e}", path.display())))?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::Backend(format!("create {}: {e}", self.dir.display())))?;

        let path = self.path_for(collection);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_string_pretty(&records)?;
        fs::write(&tmp, body)
            .map_err(|e| StoreError::Backend(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StoreError::Backend(format!("rename {}: {e}", path.display())))?;

        debug!(collection, records = records.len(), "collection saved");
        Ok(())
    }
}
