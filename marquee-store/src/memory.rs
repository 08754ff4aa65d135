use marquee_core::{RecordStore, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Record store held entirely in memory. The workhorse for tests and for
/// sessions that do not want a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn save(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        collections.insert(collection.to_owned(), records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_collection_loads_empty() {
        let store = MemoryStore::new();
        assert!(store.load("cinemas").unwrap().is_empty());
    }

    #[test]
    fn save_replaces_the_collection() {
        let store = MemoryStore::new();
        store.save("cinemas", vec![json!({"id": 1}), json!({"id": 2})]).unwrap();
        store.save("cinemas", vec![json!({"id": 3})]).unwrap();

        let records = store.load("cinemas").unwrap();
        assert_eq!(records, vec![json!({"id": 3})]);
    }
}
