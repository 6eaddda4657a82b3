//! In-memory implementation of the DocumentStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use roster_core::{Document, Fields};

use crate::error::{Result, StoreError};
use crate::traits::{DocumentStore, SetResult};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    /// Collection name -> (document key -> fields).
    collections: RwLock<HashMap<String, BTreeMap<String, Fields>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, BTreeMap<String, Fields>>>> {
        self.collections
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, BTreeMap<String, Fields>>>> {
        self.collections
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: &Fields,
    ) -> Result<SetResult> {
        let mut collections = self.write()?;
        let docs = collections.entry(collection.to_string()).or_default();

        match docs.insert(key.to_string(), fields.clone()) {
            Some(_) => Ok(SetResult::Replaced),
            None => Ok(SetResult::Created),
        }
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .map(|fields| Document::new(key, fields.clone())))
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(key, fields)| Document::new(key.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<()> {
        let mut collections = self.write()?;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(key))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            })?;

        existing.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<bool> {
        let mut collections = self.write()?;
        Ok(collections
            .get_mut(collection)
            .map(|docs| docs.remove(key).is_some())
            .unwrap_or(false))
    }
}
