//! Store doubles for observing and breaking the gateway's store calls.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use roster_core::{Document, Fields};
use roster_store::{DocumentStore, Result, SetResult, StoreError};

/// Snapshot of calls seen by a [`CountingStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub sets: usize,
    pub gets: usize,
    pub lists: usize,
    pub updates: usize,
    pub deletes: usize,
}

impl StoreCounts {
    /// Calls that modify the store.
    pub fn writes(&self) -> usize {
        self.sets + self.updates + self.deletes
    }
}

/// Wraps a store and counts every call that reaches it.
pub struct CountingStore<S> {
    inner: S,
    sets: AtomicUsize,
    gets: AtomicUsize,
    lists: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            sets: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            sets: self.sets.load(Ordering::SeqCst),
            gets: self.gets.load(Ordering::SeqCst),
            lists: self.lists.load(Ordering::SeqCst),
            updates: self.updates.load(Ordering::SeqCst),
            deletes: self.deletes.load(Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for CountingStore<S> {
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: &Fields,
    ) -> Result<SetResult> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set_document(collection, key, fields).await
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_document(collection, key).await
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list_documents(collection).await
    }

    async fn update_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_document(collection, key, fields).await
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<bool> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_document(collection, key).await
    }
}

/// Wraps a store and fails selected calls with [`StoreError::Unavailable`].
///
/// Either every call fails, or only calls addressing one of the configured
/// document keys. Listing fails only when everything fails.
pub struct FaultyStore<S> {
    inner: S,
    fail_all: bool,
    failing_keys: Mutex<HashSet<String>>,
}

impl<S> FaultyStore<S> {
    /// A store that passes every call through.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_all: false,
            failing_keys: Mutex::new(HashSet::new()),
        }
    }

    /// A store where every call fails.
    pub fn unavailable(inner: S) -> Self {
        Self {
            fail_all: true,
            ..Self::new(inner)
        }
    }

    /// Make calls addressing `key` fail from now on.
    pub fn fail_key(&self, key: impl Into<String>) {
        if let Ok(mut keys) = self.failing_keys.lock() {
            keys.insert(key.into());
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn check(&self, key: Option<&str>) -> Result<()> {
        let key_fails = match (key, self.failing_keys.lock()) {
            (Some(key), Ok(keys)) => keys.contains(key),
            _ => false,
        };
        if self.fail_all || key_fails {
            return Err(StoreError::Unavailable(format!(
                "injected failure for {}",
                key.unwrap_or("<collection>")
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for FaultyStore<S> {
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: &Fields,
    ) -> Result<SetResult> {
        self.check(Some(key))?;
        self.inner.set_document(collection, key, fields).await
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>> {
        self.check(Some(key))?;
        self.inner.get_document(collection, key).await
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        self.check(None)?;
        self.inner.list_documents(collection).await
    }

    async fn update_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<()> {
        self.check(Some(key))?;
        self.inner.update_document(collection, key, fields).await
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<bool> {
        self.check(Some(key))?;
        self.inner.delete_document(collection, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::FieldValue;
    use roster_store::MemoryStore;

    fn fields() -> Fields {
        let mut fields = Fields::new();
        fields.insert("firstName".into(), FieldValue::from("John"));
        fields
    }

    #[tokio::test]
    async fn test_counting_store_counts() {
        let store = CountingStore::new(MemoryStore::new());
        store.set_document("c", "1", &fields()).await.unwrap();
        store.get_document("c", "1").await.unwrap();
        store.update_document("c", "1", &fields()).await.unwrap();
        store.delete_document("c", "1").await.unwrap();
        store.list_documents("c").await.unwrap();

        let counts = store.counts();
        assert_eq!(counts.sets, 1);
        assert_eq!(counts.gets, 1);
        assert_eq!(counts.lists, 1);
        assert_eq!(counts.writes(), 3);
    }

    #[tokio::test]
    async fn test_faulty_store_unavailable() {
        let store = FaultyStore::unavailable(MemoryStore::new());
        assert!(matches!(
            store.set_document("c", "1", &fields()).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.list_documents("c").await.is_err());
    }

    #[tokio::test]
    async fn test_faulty_store_single_key() {
        let store = FaultyStore::new(MemoryStore::new());
        store.fail_key("2");

        store.set_document("c", "1", &fields()).await.unwrap();
        assert!(store.set_document("c", "2", &fields()).await.is_err());
        assert_eq!(store.list_documents("c").await.unwrap().len(), 1);
    }
}
