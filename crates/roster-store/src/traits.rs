//! DocumentStore trait: the abstract client for a document database.
//!
//! The gateway is generic over this trait, so any backend (SQLite,
//! in-memory, or a test double) can be injected.

use async_trait::async_trait;
use roster_core::{Document, Fields};

use crate::error::Result;

/// Result of setting a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetResult {
    /// No document existed under the key.
    Created,
    /// An existing document was replaced.
    Replaced,
}

/// The DocumentStore trait: async interface for keyed documents.
///
/// All methods are async to support both sync (SQLite) and remote backends.
/// For SQLite, `spawn_blocking` is used internally to avoid blocking the
/// runtime.
///
/// # Design Notes
///
/// - Documents live in named collections and are addressed by a string key.
/// - `set_document` replaces the whole document; `update_document` merges.
/// - Listing order is backend-defined.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a full document, creating or replacing it.
    async fn set_document(&self, collection: &str, key: &str, fields: &Fields)
        -> Result<SetResult>;

    /// Get a document by key.
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>>;

    /// Get every document in a collection.
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>>;

    /// Overwrite the given fields of an existing document.
    ///
    /// Fields not named are left as stored. Returns
    /// [`StoreError::NotFound`](crate::StoreError::NotFound) if the document
    /// does not exist.
    async fn update_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<()>;

    /// Delete a document by key.
    ///
    /// Returns whether a document was removed.
    async fn delete_document(&self, collection: &str, key: &str) -> Result<bool>;
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<S> {
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: &Fields,
    ) -> Result<SetResult> {
        (**self).set_document(collection, key, fields).await
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>> {
        (**self).get_document(collection, key).await
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        (**self).list_documents(collection).await
    }

    async fn update_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<()> {
        (**self).update_document(collection, key, fields).await
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<bool> {
        (**self).delete_document(collection, key).await
    }
}
