//! SQLite implementation of the DocumentStore trait.
//!
//! This is the persistent storage backend for Roster. It uses rusqlite with
//! bundled SQLite, wrapped in async via tokio::spawn_blocking. Field maps
//! are stored as CBOR blobs.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use roster_core::{Document, Fields};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::{DocumentStore, SetResult};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        tracing::debug!(path = %path.display(), "opened sqlite document store");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking operation on the connection off the async runtime.
    async fn blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|e| {
                StoreError::Database(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                    Some(format!("mutex poisoned: {}", e)),
                ))
            })?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                Some(format!("spawn_blocking failed: {}", e)),
            ))
        })?
    }
}

// Encode a field map to CBOR
fn encode_fields(fields: &Fields) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(fields, &mut buf)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(buf)
}

// Decode a CBOR field map
fn decode_fields(key: &str, bytes: &[u8]) -> Result<Fields> {
    ciborium::from_reader(bytes)
        .map_err(|e| StoreError::InvalidData(format!("document {}: {}", key, e)))
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: &Fields,
    ) -> Result<SetResult> {
        let collection = collection.to_string();
        let key = key.to_string();
        let encoded = encode_fields(fields)?;

        self.blocking(move |conn| {
            let tx = conn.transaction()?;
            let now = now_millis();

            let existing: Option<i64> = tx
                .query_row(
                    "SELECT 1 FROM documents WHERE collection = ?1 AND doc_key = ?2",
                    params![collection, key],
                    |row| row.get(0),
                )
                .optional()?;

            tx.execute(
                "INSERT INTO documents (collection, doc_key, fields, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT(collection, doc_key) DO UPDATE SET
                    fields = excluded.fields,
                    updated_at = excluded.updated_at",
                params![collection, key, encoded, now],
            )?;

            tx.commit()?;

            Ok(match existing {
                Some(_) => SetResult::Replaced,
                None => SetResult::Created,
            })
        })
        .await
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>> {
        let collection = collection.to_string();
        let key = key.to_string();

        self.blocking(move |conn| {
            let bytes: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT fields FROM documents WHERE collection = ?1 AND doc_key = ?2",
                    params![collection, key],
                    |row| row.get(0),
                )
                .optional()?;

            match bytes {
                Some(b) => {
                    let fields = decode_fields(&key, &b)?;
                    Ok(Some(Document::new(key, fields)))
                }
                None => Ok(None),
            }
        })
        .await
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let collection = collection.to_string();

        self.blocking(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT doc_key, fields FROM documents WHERE collection = ?1 ORDER BY created_at",
            )?;

            let rows = stmt
                .query_map(params![collection], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(key, bytes)| -> Result<Document> {
                    let fields = decode_fields(&key, &bytes)?;
                    Ok(Document::new(key, fields))
                })
                .collect()
        })
        .await
    }

    async fn update_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<()> {
        let collection = collection.to_string();
        let key = key.to_string();
        let patch = fields.clone();

        self.blocking(move |conn| {
            let tx = conn.transaction()?;

            let bytes: Option<Vec<u8>> = tx
                .query_row(
                    "SELECT fields FROM documents WHERE collection = ?1 AND doc_key = ?2",
                    params![collection, key],
                    |row| row.get(0),
                )
                .optional()?;

            let Some(bytes) = bytes else {
                return Err(StoreError::NotFound { collection, key });
            };

            let mut doc = Document::new(key.clone(), decode_fields(&key, &bytes)?);
            doc.merge(patch);

            tx.execute(
                "UPDATE documents SET fields = ?3, updated_at = ?4
                 WHERE collection = ?1 AND doc_key = ?2",
                params![collection, key, encode_fields(&doc.fields)?, now_millis()],
            )?;

            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<bool> {
        let collection = collection.to_string();
        let key = key.to_string();

        self.blocking(move |conn| {
            let removed = conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND doc_key = ?2",
                params![collection, key],
            )?;
            Ok(removed > 0)
        })
        .await
    }
}
