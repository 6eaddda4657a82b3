//! # Roster Store
//!
//! Document storage for Roster. Provides a trait-based client interface
//! for keyed documents grouped into collections, with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The store module abstracts the document database behind the
//! [`DocumentStore`] trait, so the gateway is handed a client instead of
//! reaching for a global connection. The persistent implementation is
//! [`SqliteStore`], with [`MemoryStore`] for tests and embedding.
//!
//! ## Key Types
//!
//! - [`DocumentStore`] - The async trait for all document operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`SetResult`] - Whether a write created or replaced a document
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roster_store::{DocumentStore, SqliteStore};
//! use roster_core::{FieldValue, Fields};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("roster.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     let mut fields = Fields::new();
//!     fields.insert("firstName".into(), FieldValue::from("John"));
//!     store.set_document("employees", "1", &fields).await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Replace on set**: Setting an existing key replaces the whole document
//! - **Merge on update**: Updating writes only the given fields and fails on a missing key
//! - **Idempotent delete**: Deleting a missing key reports `false`, not an error

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{DocumentStore, SetResult};
