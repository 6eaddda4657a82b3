//! # Roster
//!
//! The record store gateway for employee records: create, list, update and
//! delete records held in a document collection.
//!
//! ## Overview
//!
//! - **Add**: writes a full record keyed by its id, replacing any previous one
//! - **Retrieve**: loads one record, distinguishing "not found" from failure
//! - **Retrieve all**: loads every record in the collection
//! - **Update**: writes only the fields that differ from the stored record
//! - **Destroy**: deletes a record
//!
//! The gateway is handed its store client explicitly, so tests can inject
//! an in-memory store or an instrumented double.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roster::{EmployeeGateway, GatewayConfig};
//! use roster::core::{Employee, EmployeeId, EmployeeUpdate};
//! use roster::store::SqliteStore;
//!
//! async fn example() {
//!     // Open storage
//!     let store = SqliteStore::open("roster.db").unwrap();
//!
//!     // Create the gateway
//!     let gateway = EmployeeGateway::new(store, GatewayConfig::default());
//!
//!     let john = Employee::from_form("1", "John", "Doe", "1978-10-12").unwrap();
//!     gateway.add(&john).await.unwrap();
//!
//!     gateway
//!         .update(&EmployeeUpdate::new(1).first_name("Jon"))
//!         .await
//!         .unwrap();
//!
//!     let jon = gateway.retrieve(EmployeeId(1)).await.unwrap();
//!     assert_eq!(jon.map(|e| e.first_name), Some("Jon".to_string()));
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `roster::core` - Record and document types
//! - `roster::store` - Document store trait and backends

pub mod batch;
pub mod error;
pub mod gateway;

// Re-export component crates
pub use roster_core as core;
pub use roster_store as store;

// Re-export main types for convenience
pub use batch::BatchReport;
pub use error::{GatewayError, Result};
pub use gateway::{AddResult, EmployeeGateway, GatewayConfig, UpdateResult, DEFAULT_COLLECTION};

// Re-export commonly used core types
pub use roster_core::{sample_employees, Employee, EmployeeId, EmployeeUpdate, FieldChanges};
