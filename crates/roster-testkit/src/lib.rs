//! # Roster Testkit
//!
//! Testing utilities for Roster.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Known employee records, also loadable from JSON
//! - **Generators**: Proptest strategies for property-based testing
//! - **Doubles**: Store wrappers that count writes or inject failures
//!
//! ## Counting Writes
//!
//! Wrap any store to observe how many writes reach it:
//!
//! ```rust
//! use roster_store::MemoryStore;
//! use roster_testkit::CountingStore;
//!
//! let store = CountingStore::new(MemoryStore::new());
//! assert_eq!(store.counts().writes(), 0);
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use roster_testkit::generators::employee;
//!
//! proptest! {
//!     #[test]
//!     fn document_roundtrip(e in employee()) {
//!         let doc = e.to_document();
//!         prop_assert_eq!(roster_core::Employee::from_document(&doc).unwrap(), e);
//!     }
//! }
//! ```

pub mod doubles;
pub mod fixtures;
pub mod generators;

pub use doubles::{CountingStore, FaultyStore, StoreCounts};
pub use fixtures::{employee, employees_from_json, jane_smith, john_doe, keith_johnson, SAMPLE_JSON};
pub use generators::{distinct_employees, employee as arb_employee};
