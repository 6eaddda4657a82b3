//! The gateway: typed CRUD over one collection of employee documents.
//!
//! The gateway maps [`Employee`] records to documents keyed by the decimal
//! string of the employee id, and writes them through an injected
//! [`DocumentStore`] client.

use std::sync::Arc;

use roster_core::{
    validate_employee, validate_update, Employee, EmployeeId, EmployeeUpdate, FieldChanges,
};
use roster_store::{DocumentStore, SetResult, StoreError};
use tracing::{debug, error, info, warn};

use crate::error::{GatewayError, Result};

/// Name of the collection employee records live in unless configured otherwise.
pub const DEFAULT_COLLECTION: &str = "employees";

/// Configuration for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Collection holding one document per employee.
    pub collection: String,
    /// Whether to reject blank names before writing.
    pub validate_on_write: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            validate_on_write: true,
        }
    }
}

impl GatewayConfig {
    /// Use a different collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

/// Result of adding a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    /// A new document was written.
    Created,
    /// A document with the same id existed and was overwritten.
    Replaced,
}

/// Result of a diff-based update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// Nothing differed; no write was issued.
    Unchanged,
    /// Only these fields were written.
    Updated(FieldChanges),
}

/// Gateway over the employee collection.
///
/// Provides:
/// - `add`: write a full record, creating or replacing it
/// - `retrieve` / `retrieve_all`: read and decode records
/// - `update`: write only the fields that differ from the stored record
/// - `destroy`: delete a record
///
/// Every store failure is logged where it happens and returned to the
/// caller.
pub struct EmployeeGateway<S: DocumentStore> {
    /// The document store client.
    store: Arc<S>,
    /// Configuration.
    config: GatewayConfig,
}

impl<S: DocumentStore> Clone for EmployeeGateway<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: DocumentStore> EmployeeGateway<S> {
    /// Create a gateway owning the given store client.
    pub fn new(store: S, config: GatewayConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create a gateway over a store client shared with other code.
    pub fn with_shared_store(store: Arc<S>, config: GatewayConfig) -> Self {
        Self { store, config }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub(crate) fn collection(&self) -> &str {
        &self.config.collection
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Write a full record under its id.
    ///
    /// An existing record with the same id is replaced.
    pub async fn add(&self, employee: &Employee) -> Result<AddResult> {
        let employee_id = employee.employee_id;

        if self.config.validate_on_write {
            if let Err(e) = validate_employee(employee) {
                warn!(%employee_id, error = %e, "rejected employee record");
                return Err(e.into());
            }
        }

        let result = self
            .store
            .set_document(self.collection(), &employee.key(), &employee.to_fields())
            .await
            .map_err(|e| {
                error!(%employee_id, error = %e, "error when adding employee record");
                GatewayError::from(e)
            })?;

        match result {
            SetResult::Created => {
                info!(%employee_id, "employee record created");
                Ok(AddResult::Created)
            }
            SetResult::Replaced => {
                info!(%employee_id, "employee record replaced");
                Ok(AddResult::Replaced)
            }
        }
    }

    /// Write the fields of `update` that differ from the stored record.
    ///
    /// Issues no write at all when nothing differs. Fails with
    /// [`GatewayError::NotFound`] if no record exists for the id.
    pub async fn update(&self, update: &EmployeeUpdate) -> Result<UpdateResult> {
        let employee_id = update.employee_id;

        if self.config.validate_on_write {
            if let Err(e) = validate_update(update) {
                warn!(%employee_id, error = %e, "rejected employee update");
                return Err(e.into());
            }
        }

        let current = self
            .retrieve(employee_id)
            .await?
            .ok_or(GatewayError::NotFound(employee_id))?;

        let changes = update.diff(&current);
        if changes.is_empty() {
            debug!(%employee_id, "employee record unchanged, skipping write");
            return Ok(UpdateResult::Unchanged);
        }

        self.store
            .update_document(
                self.collection(),
                &employee_id.document_key(),
                &changes.to_fields(),
            )
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => {
                    warn!(%employee_id, "employee record vanished before update");
                    GatewayError::NotFound(employee_id)
                }
                e => {
                    error!(%employee_id, error = %e, "error when updating employee record");
                    GatewayError::from(e)
                }
            })?;

        info!(%employee_id, fields = ?changes.field_names(), "employee record modified");
        Ok(UpdateResult::Updated(changes))
    }

    /// Delete a record.
    ///
    /// Returns whether a record was removed; deleting a missing id is not
    /// an error.
    pub async fn destroy(&self, employee_id: EmployeeId) -> Result<bool> {
        self.destroy_key(&employee_id.document_key()).await
    }

    /// Delete a document by its raw key, whether or not it decodes.
    pub(crate) async fn destroy_key(&self, key: &str) -> Result<bool> {
        let removed = self
            .store
            .delete_document(self.collection(), key)
            .await
            .map_err(|e| {
                error!(employee_id = key, error = %e, "error when deleting employee record");
                GatewayError::from(e)
            })?;

        if removed {
            info!(employee_id = key, "employee record deleted");
        } else {
            debug!(employee_id = key, "no employee record to delete");
        }
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Load one record.
    ///
    /// `Ok(None)` means no such record; failures are always `Err`.
    pub async fn retrieve(&self, employee_id: EmployeeId) -> Result<Option<Employee>> {
        let doc = self
            .store
            .get_document(self.collection(), &employee_id.document_key())
            .await
            .map_err(|e| {
                error!(%employee_id, error = %e, "error when retrieving employee record");
                GatewayError::from(e)
            })?;

        let Some(doc) = doc else {
            return Ok(None);
        };

        Employee::from_document(&doc).map(Some).map_err(|e| {
            error!(%employee_id, error = %e, "malformed employee document");
            GatewayError::from(e)
        })
    }

    /// Load every record in the collection.
    ///
    /// Order is whatever the store returns.
    pub async fn retrieve_all(&self) -> Result<Vec<Employee>> {
        let docs = self
            .store
            .list_documents(self.collection())
            .await
            .map_err(|e| {
                error!(error = %e, "error when retrieving employee records");
                GatewayError::from(e)
            })?;

        let employees = docs
            .iter()
            .map(Employee::from_document)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                error!(error = %e, "malformed employee document");
                GatewayError::from(e)
            })?;

        info!(count = employees.len(), "employee records retrieved");
        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_core::{FieldValue, Fields};
    use roster_store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn gateway() -> EmployeeGateway<MemoryStore> {
        EmployeeGateway::new(MemoryStore::new(), GatewayConfig::default())
    }

    fn john() -> Employee {
        Employee::new(1, "John", "Doe", date(1978, 10, 12))
    }

    #[tokio::test]
    async fn test_add_and_retrieve() {
        let gw = gateway();
        assert_eq!(gw.add(&john()).await.unwrap(), AddResult::Created);

        let retrieved = gw.retrieve(EmployeeId(1)).await.unwrap().unwrap();
        assert_eq!(retrieved, john());
    }

    #[tokio::test]
    async fn test_add_same_id_replaces() {
        let gw = gateway();
        gw.add(&john()).await.unwrap();

        let jane = Employee::new(1, "Jane", "Smith", date(1970, 2, 10));
        assert_eq!(gw.add(&jane).await.unwrap(), AddResult::Replaced);

        let all = gw.retrieve_all().await.unwrap();
        assert_eq!(all, vec![jane]);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let gw = gateway();
        let blank = Employee::new(1, " ", "Doe", date(1978, 10, 12));

        let err = gw.add(&blank).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
        assert!(gw.retrieve(EmployeeId(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_without_validation() {
        let config = GatewayConfig {
            validate_on_write: false,
            ..Default::default()
        };
        let gw = EmployeeGateway::new(MemoryStore::new(), config);
        let blank = Employee::new(1, "", "", date(1978, 10, 12));

        assert_eq!(gw.add(&blank).await.unwrap(), AddResult::Created);
    }

    #[tokio::test]
    async fn test_retrieve_missing_is_none() {
        let gw = gateway();
        assert!(gw.retrieve(EmployeeId(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_retrieve_malformed_document() {
        let gw = gateway();
        let mut fields = Fields::new();
        fields.insert("employeeId".into(), FieldValue::Integer(5));
        gw.store()
            .set_document(DEFAULT_COLLECTION, "5", &fields)
            .await
            .unwrap();

        let err = gw.retrieve(EmployeeId(5)).await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_update_changes_only_given_field() {
        let gw = gateway();
        gw.add(&john()).await.unwrap();

        let result = gw
            .update(&EmployeeUpdate::new(1).first_name("Jon"))
            .await
            .unwrap();
        assert!(matches!(result, UpdateResult::Updated(ref c) if c.field_names() == vec!["firstName"]));

        let stored = gw.retrieve(EmployeeId(1)).await.unwrap().unwrap();
        assert_eq!(stored.first_name, "Jon");
        assert_eq!(stored.last_name, "Doe");
        assert_eq!(stored.birthdate, date(1978, 10, 12));
    }

    #[tokio::test]
    async fn test_update_identical_is_unchanged() {
        let gw = gateway();
        gw.add(&john()).await.unwrap();

        let result = gw.update(&EmployeeUpdate::from(john())).await.unwrap();
        assert_eq!(result, UpdateResult::Unchanged);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let gw = gateway();
        let err = gw
            .update(&EmployeeUpdate::new(7).first_name("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(EmployeeId(7))));
    }

    #[tokio::test]
    async fn test_destroy() {
        let gw = gateway();
        gw.add(&john()).await.unwrap();

        assert!(gw.destroy(EmployeeId(1)).await.unwrap());
        assert!(!gw.destroy(EmployeeId(1)).await.unwrap());
        assert!(gw.retrieve(EmployeeId(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_custom_collection() {
        let store = Arc::new(MemoryStore::new());
        let gw = EmployeeGateway::with_shared_store(
            Arc::clone(&store),
            GatewayConfig::default().with_collection("staff"),
        );
        gw.add(&john()).await.unwrap();

        assert!(store.get_document("staff", "1").await.unwrap().is_some());
        assert!(store
            .get_document(DEFAULT_COLLECTION, "1")
            .await
            .unwrap()
            .is_none());
    }
}
