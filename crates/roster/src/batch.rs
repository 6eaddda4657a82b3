//! Batch helpers: seeding sample records and clearing the collection.
//!
//! Both helpers fan out one task per record and wait for all of them.
//! There is no concurrency limit and no ordering between tasks, and a
//! failed task never cancels the others.

use roster_core::{sample_employees, Employee};
use roster_store::DocumentStore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::{GatewayError, Result};
use crate::gateway::EmployeeGateway;

/// Outcome counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Operations that completed.
    pub succeeded: usize,
    /// Operations that returned an error or whose task failed.
    pub failed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

impl<S: DocumentStore + 'static> EmployeeGateway<S> {
    /// Save the sample employees.
    pub async fn generate_test_data(&self) -> BatchReport {
        let report = self.add_all(sample_employees()).await;
        info!(saved = report.succeeded, failed = report.failed, "employee records saved");
        report
    }

    /// Add every record concurrently.
    pub async fn add_all(&self, employees: Vec<Employee>) -> BatchReport {
        let mut tasks = JoinSet::new();
        for employee in employees {
            let gateway = self.clone();
            tasks.spawn(async move { gateway.add(&employee).await.map(|_| ()) });
        }
        collect(tasks).await
    }

    /// Delete every document in the collection concurrently.
    ///
    /// Documents are deleted by key without being decoded, so malformed
    /// ones go too. Fails only if the initial listing fails; individual
    /// delete failures are counted in the report.
    pub async fn clear_data(&self) -> Result<BatchReport> {
        let keys: Vec<String> = self
            .store()
            .list_documents(self.collection())
            .await
            .map_err(|e| {
                error!(error = %e, "error when listing employee records to clear");
                GatewayError::from(e)
            })?
            .into_iter()
            .map(|doc| doc.key)
            .collect();

        let mut tasks = JoinSet::new();
        for key in keys {
            let gateway = self.clone();
            tasks.spawn(async move { gateway.destroy_key(&key).await.map(|_| ()) });
        }

        let report = collect(tasks).await;
        info!(deleted = report.succeeded, failed = report.failed, "employee records deleted");
        Ok(report)
    }
}

async fn collect(mut tasks: JoinSet<Result<()>>) -> BatchReport {
    let mut report = BatchReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => report.succeeded += 1,
            // Already logged by the operation itself.
            Ok(Err(_)) => report.failed += 1,
            Err(e) => {
                error!(error = %e, "batch task did not complete");
                report.failed += 1;
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{GatewayConfig, DEFAULT_COLLECTION};
    use roster_core::{FieldValue, Fields};
    use roster_store::MemoryStore;

    fn gateway() -> EmployeeGateway<MemoryStore> {
        EmployeeGateway::new(MemoryStore::new(), GatewayConfig::default())
    }

    #[tokio::test]
    async fn test_generate_test_data() {
        let gw = gateway();
        let report = gw.generate_test_data().await;
        assert_eq!(report, BatchReport { succeeded: 3, failed: 0 });

        let mut all = gw.retrieve_all().await.unwrap();
        all.sort_by_key(|e| e.employee_id);
        assert_eq!(all, sample_employees());
    }

    #[tokio::test]
    async fn test_add_all_counts_rejected_records() {
        let gw = gateway();
        let mut employees = sample_employees();
        employees[1].last_name.clear();

        let report = gw.add_all(employees).await;
        assert_eq!(report, BatchReport { succeeded: 2, failed: 1 });
        assert_eq!(gw.retrieve_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_data() {
        let gw = gateway();
        gw.generate_test_data().await;

        let report = gw.clear_data().await.unwrap();
        assert_eq!(report.succeeded, 3);
        assert!(gw.retrieve_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_data_removes_malformed_documents() {
        let gw = gateway();
        gw.generate_test_data().await;
        let mut fields = Fields::new();
        fields.insert("employeeId".into(), FieldValue::Integer(9));
        gw.store()
            .set_document(DEFAULT_COLLECTION, "9", &fields)
            .await
            .unwrap();

        let report = gw.clear_data().await.unwrap();
        assert_eq!(report, BatchReport { succeeded: 4, failed: 0 });
        assert!(gw
            .store()
            .list_documents(DEFAULT_COLLECTION)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_panicked_task_counts_as_failure() {
        let mut tasks: JoinSet<Result<()>> = JoinSet::new();
        tasks.spawn(async { Ok(()) });
        tasks.spawn(async { panic!("seed task crashed") });

        let report = collect(tasks).await;
        assert_eq!(report, BatchReport { succeeded: 1, failed: 1 });
    }

    #[tokio::test]
    async fn test_clear_empty_collection() {
        let gw = gateway();
        let report = gw.clear_data().await.unwrap();
        assert_eq!(report.total(), 0);
    }
}
