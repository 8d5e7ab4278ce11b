//! Collection view controller
//!
//! Owns the authoritative employee list plus its loading and error flags.
//! The list is only ever replaced wholesale by a successful fetch; mutations
//! are followed by a full re-fetch rather than a local patch.
//!
//! State lives behind an async `RwLock` that is never held across a remote
//! call, so overlapping operations are possible. The last refresh to complete
//! wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use shared::models::{Employee, EmployeeId};
use shared::normalize_all;
use tokio::sync::RwLock;

use crate::http::CollectionClient;

/// Prompt shown before a row is removed
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this employee?";

/// Interactive confirmation for destructive actions
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Snapshot of the list view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionState {
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Result of [`CollectionViewController::delete_one`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// User declined; nothing was sent
    Cancelled,
    /// Remote delete succeeded and the list was re-fetched
    Deleted,
    /// Remote delete failed with this message
    Failed(String),
}

pub struct CollectionViewController {
    client: Arc<dyn CollectionClient>,
    state: RwLock<CollectionState>,
    activated: AtomicBool,
}

impl CollectionViewController {
    pub fn new(client: Arc<dyn CollectionClient>) -> Self {
        Self {
            client,
            state: RwLock::new(CollectionState::default()),
            activated: AtomicBool::new(false),
        }
    }

    /// Initial load. Only the first call refreshes; returns whether it did.
    pub async fn activate(&self) -> bool {
        if self.activated.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.refresh().await;
        true
    }

    /// Re-fetch and replace the list
    ///
    /// On failure the previous list stays visible and `error` is set.
    /// Returns whether the fetch succeeded.
    pub async fn refresh(&self) -> bool {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }
        tracing::debug!("refreshing employee list");

        let result = self.client.list().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(raws) => {
                state.employees = normalize_all(&raws);
                tracing::info!(count = state.employees.len(), "employee list refreshed");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "employee list refresh failed");
                state.error = Some(err.to_string());
                false
            }
        }
    }

    /// Remove one employee after confirmation, then re-fetch
    pub async fn delete_one<C>(&self, id: EmployeeId, confirm: &C) -> DeleteOutcome
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(id, "delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match self.client.remove(id).await {
            Ok(()) => {
                tracing::info!(id, "employee deleted");
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "employee delete failed");
                let message = err.to_string();
                self.state.write().await.error = Some(message.clone());
                DeleteOutcome::Failed(message)
            }
        }
    }

    /// Clone of the current state
    pub async fn snapshot(&self) -> CollectionState {
        self.state.read().await.clone()
    }

    /// Look up a row in the current snapshot
    pub async fn employee(&self, id: EmployeeId) -> Option<Employee> {
        self.state
            .read()
            .await
            .employees
            .iter()
            .find(|e| e.id == Some(id))
            .cloned()
    }

    /// Dismiss the error banner
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryCollectionClient, Operation, RecordedCall};
    use serde_json::json;

    fn remote() -> InMemoryCollectionClient {
        InMemoryCollectionClient::from_json(json!([
            { "id": 3, "name": "Cy", "email": "c@x.com" },
            { "id": 1, "name": "Ana", "email": "a@x.com", "salary": 4000 },
            { "id": 2, "name": "Bo", "email": "b@x.com" }
        ]))
        .unwrap()
    }

    fn controller(remote: &InMemoryCollectionClient) -> CollectionViewController {
        CollectionViewController::new(Arc::new(remote.clone()))
    }

    fn ids(state: &CollectionState) -> Vec<Option<EmployeeId>> {
        state.employees.iter().map(|e| e.id).collect()
    }

    #[tokio::test]
    async fn test_refresh_keeps_remote_order() {
        let remote = remote();
        let ctrl = controller(&remote);

        assert!(ctrl.refresh().await);
        let state = ctrl.snapshot().await;
        assert_eq!(ids(&state), vec![Some(3), Some(1), Some(2)]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.employees[0].position, "Not Specified");
        assert_eq!(state.employees[1].salary, 4000.0);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_list() {
        let remote = remote();
        let ctrl = controller(&remote);
        ctrl.refresh().await;
        let before = ctrl.snapshot().await.employees;

        remote.fail_next(Operation::List, "HTTP 500").await;
        assert!(!ctrl.refresh().await);

        let state = ctrl.snapshot().await;
        assert_eq!(state.employees, before);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to fetch employees: HTTP 500")
        );
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_refresh_clears_previous_error() {
        let remote = remote();
        let ctrl = controller(&remote);
        remote.fail_next(Operation::List, "boom").await;
        ctrl.refresh().await;
        assert!(ctrl.snapshot().await.error.is_some());

        ctrl.refresh().await;
        assert_eq!(ctrl.snapshot().await.error, None);
    }

    #[tokio::test]
    async fn test_loading_visible_while_in_flight() {
        let remote = remote();
        let ctrl = Arc::new(controller(&remote));
        let release = remote.hold_next(Operation::List).await;

        let task = {
            let ctrl = ctrl.clone();
            tokio::spawn(async move { ctrl.refresh().await })
        };
        tokio::task::yield_now().await;
        assert!(ctrl.snapshot().await.loading);

        release.send(()).unwrap();
        assert!(task.await.unwrap());
        assert!(!ctrl.snapshot().await.loading);
    }

    #[tokio::test]
    async fn test_activate_refreshes_once() {
        let remote = remote();
        let ctrl = controller(&remote);

        assert!(ctrl.activate().await);
        assert!(!ctrl.activate().await);
        assert_eq!(remote.call_count(Operation::List).await, 1);
        assert_eq!(ctrl.snapshot().await.employees.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_without_confirmation_does_nothing() {
        let remote = remote();
        let ctrl = controller(&remote);
        ctrl.refresh().await;
        let before = ctrl.snapshot().await;
        let calls_before = remote.calls().await.len();

        let outcome = ctrl.delete_one(1, &|_: &str| false).await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(ctrl.snapshot().await, before);
        assert_eq!(remote.calls().await.len(), calls_before);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refetches() {
        let remote = remote();
        let ctrl = controller(&remote);
        ctrl.refresh().await;

        let outcome = ctrl
            .delete_one(1, &|prompt: &str| prompt == DELETE_PROMPT)
            .await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(ids(&ctrl.snapshot().await), vec![Some(3), Some(2)]);
        let calls = remote.calls().await;
        assert_eq!(
            &calls[1..],
            &[RecordedCall::Remove(1), RecordedCall::List]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_sets_error_only() {
        let remote = remote();
        let ctrl = controller(&remote);
        ctrl.refresh().await;
        let before = ctrl.snapshot().await.employees;

        let outcome = ctrl.delete_one(42, &|_: &str| true).await;

        let message = "Failed to delete employee 42: HTTP 404 Not Found".to_string();
        assert_eq!(outcome, DeleteOutcome::Failed(message.clone()));
        let state = ctrl.snapshot().await;
        assert_eq!(state.employees, before);
        assert_eq!(state.error, Some(message));
        assert_eq!(remote.call_count(Operation::List).await, 1);
    }

    #[tokio::test]
    async fn test_last_refresh_to_complete_wins() {
        let remote = remote();
        let ctrl = Arc::new(controller(&remote));

        // first refresh is held and completes after the second one
        let release = remote.hold_next(Operation::List).await;
        let slow = {
            let ctrl = ctrl.clone();
            tokio::spawn(async move { ctrl.refresh().await })
        };
        tokio::task::yield_now().await;

        remote
            .set_records(vec![
                shared::RawEmployee::from_json(json!({ "id": 9, "name": "Zed" })).unwrap(),
            ])
            .await;
        ctrl.refresh().await;
        assert_eq!(ids(&ctrl.snapshot().await), vec![Some(9)]);

        remote.set_records(Vec::new()).await;
        release.send(()).unwrap();
        slow.await.unwrap();
        assert!(ctrl.snapshot().await.employees.is_empty());
    }

    #[tokio::test]
    async fn test_employee_lookup_and_clear_error() {
        let remote = remote();
        let ctrl = controller(&remote);
        ctrl.refresh().await;

        assert_eq!(ctrl.employee(2).await.map(|e| e.name), Some("Bo".to_string()));
        assert!(ctrl.employee(77).await.is_none());

        remote.fail_next(Operation::List, "down").await;
        ctrl.refresh().await;
        ctrl.clear_error().await;
        assert_eq!(ctrl.snapshot().await.error, None);
    }
}
