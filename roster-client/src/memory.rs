// roster-client/src/memory.rs
// 内存集合客户端 (同进程通信，用于测试和演示)

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use shared::models::{EmployeeId, EmployeePayload, RawEmployee};
use tokio::sync::{Mutex, oneshot};

use crate::error::{ClientResult, NetworkError};
use crate::http::{CREATE_FAILED, CollectionClient, LIST_FAILED, delete_failed, update_failed};

/// Remote operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Remove,
}

/// One call received by the in-memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    List,
    Create(EmployeePayload),
    Update {
        id: EmployeeId,
        payload: EmployeePayload,
    },
    Remove(EmployeeId),
}

impl RecordedCall {
    pub fn operation(&self) -> Operation {
        match self {
            Self::List => Operation::List,
            Self::Create(_) => Operation::Create,
            Self::Update { .. } => Operation::Update,
            Self::Remove(_) => Operation::Remove,
        }
    }
}

#[derive(Debug, Default)]
struct Store {
    records: Vec<RawEmployee>,
    calls: Vec<RecordedCall>,
    failures: HashMap<Operation, VecDeque<String>>,
    holds: HashMap<Operation, VecDeque<oneshot::Receiver<()>>>,
}

impl Store {
    fn position(&self, id: EmployeeId) -> Option<usize> {
        self.records.iter().position(|r| record_id(r) == Some(id))
    }

    fn next_id(&self) -> EmployeeId {
        self.records.iter().filter_map(record_id).max().unwrap_or(0) + 1
    }
}

/// 内存员工集合
///
/// Behaves like the remote collection endpoint: ids are assigned on create,
/// `PUT` replaces the whole record, unknown ids answer 404. Every call is
/// recorded, and individual calls can be made to fail or to wait until
/// released, so the controllers can be exercised without a network.
///
/// # Example
/// ```rust
/// use roster_client::{CollectionClient, InMemoryCollectionClient};
///
/// #[tokio::main]
/// async fn main() {
///     let client = InMemoryCollectionClient::from_json(serde_json::json!([
///         { "id": 1, "name": "Ana", "email": "a@x.com" }
///     ]))
///     .unwrap();
///
///     let records = client.list().await.unwrap();
///     assert_eq!(records.len(), 1);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCollectionClient {
    store: Arc<Mutex<Store>>,
}

impl InMemoryCollectionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given records, in order
    pub fn with_records(records: Vec<RawEmployee>) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store {
                records,
                ..Store::default()
            })),
        }
    }

    /// Start from a JSON array of records
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        Ok(Self::with_records(serde_json::from_value(value)?))
    }

    /// Current contents of the store
    pub async fn records(&self) -> Vec<RawEmployee> {
        self.store.lock().await.records.clone()
    }

    /// Replace the store contents (another client changed the remote)
    pub async fn set_records(&self, records: Vec<RawEmployee>) {
        self.store.lock().await.records = records;
    }

    /// Every call received so far, oldest first
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.store.lock().await.calls.clone()
    }

    pub async fn call_count(&self, operation: Operation) -> usize {
        self.store
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Make the next call of `operation` fail with `message`
    ///
    /// Queued failures are consumed one per call.
    pub async fn fail_next(&self, operation: Operation, message: impl Into<String>) {
        self.store
            .lock()
            .await
            .failures
            .entry(operation)
            .or_default()
            .push_back(message.into());
    }

    /// Make the next call of `operation` wait until the returned sender fires
    /// or is dropped
    pub async fn hold_next(&self, operation: Operation) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.store
            .lock()
            .await
            .holds
            .entry(operation)
            .or_default()
            .push_back(rx);
        tx
    }

    /// Record the call, wait on any hold, then report an injected failure
    async fn begin(&self, call: RecordedCall, action: &str) -> ClientResult<()> {
        let operation = call.operation();
        let (failure, hold) = {
            let mut store = self.store.lock().await;
            store.calls.push(call);
            let failure = store
                .failures
                .get_mut(&operation)
                .and_then(VecDeque::pop_front);
            let hold = store.holds.get_mut(&operation).and_then(VecDeque::pop_front);
            (failure, hold)
        };

        if let Some(hold) = hold {
            // 发送端 drop 也视为放行
            let _ = hold.await;
        }

        match failure {
            Some(message) => Err(NetworkError::new(format!("{action}: {message}"))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CollectionClient for InMemoryCollectionClient {
    async fn list(&self) -> ClientResult<Vec<RawEmployee>> {
        self.begin(RecordedCall::List, LIST_FAILED).await?;
        Ok(self.records().await)
    }

    async fn create(&self, payload: &EmployeePayload) -> ClientResult<RawEmployee> {
        self.begin(RecordedCall::Create(payload.clone()), CREATE_FAILED)
            .await?;

        let mut store = self.store.lock().await;
        let record = RawEmployee::from_payload(Some(store.next_id()), payload);
        store.records.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: EmployeeId,
        payload: &EmployeePayload,
    ) -> ClientResult<RawEmployee> {
        let action = update_failed(id);
        let call = RecordedCall::Update {
            id,
            payload: payload.clone(),
        };
        self.begin(call, &action).await?;

        let mut store = self.store.lock().await;
        let index = store
            .position(id)
            .ok_or_else(|| NetworkError::status(&action, StatusCode::NOT_FOUND, b""))?;
        let record = RawEmployee::from_payload(Some(id), payload);
        store.records[index] = record.clone();
        Ok(record)
    }

    async fn remove(&self, id: EmployeeId) -> ClientResult<()> {
        let action = delete_failed(id);
        self.begin(RecordedCall::Remove(id), &action).await?;

        let mut store = self.store.lock().await;
        let index = store
            .position(id)
            .ok_or_else(|| NetworkError::status(&action, StatusCode::NOT_FOUND, b""))?;
        store.records.remove(index);
        Ok(())
    }
}

fn record_id(record: &RawEmployee) -> Option<EmployeeId> {
    record.id.as_ref().and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded() -> InMemoryCollectionClient {
        InMemoryCollectionClient::from_json(json!([
            { "id": 1, "name": "Ana", "email": "a@x.com", "position": "Lead" },
            { "id": 4, "name": "Bo", "email": "b@x.com" }
        ]))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let client = seeded();
        let created = client
            .create(&EmployeePayload::new("Cy", "c@x.com"))
            .await
            .unwrap();

        assert_eq!(created.id, Some(json!(5)));
        assert_eq!(created.extra.get("age"), Some(&json!(25)));
        assert_eq!(client.records().await.len(), 3);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let client = seeded();
        client
            .update(1, &EmployeePayload::new("Ana B", "ab@x.com"))
            .await
            .unwrap();

        let records = client.records().await;
        assert_eq!(records[0].name, Some(json!("Ana B")));
        assert_eq!(records[0].position, None);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let client = seeded();
        let err = client.remove(99).await.unwrap_err();
        assert_eq!(
            err.message(),
            "Failed to delete employee 99: HTTP 404 Not Found"
        );
    }

    #[tokio::test]
    async fn test_injected_failure_consumed_once() {
        let client = seeded();
        client.fail_next(Operation::List, "HTTP 503").await;

        let err = client.list().await.unwrap_err();
        assert_eq!(err.message(), "Failed to fetch employees: HTTP 503");
        assert!(client.list().await.is_ok());
        assert_eq!(client.call_count(Operation::List).await, 2);
    }

    #[tokio::test]
    async fn test_hold_blocks_until_released() {
        let client = seeded();
        let release = client.hold_next(Operation::List).await;

        let task = {
            let client = client.clone();
            tokio::spawn(async move { client.list().await })
        };
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        release.send(()).unwrap();
        let records = task.await.unwrap().unwrap();
        assert_eq!(records.len(), 2);
    }
}
