//! Form state controller
//!
//! Two facets: modal visibility (`Closed` / `OpenCreate` / `OpenEdit`) and
//! submission status (`Idle` / `Submitting`). The draft lives here until the
//! modal closes or a submit succeeds.
//!
//! Submitted bodies carry only `{name, email, age}`. Position, department,
//! salary and hire date are edited in the form but the remote collection
//! never receives them.

use std::sync::Arc;

use serde::Serialize;
use shared::form::{FormDraft, FormField};
use shared::models::{Employee, EmployeeId};
use shared::normalize;
use thiserror::Error;
use tokio::sync::RwLock;

use super::collection::CollectionViewController;
use crate::error::NetworkError;
use crate::http::CollectionClient;

/// Modal visibility
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "mode", content = "employee")]
pub enum ModalState {
    #[default]
    Closed,
    OpenCreate,
    /// Editing this employee; its id addresses the update
    OpenEdit(Employee),
}

/// Submission status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
}

/// Snapshot of the form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    pub modal: ModalState,
    pub status: SubmitStatus,
    pub draft: FormDraft,
    /// Message from the last failed submit
    pub error: Option<String>,
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self.modal, ModalState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }
}

/// Transition not allowed in the current form state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Form is not open")]
    NotOpen,
    #[error("Form is already open")]
    AlreadyOpen,
    #[error("A submission is already in progress")]
    SubmitInFlight,
}

/// Result of a submit that was allowed to start
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Created; holds the normalized record the remote returned
    Created(Employee),
    /// Updated; holds the normalized record the remote returned
    Updated(Employee),
    /// Remote call failed; the form stays open with its draft
    Failed(String),
}

enum SubmitTarget {
    Create,
    Update(Option<EmployeeId>),
}

pub struct FormStateController {
    client: Arc<dyn CollectionClient>,
    collection: Arc<CollectionViewController>,
    state: RwLock<FormState>,
}

impl FormStateController {
    /// `collection` is refreshed after every successful submit
    pub fn new(
        client: Arc<dyn CollectionClient>,
        collection: Arc<CollectionViewController>,
    ) -> Self {
        Self {
            client,
            collection,
            state: RwLock::new(FormState::default()),
        }
    }

    /// Clone of the current state
    pub async fn snapshot(&self) -> FormState {
        self.state.read().await.clone()
    }

    /// Open an empty form for a new employee
    pub async fn open_create(&self) -> Result<(), FormError> {
        self.open(ModalState::OpenCreate, FormDraft::empty()).await
    }

    /// Open the form seeded from `employee`
    pub async fn open_edit(&self, employee: Employee) -> Result<(), FormError> {
        let draft = FormDraft::from_employee(&employee);
        self.open(ModalState::OpenEdit(employee), draft).await
    }

    async fn open(&self, modal: ModalState, draft: FormDraft) -> Result<(), FormError> {
        let mut state = self.state.write().await;
        if state.is_open() {
            return Err(FormError::AlreadyOpen);
        }
        tracing::debug!(?modal, "form opened");
        *state = FormState {
            modal,
            status: SubmitStatus::Idle,
            draft,
            error: None,
        };
        Ok(())
    }

    /// Overwrite one draft field
    pub async fn change_field(
        &self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let mut state = self.state.write().await;
        if !state.is_open() {
            return Err(FormError::NotOpen);
        }
        state.draft.set(field, value);
        Ok(())
    }

    /// Close and discard the draft
    ///
    /// Closing a closed form is a no-op.
    pub async fn close(&self) -> Result<(), FormError> {
        let mut state = self.state.write().await;
        if state.is_submitting() {
            return Err(FormError::SubmitInFlight);
        }
        *state = FormState::default();
        Ok(())
    }

    /// Send the draft to the remote collection
    ///
    /// Create mode issues one `create`, edit mode one `update` addressed by the
    /// edited employee's id. On success the form closes and the collection is
    /// refreshed before this returns. Remote failures are reported through
    /// [`SubmitOutcome::Failed`], never as `Err`.
    pub async fn submit(&self) -> Result<SubmitOutcome, FormError> {
        let (target, submitted) = {
            let mut state = self.state.write().await;
            if state.is_submitting() {
                return Err(FormError::SubmitInFlight);
            }
            let target = match &state.modal {
                ModalState::Closed => return Err(FormError::NotOpen),
                ModalState::OpenCreate => SubmitTarget::Create,
                ModalState::OpenEdit(employee) => SubmitTarget::Update(employee.id),
            };
            state.status = SubmitStatus::Submitting;
            state.error = None;
            (target, state.draft.coerce())
        };

        let payload = submitted.to_payload();
        tracing::debug!(
            position = %submitted.position,
            department = %submitted.department,
            salary = submitted.salary,
            hire_date = %submitted.hire_date,
            "fields not sent to the remote collection"
        );

        let result = match target {
            SubmitTarget::Create => self
                .client
                .create(&payload)
                .await
                .map(|raw| SubmitOutcome::Created(normalize(&raw))),
            SubmitTarget::Update(Some(id)) => self
                .client
                .update(id, &payload)
                .await
                .map(|raw| SubmitOutcome::Updated(normalize(&raw))),
            SubmitTarget::Update(None) => Err(NetworkError::new(
                "Failed to update employee: record has no id",
            )),
        };

        match result {
            Ok(outcome) => {
                tracing::info!(?outcome, "employee saved");
                *self.state.write().await = FormState::default();
                self.collection.refresh().await;
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(error = %err, "employee submit failed");
                let message = err.to_string();
                let mut state = self.state.write().await;
                state.status = SubmitStatus::Idle;
                state.error = Some(message.clone());
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }

    /// Dismiss the submit error
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }
}
