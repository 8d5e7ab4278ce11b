//! Employee console facade.
//!
//! Owns one collection controller and one form controller wired to the same
//! remote collection, and routes presentation intents to them.

use std::sync::Arc;

use serde::Serialize;
use shared::intent::{ConsoleIntent, IntentResult};

use crate::config::ClientConfig;
use crate::controller::{
    CollectionState, CollectionViewController, Confirm, DeleteOutcome, FormState,
    FormStateController, SubmitOutcome,
};
use crate::error::ClientResult;
use crate::http::CollectionClient;

/// Everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsoleView {
    pub collection: CollectionState,
    pub form: FormState,
    /// The single inline error banner: a submit failure while the form is
    /// open, otherwise the last refresh/delete failure
    pub banner: Option<String>,
}

impl ConsoleView {
    fn new(collection: CollectionState, form: FormState) -> Self {
        let banner = form
            .error
            .clone()
            .filter(|_| form.is_open())
            .or_else(|| collection.error.clone());
        Self {
            collection,
            form,
            banner,
        }
    }
}

pub struct EmployeeConsole {
    collection: Arc<CollectionViewController>,
    form: FormStateController,
}

impl EmployeeConsole {
    pub fn new(client: Arc<dyn CollectionClient>) -> Self {
        let collection = Arc::new(CollectionViewController::new(client.clone()));
        let form = FormStateController::new(client, collection.clone());
        Self { collection, form }
    }

    /// Console talking to the network collection described by `config`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let client = config.build_network_client()?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn collection(&self) -> &CollectionViewController {
        &self.collection
    }

    pub fn form(&self) -> &FormStateController {
        &self.form
    }

    /// Initial load; see [`CollectionViewController::activate`]
    pub async fn activate(&self) -> bool {
        self.collection.activate().await
    }

    pub async fn view(&self) -> ConsoleView {
        ConsoleView::new(
            self.collection.snapshot().await,
            self.form.snapshot().await,
        )
    }

    /// Route one intent
    ///
    /// `confirm` is only consulted for [`ConsoleIntent::Delete`].
    pub async fn dispatch(&self, intent: ConsoleIntent, confirm: &dyn Confirm) -> IntentResult {
        tracing::debug!(?intent, "dispatching intent");
        match intent {
            ConsoleIntent::Refresh => {
                if self.collection.refresh().await {
                    IntentResult::ok("Employees refreshed")
                } else {
                    IntentResult::err(self.collection_error().await)
                }
            }
            ConsoleIntent::OpenCreate => match self.form.open_create().await {
                Ok(()) => IntentResult::ok("Form opened"),
                Err(e) => IntentResult::err(e.to_string()),
            },
            ConsoleIntent::OpenEdit { id } => match self.collection.employee(id).await {
                Some(employee) => match self.form.open_edit(employee).await {
                    Ok(()) => IntentResult::ok("Form opened"),
                    Err(e) => IntentResult::err(e.to_string()),
                },
                None => IntentResult::err(format!("Employee {id} not found")),
            },
            ConsoleIntent::ChangeField { field, value } => {
                match self.form.change_field(field, value).await {
                    Ok(()) => IntentResult::ok(format!("{field} updated")),
                    Err(e) => IntentResult::err(e.to_string()),
                }
            }
            ConsoleIntent::Submit => match self.form.submit().await {
                Ok(SubmitOutcome::Created(_)) => IntentResult::ok("Employee created"),
                Ok(SubmitOutcome::Updated(_)) => IntentResult::ok("Employee updated"),
                Ok(SubmitOutcome::Failed(message)) => IntentResult::err(message),
                Err(e) => IntentResult::err(e.to_string()),
            },
            ConsoleIntent::Close => match self.form.close().await {
                Ok(()) => IntentResult::ok("Form closed"),
                Err(e) => IntentResult::err(e.to_string()),
            },
            ConsoleIntent::Delete { id } => match self.collection.delete_one(id, confirm).await {
                DeleteOutcome::Deleted => IntentResult::ok("Employee deleted"),
                DeleteOutcome::Cancelled => IntentResult::ok("Deletion cancelled"),
                DeleteOutcome::Failed(message) => IntentResult::err(message),
            },
            ConsoleIntent::DismissError => {
                self.collection.clear_error().await;
                self.form.clear_error().await;
                IntentResult::ok("Error dismissed")
            }
        }
    }

    async fn collection_error(&self) -> String {
        self.collection
            .snapshot()
            .await
            .error
            .unwrap_or_default()
    }
}
