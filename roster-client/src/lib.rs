//! Roster Client - employee collection sync for the management console
//!
//! Talks to one remote employee collection over HTTP and keeps the list and
//! form view state in step with it.

pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod http;
pub mod memory;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use console::{ConsoleView, EmployeeConsole};
pub use controller::{
    CollectionState, CollectionViewController, Confirm, DeleteOutcome, FormError, FormState,
    FormStateController, ModalState, SubmitOutcome, SubmitStatus,
};
pub use error::{ClientResult, NetworkError};
pub use http::{CollectionClient, NetworkCollectionClient};
pub use memory::{InMemoryCollectionClient, Operation, RecordedCall};

// Re-export shared types for convenience
pub use shared::{
    ConsoleIntent, Employee, EmployeeId, EmployeePayload, FormDraft, FormField, IntentResult,
    RawEmployee,
};
