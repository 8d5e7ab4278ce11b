//! Shared types for the employee roster console
//!
//! Domain models, the record normalizer, the form draft and the intent
//! vocabulary used between the presentation layer and the client controllers.

pub mod form;
pub mod intent;
pub mod models;
pub mod normalize;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use form::{FieldParseError, FormDraft, FormField, SubmittedForm};
pub use intent::{ConsoleIntent, IntentResult};
pub use models::{Employee, EmployeeId, EmployeePayload, RawEmployee};
pub use normalize::{normalize, normalize_all};
