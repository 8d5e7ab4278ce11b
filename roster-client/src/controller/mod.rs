//! View-state controllers.
//!
//! Both controllers are explicitly owned objects; the form controller holds an
//! `Arc` to the collection controller so it can trigger the post-submit
//! refresh.

mod collection;
mod form;

pub use collection::{
    CollectionState, CollectionViewController, Confirm, DELETE_PROMPT, DeleteOutcome,
};
pub use form::{FormError, FormState, FormStateController, ModalState, SubmitOutcome, SubmitStatus};
