//! # vitrina-view
//!
//! Frontend state for one CRUD resource, independent of any renderer:
//!
//! - [`Form`]: the create/edit draft and its validation errors
//! - [`ListView`]: loaded rows, load state, and the empty placeholder
//! - [`ConfirmModal`]: the pending destructive action
//! - [`Alerts`]: transient, self-expiring messages
//! - [`Coordinator`]: composes the above over a [`vitrina_client::CrudApi`]

pub mod alerts;
pub mod coordinator;
pub mod error;
pub mod form;
pub mod list;
pub mod modal;

pub use alerts::{Alert, AlertLevel, Alerts};
pub use coordinator::Coordinator;
pub use error::ViewError;
pub use form::{Form, FormMode};
pub use list::{ListView, LoadState, RowView, display_value};
pub use modal::{ConfirmModal, PendingDelete};
