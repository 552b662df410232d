//! View error types.

use thiserror::Error;
use vitrina_client::ClientError;
use vitrina_core::{CoreError, FieldErrors};

#[derive(Debug, Error)]
pub enum ViewError {
    /// The draft failed client-side validation; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The backend call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A field name or schema problem.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The id is not among the loaded rows.
    #[error("No row with id {0}")]
    NoSuchRow(i64),

    /// Confirm was requested with no pending action.
    #[error("Nothing to confirm")]
    NothingToConfirm,
}
