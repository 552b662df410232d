//! Cross-cutting error types for Vitrina.
//!
//! Transport errors live in `vitrina-client` and view errors in
//! `vitrina-view`; the CLI converges all of them into `anyhow`.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Errors that can be raised while working with schemas and drafts.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One or more fields failed client-side validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// A draft was addressed with a field the schema does not declare.
    #[error("Unknown field '{field}' for resource {resource}")]
    UnknownField { resource: String, field: String },

    /// No schema is registered under this resource name.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// A schema (built-in or configured) is not usable.
    #[error("Invalid schema for {resource}: {reason}")]
    InvalidSchema { resource: String, reason: String },
}
