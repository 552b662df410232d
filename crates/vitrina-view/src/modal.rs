//! Confirmation modal for destructive actions.
//!
//! The modal owns the pending request outright, so confirming can never act
//! on a stale id: `open` replaces whatever was pending, `confirm` consumes
//! it and `cancel` drops it.

use serde::Serialize;

use crate::error::ViewError;

/// A delete waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingDelete {
    pub id: i64,
    pub prompt: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmModal {
    pending: Option<PendingDelete>,
}

impl ConfirmModal {
    /// Ask for confirmation. Returns the request that was replaced, if any.
    pub fn open(&mut self, id: i64, prompt: impl Into<String>) -> Option<PendingDelete> {
        self.pending.replace(PendingDelete {
            id,
            prompt: prompt.into(),
        })
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&PendingDelete> {
        self.pending.as_ref()
    }

    /// Accept the pending request and close the modal.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NothingToConfirm`] when the modal is closed.
    pub fn confirm(&mut self) -> Result<PendingDelete, ViewError> {
        self.pending.take().ok_or(ViewError::NothingToConfirm)
    }

    /// Drop the pending request.
    pub fn cancel(&mut self) -> Option<PendingDelete> {
        self.pending.take()
    }
}
