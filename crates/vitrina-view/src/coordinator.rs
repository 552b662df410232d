//! Composition of form, list, confirm modal and alerts for one resource.

use std::time::Duration;

use serde_json::Value;
use vitrina_client::CrudApi;
use vitrina_config::GeneralConfig;
use vitrina_core::{Entity, EntitySchema};

use crate::alerts::{Alert, Alerts};
use crate::error::ViewError;
use crate::form::{Form, FormMode};
use crate::list::ListView;
use crate::modal::{ConfirmModal, PendingDelete};

/// Drives one resource screen.
///
/// Every operation reports its outcome as an alert and leaves the last good
/// render in place on failure. Each successful mutation is followed by a
/// full list refresh.
#[derive(Debug)]
pub struct Coordinator<A: CrudApi> {
    api: A,
    form: Form,
    list: ListView,
    modal: ConfirmModal,
    alerts: Alerts,
    editing: Option<Entity>,
    date_format: String,
}

impl<A: CrudApi> Coordinator<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_config(api, &GeneralConfig::default())
    }

    #[must_use]
    pub fn with_config(api: A, general: &GeneralConfig) -> Self {
        let schema = api.schema().clone();
        Self {
            list: ListView::new(&schema),
            form: Form::new(schema),
            api,
            modal: ConfirmModal::default(),
            alerts: Alerts::new(Duration::from_millis(general.alert_ttl_ms)),
            editing: None,
            date_format: general.date_format.clone(),
        }
    }

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn schema(&self) -> &EntitySchema {
        self.api.schema()
    }

    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    #[must_use]
    pub const fn list(&self) -> &ListView {
        &self.list
    }

    #[must_use]
    pub const fn modal(&self) -> &ConfirmModal {
        &self.modal
    }

    #[must_use]
    pub const fn editing(&self) -> Option<&Entity> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Alerts that have not yet expired.
    pub fn alerts(&mut self) -> &[Alert] {
        self.alerts.active()
    }

    /// Take the visible alerts, e.g. to print them once.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        self.alerts.drain()
    }

    // -- loading ------------------------------------------------------------

    /// Initial fetch. Does nothing once the list has loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Client`] when the fetch fails.
    pub async fn mount(&mut self) -> Result<(), ViewError> {
        let result = self.list.mount(&self.api).await;
        self.report_load(result)
    }

    /// Refetch the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Client`]; the previous rows are kept.
    pub async fn refresh(&mut self) -> Result<(), ViewError> {
        let result = self.list.refresh(&self.api).await;
        self.report_load(result)
    }

    fn report_load(&mut self, result: Result<(), ViewError>) -> Result<(), ViewError> {
        if let Err(error) = &result {
            let message = format!("No se pudieron cargar los {}: {error}", self.schema().plural);
            self.alerts.error(message);
        }
        result
    }

    // -- form ---------------------------------------------------------------

    /// Set one field of the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Core`] for a field the schema does not declare.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), ViewError> {
        self.form.set(field, value)
    }

    /// Bind the form to a loaded row.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NoSuchRow`] when `id` is not loaded.
    pub fn edit(&mut self, id: i64) -> Result<&Entity, ViewError> {
        let entity = self.list.find(id).cloned().ok_or(ViewError::NoSuchRow(id))?;
        self.form.begin_edit(&entity);
        self.list.set_editing(Some(id));
        Ok(self.editing.insert(entity))
    }

    /// Drop the draft and go back to create mode.
    pub fn cancel_edit(&mut self) {
        self.form.reset();
        self.list.set_editing(None);
        self.editing = None;
    }

    /// Validate and send the draft, then refresh. Returns the stored record
    /// when the backend echoed it; the refreshed list holds it either way.
    ///
    /// Validation failures make no request. A failed refresh after a
    /// successful mutation is reported as an alert only.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Validation`] or [`ViewError::Client`].
    pub async fn submit(&mut self) -> Result<Option<Entity>, ViewError> {
        let mode = self.form.mode();
        match self.form.submit(&self.api).await {
            Ok(saved) => {
                self.alerts.success(match mode {
                    FormMode::Create => "Registro creado correctamente.",
                    FormMode::Edit { .. } => "Registro actualizado correctamente.",
                });
                self.editing = None;
                self.list.set_editing(None);
                let _ = self.refresh().await;
                Ok(saved)
            }
            Err(ViewError::Validation(errors)) => {
                self.alerts.warning(format!("Revisa los campos: {errors}"));
                Err(ViewError::Validation(errors))
            }
            Err(error) => {
                self.alerts.error(format!("No se pudo guardar: {error}"));
                Err(error)
            }
        }
    }

    // -- delete -------------------------------------------------------------

    /// Open the confirmation modal for a loaded row.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NoSuchRow`] when `id` is not loaded.
    pub fn request_delete(&mut self, id: i64) -> Result<&PendingDelete, ViewError> {
        let entity = self.list.find(id).ok_or(ViewError::NoSuchRow(id))?;
        let schema = self.api.schema();
        let label = schema
            .fields
            .first()
            .map(|field| entity.text(&field.name))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| format!("#{id}"));
        let prompt = format!(
            "¿Estás seguro de que deseas eliminar {} \"{label}\"?",
            schema.name
        );
        self.modal.open(id, prompt);
        self.modal.pending().ok_or(ViewError::NothingToConfirm)
    }

    /// Delete the pending row, then refresh.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NothingToConfirm`] without a pending request, or
    /// [`ViewError::Client`] when the delete fails.
    pub async fn confirm_delete(&mut self) -> Result<Option<Value>, ViewError> {
        let pending = self.modal.confirm()?;
        match self.api.remove(pending.id).await {
            Ok(confirmation) => {
                if self.editing.as_ref().is_some_and(|e| e.id == pending.id) {
                    self.cancel_edit();
                }
                self.alerts.success("Registro eliminado correctamente.");
                let _ = self.refresh().await;
                Ok(confirmation)
            }
            Err(error) => {
                self.alerts.error(format!("No se pudo eliminar: {error}"));
                Err(error.into())
            }
        }
    }

    /// Close the modal without deleting.
    pub fn cancel_delete(&mut self) -> Option<PendingDelete> {
        self.modal.cancel()
    }
}
