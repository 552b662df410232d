//! Create/edit form state.

use vitrina_client::{CrudApi, Payload};
use vitrina_core::{Entity, EntitySchema, FieldErrors, FormDraft};

use crate::error::ViewError;

// ---------------------------------------------------------------------------
// FormMode
// ---------------------------------------------------------------------------

/// Whether submitting creates a new record or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

impl FormMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit { .. } => "edit",
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        match self {
            Self::Create => None,
            Self::Edit { id } => Some(*id),
        }
    }
}

impl std::fmt::Display for FormMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Edit { id } => write!(f, "edit #{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// A draft plus the errors from its last validation.
///
/// The form never partially submits: either the whole draft validates and
/// exactly one create/update request is made, or no request is made.
#[derive(Debug, Clone)]
pub struct Form {
    schema: EntitySchema,
    draft: FormDraft,
    errors: FieldErrors,
}

impl Form {
    #[must_use]
    pub fn new(schema: EntitySchema) -> Self {
        Self {
            draft: FormDraft::blank(&schema),
            schema,
            errors: FieldErrors::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.draft
            .editing_id()
            .map_or(FormMode::Create, |id| FormMode::Edit { id })
    }

    #[must_use]
    pub const fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Errors from the last failed submit.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub const fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Set one field of the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Core`] when the field is not declared by the schema.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), ViewError> {
        self.draft.set(&self.schema, field, value)?;
        Ok(())
    }

    /// Switch to editing `entity`, replacing the current draft.
    pub fn begin_edit(&mut self, entity: &Entity) {
        self.draft = FormDraft::from_entity(&self.schema, entity);
        self.errors = FieldErrors::new();
    }

    /// Discard the draft and return to create mode.
    pub fn reset(&mut self) {
        self.draft = FormDraft::blank(&self.schema);
        self.errors = FieldErrors::new();
    }

    /// Validate the draft and build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Validation`] and keeps the errors on the form.
    pub fn payload(&mut self) -> Result<Payload, ViewError> {
        match self.draft.to_payload(&self.schema) {
            Ok(payload) => {
                self.errors = FieldErrors::new();
                Ok(payload)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(ViewError::Validation(errors))
            }
        }
    }

    /// Validate, then create or update through `api`.
    ///
    /// On success the form resets to create mode and returns the stored
    /// record when the backend echoed it. On any failure the draft is kept so
    /// the user can correct it.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Validation`] without calling `api`, or
    /// [`ViewError::Client`] when the request fails.
    pub async fn submit<A: CrudApi>(&mut self, api: &A) -> Result<Option<Entity>, ViewError> {
        let payload = self.payload()?;
        let mode = self.mode();
        tracing::debug!(resource = %self.schema.resource, %mode, "submitting form");

        let saved = match mode {
            FormMode::Create => api.create(&payload).await?,
            FormMode::Edit { id } => api.update(id, &payload).await?,
        };
        self.reset();
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vitrina_core::catalog;

    use super::*;

    fn form(resource: &str) -> Form {
        Form::new(catalog::find(resource, &[]).unwrap())
    }

    #[test]
    fn starts_in_create_mode() {
        let form = form("animales");
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.draft().get("nombre"), Some(""));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn begin_edit_binds_entity() {
        let mut form = form("animales");
        let rex = Entity::new(7)
            .with("nombre", "Rex")
            .with("raza", "Labrador")
            .with("edad", 3);
        form.begin_edit(&rex);
        assert_eq!(form.mode(), FormMode::Edit { id: 7 });
        assert_eq!(form.draft().get("edad"), Some("3"));

        form.reset();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.draft().get("nombre"), Some(""));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut form = form("animales");
        let err = form.set("color", "negro").unwrap_err();
        assert!(matches!(err, ViewError::Core(_)));
    }

    #[test]
    fn invalid_payload_keeps_errors_and_draft() {
        let mut form = form("libros");
        form.set("isbn", "123").unwrap();
        form.set("titulo", "Rayuela").unwrap();
        form.set("autor", "Cortázar").unwrap();

        let err = form.payload().unwrap_err();
        assert!(matches!(err, ViewError::Validation(_)));
        assert!(form.errors().get("isbn").is_some());
        assert_eq!(form.draft().get("titulo"), Some("Rayuela"));
    }

    #[test]
    fn mode_display() {
        assert_eq!(FormMode::Create.to_string(), "create");
        assert_eq!(FormMode::Edit { id: 3 }.to_string(), "edit #3");
        assert_eq!(FormMode::Edit { id: 3 }.as_str(), "edit");
        assert_eq!(FormMode::Edit { id: 3 }.id(), Some(3));
    }
}
