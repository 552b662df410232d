//! Collection view state and cell formatting.

use serde::Serialize;
use serde_json::Value;
use vitrina_client::CrudApi;
use vitrina_core::{Entity, EntitySchema, FieldKind, parse_date, parse_timestamp, value_text};

use crate::error::ViewError;

// ---------------------------------------------------------------------------
// LoadState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(message) => write!(f, "failed: {message}"),
            other => f.write_str(other.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// RowView
// ---------------------------------------------------------------------------

/// One rendered row. `editing` is true for the row bound to the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView<'a> {
    pub entity: &'a Entity,
    pub editing: bool,
}

impl RowView<'_> {
    /// Display text for each schema field, in schema order.
    #[must_use]
    pub fn cells(&self, schema: &EntitySchema, date_format: &str) -> Vec<String> {
        schema
            .fields
            .iter()
            .map(|spec| {
                self.entity
                    .field(&spec.name)
                    .map_or_else(String::new, |value| display_value(spec.kind, value, date_format))
            })
            .collect()
    }

    /// Creation date rendered with `date_format`, or the raw text if unparseable.
    #[must_use]
    pub fn created(&self, date_format: &str) -> String {
        match (self.entity.created_at(), self.entity.created_at.as_deref()) {
            (Some(at), _) => at.format(date_format).to_string(),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Render a field value for display.
///
/// Dates use `date_format`; datetimes use `date_format` followed by the
/// time of day. Values that do not parse are shown as sent.
#[must_use]
pub fn display_value(kind: FieldKind, value: &Value, date_format: &str) -> String {
    let text = value_text(value);
    match kind {
        FieldKind::Date => parse_date(&text)
            .map_or(text, |date| date.format(date_format).to_string()),
        FieldKind::Datetime => parse_timestamp(&text).map_or(text, |at| {
            at.format(&format!("{date_format} %H:%M")).to_string()
        }),
        FieldKind::Text | FieldKind::Integer | FieldKind::Decimal => text,
    }
}

// ---------------------------------------------------------------------------
// ListView
// ---------------------------------------------------------------------------

/// Rows of one resource, in server order.
///
/// A failed refresh keeps the rows from the last successful one.
#[derive(Debug, Clone)]
pub struct ListView {
    rows: Vec<Entity>,
    state: LoadState,
    editing: Option<i64>,
    placeholder: String,
}

impl ListView {
    #[must_use]
    pub fn new(schema: &EntitySchema) -> Self {
        Self {
            rows: Vec::new(),
            state: LoadState::Idle,
            editing: None,
            placeholder: schema.placeholder(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.rows
    }

    #[must_use]
    pub fn rows(&self) -> Vec<RowView<'_>> {
        self.rows
            .iter()
            .map(|entity| RowView {
                entity,
                editing: self.editing == Some(entity.id),
            })
            .collect()
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Entity> {
        self.rows.iter().find(|entity| entity.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Message to show instead of a table, once a load found nothing.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        (self.state == LoadState::Loaded && self.rows.is_empty())
            .then_some(self.placeholder.as_str())
    }

    pub const fn set_editing(&mut self, id: Option<i64>) {
        self.editing = id;
    }

    #[must_use]
    pub const fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// Fetch once; later calls are no-ops until [`Self::refresh`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::refresh`].
    pub async fn mount<A: CrudApi>(&mut self, api: &A) -> Result<(), ViewError> {
        if self.state == LoadState::Idle {
            self.refresh(api).await?;
        }
        Ok(())
    }

    /// Replace the rows with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Client`]; the previous rows stay in place.
    pub async fn refresh<A: CrudApi>(&mut self, api: &A) -> Result<(), ViewError> {
        self.state = LoadState::Loading;
        match api.list().await {
            Ok(rows) => {
                tracing::debug!(count = rows.len(), "rows loaded");
                if self.editing.is_some_and(|id| !rows.iter().any(|e| e.id == id)) {
                    self.editing = None;
                }
                self.rows = rows;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(error) => {
                self.state = LoadState::Failed(error.to_string());
                Err(error.into())
            }
        }
    }
}
