//! Resource schemas: fields, field rules and route templates.
//!
//! A single [`EntitySchema`] is enough to drive the API client, the form and
//! the list for one resource. Schemas are serializable so that extra
//! resources can be declared in configuration next to the built-in
//! [`catalog`](crate::catalog).

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validation::compiled;

/// Field names that are owned by the server and never editable.
pub const RESERVED_FIELDS: &[&str] = &["id", "created_at"];

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Value type of a field. Drives both validation and payload typing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Integer,
    Decimal,
    Date,
    #[serde(alias = "date_time")]
    Datetime,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Datetime => "datetime",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldRule
// ---------------------------------------------------------------------------

/// Extra constraint checked on a non-empty field value before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FieldRule {
    /// The value may not contain any ASCII digit.
    NoDigits,
    /// The value must be a number strictly greater than zero.
    Positive,
    /// The value must be a number greater than or equal to zero.
    NonNegative,
    /// The whole value must match `regex`; `message` is shown otherwise.
    Pattern { regex: String, message: String },
    /// The value must be one of `values` (exact match).
    OneOf { values: Vec<String> },
}

impl FieldRule {
    /// Build a pattern rule.
    #[must_use]
    pub fn pattern(regex: &str, message: &str) -> Self {
        Self::Pattern {
            regex: regex.to_string(),
            message: message.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldSpec
// ---------------------------------------------------------------------------

const fn default_required() -> bool {
    true
}

/// One editable field of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    /// JSON key used on the wire.
    pub name: String,
    /// Human label used in messages and table headers.
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// Required fields must be non-empty before any mutation is sent.
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub rules: Vec<FieldRule>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: true,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

fn item_route() -> String {
    "{id}".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn optional_item_route() -> Option<String> {
    Some(item_route())
}

/// Path templates for each operation, relative to the resource endpoint.
///
/// `{id}` is replaced by the entity id and `{term}` by the URL-encoded search
/// term. An empty template addresses the collection itself.
///
/// `envelope` names the key under which a backend wraps records in
/// `{"status", "message", <key>: [...]}` answers. Bare arrays and objects
/// are still accepted when it is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Routes {
    #[serde(default)]
    pub list: String,
    #[serde(default)]
    pub create: String,
    /// `None` when the backend has no single-record GET.
    #[serde(default = "optional_item_route")]
    pub get: Option<String>,
    #[serde(default = "item_route")]
    pub update: String,
    #[serde(default = "item_route")]
    pub delete: String,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub envelope: Option<String>,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            list: String::new(),
            create: String::new(),
            get: optional_item_route(),
            update: item_route(),
            delete: item_route(),
            search: None,
            envelope: None,
        }
    }
}

impl Routes {
    /// Substitute `{id}` in an item template.
    #[must_use]
    pub fn with_id(template: &str, id: i64) -> String {
        template.replace("{id}", &id.to_string())
    }

    /// Substitute `{term}` in a search template. `term` must already be encoded.
    #[must_use]
    pub fn with_term(template: &str, encoded_term: &str) -> String {
        template.replace("{term}", encoded_term)
    }
}

// ---------------------------------------------------------------------------
// EntitySchema
// ---------------------------------------------------------------------------

/// Description of one CRUD resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EntitySchema {
    /// Singular noun, e.g. `animal`.
    pub name: String,
    /// Plural noun, e.g. `animales`. Also used in the empty-list placeholder.
    pub plural: String,
    /// Backend project segment in `/api/v1/{owner}/{resource}`.
    pub owner: String,
    /// Resource path segment in `/api/v1/{owner}/{resource}`.
    pub resource: String,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub routes: Routes,
    /// Placeholder shown instead of an empty table.
    #[serde(default)]
    pub empty_message: Option<String>,
}

impl EntitySchema {
    /// Look up a field by its wire name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Text shown when the collection is empty.
    #[must_use]
    pub fn placeholder(&self) -> String {
        self.empty_message
            .clone()
            .unwrap_or_else(|| format!("No hay {} registrados", self.plural))
    }

    /// Check that the schema is usable: non-empty, unique, non-reserved field
    /// names, compilable patterns, and route templates carrying their
    /// placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSchema`] describing the first problem found.
    pub fn check(&self) -> Result<(), CoreError> {
        let invalid = |reason: String| CoreError::InvalidSchema {
            resource: self.resource.clone(),
            reason,
        };

        if self.resource.trim().is_empty() {
            return Err(invalid("resource segment is empty".to_string()));
        }
        if self.fields.is_empty() {
            return Err(invalid("no fields declared".to_string()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(invalid("field with empty name".to_string()));
            }
            if RESERVED_FIELDS.contains(&field.name.as_str()) {
                return Err(invalid(format!(
                    "field '{}' is assigned by the server",
                    field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field '{}'", field.name)));
            }
            for rule in &field.rules {
                if let FieldRule::Pattern { regex, .. } = rule {
                    compiled(regex).map_err(|error| {
                        invalid(format!("pattern for '{}' does not compile: {error}", field.name))
                    })?;
                }
            }
        }

        for (operation, template) in [
            ("get", self.routes.get.as_ref()),
            ("update", Some(&self.routes.update)),
            ("delete", Some(&self.routes.delete)),
        ] {
            if let Some(template) = template
                && !template.contains("{id}")
            {
                return Err(invalid(format!("{operation} route '{template}' lacks {{id}}")));
            }
        }
        if self
            .routes
            .envelope
            .as_ref()
            .is_some_and(|key| key.trim().is_empty())
        {
            return Err(invalid("envelope key is empty".to_string()));
        }
        if let Some(search) = &self.routes.search
            && !search.contains("{term}")
        {
            return Err(invalid(format!("search route '{search}' lacks {{term}}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> EntitySchema {
        EntitySchema {
            name: "animal".into(),
            plural: "animales".into(),
            owner: "asantelis".into(),
            resource: "animales".into(),
            fields: vec![
                FieldSpec::text("nombre", "Nombre"),
                FieldSpec::new("edad", "Edad", FieldKind::Integer).rule(FieldRule::NonNegative),
            ],
            routes: Routes::default(),
            empty_message: None,
        }
    }

    #[test]
    fn placeholder_defaults_to_plural() {
        assert_eq!(sample().placeholder(), "No hay animales registrados");
    }

    #[test]
    fn placeholder_prefers_explicit_message() {
        let schema = EntitySchema {
            empty_message: Some("Sin datos".into()),
            ..sample()
        };
        assert_eq!(schema.placeholder(), "Sin datos");
    }

    #[test]
    fn sample_schema_checks() {
        assert!(sample().check().is_ok());
    }

    #[test]
    fn rejects_reserved_field() {
        let mut schema = sample();
        schema.fields.push(FieldSpec::text("id", "Id"));
        let err = schema.check().expect_err("id is reserved");
        assert!(err.to_string().contains("assigned by the server"));
    }

    #[test]
    fn rejects_duplicate_field() {
        let mut schema = sample();
        schema.fields.push(FieldSpec::text("nombre", "Otro"));
        assert!(schema.check().is_err());
    }

    #[test]
    fn rejects_broken_pattern() {
        let mut schema = sample();
        schema.fields[0]
            .rules
            .push(FieldRule::pattern("([a-z", "mal"));
        assert!(schema.check().is_err());
    }

    #[test]
    fn rejects_item_route_without_id() {
        let mut schema = sample();
        schema.routes.delete = "eliminar".into();
        let err = schema.check().expect_err("delete needs {id}");
        assert!(err.to_string().contains("delete route"));
    }

    #[test]
    fn schema_without_get_route_checks() {
        let mut schema = sample();
        schema.routes.get = None;
        assert!(schema.check().is_ok());
    }

    #[test]
    fn rejects_blank_envelope_key() {
        let mut schema = sample();
        schema.routes.envelope = Some("  ".into());
        let err = schema.check().expect_err("blank envelope");
        assert!(err.to_string().contains("envelope"));
    }

    #[test]
    fn routes_substitute_placeholders() {
        assert_eq!(Routes::with_id("edit/{id}", 7), "edit/7");
        assert_eq!(Routes::with_term("search/{term}", "Ana%20Luz"), "search/Ana%20Luz");
    }

    #[test]
    fn schema_deserializes_with_defaults() {
        let json = r#"{
            "name": "libro",
            "plural": "libros",
            "owner": "jparedes",
            "resource": "libros",
            "fields": [
                {"name": "isbn", "label": "ISBN", "kind": "integer",
                 "rules": [{"rule": "pattern", "regex": "^\\d{10}$", "message": "diez"}]},
                {"name": "titulo", "label": "Título"}
            ]
        }"#;
        let schema: EntitySchema = serde_json::from_str(json).expect("schema should parse");
        assert_eq!(schema.routes, Routes::default());
        assert_eq!(schema.routes.get.as_deref(), Some("{id}"));
        assert_eq!(schema.fields[1].kind, FieldKind::Text);
        assert!(schema.fields[1].required);
        assert_eq!(
            schema.fields[0].rules,
            vec![FieldRule::pattern("^\\d{10}$", "diez")]
        );
    }
}
