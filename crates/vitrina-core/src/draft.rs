use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::entity::Entity;
use crate::errors::CoreError;
use crate::schema::{EntitySchema, FieldKind};
use crate::validation::{FieldErrors, validate};

/// Transient, user-typed copy of an entity's editable fields.
///
/// Values are kept as raw text exactly as entered; typing happens only when
/// the draft is turned into a request payload. `editing_id` binds the draft
/// to an existing entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormDraft {
    values: BTreeMap<String, String>,
    editing_id: Option<i64>,
}

impl FormDraft {
    /// Empty draft with every schema field present and blank.
    #[must_use]
    pub fn blank(schema: &EntitySchema) -> Self {
        Self {
            values: schema
                .field_names()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
            editing_id: None,
        }
    }

    /// Draft pre-populated from `entity` and bound to its id.
    #[must_use]
    pub fn from_entity(schema: &EntitySchema, entity: &Entity) -> Self {
        Self {
            values: schema
                .field_names()
                .map(|name| (name.to_string(), entity.text(name)))
                .collect(),
            editing_id: Some(entity.id),
        }
    }

    #[must_use]
    pub const fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Set the raw text of a declared field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if `field` is not part of `schema`.
    pub fn set(
        &mut self,
        schema: &EntitySchema,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        if schema.field(field).is_none() {
            return Err(CoreError::UnknownField {
                resource: schema.resource.clone(),
                field: field.to_string(),
            });
        }
        self.values.insert(field.to_string(), value.into());
        Ok(())
    }

    /// Values in schema order, for display.
    #[must_use]
    pub fn ordered<'a>(&'a self, schema: &'a EntitySchema) -> Vec<(&'a str, &'a str)> {
        schema
            .fields
            .iter()
            .map(|field| {
                (
                    field.label.as_str(),
                    self.get(&field.name).unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Validate and convert into a typed JSON body.
    ///
    /// Integers and decimals become JSON numbers, text and dates stay
    /// strings (trimmed), and empty optional fields become `null`.
    ///
    /// # Errors
    ///
    /// Returns the validation [`FieldErrors`] if any field is invalid.
    pub fn to_payload(&self, schema: &EntitySchema) -> Result<Map<String, Value>, FieldErrors> {
        validate(schema, self)?;

        let mut errors = FieldErrors::new();
        let mut payload = Map::new();
        for spec in &schema.fields {
            let raw = self.get(&spec.name).unwrap_or_default().trim();
            let value = if raw.is_empty() {
                Value::Null
            } else {
                match spec.kind {
                    FieldKind::Integer => raw.parse::<i64>().map_or(Value::Null, Value::from),
                    FieldKind::Decimal => raw
                        .parse::<f64>()
                        .ok()
                        .and_then(Number::from_f64)
                        .map_or(Value::Null, Value::Number),
                    FieldKind::Text | FieldKind::Date | FieldKind::Datetime => {
                        Value::String(raw.to_string())
                    }
                }
            };
            if value.is_null() && !raw.is_empty() {
                errors.insert(&spec.name, format!("{} no es un valor válido", spec.label));
            }
            payload.insert(spec.name.clone(), value);
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::schema::{FieldRule, FieldSpec, Routes};

    fn animales() -> EntitySchema {
        EntitySchema {
            name: "animal".into(),
            plural: "animales".into(),
            owner: "asantelis".into(),
            resource: "animales".into(),
            fields: vec![
                FieldSpec::text("nombre", "Nombre"),
                FieldSpec::text("raza", "Raza"),
                FieldSpec::new("edad", "Edad", FieldKind::Integer).rule(FieldRule::NonNegative),
                FieldSpec::new("peso", "Peso", FieldKind::Decimal).optional(),
            ],
            routes: Routes::default(),
            empty_message: None,
        }
    }

    #[test]
    fn blank_draft_has_every_field() {
        let schema = animales();
        let draft = FormDraft::blank(&schema);
        assert_eq!(draft.get("nombre"), Some(""));
        assert_eq!(draft.get("peso"), Some(""));
        assert_eq!(draft.editing_id(), None);
    }

    #[test]
    fn set_rejects_unknown_field() {
        let schema = animales();
        let mut draft = FormDraft::blank(&schema);
        let err = draft.set(&schema, "color", "negro").expect_err("unknown");
        assert!(matches!(err, CoreError::UnknownField { .. }));
    }

    #[test]
    fn payload_is_typed() {
        let schema = animales();
        let mut draft = FormDraft::blank(&schema);
        draft.set(&schema, "nombre", " Rex ").expect("set");
        draft.set(&schema, "raza", "Labrador").expect("set");
        draft.set(&schema, "edad", "3").expect("set");

        let payload = draft.to_payload(&schema).expect("valid draft");
        assert_eq!(
            Value::Object(payload),
            json!({"nombre": "Rex", "raza": "Labrador", "edad": 3, "peso": null})
        );
    }

    #[test]
    fn payload_refuses_invalid_draft() {
        let schema = animales();
        let draft = FormDraft::blank(&schema);
        let errors = draft.to_payload(&schema).expect_err("required fields empty");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn from_entity_binds_id_and_copies_text() {
        let schema = animales();
        let entity = Entity::new(9)
            .with("nombre", "Luna")
            .with("raza", "Mestiza")
            .with("edad", 2)
            .with("peso", 7.5);
        let draft = FormDraft::from_entity(&schema, &entity);
        assert_eq!(draft.editing_id(), Some(9));
        assert_eq!(draft.get("edad"), Some("2"));
        assert_eq!(draft.get("peso"), Some("7.5"));
    }

    #[test]
    fn ordered_follows_schema() {
        let schema = animales();
        let draft = FormDraft::blank(&schema);
        let labels: Vec<&str> = draft.ordered(&schema).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Nombre", "Raza", "Edad", "Peso"]);
    }
}
