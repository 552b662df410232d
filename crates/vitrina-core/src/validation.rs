//! Client-side validation of a [`FormDraft`] against its [`EntitySchema`].
//!
//! Validation runs before any network call. Every required field must be
//! non-empty, every non-empty value must parse as its [`FieldKind`], and then
//! the field's rules are checked in declaration order. Only the first
//! failure per field is kept.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use regex::Regex;
use serde::Serialize;

use crate::draft::FormDraft;
use crate::entity::{parse_date, parse_timestamp};
use crate::schema::{EntitySchema, FieldKind, FieldRule, FieldSpec};

/// Compiled pattern rules, keyed by their source text.
static PATTERNS: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();

/// Compile `pattern` once per process.
pub(crate) fn compiled(pattern: &str) -> Result<Regex, regex::Error> {
    let mut cache = PATTERNS
        .get_or_init(Mutex::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern.to_string(), re.clone());
    Ok(re)
}

/// One error message per offending field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field` unless one is already recorded.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Validate every field of `draft`.
///
/// # Errors
///
/// Returns the collected [`FieldErrors`] when at least one field fails.
pub fn validate(schema: &EntitySchema, draft: &FormDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for spec in &schema.fields {
        let raw = draft.get(&spec.name).unwrap_or_default();
        if let Some(message) = check_field(spec, raw) {
            errors.insert(&spec.name, message);
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Check a single raw value. Returns the message for the first failure.
#[must_use]
pub fn check_field(spec: &FieldSpec, raw: &str) -> Option<String> {
    let value = raw.trim();
    let label = &spec.label;

    if value.is_empty() {
        return spec
            .required
            .then(|| format!("El campo {label} es obligatorio"));
    }

    if let Some(message) = check_kind(spec.kind, label, value) {
        return Some(message);
    }

    spec.rules
        .iter()
        .find_map(|rule| check_rule(rule, label, value))
}

fn check_kind(kind: FieldKind, label: &str, value: &str) -> Option<String> {
    let ok = match kind {
        FieldKind::Text => true,
        FieldKind::Integer => value.parse::<i64>().is_ok(),
        FieldKind::Decimal => value.parse::<f64>().is_ok_and(f64::is_finite),
        FieldKind::Date => parse_date(value).is_some(),
        FieldKind::Datetime => parse_timestamp(value).is_some(),
    };
    if ok {
        return None;
    }
    Some(match kind {
        FieldKind::Integer => format!("{label} debe ser un número entero"),
        FieldKind::Decimal => format!("{label} debe ser un número"),
        FieldKind::Date => format!("{label} debe tener el formato AAAA-MM-DD"),
        FieldKind::Datetime | FieldKind::Text => {
            format!("{label} debe ser una fecha y hora ISO-8601")
        }
    })
}

fn check_rule(rule: &FieldRule, label: &str, value: &str) -> Option<String> {
    match rule {
        FieldRule::NoDigits => value
            .chars()
            .any(|ch| ch.is_ascii_digit())
            .then(|| format!("{label} no puede contener números")),
        FieldRule::Positive => (!value.parse::<f64>().is_ok_and(|n| n > 0.0))
            .then(|| format!("{label} debe ser un número positivo")),
        FieldRule::NonNegative => (!value.parse::<f64>().is_ok_and(|n| n >= 0.0))
            .then(|| format!("{label} no puede ser negativo")),
        FieldRule::Pattern { regex, message } => match compiled(regex) {
            Ok(re) => (!re.is_match(value)).then(|| message.clone()),
            Err(error) => Some(format!("regla inválida para {label}: {error}")),
        },
        FieldRule::OneOf { values } => (!values.iter().any(|allowed| allowed == value))
            .then(|| format!("{label} debe ser uno de: {}", values.join(", "))),
    }
}
