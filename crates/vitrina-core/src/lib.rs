//! # vitrina-core
//!
//! Core types shared by every Vitrina crate.
//!
//! - [`Entity`]: a record as returned by a resource endpoint
//! - [`FormDraft`]: the transient, user-typed copy of an entity's fields
//! - [`EntitySchema`]: the description of one resource (fields, rules, routes)
//! - Client-side validation producing per-field [`FieldErrors`]
//! - The built-in [`catalog`] of known resources
//! - Cross-cutting error types

pub mod catalog;
pub mod draft;
pub mod entity;
pub mod errors;
pub mod schema;
pub mod validation;

pub use draft::FormDraft;
pub use entity::{Entity, parse_date, parse_timestamp, value_text};
pub use errors::CoreError;
pub use schema::{EntitySchema, FieldKind, FieldRule, FieldSpec, Routes};
pub use validation::{FieldErrors, validate};
