//! Built-in resource schemas.
//!
//! One entry per known backend project whose routes follow the CRUD shape.
//! Configuration may add more schemas or replace these by resource name.

use crate::errors::CoreError;
use crate::schema::{EntitySchema, FieldKind, FieldRule, FieldSpec, Routes};

/// ISBN-10 or ISBN-13, digits only.
pub const ISBN_PATTERN: &str = r"^(\d{10}|\d{13})$";

/// At least ten digits with an optional leading `+`.
pub const PHONE_PATTERN: &str = r"^\+?\d{10,}$";

fn schema(name: &str, plural: &str, owner: &str, resource: &str, fields: Vec<FieldSpec>) -> EntitySchema {
    EntitySchema {
        name: name.to_string(),
        plural: plural.to_string(),
        owner: owner.to_string(),
        resource: resource.to_string(),
        fields,
        routes: Routes::default(),
        empty_message: None,
    }
}

/// All built-in schemas, in a stable order.
#[must_use]
pub fn builtins() -> Vec<EntitySchema> {
    vec![
        animales(),
        estudiantes(),
        productos(),
        eventos(),
        cursos(),
        ventas(),
        ciudades(),
        libros(),
        contactos(),
    ]
}

/// Find a schema by resource segment or plural noun.
///
/// `extra` schemas are searched first so configured resources can shadow
/// built-ins.
///
/// # Errors
///
/// Returns [`CoreError::UnknownResource`] when nothing matches.
pub fn find(resource: &str, extra: &[EntitySchema]) -> Result<EntitySchema, CoreError> {
    let wanted = resource.trim().to_lowercase();
    let matches = |schema: &EntitySchema| {
        schema.resource.eq_ignore_ascii_case(&wanted) || schema.plural.eq_ignore_ascii_case(&wanted)
    };
    extra
        .iter()
        .find(|schema| matches(schema))
        .cloned()
        .or_else(|| builtins().into_iter().find(|schema| matches(schema)))
        .ok_or_else(|| CoreError::UnknownResource(resource.to_string()))
}

/// Built-ins merged with `extra`; an extra schema replaces the built-in with
/// the same resource segment.
#[must_use]
pub fn merged(extra: &[EntitySchema]) -> Vec<EntitySchema> {
    let mut all: Vec<EntitySchema> = builtins()
        .into_iter()
        .filter(|builtin| !extra.iter().any(|e| e.resource == builtin.resource))
        .collect();
    all.extend(extra.iter().cloned());
    all
}

#[must_use]
pub fn animales() -> EntitySchema {
    schema(
        "animal",
        "animales",
        "asantelis",
        "animales",
        vec![
            FieldSpec::text("nombre", "Nombre"),
            FieldSpec::text("raza", "Raza"),
            FieldSpec::new("edad", "Edad", FieldKind::Integer).rule(FieldRule::NonNegative),
        ],
    )
}

#[must_use]
pub fn estudiantes() -> EntitySchema {
    schema(
        "estudiante",
        "estudiantes",
        "dduenas",
        "estudiantes",
        vec![
            FieldSpec::text("nombre", "Nombre").rule(FieldRule::NoDigits),
            FieldSpec::text("carrera", "Carrera"),
        ],
    )
}

#[must_use]
pub fn productos() -> EntitySchema {
    schema(
        "producto",
        "productos",
        "dramos",
        "productos",
        vec![
            FieldSpec::text("nombre", "Nombre"),
            FieldSpec::text("tipo", "Tipo"),
            FieldSpec::new("precio", "Precio", FieldKind::Decimal).rule(FieldRule::Positive),
        ],
    )
}

#[must_use]
pub fn eventos() -> EntitySchema {
    schema(
        "evento",
        "eventos",
        "imayo",
        "eventos",
        vec![
            FieldSpec::text("nombre", "Nombre").rule(FieldRule::NoDigits),
            FieldSpec::text("descripcion", "Descripción")
                .optional()
                .rule(FieldRule::NoDigits),
            FieldSpec::new("fecha", "Fecha", FieldKind::Datetime),
        ],
    )
}

#[must_use]
pub fn cursos() -> EntitySchema {
    schema(
        "curso",
        "cursos",
        "jchaidez",
        "cursos",
        vec![
            FieldSpec::text("nombre", "Nombre"),
            FieldSpec::text("descripcion", "Descripción"),
            FieldSpec::text("maestro", "Maestro").rule(FieldRule::NoDigits),
        ],
    )
}

#[must_use]
pub fn ventas() -> EntitySchema {
    schema(
        "venta",
        "ventas",
        "jcontreras",
        "ventas",
        vec![
            FieldSpec::text("cliente", "Cliente"),
            FieldSpec::text("producto", "Producto"),
            FieldSpec::new("cantidad", "Cantidad", FieldKind::Integer).rule(FieldRule::Positive),
            FieldSpec::new("precio", "Precio", FieldKind::Decimal).rule(FieldRule::Positive),
        ],
    )
}

#[must_use]
pub fn ciudades() -> EntitySchema {
    EntitySchema {
        routes: Routes {
            list: "ciudades".to_string(),
            create: "ciudades".to_string(),
            get: Some("ciudades/{id}".to_string()),
            update: "actualizar/{id}".to_string(),
            delete: "eliminar/{id}".to_string(),
            search: None,
            envelope: None,
        },
        ..schema(
            "ciudad",
            "ciudades",
            "jheredia",
            "registro_ciudades",
            vec![
                FieldSpec::text("name", "Nombre").rule(FieldRule::NoDigits),
                FieldSpec::new("population", "Población", FieldKind::Integer)
                    .rule(FieldRule::NonNegative),
                FieldSpec::text("country", "País").rule(FieldRule::NoDigits),
                FieldSpec::text("region", "Región").optional(),
            ],
        )
    }
}

#[must_use]
pub fn libros() -> EntitySchema {
    schema(
        "libro",
        "libros",
        "jparedes",
        "libros",
        vec![
            FieldSpec::new("isbn", "ISBN", FieldKind::Integer).rule(FieldRule::pattern(
                ISBN_PATTERN,
                "El ISBN debe tener 10 o 13 dígitos numéricos",
            )),
            FieldSpec::text("titulo", "Título"),
            FieldSpec::text("autor", "Autor"),
        ],
    )
}

/// Mutations and searches answer `{"status", "message", "agenda": [...]}`;
/// there is no single-record GET.
#[must_use]
pub fn contactos() -> EntitySchema {
    EntitySchema {
        routes: Routes {
            list: "agenda".to_string(),
            create: "create".to_string(),
            get: None,
            update: "edit/{id}".to_string(),
            delete: "delete/{id}".to_string(),
            search: Some("search/{term}".to_string()),
            envelope: Some("agenda".to_string()),
        },
        ..schema(
            "contacto",
            "contactos",
            "rpalma",
            "contactos",
            vec![
                FieldSpec::text("nombre", "Nombre").rule(FieldRule::NoDigits),
                FieldSpec::text("telefono", "Teléfono").rule(FieldRule::pattern(
                    PHONE_PATTERN,
                    "El teléfono debe tener al menos 10 dígitos, opcionalmente tras un '+'",
                )),
                FieldSpec::text("correo", "Correo").optional().rule(FieldRule::pattern(
                    r"^[^@\s]+@[^@\s]+\.[^@\s]+$",
                    "El correo no tiene un formato válido",
                )),
            ],
        )
    }
}
