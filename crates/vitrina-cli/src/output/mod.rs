use serde::Serialize;
use serde_json::Value;
use vitrina_core::{Entity, EntitySchema};
use vitrina_view::{Alert, AlertLevel, RowView};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render rows of one resource.
///
/// Tables use the schema's field order and labels and show the placeholder
/// message for an empty collection; JSON and raw print the entities as sent.
pub fn render_rows(
    schema: &EntitySchema,
    rows: &[RowView<'_>],
    date_format: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        let entities = rows.iter().map(|row| row.entity).collect::<Vec<_>>();
        return render(&entities, format);
    }
    if rows.is_empty() {
        return Ok(schema.placeholder());
    }
    Ok(entity_table(schema, rows, date_format, table_options()))
}

/// Print rows of one resource.
pub fn output_rows(
    schema: &EntitySchema,
    rows: &[RowView<'_>],
    date_format: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = render_rows(schema, rows, date_format, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print one entity; tables list it as a single row.
pub fn output_entity(
    schema: &EntitySchema,
    entity: &Entity,
    date_format: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let row = RowView {
        entity,
        editing: false,
    };
    output_rows(schema, &[row], date_format, format)
}

fn entity_table(
    schema: &EntitySchema,
    rows: &[RowView<'_>],
    date_format: &str,
    options: table::TableOptions,
) -> String {
    let mut headers = vec!["id"];
    headers.extend(schema.fields.iter().map(|field| field.label.as_str()));
    headers.push("creado");

    let cells = rows
        .iter()
        .map(|row| {
            let id = if row.editing {
                format!("{}{}", table::EDITING_MARKER, row.entity.id)
            } else {
                row.entity.id.to_string()
            };
            let mut line = vec![id];
            line.extend(row.cells(schema, date_format));
            line.push(row.created(date_format));
            line
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&headers, &cells, options)
}

/// Print alerts on stderr, unless quiet.
pub fn print_alerts(alerts: &[Alert]) {
    if !ui::prefs().alerts {
        return;
    }
    for alert in alerts {
        eprintln!("{}", alert_line(alert));
    }
}

fn alert_line(alert: &Alert) -> String {
    let mark = match alert.level {
        AlertLevel::Success => "✓",
        AlertLevel::Warning => "!",
        AlertLevel::Error => "✗",
    };
    format!("{mark} {}", alert.message)
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();

    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options))
        }
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options);
    }

    // First-seen key order.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items.iter().map(value_to_cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| String::from("<invalid-json>"))
        }
    }
}
