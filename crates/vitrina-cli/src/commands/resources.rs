use serde::Serialize;
use vitrina_core::EntitySchema;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ResourceSummary {
    resource: String,
    plural: String,
    owner: String,
    fields: Vec<String>,
    search: bool,
    endpoint: String,
}

pub fn run(json_schema: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if json_schema {
        let schema = schemars::schema_for!(EntitySchema);
        return output(&schema, OutputFormat::Json);
    }

    let summaries = ctx
        .config
        .schemas()
        .into_iter()
        .map(|schema| ResourceSummary {
            endpoint: ctx.config.api.endpoint(&schema.owner, &schema.resource),
            fields: schema.field_names().map(str::to_string).collect(),
            search: schema.routes.search.is_some(),
            resource: schema.resource,
            plural: schema.plural,
            owner: schema.owner,
        })
        .collect::<Vec<_>>();

    output(&summaries, flags.format)
}
