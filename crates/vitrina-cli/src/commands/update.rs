use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::assign;
use crate::context::AppContext;
use crate::output::{output_entity, print_alerts};
use crate::progress::Progress;

pub async fn run(
    resource: &str,
    id: i64,
    assignments: &[(String, String)],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut view = ctx.coordinator(resource)?;

    let spinner = Progress::spinner(&format!("Cargando {}...", view.schema().plural));
    let mounted = view.mount().await;
    spinner.finish_clear();
    mounted?;

    let plural = view.schema().plural.clone();
    view.edit(id)
        .with_context(|| format!("cannot update {plural} {id}"))?;
    assign::apply(&mut view, assignments)?;

    let updated = view.submit().await?;
    print_alerts(&view.take_alerts());
    let Some(entity) = updated.or_else(|| view.list().find(id).cloned()) else {
        return Ok(());
    };
    output_entity(view.schema(), &entity, view.date_format(), flags.format)
}
