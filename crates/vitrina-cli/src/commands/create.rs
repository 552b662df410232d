use crate::cli::GlobalFlags;
use crate::commands::shared::assign;
use crate::context::AppContext;
use crate::output::{output_entity, output_rows, print_alerts};

pub async fn run(
    resource: &str,
    assignments: &[(String, String)],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut view = ctx.coordinator(resource)?;
    assign::apply(&mut view, assignments)?;

    let created = view.submit().await?;
    print_alerts(&view.take_alerts());
    match created {
        Some(entity) => output_entity(view.schema(), &entity, view.date_format(), flags.format),
        // The backend acknowledged without the record; show the refreshed list.
        None => output_rows(
            view.schema(),
            &view.list().rows(),
            view.date_format(),
            flags.format,
        ),
    }
}
