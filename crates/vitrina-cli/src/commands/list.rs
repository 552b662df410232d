use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_rows;
use crate::progress::Progress;

pub async fn run(resource: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut view = ctx.coordinator(resource)?;

    let spinner = Progress::spinner(&format!("Cargando {}...", view.schema().plural));
    if let Err(error) = view.mount().await {
        spinner.finish_err("error");
        return Err(error.into());
    }
    spinner.finish_clear();

    let rows = view.list().rows();
    output_rows(view.schema(), &rows, view.date_format(), flags.format)
}
