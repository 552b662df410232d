use vitrina_client::CrudApi;
use vitrina_view::RowView;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_rows;
use crate::progress::Progress;

pub async fn run(
    resource: &str,
    term: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = ctx.client(resource)?;

    let spinner = Progress::spinner(&format!("Buscando \"{term}\"..."));
    let found = client.search(term).await;
    spinner.finish_clear();
    let found = found?;

    let rows = found
        .iter()
        .map(|entity| RowView {
            entity,
            editing: false,
        })
        .collect::<Vec<_>>();
    output_rows(
        client.schema(),
        &rows,
        &ctx.config.general.date_format,
        flags.format,
    )
}
