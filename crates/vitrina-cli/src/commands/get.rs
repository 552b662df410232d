use vitrina_client::CrudApi;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_entity;
use crate::progress::Progress;

pub async fn run(
    resource: &str,
    id: i64,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = ctx.client(resource)?;

    let spinner = Progress::spinner(&format!("Cargando {} {id}...", client.schema().name));
    let entity = client.get(id).await;
    spinner.finish_clear();

    output_entity(
        client.schema(),
        &entity?,
        &ctx.config.general.date_format,
        flags.format,
    )
}
