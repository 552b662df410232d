use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::commands::shared::confirm;
use crate::context::AppContext;
use crate::output::{output, print_alerts};
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct Deleted {
    id: i64,
    deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<Value>,
}

pub async fn run(
    resource: &str,
    id: i64,
    yes: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut view = ctx.coordinator(resource)?;

    let spinner = Progress::spinner(&format!("Cargando {}...", view.schema().plural));
    let mounted = view.mount().await;
    spinner.finish_clear();
    mounted?;

    let prompt = view.request_delete(id)?.prompt.clone();
    if !yes && !confirm::ask(&prompt).await? {
        view.cancel_delete();
        return output(
            &Deleted {
                id,
                deleted: false,
                detail: None,
            },
            flags.format,
        );
    }

    let detail = view.confirm_delete().await?;
    print_alerts(&view.take_alerts());
    output(
        &Deleted {
            id,
            deleted: true,
            detail,
        },
        flags.format,
    )
}
