use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Resources(args) => commands::resources::run(args.json_schema, ctx, flags),
        Commands::Schema(args) => commands::schema::run(&args.resource, ctx, flags),
        Commands::List(args) => commands::list::run(&args.resource, ctx, flags).await,
        Commands::Get(args) => commands::get::run(&args.resource, args.id, ctx, flags).await,
        Commands::Search(args) => {
            commands::search::run(&args.resource, &args.term, ctx, flags).await
        }
        Commands::Create(args) => commands::create::run(&args.resource, &args.set, ctx, flags).await,
        Commands::Update(args) => {
            commands::update::run(&args.resource, args.id, &args.set, ctx, flags).await
        }
        Commands::Delete(args) => {
            commands::delete::run(&args.resource, args.id, args.yes, ctx, flags).await
        }
        Commands::Shell(args) => commands::shell::run(&args.resource, ctx, flags).await,
    }
}
