//! `vtr shell <resource>`: a line-oriented session over one coordinator.

mod parse;

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use vitrina_client::CrudApi;
use vitrina_view::{Coordinator, ViewError};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{output_rows, print_alerts};

use parse::{HELP, ShellCommand, parse_line};

pub async fn run(resource: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut view = ctx.coordinator(resource)?;
    println!(
        "{} en {} (escribe 'help' para ver los comandos)",
        view.schema().plural,
        ctx.config.api.endpoint(&view.schema().owner, &view.schema().resource)
    );

    if view.mount().await.is_ok() {
        print_rows(&view, flags)?;
    }
    print_alerts(&view.take_alerts());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}[{}]> ", view.schema().plural, view.form().mode());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }

        let result = execute(&mut view, command, flags).await;
        let alerts = view.take_alerts();
        if let Err(error) = result
            && alerts.is_empty()
        {
            eprintln!("✗ {error:#}");
        }
        print_alerts(&alerts);
    }
    Ok(())
}

async fn execute<A: CrudApi>(
    view: &mut Coordinator<A>,
    command: ShellCommand,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        ShellCommand::List => print_rows(view, flags)?,
        ShellCommand::Refresh => {
            view.refresh().await?;
            print_rows(view, flags)?;
        }
        ShellCommand::New | ShellCommand::Cancel => {
            view.cancel_edit();
            println!("{}", view.form().mode());
        }
        ShellCommand::Set { field, value } => view.set(&field, value)?,
        ShellCommand::Show => print_draft(view),
        ShellCommand::Edit(id) => {
            view.edit(id)?;
            print_draft(view);
        }
        ShellCommand::Submit => {
            let saved = view.submit().await;
            if let Err(ViewError::Validation(_)) = &saved {
                print_draft(view);
            }
            saved?;
            print_rows(view, flags)?;
        }
        ShellCommand::Delete(id) => {
            let pending = view.request_delete(id)?;
            println!("{} (yes/no)", pending.prompt);
        }
        ShellCommand::Yes => {
            view.confirm_delete().await?;
            print_rows(view, flags)?;
        }
        ShellCommand::No => {
            if view.cancel_delete().is_none() {
                return Err(ViewError::NothingToConfirm.into());
            }
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn print_rows<A: CrudApi>(view: &Coordinator<A>, flags: &GlobalFlags) -> anyhow::Result<()> {
    output_rows(
        view.schema(),
        &view.list().rows(),
        view.date_format(),
        flags.format,
    )
}

fn print_draft<A: CrudApi>(view: &Coordinator<A>) {
    let form = view.form();
    println!("mode: {}", form.mode());
    for spec in &form.schema().fields {
        let value = form.draft().get(&spec.name).unwrap_or_default();
        let marker = if spec.required { "*" } else { " " };
        match form.errors().get(&spec.name) {
            Some(error) => println!("  {marker}{} = {value:?}  <- {error}", spec.name),
            None => println!("  {marker}{} = {value:?}", spec.name),
        }
    }
    if let Some(pending) = view.modal().pending() {
        println!("pending: {}", pending.prompt);
    }
}
