/// One line typed at the shell prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    New,
    Set { field: String, value: String },
    Edit(i64),
    Cancel,
    Submit,
    Delete(i64),
    Yes,
    No,
    Show,
    Refresh,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list                 show the loaded rows
  refresh              fetch the rows again
  new                  start a new record (discards the draft)
  set <field> <value>  set a draft field (also: set field=value)
  show                 show the draft, its mode and errors
  edit <id>            load a row into the draft
  cancel               discard the draft
  submit               validate and create/update
  delete <id>          ask to delete a row
  yes | no             answer the pending delete
  help                 this text
  quit                 leave the shell";

/// Parse a prompt line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "refresh" | "reload" => ShellCommand::Refresh,
        "new" => ShellCommand::New,
        "set" => parse_set(rest)?,
        "show" | "draft" => ShellCommand::Show,
        "edit" => ShellCommand::Edit(parse_id(rest)?),
        "cancel" => ShellCommand::Cancel,
        "submit" | "save" => ShellCommand::Submit,
        "delete" | "rm" => ShellCommand::Delete(parse_id(rest)?),
        "yes" | "y" => ShellCommand::Yes,
        "no" | "n" => ShellCommand::No,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

/// `set <field> <value>` or `set <field>=<value>`. The field is the first
/// word; an `=` only separates when it appears inside that word or right
/// after it, so values may contain `=` themselves.
fn parse_set(rest: &str) -> Result<ShellCommand, String> {
    let head = rest.split(char::is_whitespace).next().unwrap_or_default();
    let (field, value) = match head.split_once('=') {
        Some((field, _)) => (field, rest[field.len() + 1..].trim()),
        None => {
            let value = rest[head.len()..].trim();
            (head, value.strip_prefix('=').map_or(value, str::trim_start))
        }
    };

    if field.is_empty() {
        return Err("usage: set <field> <value>".to_string());
    }
    Ok(ShellCommand::Set {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_id(rest: &str) -> Result<i64, String> {
    rest.parse::<i64>()
        .map_err(|_| format!("expected a numeric id, got '{rest}'"))
}
