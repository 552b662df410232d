use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List the known resources.
    Resources(ResourcesArgs),
    /// Show one resource schema.
    Schema(SchemaArgs),
    /// List all records of a resource.
    List(ResourceArgs),
    /// Get one record by ID.
    Get(ItemArgs),
    /// Search a resource that declares a search route.
    Search(SearchArgs),
    /// Validate and create a record.
    Create(CreateArgs),
    /// Load, change, validate and update a record.
    Update(UpdateArgs),
    /// Delete a record after confirmation.
    Delete(DeleteArgs),
    /// Interactive session over one resource.
    Shell(ResourceArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ResourcesArgs {
    /// Print the JSON Schema of resource declarations instead.
    #[arg(long)]
    pub json_schema: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ResourceArgs {
    /// Resource segment or plural (e.g. `animales`).
    pub resource: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub resource: String,
}

#[derive(Clone, Debug, Args)]
pub struct ItemArgs {
    pub resource: String,
    pub id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    pub resource: String,
    pub term: String,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    pub resource: String,
    /// Field assignment, repeatable: `--set nombre=Rex`.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    pub resource: String,
    pub id: i64,
    /// Field assignment, repeatable: `--set edad=4`.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    pub resource: String,
    pub id: i64,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Split `field=value` at the first `=`. The value may be empty.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse_assignment;

    #[test]
    fn splits_at_first_equals() {
        assert_eq!(
            parse_assignment("correo=a=b@x.mx").unwrap(),
            ("correo".to_string(), "a=b@x.mx".to_string())
        );
    }

    #[test]
    fn empty_value_is_allowed() {
        assert_eq!(
            parse_assignment("descripcion=").unwrap(),
            ("descripcion".to_string(), String::new())
        );
    }

    #[test]
    fn missing_field_is_rejected() {
        assert!(parse_assignment("=3").is_err());
        assert!(parse_assignment("edad").is_err());
    }
}
