use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `vtr` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vtr",
    version,
    about = "Vitrina - list, create, edit and delete records on CRUD backends"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress alerts and spinners)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides api.base_url)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Table colors: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            base_url: self.base_url.clone(),
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, ColorMode, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_table_output() {
        let cli = Cli::try_parse_from(["vtr", "resources"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.color, ColorMode::Auto);
        assert!(matches!(cli.command, Commands::Resources(_)));
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "vtr",
            "--format",
            "json",
            "--verbose",
            "list",
            "animales",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::List(ref args) if args.resource == "animales"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["vtr", "get", "libros", "3", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Get(ref args) if args.id == 3));
    }

    #[test]
    fn row_limit_flag_does_not_exist() {
        let parsed = Cli::try_parse_from(["vtr", "--limit", "10", "list", "animales"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["vtr", "--format", "xml", "resources"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn create_collects_assignments() {
        let cli = Cli::try_parse_from([
            "vtr",
            "create",
            "animales",
            "--set",
            "nombre=Rex",
            "--set",
            "raza=Pastor Alemán",
            "--set",
            "edad=3",
        ])
        .expect("cli should parse");

        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(
            args.set,
            vec![
                ("nombre".to_string(), "Rex".to_string()),
                ("raza".to_string(), "Pastor Alemán".to_string()),
                ("edad".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn assignment_without_equals_is_rejected() {
        let parsed = Cli::try_parse_from(["vtr", "create", "animales", "--set", "nombre"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn delete_accepts_yes() {
        let cli = Cli::try_parse_from(["vtr", "delete", "animales", "1", "--yes"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Delete(ref args) if args.yes && args.id == 1));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from([
            "vtr",
            "--base-url",
            "http://127.0.0.1:9000",
            "--color",
            "never",
            "shell",
            "ventas",
        ])
        .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.base_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(flags.color, ColorMode::Never);
    }
}
