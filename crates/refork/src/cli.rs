//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// refork - Scaffold a new project from a template repository
#[derive(Parser, Debug)]
#[command(name = "refork")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a refork config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the template into a new directory
    Copy(CopyArgs),

    /// Replace template symbols with project values
    Replace(ReplaceArgs),

    /// Initialize git and publish to GitHub
    Init(InitArgs),

    /// Copy, replace and init in one go
    All(AllArgs),
}

#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Destination directory
    pub destination: String,

    /// Overwrite the destination if it exists
    #[arg(short, long)]
    pub force: bool,

    /// Template directory to copy from
    #[arg(short, long, default_value = ".")]
    pub source: Utf8PathBuf,
}

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Project directory
    pub destination: String,

    /// New project name
    pub project_name: String,

    /// GitHub organization or user
    #[arg(env = "REFORK_ORGANIZATION")]
    pub organization: Option<String>,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory
    pub destination: String,

    /// Repository name
    pub project_name: String,

    /// GitHub organization or user
    #[arg(env = "REFORK_ORGANIZATION")]
    pub organization: Option<String>,

    /// Create a public repository (private by default)
    #[arg(long)]
    pub public: bool,
}

#[derive(Args, Debug)]
pub struct AllArgs {
    /// Destination directory
    pub destination: String,

    /// New project and repository name
    pub project_name: String,

    /// GitHub organization or user
    #[arg(env = "REFORK_ORGANIZATION")]
    pub organization: Option<String>,

    /// Overwrite the destination if it exists
    #[arg(short, long)]
    pub force: bool,

    /// Create a public repository (private by default)
    #[arg(long)]
    pub public: bool,

    /// Template directory to copy from
    #[arg(short, long, default_value = ".")]
    pub source: Utf8PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all() {
        let cli = Cli::try_parse_from([
            "refork", "all", "./dest", "my-lib", "acme", "--force", "--public", "-s", "../tpl",
        ])
        .unwrap();

        match cli.command {
            Commands::All(args) => {
                assert_eq!(args.destination, "./dest");
                assert_eq!(args.project_name, "my-lib");
                assert_eq!(args.organization.as_deref(), Some("acme"));
                assert!(args.force);
                assert!(args.public);
                assert_eq!(args.source, Utf8PathBuf::from("../tpl"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_copy_defaults() {
        let cli = Cli::try_parse_from(["refork", "-vv", "copy", "./dest"]).unwrap();
        assert_eq!(cli.verbose, 2);

        match cli.command {
            Commands::Copy(args) => {
                assert!(!args.force);
                assert_eq!(args.source, Utf8PathBuf::from("."));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_missing_project_name() {
        let err = Cli::try_parse_from(["refork", "replace", "./dest"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_no_arguments_shows_help() {
        let err = Cli::try_parse_from(["refork"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }
}
