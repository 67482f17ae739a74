//! Command-line interface of the `feiras` binary

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "feiras")]
#[command(author, version, about = "Street market registry: CSV import and REST API", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the REST API
    Serve,

    /// Import street markets from a CSV file
    Import(ImportArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ImportArgs {
    /// CSV file with a header row
    #[arg(short, long)]
    pub file: PathBuf,

    /// Number of concurrent persistence workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Field delimiter (a single ASCII character)
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Database URL, overriding DATABASE_URL
    #[arg(long)]
    pub database_url: Option<String>,
}

impl ImportArgs {
    /// Apply the flags on top of configuration read from the environment
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(workers) = self.workers {
            config.import.workers = workers;
        }
        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                bail!("delimiter must be a single ASCII character, got '{delimiter}'");
            }
            config.import.delimiter = delimiter as u8;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import_args(args: &[&str]) -> ImportArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Import(args) => args,
            other => panic!("expected import, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["feiras", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve));
    }

    #[test]
    fn test_import_requires_file() {
        assert!(Cli::try_parse_from(["feiras", "import"]).is_err());
    }

    #[test]
    fn test_import_overrides() {
        let args = import_args(&[
            "feiras",
            "import",
            "--file",
            "feiras.csv",
            "--workers",
            "3",
            "--delimiter",
            ";",
            "--database-url",
            "postgres://localhost/feiras",
        ]);
        assert_eq!(args.file, PathBuf::from("feiras.csv"));

        let mut config = Config::default();
        args.apply(&mut config).unwrap();
        assert_eq!(config.import.workers, 3);
        assert_eq!(config.import.delimiter, b';');
        assert_eq!(config.database.url, "postgres://localhost/feiras");
    }

    #[test]
    fn test_import_without_overrides_keeps_config() {
        let args = import_args(&["feiras", "import", "-f", "feiras.csv"]);
        let mut config = Config::default();
        config.database.url = "postgres://env".to_string();
        args.apply(&mut config).unwrap();
        assert_eq!(config.import, Config::default().import);
        assert_eq!(config.database.url, "postgres://env");
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let args = import_args(&["feiras", "import", "-f", "x.csv", "-d", "§"]);
        assert!(args.apply(&mut Config::default()).is_err());
    }
}
