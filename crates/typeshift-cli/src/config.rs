//! Command-line arguments and CLI configuration.

use crate::formatter::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use typeshift_core::migration::DEFAULT_MAX_RESULTS;

/// Default data directory.
pub const DEFAULT_DATA_PATH: &str = "./typeshift-data";

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory of the database.
    pub data_path: PathBuf,
    /// Log at debug level.
    pub verbose: bool,
}

impl CliConfig {
    /// Create a configuration for the given data directory.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            verbose: false,
        }
    }

    /// Enable debug logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Log filter directive for the typeshift crates.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// typeshift: schema reconciliation and data-type migration
#[derive(Parser, Debug)]
#[command(name = "typeshift")]
#[command(version, about = "Schema reconciliation and data-type migration")]
pub struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = DEFAULT_DATA_PATH, global = true)]
    pub data_path: PathBuf,

    /// Log progress at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the declared schema
    #[command(subcommand)]
    Schema(SchemaCommand),

    /// Insert raw rows from a JSON array of objects into an installed table
    Import {
        /// Target table
        table: String,
        /// JSON file holding the rows
        file: PathBuf,
    },

    /// Show pending schema changes without applying them
    Check,

    /// Apply pending schema changes
    Update {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Update the schema, then migrate stored values to their declared types
    TypeMigrate {
        /// Skip the confirmation prompts
        #[arg(short, long)]
        yes: bool,

        /// Rows fetched per page
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        page_size: usize,

        /// Output format for the results
        #[arg(long, default_value = "table", value_enum)]
        format: OutputFormat,
    },
}

/// `schema` subcommands.
#[derive(Subcommand, Debug)]
pub enum SchemaCommand {
    /// Apply a declared schema bundle from a JSON file
    Load {
        /// JSON file holding the schema bundle
        file: PathBuf,
    },
}

impl Args {
    /// Split into the CLI configuration and the command to run.
    pub fn into_config(self) -> (CliConfig, Command) {
        let config = CliConfig::new(self.data_path).with_verbose(self.verbose);
        (config, self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_migrate() {
        let args = Args::try_parse_from([
            "typeshift",
            "--data-path",
            "/tmp/ts",
            "type-migrate",
            "--yes",
            "--page-size",
            "50",
            "--format",
            "json",
        ])
        .unwrap();

        let (config, command) = args.into_config();
        assert_eq!(config.data_path, PathBuf::from("/tmp/ts"));
        assert_eq!(config.log_level(), "info");
        match command {
            Command::TypeMigrate {
                yes,
                page_size,
                format,
            } => {
                assert!(yes);
                assert_eq!(page_size, 50);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["typeshift", "check", "-v"]).unwrap();
        let (config, command) = args.into_config();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.log_level(), "debug");
        assert!(matches!(command, Command::Check));
    }

    #[test]
    fn test_schema_load() {
        let args = Args::try_parse_from(["typeshift", "schema", "load", "schema.json"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Schema(SchemaCommand::Load { ref file }) if file == &PathBuf::from("schema.json")
        ));
    }
}
