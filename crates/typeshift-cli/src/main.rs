//! typeshift command-line front end
//!
//! Loads declared schemas, stages legacy rows, reconciles the installed
//! schema and runs the data-type migration.

mod commands;
mod config;
mod error;
mod formatter;
mod prompt;

use clap::Parser;
use commands::MigrateOptions;
use config::{Args, CliConfig, Command, SchemaCommand};
use error::CliError;
use std::process::ExitCode;
use tracing_subscriber::filter::Directive;
use typeshift_core::Database;

fn main() -> ExitCode {
    let args = Args::parse();
    let (config, command) = args.into_config();

    if let Err(e) = init_tracing(&config) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&config, command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &CliConfig) -> Result<(), CliError> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for target in ["typeshift", "typeshift_core", "typeshift_cli"] {
        let directive: Directive = format!("{}={}", target, config.log_level())
            .parse()
            .map_err(|e| CliError::InvalidInput(format!("log filter: {}", e)))?;
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Run one command. `Ok(false)` means the operator declined.
fn run(config: &CliConfig, command: Command) -> Result<bool, CliError> {
    let db = Database::open(&config.data_path)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Schema(SchemaCommand::Load { file }) => {
            commands::schema_load(&db, &file, &mut out)?;
            Ok(true)
        }
        Command::Import { table, file } => {
            commands::import(&db, &table, &file, &mut out)?;
            Ok(true)
        }
        Command::Check => {
            commands::check(&db, &mut out)?;
            Ok(true)
        }
        Command::Update { yes } => {
            let prompt = prompt::for_flags(yes);
            commands::update(&db, prompt.as_ref(), &mut out)
        }
        Command::TypeMigrate {
            yes,
            page_size,
            format,
        } => {
            let prompt = prompt::for_flags(yes);
            let options = MigrateOptions { page_size, format };
            commands::type_migrate(&db, prompt.as_ref(), &options, &mut out)
        }
    }
}
