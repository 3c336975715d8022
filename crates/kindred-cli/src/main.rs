//! Kindred CLI - record family relationships and explore the kinship they imply.

use clap::Parser;
use kindred_cli::commands;
use kindred_cli::{Cli, Command, Config, Formatter};
use kindred_gatekeeper::Gatekeeper;
use kindred_store::SqliteStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> kindred_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config; a missing file means defaults
    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load(Some(config_path.as_path()))?;

    kindred_cli::init_tracing(&config.settings.log_level);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Config commands never touch the store
    let command = match cli.command {
        Command::Config(args) => {
            return commands::execute_config(args, &config_path, &config, &formatter);
        }
        command => command,
    };

    // Open the store
    let database = cli.db.unwrap_or_else(|| config.database.clone());
    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    tracing::debug!(database = %database.display(), "opening store");
    let mut store = SqliteStore::new(&database)?;

    let gatekeeper = Gatekeeper::new(config.validation.clone());

    // Handle commands
    match command {
        Command::Person(args) => commands::execute_person(args, &mut store, &formatter)?,
        Command::Relate(args) => {
            commands::execute_relate(args, &mut store, &gatekeeper, &formatter)?
        }
        Command::Amend(args) => commands::execute_amend(args, &mut store, &gatekeeper, &formatter)?,
        Command::Unrelate(args) => commands::execute_unrelate(args, &mut store, &formatter)?,
        Command::Check(args) => commands::execute_check(args, &store, &gatekeeper, &formatter)?,
        Command::Family(args) => commands::execute_family(args, &store, &formatter)?,
        Command::Infer(args) => commands::execute_infer(args, &store, &formatter)?,
        Command::Config(args) => {
            commands::execute_config(args, &config_path, &config, &formatter)?
        }
    }

    Ok(())
}
