//! Configuration file commands.

use crate::cli::{ConfigAction, ConfigArgs, Preset};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kindred_gatekeeper::ValidationConfig;
use std::path::Path;

/// Execute a config command against the file at `path`.
pub fn execute_config(
    args: ConfigArgs,
    path: &Path,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let text = toml::to_string_pretty(config)
                .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
            println!("# {}", path.display());
            print!("{}", text);
        }
        ConfigAction::Init { preset, force } => {
            if path.exists() && !force {
                return Err(CliError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }

            let fresh = Config {
                validation: preset_config(preset),
                ..Config::default()
            };
            fresh.save(path)?;
            tracing::info!(path = %path.display(), ?preset, "configuration written");
            println!(
                "{}",
                formatter.success(&format!("Configuration written to {}", path.display()))
            );
        }
    }

    Ok(())
}

fn preset_config(preset: Preset) -> ValidationConfig {
    match preset {
        Preset::Default => ValidationConfig::default(),
        Preset::Permissive => ValidationConfig::permissive(),
        Preset::Strict => ValidationConfig::strict(),
    }
}
