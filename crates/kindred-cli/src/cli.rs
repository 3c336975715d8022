//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kindred_domain::PersonId;
use std::path::PathBuf;

/// Kindred - record family relationships and explore the kinship they imply.
#[derive(Debug, Parser)]
#[command(name = "kindred")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configured one
    #[arg(long, global = true, env = "KINDRED_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the person register
    Person(PersonArgs),

    /// Record a new relation after validation
    Relate(RelateArgs),

    /// Change the type, flags or notes of a stored relation
    Amend(AmendArgs),

    /// Delete stored relations
    Unrelate(UnrelateArgs),

    /// Validate a relation without recording it
    Check(CheckArgs),

    /// Show a person's family, grouped
    Family(PersonRef),

    /// Show only the inferred relations of a person
    Infer(PersonRef),

    /// Show or write the configuration file
    Config(ConfigArgs),
}

/// Arguments for person management.
#[derive(Debug, Parser)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub action: PersonAction,
}

/// Person register actions.
#[derive(Debug, Subcommand)]
pub enum PersonAction {
    /// Add or replace a person
    Add {
        /// Person id
        id: PersonId,
        /// Full name
        name: String,
        /// Birth date (YYYY-MM-DD)
        #[arg(short, long)]
        born: Option<NaiveDate>,
        /// Gender (m/f or free text)
        #[arg(short, long)]
        gender: Option<String>,
    },

    /// List all persons
    List,
}

/// Arguments for the relate command.
#[derive(Debug, Parser)]
pub struct RelateArgs {
    /// Who declares the relation
    pub declarer: PersonId,

    /// Who the relation is about
    pub related: PersonId,

    /// What `related` is to `declarer` (e.g. parent, mother, sister_in_law)
    pub relation: String,

    /// They live in the same household
    #[arg(long)]
    pub lives_together: bool,

    /// `related` is the declarer's primary contact
    #[arg(long)]
    pub primary_contact: bool,

    /// Free-text notes
    #[arg(short, long, default_value = "")]
    pub notes: String,

    /// Record even if there are warnings
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the amend command.
#[derive(Debug, Parser)]
pub struct AmendArgs {
    /// Edge id
    pub edge: String,

    /// New relation type or label
    #[arg(short, long)]
    pub relation: Option<String>,

    /// Set the household flag
    #[arg(long)]
    pub lives_together: Option<bool>,

    /// Set the primary contact flag
    #[arg(long)]
    pub primary_contact: Option<bool>,

    /// Replace the notes
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Apply even if there are warnings
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the unrelate command.
#[derive(Debug, Parser)]
pub struct UnrelateArgs {
    /// Edge ids to delete
    #[arg(required = true)]
    pub edges: Vec<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Who would declare the relation
    pub declarer: PersonId,

    /// Who the relation would be about
    pub related: PersonId,

    /// What `related` would be to `declarer`
    pub relation: String,

    /// Edge being edited, ignored by the checks
    #[arg(short, long)]
    pub edge: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Write a configuration file with the chosen validation preset
    Init {
        /// Validation preset
        #[arg(short, long, value_enum, default_value = "default")]
        preset: Preset,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Validation threshold presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Standard thresholds
    Default,
    /// Hard floors only, advisories off
    Permissive,
    /// Raised floors and narrower bands
    Strict,
}

/// A single person argument.
#[derive(Debug, Parser)]
pub struct PersonRef {
    /// Person id
    pub person: PersonId,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relate_command() {
        let cli = Cli::parse_from(["kindred", "relate", "2", "#1", "mother", "--yes"]);
        match cli.command {
            Command::Relate(args) => {
                assert_eq!(args.declarer, PersonId(2));
                assert_eq!(args.related, PersonId(1));
                assert_eq!(args.relation, "mother");
                assert!(args.yes);
                assert!(!args.lives_together);
            }
            _ => panic!("Expected Relate command"),
        }
    }

    #[test]
    fn test_person_add_parses_date() {
        let cli = Cli::parse_from([
            "kindred", "person", "add", "7", "Ana Pérez", "--born", "1950-04-02", "-g", "f",
        ]);
        match cli.command {
            Command::Person(PersonArgs {
                action: PersonAction::Add { id, born, gender, .. },
            }) => {
                assert_eq!(id, PersonId(7));
                assert_eq!(born, NaiveDate::from_ymd_opt(1950, 4, 2));
                assert_eq!(gender.as_deref(), Some("f"));
            }
            _ => panic!("Expected Person Add command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["kindred", "family", "3", "--format", "json", "--db", "x.db"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
    }

    #[test]
    fn test_config_init_preset() {
        let cli = Cli::parse_from(["kindred", "config", "init", "--preset", "strict"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { preset, force },
            }) => {
                assert_eq!(preset, Preset::Strict);
                assert!(!force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_unrelate_requires_ids() {
        assert!(Cli::try_parse_from(["kindred", "unrelate"]).is_err());
    }
}
