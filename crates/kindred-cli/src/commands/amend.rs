//! Amend command implementation.

use super::{parse_edge_id, parse_label};
use crate::cli::AmendArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kindred_domain::FamilyGraph;
use kindred_gatekeeper::Gatekeeper;
use kindred_store::SqliteStore;

/// Execute the amend command.
pub fn execute_amend(
    args: AmendArgs,
    store: &mut SqliteStore,
    gatekeeper: &Gatekeeper,
    formatter: &Formatter,
) -> Result<()> {
    let id = parse_edge_id(&args.edge)?;
    let mut edge = store
        .edge(id)?
        .ok_or_else(|| CliError::NotFound(format!("edge {}", id)))?;

    let mut expected_gender = None;
    if let Some(relation) = &args.relation {
        let label = parse_label(relation)?;
        edge.relation_type = label.relation_type;
        expected_gender = label.expected_gender;
    }
    if let Some(lives_together) = args.lives_together {
        edge.lives_together = lives_together;
    }
    if let Some(primary_contact) = args.primary_contact {
        edge.is_primary_contact = primary_contact;
    }
    if let Some(notes) = args.notes {
        edge.notes = notes;
    }

    let admission = gatekeeper.amend(store, edge, expected_gender, args.yes)?;
    println!("{}", formatter.format_admission(&admission)?);

    Ok(())
}
