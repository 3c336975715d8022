//! Relate and check command implementations.

use super::{parse_edge_id, parse_label};
use crate::cli::{CheckArgs, RelateArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kindred_domain::RelationEdge;
use kindred_gatekeeper::Gatekeeper;
use kindred_store::SqliteStore;

/// Execute the relate command.
pub fn execute_relate(
    args: RelateArgs,
    store: &mut SqliteStore,
    gatekeeper: &Gatekeeper,
    formatter: &Formatter,
) -> Result<()> {
    let label = parse_label(&args.relation)?;

    let mut edge = RelationEdge::new(args.declarer, args.related, label.relation_type)
        .map_err(CliError::InvalidInput)?;
    edge.lives_together = args.lives_together;
    edge.is_primary_contact = args.primary_contact;
    edge.notes = args.notes;

    let admission = gatekeeper.admit(store, edge, label.expected_gender, args.yes)?;
    println!("{}", formatter.format_admission(&admission)?);

    Ok(())
}

/// Execute the check command.
pub fn execute_check(
    args: CheckArgs,
    store: &SqliteStore,
    gatekeeper: &Gatekeeper,
    formatter: &Formatter,
) -> Result<()> {
    let label = parse_label(&args.relation)?;
    let existing = args.edge.as_deref().map(parse_edge_id).transpose()?;

    let result = gatekeeper.validate(store, args.declarer, args.related, label, existing)?;
    println!("{}", formatter.format_validation(&result)?);

    Ok(())
}
