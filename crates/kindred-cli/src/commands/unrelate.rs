//! Unrelate command implementation.

use super::parse_edge_id;
use crate::cli::UnrelateArgs;
use crate::error::Result;
use crate::output::Formatter;
use kindred_domain::{EdgeId, EdgeStore};
use kindred_store::SqliteStore;
use std::io::{self, Write};

/// Execute the unrelate command.
///
/// Only the named edges are removed; nothing derived from them is stored, so
/// there is nothing else to clean up.
pub fn execute_unrelate(
    args: UnrelateArgs,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let edge_ids: Vec<EdgeId> = args
        .edges
        .iter()
        .map(|id| parse_edge_id(id))
        .collect::<Result<Vec<_>>>()?;

    if !args.yes {
        println!("About to delete {} relation(s):", edge_ids.len());
        for id in &edge_ids {
            println!("  - {}", id);
        }
        print!("Continue? [y/N] ");
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    let mut removed = 0;
    for id in &edge_ids {
        if store.remove_edge(*id)? {
            removed += 1;
        } else {
            println!("{}", formatter.warning(&format!("No relation {}", id)));
        }
    }
    tracing::info!(removed, requested = edge_ids.len(), "relations removed");

    println!("{}", formatter.bulk_result("Deleted", removed));
    Ok(())
}
