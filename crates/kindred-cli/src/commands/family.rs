//! Family and infer command implementations.

use super::{names, require_person};
use crate::cli::PersonRef;
use crate::error::Result;
use crate::output::Formatter;
use kindred_store::SqliteStore;

/// Execute the family command.
pub fn execute_family(args: PersonRef, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let person = require_person(store, args.person)?;
    let family = kindred_graph::classify(store, person.id)?;

    if formatter.format() == crate::config::OutputFormat::Table {
        println!("{}", formatter.info(&format!("Family of {} {}", person.id, person.full_name)));
    }
    println!("{}", formatter.format_family(&family, &names(store)?)?);

    Ok(())
}

/// Execute the infer command.
pub fn execute_infer(args: PersonRef, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let person = require_person(store, args.person)?;
    let inferred = kindred_graph::infer(store, person.id)?;

    println!("{}", formatter.format_inferred(&inferred, &names(store)?)?);

    Ok(())
}
