//! Person register commands.

use crate::cli::{PersonAction, PersonArgs};
use crate::error::Result;
use crate::output::Formatter;
use kindred_domain::{Gender, Person};
use kindred_store::SqliteStore;

/// Execute a person command.
pub fn execute_person(
    args: PersonArgs,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        PersonAction::Add {
            id,
            name,
            born,
            gender,
        } => {
            let mut person = Person::new(id, name);
            person.birth_date = born;
            person.gender = gender.as_deref().map(Gender::normalize).unwrap_or_default();

            store.upsert_person(&person)?;
            tracing::info!(person = %person.id, "person saved");
            println!(
                "{}",
                formatter.success(&format!("Person saved: {} {}", person.id, person.full_name))
            );
        }
        PersonAction::List => {
            let persons = store.list_persons()?;
            println!("{}", formatter.format_persons(&persons)?);
        }
    }

    Ok(())
}
