//! Command implementations.

pub mod amend;
pub mod config;
pub mod family;
pub mod person;
pub mod relate;
pub mod unrelate;

pub use self::amend::execute_amend;
pub use self::config::execute_config;
pub use self::family::{execute_family, execute_infer};
pub use self::person::execute_person;
pub use self::relate::{execute_check, execute_relate};
pub use self::unrelate::execute_unrelate;

use crate::error::{CliError, Result};
use crate::output::Names;
use kindred_domain::{EdgeId, FamilyGraph, Person, PersonId, RelationLabel, RelationType};
use kindred_store::SqliteStore;

/// Parse a relation type code or gendered label.
pub(crate) fn parse_label(input: &str) -> Result<RelationLabel> {
    RelationLabel::parse(input).ok_or_else(|| {
        let codes: Vec<&str> = RelationType::ALL.iter().map(|t| t.as_str()).collect();
        CliError::InvalidInput(format!(
            "Unknown relation '{}'. Expected a label such as 'mother' or one of: {}",
            input,
            codes.join(", ")
        ))
    })
}

/// Parse an edge id as printed by `relate`.
pub(crate) fn parse_edge_id(input: &str) -> Result<EdgeId> {
    EdgeId::from_string(input.trim())
        .map_err(|e| CliError::InvalidInput(format!("Invalid edge id '{}': {}", input, e)))
}

/// Fetch a person or fail with `NotFound`.
pub(crate) fn require_person(store: &SqliteStore, id: PersonId) -> Result<Person> {
    store
        .person(id)?
        .ok_or_else(|| CliError::NotFound(format!("person {}", id)))
}

/// Display names of every registered person.
pub(crate) fn names(store: &SqliteStore) -> Result<Names> {
    Ok(store
        .list_persons()?
        .into_iter()
        .map(|p| (p.id, p.full_name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label() {
        let label = parse_label("Mother").unwrap();
        assert_eq!(label.relation_type, RelationType::Parent);
        assert!(label.expected_gender.is_some());
        assert_eq!(
            parse_label("co_parent_in_law").unwrap().relation_type,
            RelationType::CoParentInLaw
        );
    }

    #[test]
    fn test_parse_label_lists_codes() {
        match parse_label("roommate") {
            Err(CliError::InvalidInput(msg)) => {
                assert!(msg.contains("roommate"));
                assert!(msg.contains("sibling_in_law"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_edge_id_invalid() {
        assert!(parse_edge_id("not-an-id").is_err());
    }
}
