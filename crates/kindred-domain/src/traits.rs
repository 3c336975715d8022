//! Trait definitions for external interactions
//!
//! These traits define the boundary between the kinship engine and whatever
//! persists edges and person records. Implementations live in other crates.

use crate::{EdgeId, Person, PersonId, RelationEdge};

/// Read access to persons and stored edges
///
/// Every read-side computation (normalizer, inference, validation) goes
/// through this trait and never writes.
pub trait FamilyGraph {
    /// Error type for read operations
    type Error;

    /// Look up a person record
    fn person(&self, id: PersonId) -> Result<Option<Person>, Self::Error>;

    /// Every edge where `id` is the declarer or the related person
    fn edges_of(&self, id: PersonId) -> Result<Vec<RelationEdge>, Self::Error>;

    /// Get an edge by ID
    fn edge(&self, id: EdgeId) -> Result<Option<RelationEdge>, Self::Error>;

    /// Every edge between two persons, in either direction
    fn edges_between(&self, a: PersonId, b: PersonId) -> Result<Vec<RelationEdge>, Self::Error> {
        Ok(self
            .edges_of(a)?
            .into_iter()
            .filter(|edge| edge.other(a) == Some(b))
            .collect())
    }
}

/// Write access to stored edges
///
/// Callers are expected to validate before writing; the store itself only
/// enforces the no-self-relation rule.
pub trait EdgeStore: FamilyGraph {
    /// Persist a new edge
    fn insert_edge(&mut self, edge: RelationEdge) -> Result<EdgeId, Self::Error>;

    /// Replace the type, flags and notes of an existing edge
    fn update_edge(&mut self, edge: &RelationEdge) -> Result<(), Self::Error>;

    /// Delete a single edge; returns whether it existed
    fn remove_edge(&mut self, id: EdgeId) -> Result<bool, Self::Error>;
}
