//! Kindred Domain Layer
//!
//! Core value types for the family-relationship engine: persons as the
//! engine sees them, declared relation edges, the closed set of relation
//! types with their inverse-type resolver, and the traits through which the
//! engine reads and writes edges.
//!
//! ## Key Concepts
//!
//! - **RelationEdge**: one stored, directed, typed kinship declaration
//! - **Effective type**: the type of an edge as seen from one endpoint
//! - **Inverse-type resolver**: maps a type to the other side's type
//! - **Person**: read-only member record (id, name, birth date, gender)
//!
//! ## Architecture
//!
//! - No I/O and no storage code
//! - Trait definitions for all external interactions
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod edge;
pub mod person;
pub mod relation_type;
pub mod traits;

// Re-exports for convenience
pub use edge::{EdgeId, RelationEdge};
pub use person::{completed_years, Gender, Person, PersonId};
pub use relation_type::{inverse_type, RelationLabel, RelationType, ResolvedType};
pub use traits::{EdgeStore, FamilyGraph};
