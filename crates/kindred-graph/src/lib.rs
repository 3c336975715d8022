//! Kindred Graph
//!
//! Read-side kinship computations over a `FamilyGraph`:
//!
//! - **Normalizer**: a person-centric, symmetric view of stored edges
//! - **Inference**: the transitive closure (grandparents, cousins, in-laws,
//!   step-relations, ...) computed on demand and never persisted
//! - **Classifier**: direct plus inferred relations bucketed for display
//!
//! # Examples
//!
//! ```
//! use kindred_domain::{EdgeStore, PersonId, RelationEdge, RelationType};
//! use kindred_graph::{classify, direct_relations};
//! use kindred_store::SqliteStore;
//!
//! let mut store = SqliteStore::in_memory().unwrap();
//! store.insert_edge(RelationEdge::new(PersonId(1), PersonId(2), RelationType::Spouse).unwrap()).unwrap();
//!
//! let direct = direct_relations(&store, PersonId(2)).unwrap();
//! assert!(direct.spouses.contains(&PersonId(1)));
//!
//! let family = classify(&store, PersonId(1)).unwrap();
//! assert_eq!(family.nuclear.len(), 1);
//! ```

#![warn(missing_docs)]

mod classify;
mod engine;
mod error;
mod normalize;

pub use classify::{classify, FamilyCategory, FamilyGroups, FamilyMember, MemberSource};
pub use engine::{infer, reason_for, InferredRelation, KinshipEngine};
pub use error::GraphError;
pub use normalize::{
    direct_relations, effective_relations, gender_of, DirectRelations, EffectiveRelation,
};
