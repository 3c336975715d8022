//! Kindred Gatekeeper
//!
//! Validates proposed relation edges before they reach the store.
//!
//! The Gatekeeper provides:
//! - Structural checks (self-reference, duplicates)
//! - Age plausibility against configurable floors and soft bands
//! - Consistency against stored and inferred relations of the pair
//! - Gender coherence and parent-count advisories
//! - A validated write path (`admit` / `amend`)
//!
//! # Examples
//!
//! ```
//! use kindred_domain::{Person, PersonId, RelationLabel};
//! use kindred_gatekeeper::{Gatekeeper, ValidationConfig};
//! use kindred_store::SqliteStore;
//!
//! let mut store = SqliteStore::in_memory().unwrap();
//! store.upsert_person(&Person::new(PersonId(1), "Ana")).unwrap();
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let result = gatekeeper
//!     .validate(&store, PersonId(1), PersonId(1), RelationLabel::parse("sibling").unwrap(), None)
//!     .unwrap();
//! assert!(!result.is_valid());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod issue;
mod rules;
mod validator;
mod view;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use issue::{IssueCategory, ValidationIssue, ValidationResult, ValidationStatus};
pub use rules::conflicts;
pub use validator::{Admission, Gatekeeper};
