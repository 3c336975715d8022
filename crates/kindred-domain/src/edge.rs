//! Relation edge module - one declared kinship fact
//!
//! Only the declarer-side row is ever stored. The other side's view is
//! computed by inverting the type, so no edge has a stored twin.

use crate::{PersonId, RelationType};
use std::fmt;

/// Unique identifier for an edge based on UUIDv7
///
/// UUIDv7 keeps edges sortable by creation time without a sequence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u128);

impl EdgeId {
    /// Generate a new UUIDv7-based EdgeId
    ///
    /// # Examples
    ///
    /// ```
    /// use kindred_domain::EdgeId;
    ///
    /// let id = EdgeId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an EdgeId from a raw u128 value (storage deserialization)
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an EdgeId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid edge id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A declared kinship fact from the declarer toward the related person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEdge {
    /// Unique identifier
    pub id: EdgeId,

    /// Person who declared the relation
    pub declarer_id: PersonId,

    /// Person the relation points at
    pub related_id: PersonId,

    /// What the related person is to the declarer
    pub relation_type: RelationType,

    /// Declarer and related person share a household (declarer side only)
    pub lives_together: bool,

    /// Related person is the declarer's primary contact (declarer side only)
    pub is_primary_contact: bool,

    /// Free-text notes
    pub notes: String,

    /// Creation time (unix seconds)
    pub created_at: u64,
}

impl RelationEdge {
    /// Create a new edge with a fresh id and no flags
    ///
    /// # Errors
    /// Returns error if declarer and related are the same person
    pub fn new(
        declarer_id: PersonId,
        related_id: PersonId,
        relation_type: RelationType,
    ) -> Result<Self, String> {
        if declarer_id == related_id {
            return Err(format!("{} cannot be related to themselves", declarer_id));
        }

        let created_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Ok(Self {
            id: EdgeId::new(),
            declarer_id,
            related_id,
            relation_type,
            lives_together: false,
            is_primary_contact: false,
            notes: String::new(),
            created_at,
        })
    }

    /// Whether the given person is one of the two endpoints
    pub fn involves(&self, person: PersonId) -> bool {
        self.declarer_id == person || self.related_id == person
    }

    /// The endpoint opposite to `person`, if `person` is an endpoint
    pub fn other(&self, person: PersonId) -> Option<PersonId> {
        if self.declarer_id == person {
            Some(self.related_id)
        } else if self.related_id == person {
            Some(self.declarer_id)
        } else {
            None
        }
    }

    /// The type as seen by `person`: as declared, or inverted for the related side
    pub fn type_seen_by(&self, person: PersonId) -> Option<RelationType> {
        if self.declarer_id == person {
            Some(self.relation_type)
        } else if self.related_id == person {
            Some(self.relation_type.inverse())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_relation_rejected() {
        let result = RelationEdge::new(PersonId(1), PersonId(1), RelationType::Sibling);
        assert!(result.is_err());
    }

    #[test]
    fn test_type_seen_by_both_sides() {
        // Beto declares: Ana is my parent
        let edge = RelationEdge::new(PersonId(2), PersonId(1), RelationType::Parent).unwrap();
        assert_eq!(edge.type_seen_by(PersonId(2)), Some(RelationType::Parent));
        assert_eq!(edge.type_seen_by(PersonId(1)), Some(RelationType::Child));
        assert_eq!(edge.type_seen_by(PersonId(3)), None);
        assert_eq!(edge.other(PersonId(1)), Some(PersonId(2)));
    }

    #[test]
    fn test_edge_id_display_and_parse() {
        let id = EdgeId::new();
        let parsed = EdgeId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(EdgeId::from_string("not-a-uuid").is_err());
    }
}
