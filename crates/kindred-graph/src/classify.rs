//! Relation classifier - display buckets for a person's family

use crate::engine::KinshipEngine;
use crate::normalize::effective_relations;
use crate::GraphError;
use kindred_domain::{EdgeId, FamilyGraph, PersonId, RelationType};
use std::collections::HashSet;
use std::fmt::Display;

/// Coarse display group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyCategory {
    /// Spouses and children
    Nuclear,
    /// Parents and siblings
    Origin,
    /// Blood relatives beyond the nuclear family
    Extended,
    /// Relatives by marriage
    InLaw,
}

impl FamilyCategory {
    /// Fixed type to category table
    pub fn of(relation_type: RelationType) -> Self {
        match relation_type {
            RelationType::Spouse | RelationType::Child => FamilyCategory::Nuclear,
            RelationType::Parent | RelationType::Sibling => FamilyCategory::Origin,
            RelationType::Grandparent
            | RelationType::GreatGrandparent
            | RelationType::UncleAunt
            | RelationType::Cousin
            | RelationType::NephewNiece
            | RelationType::Grandchild
            | RelationType::GreatGrandchild => FamilyCategory::Extended,
            RelationType::ParentInLaw
            | RelationType::SiblingInLaw
            | RelationType::ChildInLaw
            | RelationType::CoParentInLaw => FamilyCategory::InLaw,
        }
    }

    /// Position of a type inside its category when listed
    fn rank(relation_type: RelationType) -> u8 {
        match relation_type {
            RelationType::Spouse | RelationType::Parent => 0,
            RelationType::Child | RelationType::Sibling => 1,
            RelationType::Grandparent => 0,
            RelationType::GreatGrandparent => 1,
            RelationType::UncleAunt => 2,
            RelationType::Cousin => 3,
            RelationType::NephewNiece => 4,
            RelationType::Grandchild => 5,
            RelationType::GreatGrandchild => 6,
            RelationType::ParentInLaw => 0,
            RelationType::SiblingInLaw => 1,
            RelationType::ChildInLaw => 2,
            RelationType::CoParentInLaw => 3,
        }
    }
}

/// Where a listed family member comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSource {
    /// Backed by a stored edge
    Direct {
        /// The stored edge
        edge_id: EdgeId,
        /// Declarer-side household flag
        lives_together: bool,
        /// Declarer-side primary contact flag
        is_primary_contact: bool,
        /// Free-text notes
        notes: String,
    },
    /// Computed by the inference engine
    Inferred {
        /// Justification for display
        reason: &'static str,
    },
}

/// One row of a family listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMember {
    /// The related person
    pub other: PersonId,
    /// What `other` is to the listed person
    pub relation_type: RelationType,
    /// Gender-resolved display label
    pub label: &'static str,
    /// Stored or inferred
    pub source: MemberSource,
}

impl FamilyMember {
    /// Whether this row was computed rather than stored
    pub fn is_inferred(&self) -> bool {
        matches!(self.source, MemberSource::Inferred { .. })
    }
}

/// A person's family split into display groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyGroups {
    /// Spouses and children
    pub nuclear: Vec<FamilyMember>,
    /// Parents and siblings
    pub origin: Vec<FamilyMember>,
    /// Grandparents, uncles, cousins, nephews, grandchildren
    pub extended: Vec<FamilyMember>,
    /// Relatives by marriage
    pub in_law: Vec<FamilyMember>,
}

impl FamilyGroups {
    /// Total number of listed members
    pub fn len(&self) -> usize {
        self.nuclear.len() + self.origin.len() + self.extended.len() + self.in_law.len()
    }

    /// No members at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Groups paired with their category, in display order
    pub fn groups(&self) -> [(FamilyCategory, &[FamilyMember]); 4] {
        [
            (FamilyCategory::Nuclear, self.nuclear.as_slice()),
            (FamilyCategory::Origin, self.origin.as_slice()),
            (FamilyCategory::Extended, self.extended.as_slice()),
            (FamilyCategory::InLaw, self.in_law.as_slice()),
        ]
    }

    fn bucket_mut(&mut self, category: FamilyCategory) -> &mut Vec<FamilyMember> {
        match category {
            FamilyCategory::Nuclear => &mut self.nuclear,
            FamilyCategory::Origin => &mut self.origin,
            FamilyCategory::Extended => &mut self.extended,
            FamilyCategory::InLaw => &mut self.in_law,
        }
    }
}

/// Merge direct and inferred relations of `person` into display groups.
///
/// Each other person appears once: a stored edge wins over any inferred
/// fact, and among inferred facts the closest type wins.
pub fn classify<G>(graph: &G, person: PersonId) -> Result<FamilyGroups, GraphError>
where
    G: FamilyGraph,
    G::Error: Display,
{
    let direct = effective_relations(graph, person)?;
    let inferred = KinshipEngine::new(graph).infer(person)?;

    let mut seen = HashSet::new();
    let mut groups = FamilyGroups::default();

    for relation in direct {
        if !seen.insert(relation.other) {
            continue;
        }
        groups
            .bucket_mut(FamilyCategory::of(relation.relation_type))
            .push(FamilyMember {
                other: relation.other,
                relation_type: relation.relation_type,
                label: relation.label,
                source: MemberSource::Direct {
                    edge_id: relation.edge_id,
                    lives_together: relation.lives_together,
                    is_primary_contact: relation.is_primary_contact,
                    notes: relation.notes,
                },
            });
    }

    for relation in inferred {
        if !seen.insert(relation.other) {
            continue;
        }
        groups
            .bucket_mut(FamilyCategory::of(relation.relation_type))
            .push(FamilyMember {
                other: relation.other,
                relation_type: relation.relation_type,
                label: relation.label,
                source: MemberSource::Inferred {
                    reason: relation.reason,
                },
            });
    }

    for category in [
        FamilyCategory::Nuclear,
        FamilyCategory::Origin,
        FamilyCategory::Extended,
        FamilyCategory::InLaw,
    ] {
        groups.bucket_mut(category).sort_by_key(|m| {
            (
                FamilyCategory::rank(m.relation_type),
                m.is_inferred(),
                m.other,
            )
        });
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_a_category() {
        for t in RelationType::ALL {
            let _ = FamilyCategory::of(t);
        }
        assert_eq!(FamilyCategory::of(RelationType::Spouse), FamilyCategory::Nuclear);
        assert_eq!(FamilyCategory::of(RelationType::Sibling), FamilyCategory::Origin);
        assert_eq!(FamilyCategory::of(RelationType::Cousin), FamilyCategory::Extended);
        assert_eq!(
            FamilyCategory::of(RelationType::CoParentInLaw),
            FamilyCategory::InLaw
        );
    }

    #[test]
    fn test_rank_orders_spouse_before_child() {
        assert!(
            FamilyCategory::rank(RelationType::Spouse) < FamilyCategory::rank(RelationType::Child)
        );
        assert!(
            FamilyCategory::rank(RelationType::Grandparent)
                < FamilyCategory::rank(RelationType::GreatGrandchild)
        );
    }
}
