//! Direct-relation normalizer
//!
//! The single point through which every higher-level computation reads the
//! graph. An edge looks the same from both endpoints once its type has been
//! passed through the inverse-type resolver, no matter who declared it.

use crate::GraphError;
use kindred_domain::{inverse_type, EdgeId, FamilyGraph, Gender, PersonId, RelationType};
use std::collections::BTreeSet;
use std::fmt::Display;

/// One stored edge seen from a given person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRelation {
    /// Stored edge backing this relation
    pub edge_id: EdgeId,

    /// The other endpoint
    pub other: PersonId,

    /// What `other` is to the viewing person
    pub relation_type: RelationType,

    /// Display label resolved for `other`'s gender
    pub label: &'static str,

    /// Whether the viewing person is the declarer of the edge
    pub declared_by_self: bool,

    /// Declarer-side household flag
    pub lives_together: bool,

    /// Declarer-side primary contact flag
    pub is_primary_contact: bool,

    /// Free-text notes
    pub notes: String,
}

/// Person-centric buckets of immediate relations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectRelations {
    /// Direct parents
    pub parents: BTreeSet<PersonId>,
    /// Direct children
    pub children: BTreeSet<PersonId>,
    /// Direct siblings
    pub siblings: BTreeSet<PersonId>,
    /// Direct spouses
    pub spouses: BTreeSet<PersonId>,
    /// Everyone with a stored edge of any type
    pub others: BTreeSet<PersonId>,
}

impl DirectRelations {
    /// Whether `id` holds a stored edge of any type with this person
    pub fn contains(&self, id: PersonId) -> bool {
        self.others.contains(&id)
    }

    /// No stored edges at all
    pub fn is_empty(&self) -> bool {
        self.others.is_empty()
    }
}

/// Bucket a person's stored edges into parents, children, siblings and spouses.
///
/// Edges of other types are only recorded in `others`.
pub fn direct_relations<G>(graph: &G, person: PersonId) -> Result<DirectRelations, GraphError>
where
    G: FamilyGraph,
    G::Error: Display,
{
    let mut direct = DirectRelations::default();

    for edge in graph.edges_of(person).map_err(GraphError::store)? {
        let (Some(other), Some(seen)) = (edge.other(person), edge.type_seen_by(person)) else {
            continue;
        };
        if other == person {
            continue;
        }

        direct.others.insert(other);
        match seen {
            RelationType::Parent => {
                direct.parents.insert(other);
            }
            RelationType::Child => {
                direct.children.insert(other);
            }
            RelationType::Sibling => {
                direct.siblings.insert(other);
            }
            RelationType::Spouse => {
                direct.spouses.insert(other);
            }
            _ => {}
        }
    }

    Ok(direct)
}

/// Every stored edge of `person`, typed and labelled from their side.
///
/// When `person` is the related side the declarer becomes the "related"
/// party, so the inverse is resolved with the declarer's gender.
pub fn effective_relations<G>(
    graph: &G,
    person: PersonId,
) -> Result<Vec<EffectiveRelation>, GraphError>
where
    G: FamilyGraph,
    G::Error: Display,
{
    let edges = graph.edges_of(person).map_err(GraphError::store)?;
    let mut relations = Vec::with_capacity(edges.len());

    for edge in edges {
        let declared_by_self = edge.declarer_id == person;
        let Some(other) = edge.other(person) else {
            continue;
        };
        let other_gender = gender_of(graph, other)?;

        let (relation_type, label) = if declared_by_self {
            (edge.relation_type, edge.relation_type.label(other_gender))
        } else {
            let resolved = inverse_type(edge.relation_type, other_gender);
            (resolved.relation_type, resolved.label)
        };

        relations.push(EffectiveRelation {
            edge_id: edge.id,
            other,
            relation_type,
            label,
            declared_by_self,
            lives_together: edge.lives_together,
            is_primary_contact: edge.is_primary_contact,
            notes: edge.notes,
        });
    }

    Ok(relations)
}

/// Recorded gender of a person; unknown when the record is missing
pub fn gender_of<G>(graph: &G, id: PersonId) -> Result<Gender, GraphError>
where
    G: FamilyGraph,
    G::Error: Display,
{
    Ok(graph
        .person(id)
        .map_err(GraphError::store)?
        .map(|p| p.gender)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_domain::{EdgeStore, Person, RelationEdge};
    use kindred_store::SqliteStore;

    fn store_with(people: &[(i64, Gender)]) -> SqliteStore {
        let mut store = SqliteStore::in_memory().unwrap();
        for (id, gender) in people {
            store
                .upsert_person(&Person::new(PersonId(*id), format!("P{}", id)).with_gender(*gender))
                .unwrap();
        }
        store
    }

    fn relate(store: &mut SqliteStore, declarer: i64, related: i64, t: RelationType) {
        store
            .insert_edge(RelationEdge::new(PersonId(declarer), PersonId(related), t).unwrap())
            .unwrap();
    }

    #[test]
    fn test_buckets_regardless_of_declaring_side() {
        let mut store = store_with(&[]);
        // 2 says: 1 is my parent; 1 says: 3 is my child
        relate(&mut store, 2, 1, RelationType::Parent);
        relate(&mut store, 1, 3, RelationType::Child);
        relate(&mut store, 1, 4, RelationType::Spouse);
        relate(&mut store, 5, 1, RelationType::Sibling);

        let direct = direct_relations(&store, PersonId(1)).unwrap();
        assert_eq!(direct.children, BTreeSet::from([PersonId(2), PersonId(3)]));
        assert_eq!(direct.spouses, BTreeSet::from([PersonId(4)]));
        assert_eq!(direct.siblings, BTreeSet::from([PersonId(5)]));
        assert!(direct.parents.is_empty());

        let child = direct_relations(&store, PersonId(3)).unwrap();
        assert_eq!(child.parents, BTreeSet::from([PersonId(1)]));
    }

    #[test]
    fn test_other_types_only_in_others() {
        let mut store = store_with(&[]);
        relate(&mut store, 1, 2, RelationType::Cousin);

        let direct = direct_relations(&store, PersonId(1)).unwrap();
        assert!(direct.contains(PersonId(2)));
        assert!(direct.parents.is_empty() && direct.siblings.is_empty());
    }

    #[test]
    fn test_effective_labels_use_other_gender() {
        let mut store = store_with(&[(1, Gender::Female), (2, Gender::Male)]);
        // 2 says: 1 is my parent
        relate(&mut store, 2, 1, RelationType::Parent);

        let from_child = effective_relations(&store, PersonId(2)).unwrap();
        assert_eq!(from_child[0].relation_type, RelationType::Parent);
        assert_eq!(from_child[0].label, "mother");
        assert!(from_child[0].declared_by_self);

        let from_parent = effective_relations(&store, PersonId(1)).unwrap();
        assert_eq!(from_parent[0].relation_type, RelationType::Child);
        assert_eq!(from_parent[0].label, "son");
        assert!(!from_parent[0].declared_by_self);
    }

    #[test]
    fn test_missing_person_record_is_neutral() {
        let mut store = store_with(&[]);
        relate(&mut store, 1, 2, RelationType::Spouse);

        let relations = effective_relations(&store, PersonId(1)).unwrap();
        assert_eq!(relations[0].label, "spouse");
    }

    #[test]
    fn test_normalizer_is_idempotent() {
        let mut store = store_with(&[]);
        relate(&mut store, 1, 2, RelationType::Child);
        relate(&mut store, 3, 1, RelationType::Spouse);

        let first = direct_relations(&store, PersonId(1)).unwrap();
        let second = direct_relations(&store, PersonId(1)).unwrap();
        assert_eq!(first, second);
    }
}
