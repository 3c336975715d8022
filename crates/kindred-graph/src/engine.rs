//! Kinship inference engine
//!
//! Derives the transitive kinship closure of one person from the stored
//! parent, child, sibling and spouse edges. Nothing derived here is ever
//! written back.
//!
//! Every category is a fixed number of hops from direct relations, so the
//! traversal terminates on any input, cyclic or not. Within one call the
//! engine memoizes direct relations and the "complete" parent, child and
//! sibling sets per person; the memo is dropped with the engine.

use crate::normalize::{direct_relations, gender_of, DirectRelations};
use crate::GraphError;
use kindred_domain::{FamilyGraph, Gender, PersonId, RelationType};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

/// A kinship fact computed at read time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredRelation {
    /// The related person
    pub other: PersonId,

    /// What `other` is to the queried person
    pub relation_type: RelationType,

    /// Display label resolved for `other`'s gender
    pub label: &'static str,

    /// Human-readable justification, for display only
    pub reason: &'static str,

    /// Reached only through a spouse hop (step and in-law relations);
    /// false when a blood line alone yields the same type
    pub by_marriage: bool,

    /// Always true; distinguishes computed facts from stored ones
    pub inferred: bool,
}

/// Justification shown next to an inferred relation type
pub fn reason_for(relation_type: RelationType) -> &'static str {
    match relation_type {
        RelationType::Parent => "spouse of your parent",
        RelationType::Child => "child of your spouse",
        RelationType::Sibling => "shares a parent with you",
        RelationType::Spouse => "spouse",
        RelationType::Grandparent => "parent of your parent",
        RelationType::Grandchild => "child of your child",
        RelationType::GreatGrandparent => "parent of your grandparent",
        RelationType::GreatGrandchild => "child of your grandchild",
        RelationType::UncleAunt => "sibling of your parent",
        RelationType::NephewNiece => "child of your sibling",
        RelationType::Cousin => "child of your uncle or aunt",
        RelationType::SiblingInLaw => "spouse of your sibling, or sibling of your spouse",
        RelationType::ParentInLaw => "parent of your spouse",
        RelationType::ChildInLaw => "spouse of your child",
        RelationType::CoParentInLaw => "parent of your child's spouse",
    }
}

/// Compute every inferred relation of `person`.
///
/// Anyone holding a stored edge with `person` is excluded: direct facts take
/// precedence and are never relabelled. The result is sorted by relation type
/// then person id, so repeated calls on an unchanged graph are identical.
///
/// # Examples
///
/// ```
/// use kindred_domain::{EdgeStore, PersonId, RelationEdge, RelationType};
/// use kindred_store::SqliteStore;
///
/// let mut store = SqliteStore::in_memory().unwrap();
/// // Beto says Ana is his parent; Carla says Beto is hers
/// store.insert_edge(RelationEdge::new(PersonId(2), PersonId(1), RelationType::Parent).unwrap()).unwrap();
/// store.insert_edge(RelationEdge::new(PersonId(3), PersonId(2), RelationType::Parent).unwrap()).unwrap();
///
/// let inferred = kindred_graph::infer(&store, PersonId(1)).unwrap();
/// assert!(inferred
///     .iter()
///     .any(|r| r.other == PersonId(3) && r.relation_type == RelationType::Grandchild));
/// ```
pub fn infer<G>(graph: &G, person: PersonId) -> Result<Vec<InferredRelation>, GraphError>
where
    G: FamilyGraph,
    G::Error: Display,
{
    KinshipEngine::new(graph).infer(person)
}

/// Short-lived, per-call memo over a family graph
///
/// Create one per top-level query; it never observes writes made after its
/// caches were filled.
pub struct KinshipEngine<'a, G> {
    graph: &'a G,
    direct: HashMap<PersonId, DirectRelations>,
    parents: HashMap<PersonId, BTreeSet<PersonId>>,
    children: HashMap<PersonId, BTreeSet<PersonId>>,
    siblings: HashMap<PersonId, BTreeSet<PersonId>>,
    genders: HashMap<PersonId, Gender>,
}

impl<'a, G> KinshipEngine<'a, G>
where
    G: FamilyGraph,
    G::Error: Display,
{
    /// Create an engine with empty caches
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            direct: HashMap::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
            siblings: HashMap::new(),
            genders: HashMap::new(),
        }
    }

    /// Direct relations of `id` (memoized)
    pub fn direct(&mut self, id: PersonId) -> Result<DirectRelations, GraphError> {
        if let Some(cached) = self.direct.get(&id) {
            return Ok(cached.clone());
        }
        let direct = direct_relations(self.graph, id)?;
        self.direct.insert(id, direct.clone());
        Ok(direct)
    }

    /// Direct parents plus the spouses of direct parents (step-parents)
    pub fn complete_parents(&mut self, id: PersonId) -> Result<BTreeSet<PersonId>, GraphError> {
        if let Some(cached) = self.parents.get(&id) {
            return Ok(cached.clone());
        }

        let mut parents = self.direct(id)?.parents;
        for parent in parents.clone() {
            parents.extend(self.direct(parent)?.spouses);
        }
        parents.remove(&id);

        self.parents.insert(id, parents.clone());
        Ok(parents)
    }

    /// Direct children plus the direct children of this person's spouses
    pub fn complete_children(&mut self, id: PersonId) -> Result<BTreeSet<PersonId>, GraphError> {
        if let Some(cached) = self.children.get(&id) {
            return Ok(cached.clone());
        }

        let direct = self.direct(id)?;
        let mut children = direct.children;
        for spouse in direct.spouses {
            children.extend(self.direct(spouse)?.children);
        }
        children.remove(&id);

        self.children.insert(id, children.clone());
        Ok(children)
    }

    fn spouses(&mut self, id: PersonId) -> Result<BTreeSet<PersonId>, GraphError> {
        Ok(self.direct(id)?.spouses)
    }

    fn blood_parents(&mut self, id: PersonId) -> Result<BTreeSet<PersonId>, GraphError> {
        Ok(self.direct(id)?.parents)
    }

    fn blood_children(&mut self, id: PersonId) -> Result<BTreeSet<PersonId>, GraphError> {
        Ok(self.direct(id)?.children)
    }

    /// Direct siblings plus children of direct parents, no spouse hops
    fn blood_siblings(&mut self, id: PersonId) -> Result<BTreeSet<PersonId>, GraphError> {
        let direct = self.direct(id)?;
        let mut siblings = direct.siblings;
        for parent in direct.parents {
            siblings.extend(self.direct(parent)?.children);
        }
        siblings.remove(&id);
        Ok(siblings)
    }

    /// Everyone sharing at least one complete parent, plus direct siblings
    pub fn complete_siblings(&mut self, id: PersonId) -> Result<BTreeSet<PersonId>, GraphError> {
        if let Some(cached) = self.siblings.get(&id) {
            return Ok(cached.clone());
        }

        let mut siblings = self.direct(id)?.siblings;
        for parent in self.complete_parents(id)? {
            siblings.extend(self.direct(parent)?.children);
        }
        siblings.remove(&id);

        self.siblings.insert(id, siblings.clone());
        Ok(siblings)
    }

    /// Union of `step(x)` over every `x` in `from`
    fn expand<F>(
        &mut self,
        from: &BTreeSet<PersonId>,
        mut step: F,
    ) -> Result<BTreeSet<PersonId>, GraphError>
    where
        F: FnMut(&mut Self, PersonId) -> Result<BTreeSet<PersonId>, GraphError>,
    {
        let mut out = BTreeSet::new();
        for id in from {
            out.extend(step(self, *id)?);
        }
        Ok(out)
    }

    fn gender(&mut self, id: PersonId) -> Result<Gender, GraphError> {
        if let Some(gender) = self.genders.get(&id) {
            return Ok(*gender);
        }
        let gender = gender_of(self.graph, id)?;
        self.genders.insert(id, gender);
        Ok(gender)
    }

    /// Derive every inferred relation of `person`
    pub fn infer(&mut self, person: PersonId) -> Result<Vec<InferredRelation>, GraphError> {
        let me = self.direct(person)?;

        let parents = self.complete_parents(person)?;
        let children = self.complete_children(person)?;
        let siblings = self.complete_siblings(person)?;

        let grandparents = self.expand(&parents, Self::complete_parents)?;
        let great_grandparents = self.expand(&grandparents, Self::complete_parents)?;
        let uncles_aunts = self.expand(&parents, Self::complete_siblings)?;
        let nephews_nieces = self.expand(&siblings, Self::complete_children)?;
        let cousins = self.expand(&uncles_aunts, Self::complete_children)?;
        let grandchildren = self.expand(&children, Self::complete_children)?;
        let great_grandchildren = self.expand(&grandchildren, Self::complete_children)?;

        let mut siblings_in_law = self.expand(&siblings, Self::spouses)?;
        siblings_in_law.extend(self.expand(&me.spouses, Self::complete_siblings)?);

        let parents_in_law = self.expand(&me.spouses, Self::complete_parents)?;
        let children_in_law = self.expand(&children, Self::spouses)?;
        let co_parents_in_law = self.expand(&children_in_law, Self::complete_parents)?;

        // Same hops over parent/child/sibling edges only
        let blood_siblings = self.blood_siblings(person)?;
        let blood_grandparents = self.expand(&me.parents, Self::blood_parents)?;
        let blood_great_grandparents = self.expand(&blood_grandparents, Self::blood_parents)?;
        let blood_uncles_aunts = self.expand(&me.parents, Self::blood_siblings)?;
        let blood_nephews_nieces = self.expand(&blood_siblings, Self::blood_children)?;
        let blood_cousins = self.expand(&blood_uncles_aunts, Self::blood_children)?;
        let blood_grandchildren = self.expand(&me.children, Self::blood_children)?;
        let blood_great_grandchildren = self.expand(&blood_grandchildren, Self::blood_children)?;

        let by_marriage_only = BTreeSet::new();
        let derived = [
            (RelationType::Parent, parents, &me.parents),
            (RelationType::Child, children, &me.children),
            (RelationType::Sibling, siblings, &blood_siblings),
            (RelationType::Grandparent, grandparents, &blood_grandparents),
            (
                RelationType::GreatGrandparent,
                great_grandparents,
                &blood_great_grandparents,
            ),
            (RelationType::UncleAunt, uncles_aunts, &blood_uncles_aunts),
            (RelationType::NephewNiece, nephews_nieces, &blood_nephews_nieces),
            (RelationType::Cousin, cousins, &blood_cousins),
            (RelationType::Grandchild, grandchildren, &blood_grandchildren),
            (
                RelationType::GreatGrandchild,
                great_grandchildren,
                &blood_great_grandchildren,
            ),
            (RelationType::SiblingInLaw, siblings_in_law, &by_marriage_only),
            (RelationType::ParentInLaw, parents_in_law, &by_marriage_only),
            (RelationType::ChildInLaw, children_in_law, &by_marriage_only),
            (RelationType::CoParentInLaw, co_parents_in_law, &by_marriage_only),
        ];

        let mut inferred = Vec::new();
        for (relation_type, ids, blood) in derived {
            for other in ids {
                if other == person || me.contains(other) {
                    continue;
                }
                let gender = self.gender(other)?;
                inferred.push(InferredRelation {
                    other,
                    relation_type,
                    label: relation_type.label(gender),
                    reason: reason_for(relation_type),
                    by_marriage: !blood.contains(&other),
                    inferred: true,
                });
            }
        }
        inferred.sort_by_key(|r| (r.relation_type, r.other));

        tracing::debug!(
            person = %person,
            inferred = inferred.len(),
            visited = self.direct.len(),
            "inferred kinship closure"
        );

        Ok(inferred)
    }
}
