//! Integration tests for kindred-graph
//!
//! A three-generation family with step, half and in-law branches is stored in
//! an in-memory SQLite store and queried through the public API.

use kindred_domain::{EdgeStore, Gender, Person, PersonId, RelationEdge, RelationType};
use kindred_graph::{
    classify, direct_relations, effective_relations, infer, FamilyCategory, MemberSource,
};
use kindred_store::SqliteStore;

fn id(n: i64) -> PersonId {
    PersonId(n)
}

fn relate(store: &mut SqliteStore, declarer: i64, related: i64, t: RelationType) {
    store
        .insert_edge(RelationEdge::new(id(declarer), id(related), t).unwrap())
        .unwrap();
}

fn add_person(store: &mut SqliteStore, n: i64, name: &str, gender: Gender) {
    store
        .upsert_person(&Person::new(id(n), name).with_gender(gender))
        .unwrap();
}

/// Extended family centred on Ignacio (6).
///
/// Ignacio's father Pablo (3) is married to Marta (5), who is not recorded
/// as Ignacio's parent. Marta's son Tomás (7) is therefore a step-sibling.
fn extended_family() -> SqliteStore {
    let mut store = SqliteStore::in_memory().unwrap();
    let people = [
        (1, "Alberto", Gender::Male),
        (2, "Berta", Gender::Female),
        (3, "Pablo", Gender::Male),
        (4, "Teresa", Gender::Female),
        (5, "Marta", Gender::Female),
        (6, "Ignacio", Gender::Male),
        (7, "Tomás", Gender::Male),
        (8, "Pedro", Gender::Male),
        (9, "Elena", Gender::Female),
        (10, "Samuel", Gender::Male),
        (11, "Carlos", Gender::Male),
        (12, "Hugo", Gender::Male),
        (13, "Nuria", Gender::Female),
        (14, "Consuelo", Gender::Female),
        (15, "Nico", Gender::Male),
        (16, "Bruno", Gender::Male),
        (17, "Basilio", Gender::Male),
        (18, "Sofía", Gender::Female),
        (19, "Cecilia", Gender::Female),
    ];
    for (n, name, gender) in people {
        add_person(&mut store, n, name, gender);
    }

    relate(&mut store, 1, 2, RelationType::Spouse);
    relate(&mut store, 3, 1, RelationType::Parent);
    relate(&mut store, 2, 3, RelationType::Child);
    relate(&mut store, 4, 2, RelationType::Parent);
    relate(&mut store, 3, 5, RelationType::Spouse);
    relate(&mut store, 6, 3, RelationType::Parent);
    relate(&mut store, 5, 7, RelationType::Child);
    relate(&mut store, 8, 4, RelationType::Parent);
    relate(&mut store, 6, 9, RelationType::Spouse);
    relate(&mut store, 9, 10, RelationType::Parent);
    relate(&mut store, 11, 10, RelationType::Parent);
    relate(&mut store, 6, 12, RelationType::Child);
    relate(&mut store, 12, 13, RelationType::Spouse);
    relate(&mut store, 13, 14, RelationType::Parent);
    relate(&mut store, 15, 12, RelationType::Parent);
    relate(&mut store, 16, 15, RelationType::Parent);
    relate(&mut store, 1, 17, RelationType::Parent);
    relate(&mut store, 18, 7, RelationType::Parent);
    relate(&mut store, 7, 19, RelationType::Spouse);

    store
}

#[test]
fn test_grandchild_and_grandparent_are_inferred() {
    let mut store = SqliteStore::in_memory().unwrap();
    let (ana, beto, carla) = (1, 2, 3);
    // Ana is parent of Beto; Beto is parent of Carla
    relate(&mut store, beto, ana, RelationType::Parent);
    relate(&mut store, beto, carla, RelationType::Child);

    let from_ana = infer(&store, id(ana)).unwrap();
    assert!(from_ana
        .iter()
        .any(|r| r.other == id(carla) && r.relation_type == RelationType::Grandchild));

    let from_carla = infer(&store, id(carla)).unwrap();
    assert!(from_carla
        .iter()
        .any(|r| r.other == id(ana) && r.relation_type == RelationType::Grandparent));
}

#[test]
fn test_spouse_of_child_and_step_child() {
    let mut store = SqliteStore::in_memory().unwrap();
    let (ana, beto, carla, diana) = (1, 2, 3, 4);
    relate(&mut store, beto, ana, RelationType::Parent);
    relate(&mut store, beto, carla, RelationType::Child);
    relate(&mut store, beto, diana, RelationType::Spouse);

    // Diana reaches Ana through Beto's marriage
    let from_ana = infer(&store, id(ana)).unwrap();
    assert!(from_ana
        .iter()
        .any(|r| r.other == id(diana) && r.relation_type == RelationType::ChildInLaw));

    // Carla is Diana's step-child
    let from_diana = infer(&store, id(diana)).unwrap();
    let carla_entry = from_diana
        .iter()
        .find(|r| r.other == id(carla))
        .expect("Carla should be inferred for Diana");
    assert_eq!(carla_entry.relation_type, RelationType::Child);
    assert_eq!(carla_entry.reason, "child of your spouse");
    assert!(carla_entry.inferred);
}

#[test]
fn test_full_closure_of_extended_family() {
    let store = extended_family();

    let inferred: Vec<(RelationType, PersonId)> = infer(&store, id(6))
        .unwrap()
        .into_iter()
        .map(|r| (r.relation_type, r.other))
        .collect();

    let expected = vec![
        (RelationType::Parent, id(5)),
        (RelationType::Sibling, id(7)),
        (RelationType::Grandparent, id(1)),
        (RelationType::Grandparent, id(2)),
        (RelationType::Grandchild, id(15)),
        (RelationType::GreatGrandparent, id(17)),
        (RelationType::GreatGrandchild, id(16)),
        (RelationType::UncleAunt, id(4)),
        (RelationType::NephewNiece, id(18)),
        (RelationType::Cousin, id(8)),
        (RelationType::SiblingInLaw, id(11)),
        (RelationType::SiblingInLaw, id(19)),
        (RelationType::ParentInLaw, id(10)),
        (RelationType::ChildInLaw, id(13)),
        (RelationType::CoParentInLaw, id(14)),
    ];
    assert_eq!(inferred, expected);
}

#[test]
fn test_inferred_labels_follow_gender() {
    let store = extended_family();
    let inferred = infer(&store, id(6)).unwrap();

    let label_of = |n: i64| {
        inferred
            .iter()
            .find(|r| r.other == id(n))
            .map(|r| r.label)
            .unwrap()
    };
    assert_eq!(label_of(5), "mother");
    assert_eq!(label_of(2), "grandmother");
    assert_eq!(label_of(4), "aunt");
    assert_eq!(label_of(18), "niece");
    assert_eq!(label_of(14), "co-mother-in-law");
}

#[test]
fn test_direct_edges_never_reappear_as_inferred() {
    let mut store = extended_family();
    // Ignacio also records his grandfather directly
    relate(&mut store, 6, 1, RelationType::Grandparent);

    let inferred = infer(&store, id(6)).unwrap();
    let direct = effective_relations(&store, id(6)).unwrap();
    for relation in &direct {
        assert!(
            inferred.iter().all(|r| r.other != relation.other),
            "{} is direct and must not be inferred",
            relation.other
        );
    }
    assert!(inferred.iter().any(|r| r.other == id(2)));
}

#[test]
fn test_inference_is_idempotent() {
    let store = extended_family();
    let first = infer(&store, id(6)).unwrap();
    let second = infer(&store, id(6)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_never_lists_self() {
    let store = extended_family();
    for n in 1..=19 {
        let inferred = infer(&store, id(n)).unwrap();
        assert!(inferred.iter().all(|r| r.other != id(n)), "person {} lists self", n);
    }
}

#[test]
fn test_cyclic_parents_terminate() {
    let mut store = SqliteStore::in_memory().unwrap();
    relate(&mut store, 1, 2, RelationType::Parent);
    relate(&mut store, 2, 1, RelationType::Parent);
    relate(&mut store, 2, 3, RelationType::Spouse);
    relate(&mut store, 3, 1, RelationType::Parent);

    for n in 1..=3 {
        let inferred = infer(&store, id(n)).unwrap();
        assert!(inferred.iter().all(|r| r.other != id(n)));
    }
}

#[test]
fn test_siblings_found_from_either_declaring_side() {
    let mut store = SqliteStore::in_memory().unwrap();
    // 1 says 10 is my parent; 10 says 2 is my child
    relate(&mut store, 1, 10, RelationType::Parent);
    relate(&mut store, 10, 2, RelationType::Child);

    let inferred = infer(&store, id(1)).unwrap();
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].other, id(2));
    assert_eq!(inferred[0].relation_type, RelationType::Sibling);
    assert_eq!(inferred[0].reason, "shares a parent with you");
}

#[test]
fn test_direct_relations_symmetric_for_core_types() {
    for t in [
        RelationType::Parent,
        RelationType::Child,
        RelationType::Sibling,
        RelationType::Spouse,
    ] {
        let mut store = SqliteStore::in_memory().unwrap();
        relate(&mut store, 1, 2, t);

        let a = direct_relations(&store, id(1)).unwrap();
        let b = direct_relations(&store, id(2)).unwrap();

        assert_eq!(a.children.contains(&id(2)), b.parents.contains(&id(1)), "{}", t);
        assert_eq!(a.parents.contains(&id(2)), b.children.contains(&id(1)), "{}", t);
        assert_eq!(a.siblings.contains(&id(2)), b.siblings.contains(&id(1)), "{}", t);
        assert_eq!(a.spouses.contains(&id(2)), b.spouses.contains(&id(1)), "{}", t);
    }
}

#[test]
fn test_effective_types_symmetric_for_every_type() {
    for t in RelationType::ALL {
        let mut store = SqliteStore::in_memory().unwrap();
        relate(&mut store, 1, 2, t);

        let from_declarer = effective_relations(&store, id(1)).unwrap();
        let from_related = effective_relations(&store, id(2)).unwrap();
        assert_eq!(from_declarer[0].relation_type, t);
        assert_eq!(from_related[0].relation_type, t.inverse());
    }
}

#[test]
fn test_classify_groups_and_precedence() {
    let store = extended_family();
    let family = classify(&store, id(6)).unwrap();

    let nuclear: Vec<_> = family.nuclear.iter().map(|m| (m.relation_type, m.other)).collect();
    assert_eq!(
        nuclear,
        vec![(RelationType::Spouse, id(9)), (RelationType::Child, id(12))]
    );

    let origin: Vec<_> = family
        .origin
        .iter()
        .map(|m| (m.relation_type, m.other, m.is_inferred()))
        .collect();
    assert_eq!(
        origin,
        vec![
            (RelationType::Parent, id(3), false),
            (RelationType::Parent, id(5), true),
            (RelationType::Sibling, id(7), true),
        ]
    );

    assert_eq!(family.extended.len(), 8);
    assert_eq!(family.extended[0].relation_type, RelationType::Grandparent);
    assert_eq!(family.in_law.len(), 5);
    assert_eq!(family.in_law[0].other, id(10));
    assert_eq!(family.len(), 18);
}

#[test]
fn test_classify_direct_wins_over_inferred() {
    let mut store = extended_family();
    let mut edge = RelationEdge::new(id(6), id(1), RelationType::Grandparent).unwrap();
    edge.lives_together = true;
    store.insert_edge(edge.clone()).unwrap();

    let family = classify(&store, id(6)).unwrap();
    let grandfather: Vec<_> = family
        .extended
        .iter()
        .filter(|m| m.other == id(1))
        .collect();
    assert_eq!(grandfather.len(), 1);
    match &grandfather[0].source {
        MemberSource::Direct {
            edge_id,
            lives_together,
            ..
        } => {
            assert_eq!(*edge_id, edge.id);
            assert!(*lives_together);
        }
        MemberSource::Inferred { .. } => panic!("Expected a direct member"),
    }

    for (category, members) in family.groups() {
        for member in members {
            assert_eq!(FamilyCategory::of(member.relation_type), category);
        }
    }
}

#[test]
fn test_empty_person_has_empty_family() {
    let store = SqliteStore::in_memory().unwrap();
    assert!(infer(&store, id(1)).unwrap().is_empty());
    assert!(classify(&store, id(1)).unwrap().is_empty());
}

#[test]
fn test_spouse_hops_are_marked() {
    let store = extended_family();
    let inferred = infer(&store, id(6)).unwrap();
    let by_marriage = |other: i64, t: RelationType| {
        inferred
            .iter()
            .find(|r| r.other == id(other) && r.relation_type == t)
            .map(|r| r.by_marriage)
            .unwrap()
    };

    // Blood lines
    assert!(!by_marriage(1, RelationType::Grandparent));
    assert!(!by_marriage(2, RelationType::Grandparent));
    // Through Pablo's marriage to Marta
    assert!(by_marriage(5, RelationType::Parent));
    assert!(by_marriage(7, RelationType::Sibling));
    // Through Ignacio's own marriage
    assert!(by_marriage(10, RelationType::ParentInLaw));
}
