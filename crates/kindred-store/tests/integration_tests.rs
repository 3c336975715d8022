//! Integration tests for kindred-store
//!
//! These tests verify the full CRUD cycle for edges and the person register.

use chrono::NaiveDate;
use kindred_domain::traits::{EdgeStore, FamilyGraph};
use kindred_domain::{Gender, Person, PersonId, RelationEdge, RelationType};
use kindred_store::{SqliteStore, StoreError};

fn person(id: i64, name: &str) -> Person {
    Person::new(PersonId(id), name)
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().edge_count().unwrap(), 0);
}

#[test]
fn test_person_roundtrip() {
    let mut store = SqliteStore::in_memory().unwrap();
    let ana = person(1, "Ana Pérez")
        .born(NaiveDate::from_ymd_opt(1950, 4, 2).unwrap())
        .with_gender(Gender::Female);

    store.upsert_person(&ana).unwrap();

    let fetched = store.person(PersonId(1)).unwrap();
    assert_eq!(fetched, Some(ana));
    assert!(store.person(PersonId(99)).unwrap().is_none());
}

#[test]
fn test_upsert_person_replaces() {
    let mut store = SqliteStore::in_memory().unwrap();
    store.upsert_person(&person(1, "Ana")).unwrap();
    store
        .upsert_person(&person(1, "Ana María").with_gender(Gender::Female))
        .unwrap();

    let all = store.list_persons().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].full_name, "Ana María");
    assert_eq!(all[0].gender, Gender::Female);
}

#[test]
fn test_insert_and_get_edge() {
    let mut store = SqliteStore::in_memory().unwrap();

    let mut edge = RelationEdge::new(PersonId(2), PersonId(1), RelationType::Parent).unwrap();
    edge.lives_together = true;
    edge.notes = "raised by".to_string();

    let id = store.insert_edge(edge.clone()).unwrap();
    assert_eq!(id, edge.id);

    let fetched = store.edge(id).unwrap().expect("edge should exist");
    assert_eq!(fetched, edge);
}

#[test]
fn test_edges_of_covers_both_sides() {
    let mut store = SqliteStore::in_memory().unwrap();
    store
        .insert_edge(RelationEdge::new(PersonId(2), PersonId(1), RelationType::Parent).unwrap())
        .unwrap();
    store
        .insert_edge(RelationEdge::new(PersonId(1), PersonId(3), RelationType::Spouse).unwrap())
        .unwrap();
    store
        .insert_edge(RelationEdge::new(PersonId(4), PersonId(5), RelationType::Sibling).unwrap())
        .unwrap();

    let edges = store.edges_of(PersonId(1)).unwrap();
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|e| e.involves(PersonId(1))));

    let between = store.edges_between(PersonId(1), PersonId(2)).unwrap();
    assert_eq!(between.len(), 1);
    let reversed = store.edges_between(PersonId(2), PersonId(1)).unwrap();
    assert_eq!(between, reversed);
}

#[test]
fn test_update_edge() {
    let mut store = SqliteStore::in_memory().unwrap();
    let mut edge = RelationEdge::new(PersonId(1), PersonId(2), RelationType::Sibling).unwrap();
    store.insert_edge(edge.clone()).unwrap();

    edge.relation_type = RelationType::Cousin;
    edge.is_primary_contact = true;
    store.update_edge(&edge).unwrap();

    let fetched = store.edge(edge.id).unwrap().unwrap();
    assert_eq!(fetched.relation_type, RelationType::Cousin);
    assert!(fetched.is_primary_contact);
}

#[test]
fn test_update_missing_edge_fails() {
    let mut store = SqliteStore::in_memory().unwrap();
    let edge = RelationEdge::new(PersonId(1), PersonId(2), RelationType::Sibling).unwrap();

    let result = store.update_edge(&edge);
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn test_remove_edge_does_not_cascade() {
    let mut store = SqliteStore::in_memory().unwrap();
    let first = RelationEdge::new(PersonId(1), PersonId(2), RelationType::Spouse).unwrap();
    let second = RelationEdge::new(PersonId(3), PersonId(1), RelationType::Parent).unwrap();
    store.insert_edge(first.clone()).unwrap();
    store.insert_edge(second.clone()).unwrap();

    assert!(store.remove_edge(first.id).unwrap());
    assert!(!store.remove_edge(first.id).unwrap(), "second delete is a no-op");

    assert_eq!(store.edge_count().unwrap(), 1);
    assert!(store.edge(second.id).unwrap().is_some());
}

#[test]
fn test_self_relation_rejected_by_store() {
    let mut store = SqliteStore::in_memory().unwrap();
    let mut edge = RelationEdge::new(PersonId(1), PersonId(2), RelationType::Sibling).unwrap();
    edge.related_id = PersonId(1);

    assert!(matches!(
        store.insert_edge(edge),
        Err(StoreError::InvalidData(_))
    ));
}

#[test]
fn test_file_backed_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kindred.db");

    let edge = RelationEdge::new(PersonId(1), PersonId(2), RelationType::Spouse).unwrap();
    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.insert_edge(edge.clone()).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.edge(edge.id).unwrap(), Some(edge));
}
