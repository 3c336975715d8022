//! Kindred Storage Layer
//!
//! Implements the `FamilyGraph` and `EdgeStore` traits on SQLite.
//!
//! # Architecture
//!
//! - `relation_edges` holds one row per declared kinship fact
//! - `persons` is the host's person register, read-only for the engine
//! - Derived (inferred) relations are never stored
//!
//! # Examples
//!
//! ```no_run
//! use kindred_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for edge operations
//! ```

#![warn(missing_docs)]

use chrono::NaiveDate;
use kindred_domain::traits::{EdgeStore, FamilyGraph};
use kindred_domain::{EdgeId, Gender, Person, PersonId, RelationEdge, RelationType};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

const EDGE_COLUMNS: &str = "id, declarer_id, related_id, relation_type, lives_together, \
                            is_primary_contact, notes, created_at";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Edge or person not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of the edge store
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a fresh in-memory store
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Insert or replace a person in the host register
    pub fn upsert_person(&mut self, person: &Person) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO persons (id, full_name, birth_date, gender) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
             full_name = excluded.full_name, birth_date = excluded.birth_date, gender = excluded.gender",
            params![
                person.id.value(),
                &person.full_name,
                person.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
                person.gender.as_str(),
            ],
        )?;
        Ok(())
    }

    /// All persons in the register, ordered by id
    pub fn list_persons(&self) -> Result<Vec<Person>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, full_name, birth_date, gender FROM persons ORDER BY id")?;
        let persons = stmt
            .query_map([], Self::row_to_person)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(persons)
    }

    /// Number of stored edges
    pub fn edge_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM relation_edges", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn edge_id_to_bytes(id: EdgeId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn bytes_to_edge_id(bytes: &[u8]) -> Result<EdgeId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for EdgeId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(EdgeId::from_value(u128::from_be_bytes(arr)))
    }

    fn conversion_error(
        column: usize,
        ty: rusqlite::types::Type,
        e: StoreError,
    ) -> rusqlite::Error {
        rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(e))
    }

    fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<RelationEdge> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_edge_id(&id_bytes)
            .map_err(|e| Self::conversion_error(0, rusqlite::types::Type::Blob, e))?;

        let type_str: String = row.get(3)?;
        let relation_type = RelationType::parse(&type_str).ok_or_else(|| {
            Self::conversion_error(
                3,
                rusqlite::types::Type::Text,
                StoreError::InvalidData(format!("Unknown relation type: {}", type_str)),
            )
        })?;

        Ok(RelationEdge {
            id,
            declarer_id: PersonId(row.get(1)?),
            related_id: PersonId(row.get(2)?),
            relation_type,
            lives_together: row.get(4)?,
            is_primary_contact: row.get(5)?,
            notes: row.get(6)?,
            created_at: row.get::<_, i64>(7)? as u64,
        })
    }

    fn row_to_person(row: &Row<'_>) -> rusqlite::Result<Person> {
        let birth_date: Option<String> = row.get(2)?;
        let birth_date = birth_date
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
                    Self::conversion_error(
                        2,
                        rusqlite::types::Type::Text,
                        StoreError::InvalidData(format!("Invalid birth date '{}': {}", raw, e)),
                    )
                })
            })
            .transpose()?;
        let gender: String = row.get(3)?;

        Ok(Person {
            id: PersonId(row.get(0)?),
            full_name: row.get(1)?,
            birth_date,
            gender: Gender::normalize(&gender),
        })
    }
}

impl FamilyGraph for SqliteStore {
    type Error = StoreError;

    fn person(&self, id: PersonId) -> Result<Option<Person>, Self::Error> {
        let person = self
            .conn
            .query_row(
                "SELECT id, full_name, birth_date, gender FROM persons WHERE id = ?1",
                params![id.value()],
                Self::row_to_person,
            )
            .optional()?;
        Ok(person)
    }

    fn edges_of(&self, id: PersonId) -> Result<Vec<RelationEdge>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM relation_edges WHERE declarer_id = ?1 OR related_id = ?1 ORDER BY id",
            EDGE_COLUMNS
        ))?;
        let edges = stmt
            .query_map(params![id.value()], Self::row_to_edge)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }

    fn edge(&self, id: EdgeId) -> Result<Option<RelationEdge>, Self::Error> {
        let edge = self
            .conn
            .query_row(
                &format!("SELECT {} FROM relation_edges WHERE id = ?1", EDGE_COLUMNS),
                params![Self::edge_id_to_bytes(id)],
                Self::row_to_edge,
            )
            .optional()?;
        Ok(edge)
    }

    fn edges_between(&self, a: PersonId, b: PersonId) -> Result<Vec<RelationEdge>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM relation_edges
             WHERE (declarer_id = ?1 AND related_id = ?2) OR (declarer_id = ?2 AND related_id = ?1)
             ORDER BY id",
            EDGE_COLUMNS
        ))?;
        let edges = stmt
            .query_map(params![a.value(), b.value()], Self::row_to_edge)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }
}

impl EdgeStore for SqliteStore {
    fn insert_edge(&mut self, edge: RelationEdge) -> Result<EdgeId, Self::Error> {
        if edge.declarer_id == edge.related_id {
            return Err(StoreError::InvalidData(format!(
                "{} cannot be related to themselves",
                edge.declarer_id
            )));
        }

        let tx = self.conn.transaction()?;
        tx.execute(
            &format!(
                "INSERT INTO relation_edges ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                EDGE_COLUMNS
            ),
            params![
                Self::edge_id_to_bytes(edge.id),
                edge.declarer_id.value(),
                edge.related_id.value(),
                edge.relation_type.as_str(),
                edge.lives_together,
                edge.is_primary_contact,
                &edge.notes,
                edge.created_at as i64,
            ],
        )?;
        tx.commit()?;

        tracing::debug!(edge = %edge.id, "inserted relation edge");
        Ok(edge.id)
    }

    fn update_edge(&mut self, edge: &RelationEdge) -> Result<(), Self::Error> {
        if edge.declarer_id == edge.related_id {
            return Err(StoreError::InvalidData(format!(
                "{} cannot be related to themselves",
                edge.declarer_id
            )));
        }

        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE relation_edges SET
             declarer_id = ?2, related_id = ?3, relation_type = ?4,
             lives_together = ?5, is_primary_contact = ?6, notes = ?7
             WHERE id = ?1",
            params![
                Self::edge_id_to_bytes(edge.id),
                edge.declarer_id.value(),
                edge.related_id.value(),
                edge.relation_type.as_str(),
                edge.lives_together,
                edge.is_primary_contact,
                &edge.notes,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("edge {}", edge.id)));
        }
        tx.commit()?;

        tracing::debug!(edge = %edge.id, "updated relation edge");
        Ok(())
    }

    fn remove_edge(&mut self, id: EdgeId) -> Result<bool, Self::Error> {
        let removed = self.conn.execute(
            "DELETE FROM relation_edges WHERE id = ?1",
            params![Self::edge_id_to_bytes(id)],
        )?;
        Ok(removed > 0)
    }
}
