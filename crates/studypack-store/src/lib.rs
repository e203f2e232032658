//! Studypack Storage Layer
//!
//! Implements the [`DocumentStore`] and [`ArtifactStore`] traits on SQLite.
//!
//! # Architecture
//!
//! - `documents`: uploaded bytes, detected kind, and the extracted text side
//!   artifact
//! - `artifacts`: one JSON payload per compressed artifact, normalized into a
//!   [`StoredArtifact`] on read
//!
//! # Examples
//!
//! ```no_run
//! use studypack_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for document and artifact operations
//! ```

#![warn(missing_docs)]

mod normalize;

pub use normalize::normalize_artifact;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use studypack_domain::traits::{ArtifactStore, DocumentStore};
use studypack_domain::{
    ArtifactId, CompressedArtifact, DocumentId, DocumentKind, RawDocument, StoredArtifact,
};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Artifact could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// One row of the artifact listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    /// Artifact identifier
    pub id: ArtifactId,

    /// Extracted text length, 0 for legacy records
    pub original_length: usize,

    /// Concise text length
    pub compressed_length: usize,

    /// True for legacy plain-text records
    pub legacy: bool,
}

/// SQLite-based implementation of [`DocumentStore`] and [`ArtifactStore`]
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance; several instances may open the same database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Store a raw payload as-is, for importing records written by older
    /// versions
    pub fn write_raw_artifact(&mut self, id: ArtifactId, payload: &str) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO artifacts (id, payload, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET payload = excluded.payload",
            params![id_to_bytes(id.value()), payload, now_secs()],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Summaries of every stored artifact, oldest first
    ///
    /// Records that cannot be normalized are skipped.
    pub fn artifact_summaries(&self) -> Result<Vec<ArtifactSummary>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, payload FROM artifacts ORDER BY rowid")?;

        let rows = stmt
            .query_map([], |row| {
                let id_bytes: Vec<u8> = row.get(0)?;
                let payload: String = row.get(1)?;
                Ok((id_bytes, payload))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut summaries = Vec::with_capacity(rows.len());
        for (id_bytes, payload) in rows {
            let id = ArtifactId::from_value(bytes_to_id(&id_bytes)?);
            let summary = match normalize_artifact(&payload) {
                Ok(StoredArtifact::Structured(artifact)) => ArtifactSummary {
                    id,
                    original_length: artifact.original_length,
                    compressed_length: artifact.compressed_length,
                    legacy: false,
                },
                Ok(StoredArtifact::LegacyText(text)) => ArtifactSummary {
                    id,
                    original_length: 0,
                    compressed_length: text.chars().count(),
                    legacy: true,
                },
                Err(e) => {
                    debug!(id = %id, error = %e, "Skipping unreadable artifact");
                    continue;
                }
            };
            summaries.push(summary);
        }
        Ok(summaries)
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Ids are stored as 16 big-endian bytes so they sort by creation time
fn id_to_bytes(value: u128) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

fn bytes_to_id(bytes: &[u8]) -> Result<u128, StoreError> {
    let arr: [u8; 16] = bytes.try_into().map_err(|_| {
        StoreError::InvalidData(format!("Expected 16 bytes for id, got {}", bytes.len()))
    })?;
    Ok(u128::from_be_bytes(arr))
}

impl DocumentStore for SqliteStore {
    type Error = StoreError;

    fn save(&mut self, bytes: &[u8], name: &str) -> Result<DocumentId, Self::Error> {
        let id = DocumentId::new();
        let kind = DocumentKind::from_name(name);

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO documents (id, name, kind, bytes, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id_to_bytes(id.value()), name, kind.as_str(), bytes, now_secs()],
        )?;
        tx.commit()?;

        info!(id = %id, name = %name, kind = kind.as_str(), size = bytes.len(), "Saved document");
        Ok(id)
    }

    fn read(&self, id: DocumentId) -> Result<Option<RawDocument>, Self::Error> {
        let row = self
            .conn
            .query_row(
                "SELECT name, kind, bytes FROM documents WHERE id = ?1",
                params![id_to_bytes(id.value())],
                |row| {
                    let name: String = row.get(0)?;
                    let kind: String = row.get(1)?;
                    let bytes: Vec<u8> = row.get(2)?;
                    Ok((name, kind, bytes))
                },
            )
            .optional()?;

        Ok(row.map(|(name, kind, bytes)| RawDocument {
            id,
            kind: DocumentKind::parse(&kind).unwrap_or_else(|| DocumentKind::from_name(&name)),
            name,
            bytes,
        }))
    }

    fn save_extracted_text(&mut self, id: DocumentId, text: &str) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;
        let updated = tx.execute(
            "UPDATE documents SET extracted_text = ?1 WHERE id = ?2",
            params![text, id_to_bytes(id.value())],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("document {}", id)));
        }
        tx.commit()?;
        Ok(())
    }

    fn read_extracted_text(&self, id: DocumentId) -> Result<Option<String>, Self::Error> {
        let text: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT extracted_text FROM documents WHERE id = ?1",
                params![id_to_bytes(id.value())],
                |row| row.get(0),
            )
            .optional()?;
        Ok(text.flatten())
    }
}

impl ArtifactStore for SqliteStore {
    type Error = StoreError;

    fn write(&mut self, id: ArtifactId, artifact: &CompressedArtifact) -> Result<(), Self::Error> {
        let payload = serde_json::to_string(artifact)?;
        self.write_raw_artifact(id, &payload)?;
        info!(id = %id, bytes = payload.len(), "Persisted artifact");
        Ok(())
    }

    fn read(&self, id: ArtifactId) -> Result<Option<StoredArtifact>, Self::Error> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM artifacts WHERE id = ?1",
                params![id_to_bytes(id.value())],
                |row| row.get(0),
            )
            .optional()?;

        payload.map(|p| normalize_artifact(&p)).transpose()
    }

    fn list(&self) -> Result<Vec<ArtifactId>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM artifacts ORDER BY rowid")?;

        let ids = stmt
            .query_map([], |row| row.get::<_, Vec<u8>>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        ids.iter()
            .map(|bytes| bytes_to_id(bytes).map(ArtifactId::from_value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_bytes_round_trip() {
        let id = ArtifactId::new();
        let bytes = id_to_bytes(id.value());
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes_to_id(&bytes).unwrap(), id.value());
    }

    #[test]
    fn test_bad_id_length() {
        assert!(matches!(bytes_to_id(&[1, 2, 3]), Err(StoreError::InvalidData(_))));
    }
}
