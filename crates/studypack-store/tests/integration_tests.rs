//! Integration tests for studypack-store
//!
//! These tests verify the full save/read cycle for documents and artifacts,
//! on disk and in memory.

use studypack_domain::traits::{ArtifactStore, DocumentStore};
use studypack_domain::{
    ArtifactId, CompressedArtifact, DocumentId, DocumentKind, StoredArtifact, StudyElements,
};
use studypack_store::{SqliteStore, StoreError};
use tempfile::TempDir;

fn sample_artifact() -> CompressedArtifact {
    CompressedArtifact::new(
        StudyElements {
            terms: vec!["Photosynthesis".to_string()],
            definitions: vec!["Photosynthesis: plants convert light to energy".to_string()],
            ..StudyElements::default()
        },
        "Definition: photosynthesis plant convert light energy".to_string(),
        "Photosynthesis: plants convert light to energy.",
    )
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_save_and_read_document() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let id = store.save(b"%PDF-1.4 fake", "Chapter 1.PDF").unwrap();
    let doc = DocumentStore::read(&store, id).unwrap().expect("document should exist");

    assert_eq!(doc.id, id);
    assert_eq!(doc.name, "Chapter 1.PDF");
    assert_eq!(doc.kind, DocumentKind::Pdf);
    assert_eq!(doc.bytes, b"%PDF-1.4 fake");
}

#[test]
fn test_read_unknown_document() {
    let store = SqliteStore::new(":memory:").unwrap();
    assert!(DocumentStore::read(&store, DocumentId::new()).unwrap().is_none());
}

#[test]
fn test_extracted_text_side_artifact() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let id = store.save(b"notes", "notes.txt").unwrap();

    assert_eq!(store.read_extracted_text(id).unwrap(), None);

    store.save_extracted_text(id, "notes").unwrap();
    assert_eq!(store.read_extracted_text(id).unwrap().as_deref(), Some("notes"));
}

#[test]
fn test_extracted_text_for_unknown_document() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let result = store.save_extracted_text(DocumentId::new(), "text");
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn test_write_and_read_artifact() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let id = ArtifactId::new();
    let artifact = sample_artifact();

    store.write(id, &artifact).unwrap();

    let stored = ArtifactStore::read(&store, id).unwrap().unwrap();
    assert_eq!(stored, StoredArtifact::Structured(artifact));
}

#[test]
fn test_overwrite_artifact() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let id = ArtifactId::new();

    store.write(id, &sample_artifact()).unwrap();
    let replacement = CompressedArtifact::new(StudyElements::new(), String::new(), "");
    store.write(id, &replacement).unwrap();

    assert_eq!(
        ArtifactStore::read(&store, id).unwrap(),
        Some(StoredArtifact::Structured(replacement))
    );
    assert_eq!(store.list().unwrap(), vec![id]);
}

#[test]
fn test_legacy_payloads_are_normalized() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let plain = ArtifactId::new();
    let wrapped = ArtifactId::new();

    store
        .write_raw_artifact(plain, "Term: Mitosis\nTerm: Meiosis")
        .unwrap();
    store
        .write_raw_artifact(wrapped, r#"{"compressed_text": "Term: Osmosis"}"#)
        .unwrap();

    let plain = ArtifactStore::read(&store, plain).unwrap().unwrap();
    let wrapped = ArtifactStore::read(&store, wrapped).unwrap().unwrap();

    assert!(plain.is_legacy());
    assert_eq!(plain.concise_text(), "Term: Mitosis\nTerm: Meiosis");
    assert_eq!(wrapped.concise_text(), "Term: Osmosis");
}

#[test]
fn test_list_in_creation_order() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let ids: Vec<ArtifactId> = (0..3).map(|_| ArtifactId::new()).collect();
    for id in &ids {
        store.write(*id, &sample_artifact()).unwrap();
    }

    assert_eq!(store.list().unwrap(), ids);
}

#[test]
fn test_artifact_summaries() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let current = ArtifactId::new();
    let legacy = ArtifactId::new();
    let broken = ArtifactId::new();

    store.write(current, &sample_artifact()).unwrap();
    store.write_raw_artifact(legacy, "old digest").unwrap();
    store.write_raw_artifact(broken, "[1, 2]").unwrap();

    let summaries = store.artifact_summaries().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, current);
    assert_eq!(summaries[0].original_length, 47);
    assert!(!summaries[0].legacy);
    assert_eq!(summaries[1].id, legacy);
    assert_eq!(summaries[1].compressed_length, 10);
    assert!(summaries[1].legacy);
}

#[test]
fn test_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("studypack.db");
    let artifact_id = ArtifactId::new();

    let doc_id = {
        let mut store = SqliteStore::new(&path).unwrap();
        let doc_id = store.save(b"Cells divide.", "bio.txt").unwrap();
        store.save_extracted_text(doc_id, "Cells divide.").unwrap();
        store.write(artifact_id, &sample_artifact()).unwrap();
        doc_id
    };

    let store = SqliteStore::new(&path).unwrap();
    assert!(DocumentStore::read(&store, doc_id).unwrap().is_some());
    assert_eq!(
        store.read_extracted_text(doc_id).unwrap().as_deref(),
        Some("Cells divide.")
    );
    assert_eq!(
        ArtifactStore::read(&store, artifact_id).unwrap(),
        Some(StoredArtifact::Structured(sample_artifact()))
    );
}

#[test]
fn test_two_handles_share_one_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shared.db");

    let mut documents = SqliteStore::new(&path).unwrap();
    let mut artifacts = SqliteStore::new(&path).unwrap();

    let doc_id = documents.save(b"x", "x.txt").unwrap();
    let artifact_id = ArtifactId::new();
    artifacts.write(artifact_id, &sample_artifact()).unwrap();

    assert!(DocumentStore::read(&artifacts, doc_id).unwrap().is_some());
    assert_eq!(documents.list().unwrap(), vec![artifact_id]);
}
