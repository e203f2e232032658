//! Prompt context assembled from stored artifacts

use studypack_domain::traits::ArtifactStore;
use studypack_domain::{ArtifactId, ElementField, StudyElements};
use studypack_extractor::merge;
use tracing::debug;

/// Concatenate the concise text of each artifact, each followed by a blank
/// line
///
/// Unknown ids and artifacts with an empty digest are skipped.
pub fn build_file_context<A: ArtifactStore>(store: &A, ids: &[ArtifactId]) -> Result<String, A::Error> {
    let mut context = String::new();
    for &id in ids {
        match store.read(id)? {
            Some(artifact) if !artifact.concise_text().is_empty() => {
                context.push_str(artifact.concise_text());
                context.push_str("\n\n");
            }
            Some(_) => debug!(id = %id, "Artifact has no concise text"),
            None => debug!(id = %id, "Artifact not found, skipping"),
        }
    }
    Ok(context)
}

/// Merge the structured data of several artifacts into one study set
///
/// Empty strings and duplicates are dropped, first occurrences win. Legacy
/// plain-text artifacts and unknown ids contribute nothing.
pub fn combine_artifacts<A: ArtifactStore>(
    store: &A,
    ids: &[ArtifactId],
) -> Result<StudyElements, A::Error> {
    let mut sets = Vec::with_capacity(ids.len());
    for &id in ids {
        match store.read(id)? {
            Some(artifact) => match artifact.structured() {
                Some(elements) => sets.push(without_empty(elements.clone())),
                None => debug!(id = %id, "Skipping legacy artifact"),
            },
            None => debug!(id = %id, "Artifact not found, skipping"),
        }
    }
    Ok(merge(sets))
}

fn without_empty(mut elements: StudyElements) -> StudyElements {
    for field in ElementField::ALL {
        elements.field_mut(field).retain(|item| !item.is_empty());
    }
    elements
}
