//! Merge per-chunk results into one document-level structure

use std::collections::HashSet;
use studypack_domain::{ElementField, StudyElements};

/// Incremental, order-preserving merger of [`StudyElements`]
///
/// Each field keeps the first occurrence of every exact string value, in the
/// order results were pushed. Chunks must therefore be pushed in document
/// order.
#[derive(Debug, Default)]
pub struct Aggregator {
    merged: StudyElements,
    seen: [HashSet<String>; 5],
}

impl Aggregator {
    /// Empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk's result
    pub fn push(&mut self, elements: StudyElements) {
        let mut elements = elements;
        for (index, field) in ElementField::ALL.into_iter().enumerate() {
            let seen = &mut self.seen[index];
            let target = self.merged.field_mut(field);
            for item in std::mem::take(elements.field_mut(field)) {
                if seen.insert(item.clone()) {
                    target.push(item);
                }
            }
        }
    }

    /// Finish and return the merged structure
    pub fn finish(self) -> StudyElements {
        self.merged
    }
}

/// Merge chunk results in order, deduplicating every field
pub fn merge<I>(chunk_results: I) -> StudyElements
where
    I: IntoIterator<Item = StudyElements>,
{
    let mut aggregator = Aggregator::new();
    for elements in chunk_results {
        aggregator.push(elements);
    }
    aggregator.finish()
}
