//! Pipeline orchestrator

use crate::error::PipelineError;
use crate::report::{IngestReport, RunReport};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};
use studypack_compressor::Compressor;
use studypack_domain::traits::{ArtifactStore, DocumentStore};
use studypack_domain::{ArtifactId, CompressedArtifact, DocumentId, RawDocument};
use studypack_extractor::ElementExtractor;
use studypack_llm::ModelClient;
use studypack_text::TextExtractor;
use tracing::{info, warn};

/// Runs extraction, chunking, element extraction, aggregation and
/// compression for one document at a time, then persists the artifact
///
/// Chunks of a document are processed strictly in order. Separate runs share
/// nothing but the model client and the stores, which are locked only for
/// the duration of each read or write.
///
/// # Examples
///
/// ```no_run
/// use studypack_compressor::Compressor;
/// use studypack_extractor::{ElementExtractor, ExtractorConfig};
/// use studypack_llm::MockProvider;
/// use studypack_pipeline::Pipeline;
/// use studypack_store::SqliteStore;
/// use studypack_text::{NoOcr, TextExtractor};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = ElementExtractor::new(MockProvider::default(), ExtractorConfig::default())?;
/// let pipeline = Pipeline::new(
///     TextExtractor::new(NoOcr),
///     extractor,
///     Compressor::default(),
///     SqliteStore::new(":memory:")?,
///     SqliteStore::new(":memory:")?,
/// );
///
/// let outcome = pipeline.ingest(b"Cells divide by mitosis.".to_vec(), "notes.txt").await?;
/// println!("{:?}", outcome.run);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<C, D, A>
where
    C: ModelClient,
    D: DocumentStore,
    A: ArtifactStore,
{
    text: Arc<TextExtractor>,
    extractor: ElementExtractor<C>,
    compressor: Compressor,
    documents: Arc<Mutex<D>>,
    artifacts: Arc<Mutex<A>>,
}

impl<C, D, A> Pipeline<C, D, A>
where
    C: ModelClient,
    D: DocumentStore,
    A: ArtifactStore,
    D::Error: Display,
    A::Error: Display,
{
    /// Create a new Pipeline
    pub fn new(
        text: TextExtractor,
        extractor: ElementExtractor<C>,
        compressor: Compressor,
        documents: D,
        artifacts: A,
    ) -> Self {
        Self {
            text: Arc::new(text),
            extractor,
            compressor,
            documents: Arc::new(Mutex::new(documents)),
            artifacts: Arc::new(Mutex::new(artifacts)),
        }
    }

    /// Shared handle to the document store
    pub fn documents(&self) -> Arc<Mutex<D>> {
        Arc::clone(&self.documents)
    }

    /// Shared handle to the artifact store
    pub fn artifacts(&self) -> Arc<Mutex<A>> {
        Arc::clone(&self.artifacts)
    }

    /// The element extractor
    pub fn extractor(&self) -> &ElementExtractor<C> {
        &self.extractor
    }

    /// Process a stored document and return the new artifact's id, or `None`
    /// when the document has no extractable text
    pub async fn run(&self, document_id: DocumentId) -> Result<Option<ArtifactId>, PipelineError> {
        Ok(self
            .run_with_report(document_id)
            .await?
            .map(|report| report.artifact_id))
    }

    /// Process a stored document and report what happened
    pub async fn run_with_report(
        &self,
        document_id: DocumentId,
    ) -> Result<Option<RunReport>, PipelineError> {
        let document = self
            .read_document(document_id)?
            .ok_or(PipelineError::DocumentNotFound(document_id))?;

        info!(id = %document_id, name = %document.name, "Starting pipeline run");

        let text = self.extract_text(document).await?;
        self.save_extracted_text(document_id, &text);

        if text.trim().is_empty() {
            info!(id = %document_id, "No text extracted, nothing to process");
            return Ok(None);
        }

        let extraction = self.extractor.extract_document(&text).await?;
        let compressed_text = self.compressor.compress(&extraction.elements);
        let artifact = CompressedArtifact::new(extraction.elements, compressed_text, &text);

        let artifact_id = ArtifactId::new();
        self.write_artifact(artifact_id, &artifact)?;

        let report = RunReport {
            document_id,
            artifact_id,
            chunks: extraction.stats.chunks,
            chunks_degraded: extraction.stats.chunks_degraded,
            original_length: artifact.original_length,
            compressed_length: artifact.compressed_length,
        };

        info!(
            id = %document_id,
            artifact = %artifact_id,
            chunks = report.chunks,
            original_length = report.original_length,
            compressed_length = report.compressed_length,
            "Pipeline run complete"
        );

        Ok(Some(report))
    }

    /// Store an upload and process it
    pub async fn ingest(&self, bytes: Vec<u8>, name: &str) -> Result<IngestReport, PipelineError> {
        let document_id = {
            let mut documents = lock(&self.documents)?;
            documents
                .save(&bytes, name)
                .map_err(|e| PipelineError::Store(e.to_string()))?
        };

        let run = self.run_with_report(document_id).await?;
        Ok(IngestReport { document_id, run })
    }

    async fn extract_text(&self, document: RawDocument) -> Result<String, PipelineError> {
        let text = Arc::clone(&self.text);
        tokio::task::spawn_blocking(move || text.extract(&document))
            .await
            .map_err(|e| PipelineError::Worker(format!("Task join error: {}", e)))
    }

    fn read_document(&self, id: DocumentId) -> Result<Option<RawDocument>, PipelineError> {
        lock(&self.documents)?
            .read(id)
            .map_err(|e| PipelineError::Store(e.to_string()))
    }

    fn save_extracted_text(&self, id: DocumentId, text: &str) {
        let result = lock(&self.documents).and_then(|mut documents| {
            documents
                .save_extracted_text(id, text)
                .map_err(|e| PipelineError::Store(e.to_string()))
        });
        if let Err(e) = result {
            warn!(id = %id, error = %e, "Failed to save extracted text");
        }
    }

    fn write_artifact(&self, id: ArtifactId, artifact: &CompressedArtifact) -> Result<(), PipelineError> {
        lock(&self.artifacts)?
            .write(id, artifact)
            .map_err(|e| PipelineError::Store(e.to_string()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, PipelineError> {
    mutex
        .lock()
        .map_err(|e| PipelineError::Store(format!("Store lock error: {}", e)))
}
