//! Core element extractor implementation

use crate::aggregate::Aggregator;
use crate::chunking::TextChunker;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_elements;
use crate::prompt::build_request;
use crate::types::{ChunkExtraction, DocumentExtraction, ExtractionStats};
use studypack_domain::StudyElements;
use studypack_llm::{LlmError, ModelClient, RetryingClient};
use tracing::{debug, info, warn};

/// Characters of a malformed response kept in the log
const RESPONSE_LOG_PREFIX: usize = 500;

/// Extracts study elements from text with a generative model
///
/// Every model call goes through the retry policy from the configuration.
pub struct ElementExtractor<C>
where
    C: ModelClient,
{
    client: RetryingClient<C>,
    chunker: TextChunker,
    config: ExtractorConfig,
}

impl<C> ElementExtractor<C>
where
    C: ModelClient,
{
    /// Create a new extractor
    pub fn new(client: C, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap)?;
        Ok(Self {
            client: RetryingClient::new(client, config.retry_policy()),
            chunker,
            config,
        })
    }

    /// The configuration in effect
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The chunker built from the configuration
    pub fn chunker(&self) -> &TextChunker {
        &self.chunker
    }

    /// The underlying model client
    pub fn client(&self) -> &C {
        self.client.inner()
    }

    /// Extract elements from one chunk
    ///
    /// Malformed model output and provider errors other than an exhausted
    /// retry budget yield all-empty elements. Only
    /// [`LlmError::PersistentFailure`] is returned.
    pub async fn extract_elements(&self, chunk: &str) -> Result<StudyElements, ExtractorError> {
        Ok(self.extract_chunk(chunk).await?.elements)
    }

    /// Extract elements from one chunk, reporting whether it degraded
    pub async fn extract_chunk(&self, chunk: &str) -> Result<ChunkExtraction, ExtractorError> {
        if chunk.trim().is_empty() {
            return Ok(ChunkExtraction::parsed(StudyElements::new()));
        }

        let request = build_request(&self.config, chunk);
        debug!(prompt_chars = request.messages[0].content.len(), "Calling model");

        let response = match self.client.complete(&request).await {
            Ok(response) => response,
            Err(e @ LlmError::PersistentFailure { .. }) => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "Model call failed, using empty elements");
                return Ok(ChunkExtraction::degraded());
            }
        };
        debug!(response_chars = response.len(), "Model responded");

        match parse_elements(&response) {
            Ok(elements) => Ok(ChunkExtraction::parsed(elements)),
            Err(e) => {
                let prefix: String = response.chars().take(RESPONSE_LOG_PREFIX).collect();
                warn!(error = %e, response = %prefix, "Model returned malformed output, using empty elements");
                Ok(ChunkExtraction::degraded())
            }
        }
    }

    /// Chunk `text`, extract every chunk in order and merge the results
    pub async fn extract_document(&self, text: &str) -> Result<DocumentExtraction, ExtractorError> {
        let chunks = self.chunker.chunk(text);
        let mut stats = ExtractionStats {
            chunks: chunks.len(),
            text_length: text.chars().count(),
            ..ExtractionStats::default()
        };

        info!(
            chunks = chunks.len(),
            chars = stats.text_length,
            "Split text into chunks"
        );

        let mut aggregator = Aggregator::new();
        for (index, chunk) in chunks.iter().enumerate() {
            debug!(
                chunk = index + 1,
                of = chunks.len(),
                start = chunk.start,
                "Extracting chunk"
            );
            let extraction = self.extract_chunk(&chunk.text).await?;
            if extraction.degraded {
                stats.chunks_degraded += 1;
            }
            aggregator.push(extraction.elements);
        }

        let elements = aggregator.finish();
        info!(
            items = elements.len(),
            degraded = stats.chunks_degraded,
            "Element extraction complete"
        );

        Ok(DocumentExtraction { elements, stats })
    }
}
