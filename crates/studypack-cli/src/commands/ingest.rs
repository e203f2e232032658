//! Ingest command implementation.

use super::{open_store, read_document};
use crate::cli::IngestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use studypack_compressor::Compressor;
use studypack_extractor::ElementExtractor;
use studypack_llm::GroqProvider;
use studypack_pipeline::Pipeline;
use studypack_text::TextExtractor;
use tracing::info;

/// Execute the ingest command.
pub async fn execute_ingest(args: IngestArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let document = read_document(&args.file)?;

    let provider = GroqProvider::from_env(
        config.provider.endpoint.as_str(),
        &config.provider.api_key_env,
        config.provider.timeout_secs,
    )?;
    let extractor = ElementExtractor::new(provider, config.extractor.clone())?;
    let compressor = Compressor::new(config.compressor)?;

    // Two handles on one database file, one per store role
    let pipeline = Pipeline::new(
        TextExtractor::with_default_ocr(),
        extractor,
        compressor,
        open_store(config)?,
        open_store(config)?,
    );

    info!(file = %args.file.display(), bytes = document.bytes.len(), "Ingesting file");
    let report = pipeline.ingest(document.bytes, &document.name).await?;

    println!("{}", formatter.ingest_report(&report)?);
    Ok(())
}
