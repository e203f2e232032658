//! Commands reading stored artifacts.

use super::{open_store, parse_ids};
use crate::cli::{IdsArgs, ShowArgs};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use studypack_domain::traits::ArtifactStore;
use studypack_domain::StoredArtifact;
use studypack_pipeline::{build_file_context, combine_artifacts};

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let id = parse_ids(std::slice::from_ref(&args.id))?[0];
    let store = open_store(config)?;
    let artifact = store
        .read(id)?
        .ok_or_else(|| CliError::NotFound(format!("artifact {}", id)))?;

    let structured = args.structured || formatter.format() == OutputFormat::Json;
    match (&artifact, structured) {
        (StoredArtifact::Structured(full), true) => println!("{}", formatter.json(full)?),
        (StoredArtifact::LegacyText(text), true) => {
            eprintln!("{}", formatter.warning("Legacy artifact, only the concise text is stored"));
            println!("{}", formatter.json(&serde_json::json!({ "compressed_text": text }))?);
        }
        (_, false) => println!("{}", artifact.concise_text()),
    }
    Ok(())
}

/// Execute the list command.
pub fn execute_list(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(config)?;
    let summaries = store.artifact_summaries()?;
    println!("{}", formatter.artifacts(&summaries)?);
    Ok(())
}

/// Execute the context command.
pub fn execute_context(args: IdsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let ids = parse_ids(&args.ids)?;
    let store = open_store(config)?;
    let context = build_file_context(&store, &ids)?;

    match formatter.format() {
        OutputFormat::Json => println!("{}", formatter.json(&serde_json::json!({ "context": context }))?),
        OutputFormat::Text => print!("{}", context),
    }
    Ok(())
}

/// Execute the combine command.
pub fn execute_combine(args: IdsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let ids = parse_ids(&args.ids)?;
    let store = open_store(config)?;
    let combined = combine_artifacts(&store, &ids)?;
    println!("{}", formatter.json(&combined)?);
    Ok(())
}
