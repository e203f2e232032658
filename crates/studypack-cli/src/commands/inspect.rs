//! Commands that look at a file without touching the model or the database.

use super::read_document;
use crate::cli::FileArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use studypack_extractor::TextChunker;
use studypack_text::TextExtractor;

/// Execute the extract-text command.
pub fn execute_extract_text(args: FileArgs, formatter: &Formatter) -> Result<()> {
    let document = read_document(&args.file)?;
    let text = TextExtractor::with_default_ocr().extract(&document);

    match formatter.format() {
        OutputFormat::Json => println!(
            "{}",
            formatter.json(&serde_json::json!({
                "name": document.name,
                "kind": document.kind.as_str(),
                "length": text.chars().count(),
                "text": text,
            }))?
        ),
        OutputFormat::Text if text.is_empty() => {
            eprintln!("{}", formatter.warning("No text could be extracted"));
        }
        OutputFormat::Text => println!("{}", text),
    }
    Ok(())
}

/// Execute the chunk command.
pub fn execute_chunk(args: FileArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let document = read_document(&args.file)?;
    let text = TextExtractor::with_default_ocr().extract(&document);

    let chunker = TextChunker::new(config.extractor.chunk_size, config.extractor.chunk_overlap)?;
    let chunks = chunker.chunk(&text);

    println!("{}", formatter.chunks(&chunks)?);
    Ok(())
}
