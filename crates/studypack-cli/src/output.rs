//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use studypack_domain::TextChunk;
use studypack_pipeline::IngestReport;
use studypack_store::ArtifactSummary;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Pretty JSON for any serializable value.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format the outcome of an ingest.
    pub fn ingest_report(&self, report: &IngestReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return self.json(report);
        }

        let Some(run) = &report.run else {
            return Ok(self.warning(&format!(
                "Document {} stored, but no text could be extracted",
                report.document_id
            )));
        };

        let mut lines = vec![self.success(&format!("Artifact created: {}", run.artifact_id))];
        lines.push(format!("  document:   {}", report.document_id));
        lines.push(format!("  chunks:     {}", run.chunks));
        if run.chunks_degraded > 0 {
            lines.push(self.colorize(
                &format!("  degraded:   {} (model output unusable)", run.chunks_degraded),
                "yellow",
            ));
        }
        lines.push(format!(
            "  length:     {} -> {} chars ({:.1}%)",
            run.original_length,
            run.compressed_length,
            run.compression_ratio() * 100.0
        ));
        Ok(lines.join("\n"))
    }

    /// Format the artifact listing.
    pub fn artifacts(&self, summaries: &[ArtifactSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = summaries
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "id": s.id.to_string(),
                            "original_length": s.original_length,
                            "compressed_length": s.compressed_length,
                            "legacy": s.legacy,
                        })
                    })
                    .collect();
                self.json(&rows)
            }
            OutputFormat::Text => Ok(self.artifacts_table(summaries)),
        }
    }

    fn artifacts_table(&self, summaries: &[ArtifactSummary]) -> String {
        if summaries.is_empty() {
            return self.colorize("No artifacts found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Original", "Compressed", "Format"]);

        for summary in summaries {
            let format = if summary.legacy { "legacy" } else { "structured" };
            builder.push_record([
                summary.id.to_string(),
                summary.original_length.to_string(),
                summary.compressed_length.to_string(),
                format.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format chunk windows.
    pub fn chunks(&self, chunks: &[TextChunk]) -> Result<String> {
        if self.format == OutputFormat::Json {
            let rows: Vec<serde_json::Value> = chunks
                .iter()
                .map(|c| serde_json::json!({ "start": c.start, "end": c.end(), "chars": c.char_len() }))
                .collect();
            return self.json(&rows);
        }

        if chunks.is_empty() {
            return Ok(self.colorize("No text to chunk.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Start", "End", "Chars"]);
        for (index, chunk) in chunks.iter().enumerate() {
            builder.push_record([
                index.to_string(),
                chunk.start.to_string(),
                chunk.end().to_string(),
                chunk.char_len().to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        Ok(table.to_string())
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studypack_domain::{ArtifactId, DocumentId};
    use studypack_pipeline::RunReport;

    fn summary(legacy: bool) -> ArtifactSummary {
        ArtifactSummary {
            id: ArtifactId::new(),
            original_length: 47,
            compressed_length: 10,
            legacy,
        }
    }

    fn report() -> IngestReport {
        let document_id = DocumentId::new();
        IngestReport {
            document_id,
            run: Some(RunReport {
                document_id,
                artifact_id: ArtifactId::new(),
                chunks: 3,
                chunks_degraded: 1,
                original_length: 200,
                compressed_length: 50,
            }),
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.artifacts(&[summary(false), summary(true)]).unwrap();
        assert!(output.contains("Compressed"));
        assert!(output.contains("structured"));
        assert!(output.contains("legacy"));
    }

    #[test]
    fn test_json_listing() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.artifacts(&[summary(false)]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["original_length"], 47);
    }

    #[test]
    fn test_empty_listing() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert!(formatter.artifacts(&[]).unwrap().contains("No artifacts found"));
    }

    #[test]
    fn test_ingest_report_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.ingest_report(&report()).unwrap();
        assert!(output.starts_with("✓ Artifact created: "));
        assert!(output.contains("chunks:     3"));
        assert!(output.contains("degraded:   1"));
        assert!(output.contains("200 -> 50 chars (25.0%)"));
    }

    #[test]
    fn test_ingest_without_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let report = IngestReport {
            document_id: DocumentId::new(),
            run: None,
        };
        assert!(formatter.ingest_report(&report).unwrap().contains("no text could be extracted"));
    }

    #[test]
    fn test_chunk_table() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.chunks(&[TextChunk::new(0, "abcd"), TextChunk::new(2, "cdef")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[1]["end"], 6);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
