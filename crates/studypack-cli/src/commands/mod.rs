//! Command implementations.

pub mod artifacts;
pub mod config;
pub mod ingest;
pub mod inspect;

pub use self::artifacts::{execute_combine, execute_context, execute_list, execute_show};
pub use self::config::execute_config;
pub use self::ingest::execute_ingest;
pub use self::inspect::{execute_chunk, execute_extract_text};

use crate::config::Config;
use crate::error::{CliError, Result};
use std::fs;
use std::path::Path;
use studypack_domain::{ArtifactId, DocumentId, RawDocument};
use studypack_store::SqliteStore;

/// Open the database under the configured data directory, creating it on first use.
pub fn open_store(config: &Config) -> Result<SqliteStore> {
    fs::create_dir_all(&config.storage.data_dir)?;
    Ok(SqliteStore::new(config.database_path())?)
}

/// Parse artifact IDs given on the command line.
pub fn parse_ids(ids: &[String]) -> Result<Vec<ArtifactId>> {
    ids.iter()
        .map(|id| {
            ArtifactId::from_string(id)
                .map_err(|e| CliError::InvalidInput(format!("Invalid artifact ID '{}': {}", id, e)))
        })
        .collect()
}

/// Read a file into an unsaved document, keeping its file name for kind detection.
pub fn read_document(path: &Path) -> Result<RawDocument> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput(format!("'{}' is not a file", path.display())))?;
    Ok(RawDocument::new(DocumentId::new(), name, bytes))
}
