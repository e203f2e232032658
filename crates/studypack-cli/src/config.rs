//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use studypack_compressor::CompressorConfig;
use studypack_extractor::ExtractorConfig;
use studypack_llm::groq::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

/// File name of the database inside the data directory
pub const DATABASE_FILE: &str = "studypack.db";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Model provider connection
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chunking and model request settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Digest limits
    #[serde(default)]
    pub compressor: CompressorConfig,

    /// Where documents and artifacts live
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Connection settings for the chat completions provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// OpenAI-compatible API base URL
    pub endpoint: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Per-request timeout
    pub timeout_secs: u64,
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the SQLite database
    pub data_dir: PathBuf,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Text and tables
    Text,
    /// JSON format
    Json,
}

impl Config {
    /// Default configuration file path (`~/.studypack/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        Ok(home_dir()?.join(".studypack").join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default one.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from file, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;
        self.compressor.validate().map_err(CliError::Config)?;
        if self.provider.timeout_secs == 0 {
            return Err(CliError::Config("provider.timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    /// Path of the SQLite database.
    pub fn database_path(&self) -> PathBuf {
        self.storage.data_dir.join(DATABASE_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            provider: ProviderConfig::default(),
            extractor: ExtractorConfig::default(),
            compressor: CompressorConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = home_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            data_dir: base.join(".studypack").join("data"),
        }
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.provider.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.provider.timeout_secs, 60);
        assert_eq!(config.extractor.chunk_size, 13000);
        assert_eq!(config.compressor.max_chars, 2000);
        assert!(config.database_path().ends_with(".studypack/data/studypack.db"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.log_level = "debug".to_string();
        config.extractor.chunk_size = 4000;
        config.storage.data_dir = dir.path().join("data");
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\nmax_retries = 3\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.extractor.max_retries, 3);
        assert_eq!(config.extractor.chunk_overlap, 500);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_section_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\nchunk_size = 100\nchunk_overlap = 100\n").unwrap();

        assert!(matches!(Config::load(&path), Err(CliError::Config(_))));
    }
}
