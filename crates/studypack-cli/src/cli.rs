//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// StudyPack - Turn course material into compact study digests.
#[derive(Debug, Parser)]
#[command(name = "studypack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "text")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "STUDYPACK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text and tables (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a file and build its study artifact
    Ingest(IngestArgs),

    /// Print a stored artifact
    Show(ShowArgs),

    /// List stored artifacts
    List,

    /// Print the concatenated concise text of several artifacts
    Context(IdsArgs),

    /// Merge the study elements of several artifacts
    Combine(IdsArgs),

    /// Extract the text of a file without calling the model
    ExtractText(FileArgs),

    /// Show how a file's text would be chunked
    Chunk(FileArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// File to ingest (PDF, image or plain text)
    pub file: PathBuf,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Artifact ID
    pub id: String,

    /// Print the full structured artifact instead of the concise text
    #[arg(short, long)]
    pub structured: bool,
}

/// Arguments for commands taking a list of artifact IDs.
#[derive(Debug, Parser)]
pub struct IdsArgs {
    /// Artifact IDs, in the order to use them
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for commands reading a single file.
#[derive(Debug, Parser)]
pub struct FileArgs {
    /// Input file
    pub file: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Extractor settings to start from
        #[arg(short, long, value_enum, default_value = "default")]
        preset: PresetArg,
    },

    /// Print the effective configuration
    Show,
}

/// Extractor presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced defaults
    Default,
    /// Smaller chunks, shorter backoff
    Aggressive,
    /// Larger chunks, more retries
    Lenient,
}

impl From<PresetArg> for studypack_extractor::ExtractorConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => Self::default(),
            PresetArg::Aggressive => Self::aggressive(),
            PresetArg::Lenient => Self::lenient(),
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_command() {
        let cli = Cli::parse_from(["studypack", "ingest", "notes.pdf"]);
        match cli.command {
            Command::Ingest(args) => assert_eq!(args.file, PathBuf::from("notes.pdf")),
            _ => panic!("Expected Ingest command"),
        }
        assert_eq!(cli.format, CliFormat::Text);
    }

    #[test]
    fn test_show_structured_json() {
        let cli = Cli::parse_from(["studypack", "show", "abc", "--structured", "--format", "json"]);
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.id, "abc");
                assert!(args.structured);
            }
            _ => panic!("Expected Show command"),
        }
        assert_eq!(cli.format, CliFormat::Json);
    }

    #[test]
    fn test_combine_requires_ids() {
        assert!(Cli::try_parse_from(["studypack", "combine"]).is_err());
        let cli = Cli::parse_from(["studypack", "combine", "a", "b"]);
        assert!(matches!(cli.command, Command::Combine(args) if args.ids == ["a", "b"]));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["studypack", "--config", "/tmp/sp.toml", "config", "init", "--force"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sp.toml")));
        match cli.command {
            Command::Config(ConfigArgs { action: ConfigAction::Init { force, preset } }) => {
                assert!(force);
                assert_eq!(preset, PresetArg::Default);
            }
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_config_init_preset() {
        let cli = Cli::parse_from(["studypack", "config", "init", "--preset", "lenient"]);
        match cli.command {
            Command::Config(ConfigArgs { action: ConfigAction::Init { preset, .. } }) => {
                let config: studypack_extractor::ExtractorConfig = preset.into();
                assert_eq!(config, studypack_extractor::ExtractorConfig::lenient());
            }
            _ => panic!("Expected config init"),
        }
    }
}
