//! StudyPack CLI - Command-line interface for the study digest pipeline.

use clap::Parser;
use studypack_cli::commands;
use studypack_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> studypack_cli::Result<()> {
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load(&config_path)?;

    // Logs go to stderr so command output stays pipeable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let formatter = Formatter::new(cli.format.into(), !cli.no_color);

    match cli.command {
        Command::Ingest(args) => commands::execute_ingest(args, &config, &formatter).await?,
        Command::Show(args) => commands::execute_show(args, &config, &formatter)?,
        Command::List => commands::execute_list(&config, &formatter)?,
        Command::Context(args) => commands::execute_context(args, &config, &formatter)?,
        Command::Combine(args) => commands::execute_combine(args, &config, &formatter)?,
        Command::ExtractText(args) => commands::execute_extract_text(args, &formatter)?,
        Command::Chunk(args) => commands::execute_chunk(args, &config, &formatter)?,
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter)?,
    }

    Ok(())
}
