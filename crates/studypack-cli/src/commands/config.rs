//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Init { force, preset } => {
            if path.exists() && !force {
                return Err(CliError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            let config = Config {
                extractor: preset.into(),
                ..Config::default()
            };
            config.save(path)?;
            println!("{}", formatter.success(&format!("Wrote configuration to {}", path.display())));
        }
        ConfigAction::Show => {
            eprintln!("{}", formatter.info(&format!("Configuration file: {}", path.display())));
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
