//! One-shot CLI commands that do not start the server

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::AppConfig;

pub fn run_config_command(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Generate { output_path } => match output_path {
            Some(path) => {
                AppConfig::default()
                    .save_to_file(&path)
                    .with_context(|| format!("Failed to write config to {}", path))?;
                println!("{} Sample configuration written to {}", "✓".green(), path);
            }
            None => print!("{}", AppConfig::generate_sample_config()),
        },
    }
    Ok(())
}
