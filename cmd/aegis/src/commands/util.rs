//! Utility functions for CLI commands.

use std::path::PathBuf;

use aegis_engine::EngineConfig;

use crate::Cli;

/// Resolves the config file path: `--config`, then `~/.aegis/config.yaml`.
pub fn config_path(cli: &Cli) -> Option<PathBuf> {
    match &cli.config {
        Some(path) => Some(PathBuf::from(path)),
        None => EngineConfig::default_path(),
    }
}

/// Loads the engine configuration.
///
/// An explicit `--config` must load; the default file may be missing.
pub fn get_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    if let Some(path) = &cli.config {
        return Ok(EngineConfig::load(path)?);
    }
    Ok(match EngineConfig::default_path() {
        Some(path) => EngineConfig::load_or_default(path),
        None => EngineConfig::default(),
    })
}

/// Outputs result as JSON or YAML.
pub fn output_result<T: serde::Serialize>(
    result: &T,
    output_path: Option<&str>,
    as_json: bool,
) -> anyhow::Result<()> {
    let output = if as_json {
        let mut s = serde_json::to_string_pretty(result)?;
        s.push('\n');
        s
    } else {
        serde_yaml::to_string(result)?
    };

    match output_path {
        Some(path) => std::fs::write(path, output)?,
        None => print!("{}", output),
    }

    Ok(())
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    if cli.verbose {
        eprintln!("[verbose] {}", msg);
    }
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints info message.
pub fn print_info(msg: &str) {
    eprintln!("\x1b[34mℹ\x1b[0m {}", msg);
}
