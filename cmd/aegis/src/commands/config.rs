//! Configuration commands.

use clap::{Args, Subcommand};

use aegis_engine::EngineConfig;

use super::{config_path, get_config, output_result, print_info, print_success};
use crate::Cli;

/// Inspect and initialize the configuration file.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommand>,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Print the effective configuration (default)
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration if no file exists
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match self.command.as_ref().unwrap_or(&ConfigSubcommand::Show) {
            ConfigSubcommand::Show => {
                let cfg = get_config(cli)?;
                output_result(&cfg, cli.output.as_deref(), cli.json)
            }
            ConfigSubcommand::Path => {
                let path = config_path(cli).ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigSubcommand::Init { force } => {
                let path = config_path(cli).ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
                if path.exists() && !force {
                    print_info(&format!("{} already exists, use --force to overwrite", path.display()));
                    return Ok(());
                }
                if let Some(dir) = path.parent() {
                    std::fs::create_dir_all(dir)?;
                }
                std::fs::write(&path, EngineConfig::default().to_yaml()?)?;
                print_success(&format!("wrote {}", path.display()));
                Ok(())
            }
        }
    }
}
