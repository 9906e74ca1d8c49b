//! Text intent classification.

use std::sync::Arc;

use clap::Args;

use aegis_intent::{IntentCatalog, SemanticIntentClassifier};

use super::{get_config, output_result, print_verbose};
use crate::Cli;

/// Classify recognized speech into an emergency type.
#[derive(Args)]
pub struct IntentCommand {
    /// Text to classify; multiple words are joined with spaces
    #[arg(required = true)]
    text: Vec<String>,

    /// Intent catalog file (overrides config file)
    #[arg(long)]
    catalog: Option<String>,
}

impl IntentCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let catalog = match self
            .catalog
            .as_deref()
            .map(std::path::PathBuf::from)
            .or(cfg.intent_catalog.clone())
        {
            Some(path) => {
                print_verbose(cli, &format!("loading catalog {}", path.display()));
                Arc::new(IntentCatalog::load(&path)?)
            }
            None => IntentCatalog::builtin(),
        };
        print_verbose(cli, &format!("{} patterns", catalog.pattern_count()));

        let classifier = SemanticIntentClassifier::with_catalog(catalog, cfg.intent);
        let analysis = classifier.analyze(&self.text.join(" "));
        output_result(&analysis, cli.output.as_deref(), cli.json)
    }
}
