//! Enrolled voice profile commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use aegis_voiceprint::{EnrolledVoiceProfile, FileProfileStore, ProfileStore};

use super::{output_result, print_success};
use crate::Cli;

/// Manage the enrolled voice profile blob.
#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand)]
enum ProfileSubcommand {
    /// Show a summary of a profile blob
    Inspect {
        /// Profile blob path
        file: String,
    },
    /// Enroll a profile from embeddings
    Enroll {
        /// Profile blob path to write
        file: String,
        /// JSON file holding a list of embeddings
        #[arg(long)]
        from: String,
    },
    /// Delete a profile blob
    Reset {
        /// Profile blob path
        file: String,
    },
}

#[derive(Debug, Serialize)]
struct ProfileSummary {
    path: String,
    enrolled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimension: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    norm: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    head: Vec<f32>,
}

impl ProfileCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ProfileSubcommand::Inspect { file } => {
                let summary = summarize(file, FileProfileStore::new(file).load()?.as_ref());
                output_result(&summary, cli.output.as_deref(), cli.json)
            }
            ProfileSubcommand::Enroll { file, from } => {
                let samples: Vec<Vec<f32>> = serde_json::from_str(&std::fs::read_to_string(from)?)?;
                let profile = EnrolledVoiceProfile::enroll(&samples)?;
                FileProfileStore::new(file).save(&profile)?;
                print_success(&format!("enrolled {} from {} samples", file, samples.len()));
                Ok(())
            }
            ProfileSubcommand::Reset { file } => {
                FileProfileStore::new(file).reset()?;
                print_success(&format!("reset {}", file));
                Ok(())
            }
        }
    }
}

fn summarize(path: &str, profile: Option<&EnrolledVoiceProfile>) -> ProfileSummary {
    ProfileSummary {
        path: path.to_string(),
        enrolled: profile.is_some(),
        dimension: profile.map(|p| p.embedding().len()),
        norm: profile.map(EnrolledVoiceProfile::norm),
        head: profile
            .map(|p| p.embedding().iter().take(8).copied().collect())
            .unwrap_or_default(),
    }
}
