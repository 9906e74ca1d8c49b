//! Engine configuration.
//!
//! Stored at `~/.aegis/config.yaml`. Every field has a default, so a file
//! only needs the values it changes:
//!
//! ```yaml
//! frame_interval_ms: 40
//! detection:
//!   cooldown_secs: 60
//! sustained:
//!   moderate_required_checks: 2
//! ```

use std::path::{Path, PathBuf};

use aegis_distress::{
    AmbientConfig, AmbientDistressScorer, EmergencyTypeResolver, ResolverConfig, SustainedConfig,
    SustainedDistressAnalyzer,
};
use aegis_intent::IntentConfig;
use aegis_voiceprint::{VerifierConfig, VoiceIdentityVerifier};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::state::DetectionConfig;

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".aegis";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// All tunables of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub verifier: VerifierConfig,
    pub sustained: SustainedConfig,
    pub ambient: AmbientConfig,
    pub resolver: ResolverConfig,
    pub intent: IntentConfig,
    pub detection: DetectionConfig,

    /// Pause after each processed frame (default: 40).
    pub frame_interval_ms: u64,
    /// How long a recognized emergency phrase can label an acoustic trigger
    /// (default: 10).
    pub phrase_ttl_secs: u64,
    /// Transcripts below this recognizer confidence are ignored
    /// (default: 0.0).
    pub min_transcript_confidence: f32,
    /// Ambient score at or above which a frame counts for the ambient path
    /// (default: 0.6).
    pub ambient_trigger_score: f32,
    /// Without an enrolled profile, distress frames must be at least this
    /// loud (default: 0.1).
    pub ambient_only_min_rms: f32,

    /// YAML intent catalog replacing the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_catalog: Option<PathBuf>,
    /// Enrolled profile blob.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verifier: VerifierConfig::default(),
            sustained: SustainedConfig::default(),
            ambient: AmbientConfig::default(),
            resolver: ResolverConfig::default(),
            intent: IntentConfig::default(),
            detection: DetectionConfig::default(),
            frame_interval_ms: 40,
            phrase_ttl_secs: 10,
            min_transcript_confidence: 0.0,
            ambient_trigger_score: 0.6,
            ambient_only_min_rms: 0.1,
            intent_catalog: None,
            profile_path: None,
        }
    }
}

impl EngineConfig {
    /// Gets the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(DEFAULT_CONFIG_FILE))
    }

    /// Parses and validates YAML. An empty document is the default config.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(yaml)?;
        Ok(cfg.validated())
    }

    /// Loads a config file, failing on any error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Loads a config file, falling back to defaults when it is missing or
    /// invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(cfg) => {
                debug!(path = %path.display(), "config: loaded");
                cfg
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config: not found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config: unusable, using defaults");
                Self::default()
            }
        }
    }

    /// Serializes the config as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Replaces out-of-range values with their defaults.
    pub fn validated(self) -> Self {
        let d = Self::default();
        let unit = |v: f32, fallback: f32| if (0.0..=1.0).contains(&v) { v } else { fallback };
        Self {
            verifier: VoiceIdentityVerifier::with_config(self.verifier).config().clone(),
            sustained: SustainedDistressAnalyzer::with_config(self.sustained).config().clone(),
            ambient: AmbientDistressScorer::with_config(self.ambient).config().clone(),
            resolver: EmergencyTypeResolver::new(self.resolver, AmbientDistressScorer::default())
                .config()
                .clone(),
            intent: self.intent.sanitized(),
            detection: self.detection.sanitized(),
            frame_interval_ms: self.frame_interval_ms,
            phrase_ttl_secs: self.phrase_ttl_secs,
            min_transcript_confidence: unit(self.min_transcript_confidence, d.min_transcript_confidence),
            ambient_trigger_score: unit(self.ambient_trigger_score, d.ambient_trigger_score),
            ambient_only_min_rms: unit(self.ambient_only_min_rms, d.ambient_only_min_rms),
            intent_catalog: self.intent_catalog,
            profile_path: self.profile_path,
        }
    }
}
