use aegis_intent::IntentError;
use thiserror::Error;

/// Failure reported by an [`AudioClassifier`](crate::AudioClassifier).
///
/// The engine never retries: the frame is skipped and counted.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model not loaded")]
    NotLoaded,
}

/// Errors returned while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors returned while assembling an [`Engine`](crate::Engine).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("intent catalog: {0}")]
    Catalog(#[from] IntentError),
}
