use aegis_distress::EmergencyType;
use thiserror::Error;

/// Errors returned while building an intent catalog.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("invalid catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown emergency type {0:?}")]
    UnknownType(String),

    #[error("pattern {index} of {emergency_type} has no core tokens")]
    EmptyPattern {
        emergency_type: EmergencyType,
        index: usize,
    },

    #[error("pattern {index} of {emergency_type} has invalid weight {weight}")]
    InvalidWeight {
        emergency_type: EmergencyType,
        index: usize,
        weight: f32,
    },

    #[error("catalog io: {0}")]
    Io(#[from] std::io::Error),
}
