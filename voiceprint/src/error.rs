use thiserror::Error;

/// Errors returned by voiceprint operations.
#[derive(Debug, Error)]
pub enum VoiceprintError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("invalid profile blob: expected {expected} bytes, got {got}")]
    InvalidBlob { expected: usize, got: usize },

    #[error("embedding contains non-finite values")]
    NonFinite,

    #[error("enrollment needs at least one sample")]
    EmptyEnrollment,

    #[error("profile io: {0}")]
    Io(#[from] std::io::Error),
}
