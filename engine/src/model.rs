//! Interfaces to the external audio model and speech recognizer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Model output for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutput {
    /// Class scores; the engine expects [`aegis_audio::EMBEDDING_DIM`] values.
    pub embedding: Vec<f32>,
    /// Probability that the frame contains a scream or distressed voice.
    pub scream_probability: f32,
}

/// Pretrained audio embedding and scream model.
///
/// Called once per frame with exactly [`aegis_audio::FRAME_SAMPLES`] mono
/// PCM16 samples at 16 kHz.
#[async_trait]
pub trait AudioClassifier: Send + Sync {
    async fn classify(&self, frame: &[i16]) -> Result<ClassifierOutput, ClassifierError>;
}

/// One recognized-speech candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    /// Recognizer confidence in `[0, 1]`.
    #[serde(default = "full_confidence")]
    pub confidence: f32,
    /// False for partial results.
    #[serde(default)]
    pub is_final: bool,
}

fn full_confidence() -> f32 {
    1.0
}

impl Transcript {
    /// A final candidate with full confidence.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 1.0,
            is_final: true,
        }
    }

    /// A partial candidate.
    pub fn partial(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
            is_final: false,
        }
    }
}
