//! Emergency types and per-frame analysis input.

use std::fmt;

use aegis_audio::signal;
use serde::{Deserialize, Serialize};

/// Kind of emergency an episode is labeled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmergencyType {
    #[default]
    None,
    Assault,
    Harassment,
    Kidnapping,
    Robbery,
    MedicalEmergency,
    Fire,
    RoadAccident,
    CrowdPanic,
    Explosion,
    GeneralDistress,
}

impl EmergencyType {
    /// Every type except [`EmergencyType::None`].
    pub const ALL: [EmergencyType; 10] = [
        EmergencyType::Assault,
        EmergencyType::Harassment,
        EmergencyType::Kidnapping,
        EmergencyType::Robbery,
        EmergencyType::MedicalEmergency,
        EmergencyType::Fire,
        EmergencyType::RoadAccident,
        EmergencyType::CrowdPanic,
        EmergencyType::Explosion,
        EmergencyType::GeneralDistress,
    ];

    /// Returns the string representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyType::None => "none",
            EmergencyType::Assault => "assault",
            EmergencyType::Harassment => "harassment",
            EmergencyType::Kidnapping => "kidnapping",
            EmergencyType::Robbery => "robbery",
            EmergencyType::MedicalEmergency => "medical_emergency",
            EmergencyType::Fire => "fire",
            EmergencyType::RoadAccident => "road_accident",
            EmergencyType::CrowdPanic => "crowd_panic",
            EmergencyType::Explosion => "explosion",
            EmergencyType::GeneralDistress => "general_distress",
        }
    }

    /// Parses a type from its snake case or SCREAMING_SNAKE_CASE name.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "none" {
            return Some(EmergencyType::None);
        }
        Self::ALL.into_iter().find(|t| t.as_str() == lower)
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Threshold above which a classification counts as an emergency.
pub const DEFAULT_EMERGENCY_THRESHOLD: f32 = 0.5;

/// One labeled decision: what kind of emergency, and how sure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmergencyClassification {
    #[serde(rename = "type")]
    pub emergency_type: EmergencyType,
    /// Always within `[0, 1]`.
    pub confidence: f32,
}

impl EmergencyClassification {
    /// Creates a classification, clamping `confidence` to `[0, 1]`.
    /// Non-finite confidence becomes 0.
    pub fn new(emergency_type: EmergencyType, confidence: f32) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            emergency_type,
            confidence,
        }
    }

    /// The "nothing detected" classification.
    pub fn none() -> Self {
        Self::new(EmergencyType::None, 0.0)
    }

    /// True when the type is not `None` and confidence exceeds 0.5.
    pub fn is_emergency(&self) -> bool {
        self.is_emergency_above(DEFAULT_EMERGENCY_THRESHOLD)
    }

    /// True when the type is not `None` and confidence exceeds `threshold`.
    pub fn is_emergency_above(&self, threshold: f32) -> bool {
        self.emergency_type != EmergencyType::None && self.confidence > threshold
    }
}

impl Default for EmergencyClassification {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for EmergencyClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.emergency_type, self.confidence)
    }
}

/// Model output for one frame, paired with the frame it was computed from.
///
/// Produced once per frame and consumed immediately.
#[derive(Debug, Clone)]
pub struct AudioAnalysisSample {
    pub embedding: Vec<f32>,
    /// Within `[0, 1]`.
    pub scream_probability: f32,
    /// Normalized RMS of `raw_frame`.
    pub rms: f32,
    pub raw_frame: Vec<i16>,
}

impl AudioAnalysisSample {
    /// Builds a sample, deriving `rms` from the frame and clamping the
    /// probability to `[0, 1]`.
    pub fn new(raw_frame: Vec<i16>, embedding: Vec<f32>, scream_probability: f32) -> Self {
        let scream_probability = if scream_probability.is_finite() {
            scream_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            rms: signal::rms(&raw_frame),
            embedding,
            scream_probability,
            raw_frame,
        }
    }
}
