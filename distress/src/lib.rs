//! Acoustic distress detection.
//!
//! # Architecture
//!
//! Each analysis frame flows through three stages:
//!
//! 1. [`SustainedDistressAnalyzer::analyze`]: rejects calm speech and single
//!    loud utterances using a 5-slot [`DistressHistory`] and signal-shape
//!    corroboration
//! 2. [`AmbientDistressScorer::score`]: weighs non-voice scene classes
//!    (crowd, crash, alarm, explosion...) read from the frame embedding
//! 3. [`EmergencyTypeResolver::resolve`]: labels an episode with one
//!    [`EmergencyClassification`] using a fixed priority order
//!
//! # False-positive discipline
//!
//! ```text
//! "HELLO!"          one elevated sample out of 5  -> 0.0
//! calm talk         probability < 0.35            -> 0.0
//! sustained scream  >= 2 of 5 elevated, p >= 0.55 -> p
//! borderline        >= 2 of 5 elevated + N of 3 corroborating signals -> p
//! ```

mod ambient;
mod history;
mod resolver;
mod sustained;
mod types;

pub use ambient::{AmbientClass, AmbientClassSpec, AmbientConfig, AmbientDistressScorer, AmbientReading};
pub use history::{DistressHistory, HISTORY_LEN};
pub use resolver::{EmergencyTypeResolver, ResolverConfig};
pub use sustained::{CorroborationSignals, SustainedConfig, SustainedDistressAnalyzer};
pub use types::{
    AudioAnalysisSample, DEFAULT_EMERGENCY_THRESHOLD, EmergencyClassification, EmergencyType,
};
