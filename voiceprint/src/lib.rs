//! Enrolled-voice verification.
//!
//! The voice-gated detection path only reacts to distress from the enrolled
//! user. Verification compares the live frame embedding with the enrolled
//! profile:
//!
//! 1. [`EnrolledVoiceProfile`]: one 521-dim embedding, persisted as a raw
//!    blob of little-endian `f32` values with no header
//! 2. [`ProfileStore`]: loads, saves and resets the single profile
//! 3. [`VoiceIdentityVerifier::verify`]: loudness floor, then cosine
//!    similarity against [`VerifierConfig::match_threshold`]
//!
//! The match threshold is low (0.35) because a shouted voice drifts far from
//! calm enrollment samples.

mod error;
mod profile;
mod verifier;

pub use error::VoiceprintError;
pub use profile::{l2_normalize, EnrolledVoiceProfile, FileProfileStore, MemoryProfileStore, ProfileStore};
pub use verifier::{cosine_similarity, VerifierConfig, VoiceIdentityVerifier};
