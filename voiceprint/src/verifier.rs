use aegis_audio::signal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Configuration for [`VoiceIdentityVerifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Minimum cosine similarity for a match (default: 0.35).
    pub match_threshold: f32,
    /// Frames quieter than this normalized RMS are never matched
    /// (default: 0.02).
    pub min_verify_rms: f32,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.35,
            min_verify_rms: 0.02,
        }
    }
}

/// Matches a live embedding against the enrolled profile.
///
/// Verification is a pure function of its inputs:
///
/// - either embedding empty, or dimensions differ -> no match
/// - frame RMS below [`VerifierConfig::min_verify_rms`] -> no match
///   (quiet audio cannot be matched reliably)
/// - otherwise match iff cosine similarity >= [`VerifierConfig::match_threshold`]
#[derive(Debug, Clone, Default)]
pub struct VoiceIdentityVerifier {
    cfg: VerifierConfig,
}

impl VoiceIdentityVerifier {
    /// Creates a verifier with default configuration.
    pub fn new() -> Self {
        Self::with_config(VerifierConfig::default())
    }

    /// Creates a verifier with the given configuration.
    ///
    /// Out-of-range values fall back to the defaults.
    pub fn with_config(cfg: VerifierConfig) -> Self {
        let defaults = VerifierConfig::default();
        let match_threshold = if (-1.0..=1.0).contains(&cfg.match_threshold) {
            cfg.match_threshold
        } else {
            defaults.match_threshold
        };
        let min_verify_rms = if (0.0..=1.0).contains(&cfg.min_verify_rms) {
            cfg.min_verify_rms
        } else {
            defaults.min_verify_rms
        };
        Self {
            cfg: VerifierConfig {
                match_threshold,
                min_verify_rms,
            },
        }
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.cfg
    }

    /// Reports whether `live` comes from the same speaker as `stored`.
    pub fn verify(&self, stored: &[f32], live: &[f32], raw_frame: &[i16]) -> bool {
        if stored.is_empty() || live.is_empty() {
            return false;
        }
        let rms = signal::rms(raw_frame);
        if rms < self.cfg.min_verify_rms {
            trace!(rms, "voiceprint: frame too quiet to verify");
            return false;
        }
        match self.similarity(stored, live) {
            Some(sim) => {
                trace!(similarity = sim, "voiceprint: verified");
                sim >= self.cfg.match_threshold
            }
            None => false,
        }
    }

    /// Cosine similarity between the two embeddings, if defined.
    pub fn similarity(&self, stored: &[f32], live: &[f32]) -> Option<f32> {
        cosine_similarity(stored, live)
    }
}

/// Returns `dot(a, b) / (|a| * |b|)` clamped to `[-1, 1]`.
///
/// Returns `None` when the lengths differ, either vector is empty or has
/// zero norm, or the result is not finite.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let mut dot: f64 = 0.0;
    let mut norm_a: f64 = 0.0;
    let mut norm_b: f64 = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return None;
    }
    let sim = dot / denom;
    if !sim.is_finite() {
        return None;
    }
    Some(sim.clamp(-1.0, 1.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_audio::{EMBEDDING_DIM, FRAME_SAMPLES};

    fn loud_frame() -> Vec<i16> {
        (0..FRAME_SAMPLES)
            .map(|i| if i % 2 == 0 { 12000 } else { -12000 })
            .collect()
    }

    fn quiet_frame() -> Vec<i16> {
        vec![50; FRAME_SAMPLES]
    }

    fn embedding(seed: u32) -> Vec<f32> {
        (0..EMBEDDING_DIM)
            .map(|i| (((i as u32).wrapping_mul(2654435761) ^ seed) % 1000) as f32 / 1000.0 - 0.5)
            .collect()
    }

    #[test]
    fn identical_embeddings_verify() {
        let v = VoiceIdentityVerifier::new();
        let a = embedding(7);
        assert!(v.verify(&a, &a, &loud_frame()));
        let sim = v.similarity(&a, &a).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn similarity_is_bounded() {
        for seed in 0..20 {
            let a = embedding(seed);
            let b = embedding(seed * 31 + 5);
            let sim = cosine_similarity(&a, &b).unwrap();
            assert!((-1.0..=1.0).contains(&sim), "sim = {sim}");
        }
        let a = embedding(3);
        let neg: Vec<f32> = a.iter().map(|x| -x).collect();
        assert_eq!(cosine_similarity(&a, &neg), Some(-1.0));
    }

    #[test]
    fn quiet_frame_never_verifies() {
        let v = VoiceIdentityVerifier::new();
        let a = embedding(1);
        assert!(!v.verify(&a, &a, &quiet_frame()));
    }

    #[test]
    fn missing_embeddings_do_not_verify() {
        let v = VoiceIdentityVerifier::new();
        let a = embedding(1);
        assert!(!v.verify(&[], &a, &loud_frame()));
        assert!(!v.verify(&a, &[], &loud_frame()));
    }

    #[test]
    fn dimension_mismatch_and_zero_norm() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), None);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), None);
        let v = VoiceIdentityVerifier::new();
        assert!(!v.verify(&[1.0, 0.0], &[1.0], &loud_frame()));
    }

    #[test]
    fn threshold_boundary() {
        let v = VoiceIdentityVerifier::with_config(VerifierConfig {
            match_threshold: 0.45,
            ..Default::default()
        });
        // 60 degrees apart: similarity 0.5.
        let a = [1.0f32, 0.0];
        let b = [0.5f32, 3f32.sqrt() / 2.0];
        assert!(v.verify(&a, &b, &loud_frame()));
        // 90 degrees apart: similarity 0.
        assert!(!v.verify(&a, &[0.0, 1.0], &loud_frame()));
    }

    #[test]
    fn invalid_config_falls_back() {
        let v = VoiceIdentityVerifier::with_config(VerifierConfig {
            match_threshold: 7.0,
            min_verify_rms: -1.0,
        });
        assert_eq!(v.config(), &VerifierConfig::default());
    }
}
