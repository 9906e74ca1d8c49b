use aegis_audio::{signal, SUB_FRAME_SAMPLES};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::history::DistressHistory;

/// Configuration for [`SustainedDistressAnalyzer`].
///
/// The band thresholds were tuned empirically; keep them here rather than in
/// control flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SustainedConfig {
    /// Probabilities below this are ordinary conversation (default: 0.35).
    pub conversation_threshold: f32,
    /// Minimum fraction of history slots at or above
    /// `conversation_threshold` (default: 0.4, i.e. 2 of 5).
    pub min_sustained_ratio: f32,
    /// Probabilities at or above this skip corroboration (default: 0.55).
    pub extreme_threshold: f32,
    /// Start of the moderate band (default: 0.50).
    pub moderate_threshold: f32,
    /// Corroborating signals required in the moderate band (default: 1).
    pub moderate_required_checks: usize,
    /// Corroborating signals required below the moderate band (default: 2).
    pub low_required_checks: usize,
    /// Minimum variance of 10 ms sub-frame RMS (default: 0.02).
    pub energy_variance_threshold: f32,
    /// Minimum zero-crossing rate (default: 0.07).
    pub zero_crossing_threshold: f32,
    /// Minimum rise of RMS over the mean of the other history slots
    /// (default: 0.02).
    pub sudden_increase_threshold: f32,
    /// Sub-frame length in samples for the energy variance (default: 160).
    pub sub_frame_samples: usize,
}

impl Default for SustainedConfig {
    fn default() -> Self {
        Self {
            conversation_threshold: 0.35,
            min_sustained_ratio: 0.4,
            extreme_threshold: 0.55,
            moderate_threshold: 0.50,
            moderate_required_checks: 1,
            low_required_checks: 2,
            energy_variance_threshold: 0.02,
            zero_crossing_threshold: 0.07,
            sudden_increase_threshold: 0.02,
            sub_frame_samples: SUB_FRAME_SAMPLES,
        }
    }
}

/// Signal-shape evidence used to corroborate a borderline probability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorroborationSignals {
    /// Volume instability typical of panic rather than steady loud talk.
    pub energy_variance: bool,
    /// Strained voice quality.
    pub zero_crossing: bool,
    /// Loudness jumped relative to recent frames.
    pub sudden_increase: bool,
}

impl CorroborationSignals {
    /// Number of signals that fired.
    pub fn count(&self) -> usize {
        [self.energy_variance, self.zero_crossing, self.sudden_increase]
            .into_iter()
            .filter(|&b| b)
            .count()
    }
}

/// Separates sustained distress from ordinary conversation.
///
/// # Algorithm
///
/// Gates run in order and short-circuit to 0.0:
///
/// 1. record `(rms, probability)` in the history
/// 2. probability below the conversation threshold -> 0
/// 3. fewer than 2 of 5 history slots elevated -> 0, however high the
///    current probability (a single shouted word never passes)
/// 4. probability at or above the extreme threshold -> probability
/// 5. otherwise N of 3 corroborating signals must fire, N = 1 in the
///    moderate band and 2 below it
#[derive(Debug, Clone, Default)]
pub struct SustainedDistressAnalyzer {
    cfg: SustainedConfig,
}

impl SustainedDistressAnalyzer {
    /// Creates an analyzer with default configuration.
    pub fn new() -> Self {
        Self::with_config(SustainedConfig::default())
    }

    /// Creates an analyzer with the given configuration.
    ///
    /// Thresholds outside `[0, 1]` and check counts outside `1..=3` fall back
    /// to the defaults.
    pub fn with_config(cfg: SustainedConfig) -> Self {
        let d = SustainedConfig::default();
        let unit = |v: f32, default: f32| {
            if (0.0..=1.0).contains(&v) { v } else { default }
        };
        let checks = |v: usize, default: usize| {
            if (1..=3).contains(&v) { v } else { default }
        };
        Self {
            cfg: SustainedConfig {
                conversation_threshold: unit(cfg.conversation_threshold, d.conversation_threshold),
                min_sustained_ratio: unit(cfg.min_sustained_ratio, d.min_sustained_ratio),
                extreme_threshold: unit(cfg.extreme_threshold, d.extreme_threshold),
                moderate_threshold: unit(cfg.moderate_threshold, d.moderate_threshold),
                moderate_required_checks: checks(cfg.moderate_required_checks, d.moderate_required_checks),
                low_required_checks: checks(cfg.low_required_checks, d.low_required_checks),
                energy_variance_threshold: unit(cfg.energy_variance_threshold, d.energy_variance_threshold),
                zero_crossing_threshold: unit(cfg.zero_crossing_threshold, d.zero_crossing_threshold),
                sudden_increase_threshold: unit(cfg.sudden_increase_threshold, d.sudden_increase_threshold),
                sub_frame_samples: if cfg.sub_frame_samples > 0 {
                    cfg.sub_frame_samples
                } else {
                    d.sub_frame_samples
                },
            },
        }
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> &SustainedConfig {
        &self.cfg
    }

    /// Scores one frame and records it in `history`.
    ///
    /// Returns the scream probability when the frame is accepted as
    /// sustained distress, 0.0 otherwise.
    pub fn analyze(
        &self,
        raw_frame: &[i16],
        scream_probability: f32,
        rms: f32,
        history: &mut DistressHistory,
    ) -> f32 {
        let p = if scream_probability.is_finite() {
            scream_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        history.push(rms, p);

        if p < self.cfg.conversation_threshold {
            return 0.0;
        }

        let ratio = history.sustained_ratio(self.cfg.conversation_threshold);
        if ratio < self.cfg.min_sustained_ratio {
            trace!(p, ratio, "distress: single burst rejected");
            return 0.0;
        }

        if p >= self.cfg.extreme_threshold {
            return p;
        }

        let required = if p >= self.cfg.moderate_threshold {
            self.cfg.moderate_required_checks
        } else {
            self.cfg.low_required_checks
        };
        let signals = self.corroborating_signals(raw_frame, rms, history);
        trace!(p, required, found = signals.count(), "distress: corroboration");
        if signals.count() >= required { p } else { 0.0 }
    }

    /// True when the frame looks like ordinary conversation.
    ///
    /// This is the inverse of [`SustainedDistressAnalyzer::analyze`] and
    /// records the frame in `history` the same way.
    pub fn is_normal_conversation(
        &self,
        raw_frame: &[i16],
        scream_probability: f32,
        rms: f32,
        history: &mut DistressHistory,
    ) -> bool {
        self.analyze(raw_frame, scream_probability, rms, history) == 0.0
    }

    /// Evaluates the three corroborating signals for the most recent frame.
    ///
    /// `history` must already contain the frame.
    pub fn corroborating_signals(
        &self,
        raw_frame: &[i16],
        rms: f32,
        history: &DistressHistory,
    ) -> CorroborationSignals {
        let variance = signal::energy_variance(raw_frame, self.cfg.sub_frame_samples);
        let zcr = signal::zero_crossing_rate(raw_frame);
        let rise = rms - history.mean_rms_excluding_latest();
        CorroborationSignals {
            energy_variance: variance >= self.cfg.energy_variance_threshold,
            zero_crossing: zcr >= self.cfg.zero_crossing_threshold,
            sudden_increase: rise >= self.cfg.sudden_increase_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_audio::FRAME_SAMPLES;

    /// Steady low-frequency tone: no variance, ZCR ~0.0125.
    fn steady_frame() -> Vec<i16> {
        (0..FRAME_SAMPLES)
            .map(|i| {
                let t = i as f64 / 16000.0;
                (6000.0 * (2.0 * std::f64::consts::PI * 100.0 * t).sin()) as i16
            })
            .collect()
    }

    /// Alternating loud/quiet 10 ms bursts of a 1 kHz tone: high variance,
    /// ZCR ~0.125.
    fn panic_frame() -> Vec<i16> {
        (0..FRAME_SAMPLES)
            .map(|i| {
                let t = i as f64 / 16000.0;
                let amp = if (i / 160) % 2 == 0 { 30000.0 } else { 1500.0 };
                (amp * (2.0 * std::f64::consts::PI * 1000.0 * t).sin()) as i16
            })
            .collect()
    }

    fn run(analyzer: &SustainedDistressAnalyzer, frame: &[i16], seq: &[(f32, f32)]) -> Vec<f32> {
        let mut h = DistressHistory::new();
        seq.iter()
            .map(|&(p, rms)| analyzer.analyze(frame, p, rms, &mut h))
            .collect()
    }

    #[test]
    fn calm_speech_rejected() {
        let a = SustainedDistressAnalyzer::new();
        let scores = run(&a, &panic_frame(), &[(0.3, 0.2); 6]);
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn single_burst_rejected() {
        let a = SustainedDistressAnalyzer::new();
        let scores = run(
            &a,
            &panic_frame(),
            &[(0.1, 0.1), (0.15, 0.1), (0.05, 0.1), (0.1, 0.1), (0.95, 0.6)],
        );
        assert_eq!(scores[4], 0.0);
    }

    #[test]
    fn sustained_high_probability_accepted() {
        let a = SustainedDistressAnalyzer::new();
        let scores = run(
            &a,
            &steady_frame(),
            &[(0.1, 0.1), (0.1, 0.1), (0.6, 0.3), (0.7, 0.3), (0.8, 0.3)],
        );
        assert_eq!(scores[2], 0.0, "first elevated frame is a lone burst");
        assert_eq!(scores[3], 0.7);
        assert_eq!(scores[4], 0.8);
    }

    /// Three calm frames then one elevated frame, all at RMS 0.2.
    fn primed(a: &SustainedDistressAnalyzer, frame: &[i16]) -> DistressHistory {
        let mut h = DistressHistory::new();
        for p in [0.1, 0.1, 0.1, 0.6] {
            a.analyze(frame, p, 0.2, &mut h);
        }
        h
    }

    #[test]
    fn moderate_band_needs_one_signal() {
        let a = SustainedDistressAnalyzer::new();
        let steady = steady_frame();
        let mut h = primed(&a, &steady);
        // Steady tone, no loudness rise: nothing corroborates.
        assert_eq!(a.analyze(&steady, 0.52, 0.2, &mut h), 0.0);

        let mut h = primed(&a, &steady);
        // Loudness jump alone is enough in the moderate band.
        assert_eq!(a.analyze(&steady, 0.52, 0.4, &mut h), 0.52);
    }

    #[test]
    fn low_band_needs_two_signals() {
        let a = SustainedDistressAnalyzer::new();
        let steady = steady_frame();
        let mut h = primed(&a, &steady);
        // Only the loudness jump fires.
        assert_eq!(a.analyze(&steady, 0.4, 0.4, &mut h), 0.0);

        let panic = panic_frame();
        let mut h = primed(&a, &panic);
        // Variance and zero crossings both fire.
        assert_eq!(a.analyze(&panic, 0.4, 0.2, &mut h), 0.4);
    }

    #[test]
    fn corroborating_signals_on_synthetic_frames() {
        let a = SustainedDistressAnalyzer::new();
        let mut h = DistressHistory::new();
        for _ in 0..5 {
            h.push(0.2, 0.0);
        }
        let steady = a.corroborating_signals(&steady_frame(), 0.2, &h);
        assert_eq!(steady.count(), 0);

        let panic = a.corroborating_signals(&panic_frame(), 0.2, &h);
        assert!(panic.energy_variance);
        assert!(panic.zero_crossing);
        assert!(!panic.sudden_increase);

        // Unwritten slots count as silence, so a first loud frame is a rise.
        let mut fresh = DistressHistory::new();
        fresh.push(0.2, 0.0);
        assert!(a.corroborating_signals(&steady_frame(), 0.2, &fresh).sudden_increase);
    }

    #[test]
    fn is_normal_conversation_inverts_analyze() {
        let a = SustainedDistressAnalyzer::new();
        let mut h = DistressHistory::new();
        assert!(a.is_normal_conversation(&steady_frame(), 0.2, 0.1, &mut h));
        assert!(a.is_normal_conversation(&steady_frame(), 0.9, 0.1, &mut h));
        assert!(!a.is_normal_conversation(&steady_frame(), 0.9, 0.1, &mut h));
    }

    #[test]
    fn invalid_config_falls_back() {
        let a = SustainedDistressAnalyzer::with_config(SustainedConfig {
            conversation_threshold: 3.0,
            moderate_required_checks: 0,
            low_required_checks: 9,
            sub_frame_samples: 0,
            ..Default::default()
        });
        assert_eq!(a.config(), &SustainedConfig::default());
    }

    #[test]
    fn stricter_band_counts_from_config() {
        let a = SustainedDistressAnalyzer::with_config(SustainedConfig {
            moderate_required_checks: 2,
            low_required_checks: 3,
            ..Default::default()
        });
        let panic = panic_frame();
        let mut h = primed(&a, &panic);
        // Two of three signals: enough for the moderate band only.
        assert_eq!(a.analyze(&panic, 0.52, 0.2, &mut h), 0.52);
        assert_eq!(a.analyze(&panic, 0.4, 0.2, &mut h), 0.0);
    }
}
