//! Non-voice acoustic scene scoring.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::{EmergencyClassification, EmergencyType};

/// Acoustic classes read from the frame embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbientClass {
    Scream,
    Yell,
    Crying,
    Whimper,
    Gasp,
    Crowd,
    GlassBreak,
    Crash,
    Explosion,
    Gunshot,
    FireAlarm,
    Siren,
}

impl AmbientClass {
    /// Returns the string representation of the class.
    pub fn as_str(&self) -> &'static str {
        match self {
            AmbientClass::Scream => "scream",
            AmbientClass::Yell => "yell",
            AmbientClass::Crying => "crying",
            AmbientClass::Whimper => "whimper",
            AmbientClass::Gasp => "gasp",
            AmbientClass::Crowd => "crowd",
            AmbientClass::GlassBreak => "glass_break",
            AmbientClass::Crash => "crash",
            AmbientClass::Explosion => "explosion",
            AmbientClass::Gunshot => "gunshot",
            AmbientClass::FireAlarm => "fire_alarm",
            AmbientClass::Siren => "siren",
        }
    }

    /// The emergency this class points to when it dominates a scene.
    pub fn emergency_type(&self) -> EmergencyType {
        match self {
            AmbientClass::Scream
            | AmbientClass::Yell
            | AmbientClass::GlassBreak
            | AmbientClass::Gunshot => EmergencyType::Assault,
            AmbientClass::Crying | AmbientClass::Whimper => EmergencyType::Harassment,
            AmbientClass::Gasp => EmergencyType::MedicalEmergency,
            AmbientClass::Crowd => EmergencyType::CrowdPanic,
            AmbientClass::Crash => EmergencyType::RoadAccident,
            AmbientClass::Explosion => EmergencyType::Explosion,
            AmbientClass::FireAlarm => EmergencyType::Fire,
            AmbientClass::Siren => EmergencyType::GeneralDistress,
        }
    }

    /// True for classes that indicate danger on their own.
    pub fn is_emergency_sound(&self) -> bool {
        matches!(
            self,
            AmbientClass::FireAlarm
                | AmbientClass::Explosion
                | AmbientClass::Crash
                | AmbientClass::GlassBreak
                | AmbientClass::Gunshot
        )
    }
}

/// Where a class lives in the embedding and how much it counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientClassSpec {
    pub class: AmbientClass,
    /// Position in the embedding.
    pub index: usize,
    /// Minimum value for the class to contribute.
    pub threshold: f32,
    /// Contribution weight.
    pub weight: f32,
}

impl AmbientClassSpec {
    const fn new(class: AmbientClass, index: usize, threshold: f32, weight: f32) -> Self {
        Self {
            class,
            index,
            threshold,
            weight,
        }
    }
}

/// Default class table. Indices follow the YAMNet (AudioSet) class map.
const DEFAULT_CLASSES: [AmbientClassSpec; 12] = [
    AmbientClassSpec::new(AmbientClass::Scream, 11, 0.3, 1.5),
    AmbientClassSpec::new(AmbientClass::Yell, 9, 0.3, 1.2),
    AmbientClassSpec::new(AmbientClass::Crying, 19, 0.3, 1.0),
    AmbientClassSpec::new(AmbientClass::Whimper, 21, 0.3, 0.9),
    AmbientClassSpec::new(AmbientClass::Gasp, 42, 0.3, 0.8),
    AmbientClassSpec::new(AmbientClass::Crowd, 64, 0.4, 1.0),
    AmbientClassSpec::new(AmbientClass::GlassBreak, 464, 0.3, 1.3),
    AmbientClassSpec::new(AmbientClass::Crash, 460, 0.3, 1.3),
    AmbientClassSpec::new(AmbientClass::Explosion, 420, 0.3, 1.5),
    AmbientClassSpec::new(AmbientClass::Gunshot, 421, 0.3, 1.5),
    AmbientClassSpec::new(AmbientClass::FireAlarm, 394, 0.3, 1.2),
    AmbientClassSpec::new(AmbientClass::Siren, 390, 0.3, 0.8),
];

/// Configuration for [`AmbientDistressScorer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Class table (default: YAMNet indices for the 12 classes).
    pub classes: Vec<AmbientClassSpec>,
    /// RMS above which the environment counts as loud (default: 0.05).
    pub loud_rms: f32,
    /// Multiplier applied in loud environments (default: 1.2).
    pub loud_boost: f32,
    /// Multiplier applied when several classes fire (default: 1.3).
    pub multi_signal_boost: f32,
    /// Distinct classes needed for the multi-signal boost (default: 2).
    pub multi_signal_min: usize,
    /// Accumulator divisor before capping at 1.0 (default: 2.0).
    pub normalizer: f32,
    /// Crowd level required for crowd panic (default: 0.5).
    pub crowd_panic_level: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            classes: DEFAULT_CLASSES.to_vec(),
            loud_rms: 0.05,
            loud_boost: 1.2,
            multi_signal_boost: 1.3,
            multi_signal_min: 2,
            normalizer: 2.0,
            crowd_panic_level: 0.5,
        }
    }
}

/// One class that fired for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientReading {
    pub class: AmbientClass,
    pub value: f32,
    /// `value * weight`.
    pub weighted: f32,
}

/// Scores how dangerous the non-voice acoustic scene sounds.
///
/// # Algorithm
///
/// Every class whose embedding value reaches its threshold adds
/// `value * weight` to an accumulator. A loud environment multiplies the
/// accumulator by 1.2, and two or more distinct classes (crowd + scream)
/// by 1.3. The score is `min(acc / 2, 1)`.
#[derive(Debug, Clone, Default)]
pub struct AmbientDistressScorer {
    cfg: AmbientConfig,
}

impl AmbientDistressScorer {
    /// Creates a scorer with the default class table.
    pub fn new() -> Self {
        Self::with_config(AmbientConfig::default())
    }

    /// Creates a scorer with the given configuration.
    pub fn with_config(cfg: AmbientConfig) -> Self {
        let d = AmbientConfig::default();
        let classes = if cfg.classes.is_empty() {
            d.classes.clone()
        } else {
            cfg.classes
        };
        Self {
            cfg: AmbientConfig {
                classes,
                loud_rms: if cfg.loud_rms >= 0.0 { cfg.loud_rms } else { d.loud_rms },
                loud_boost: if cfg.loud_boost >= 1.0 { cfg.loud_boost } else { d.loud_boost },
                multi_signal_boost: if cfg.multi_signal_boost >= 1.0 {
                    cfg.multi_signal_boost
                } else {
                    d.multi_signal_boost
                },
                multi_signal_min: cfg.multi_signal_min.max(1),
                normalizer: if cfg.normalizer > 0.0 { cfg.normalizer } else { d.normalizer },
                crowd_panic_level: cfg.crowd_panic_level,
            },
        }
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> &AmbientConfig {
        &self.cfg
    }

    fn spec(&self, class: AmbientClass) -> Option<&AmbientClassSpec> {
        self.cfg.classes.iter().find(|s| s.class == class)
    }

    /// Raw embedding value of `class`, 0 when the class or index is missing.
    pub fn class_value(&self, embedding: &[f32], class: AmbientClass) -> f32 {
        self.spec(class)
            .and_then(|s| embedding.get(s.index))
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// True when `class` reaches its threshold.
    pub fn is_above(&self, embedding: &[f32], class: AmbientClass) -> bool {
        match self.spec(class) {
            Some(s) => self.class_value(embedding, class) >= s.threshold,
            None => false,
        }
    }

    /// Classes that reach their thresholds, in table order.
    pub fn readings(&self, embedding: &[f32]) -> Vec<AmbientReading> {
        let mut out = Vec::new();
        for spec in &self.cfg.classes {
            if out.iter().any(|r: &AmbientReading| r.class == spec.class) {
                continue;
            }
            let value = match embedding.get(spec.index) {
                Some(&v) if v.is_finite() => v,
                _ => continue,
            };
            if value >= spec.threshold {
                out.push(AmbientReading {
                    class: spec.class,
                    value,
                    weighted: value * spec.weight,
                });
            }
        }
        out
    }

    /// Ambient danger score in `[0, 1]`.
    pub fn score(&self, embedding: &[f32], rms: f32) -> f32 {
        let readings = self.readings(embedding);
        if readings.is_empty() {
            return 0.0;
        }
        let mut acc: f32 = readings.iter().map(|r| r.weighted).sum();
        if rms > self.cfg.loud_rms {
            acc *= self.cfg.loud_boost;
        }
        if readings.len() >= self.cfg.multi_signal_min {
            acc *= self.cfg.multi_signal_boost;
        }
        let score = (acc / self.cfg.normalizer).min(1.0);
        trace!(score, detections = readings.len(), "ambient: scored");
        score
    }

    /// Dense crowd plus screaming or yelling in a loud environment.
    pub fn is_crowd_panic(&self, embedding: &[f32], rms: f32) -> bool {
        self.class_value(embedding, AmbientClass::Crowd) >= self.cfg.crowd_panic_level
            && (self.is_above(embedding, AmbientClass::Scream)
                || self.is_above(embedding, AmbientClass::Yell))
            && rms > self.cfg.loud_rms
    }

    /// Any alarm, explosion, crash, breaking glass or gunshot.
    pub fn has_emergency_sounds(&self, embedding: &[f32]) -> bool {
        self.readings(embedding)
            .iter()
            .any(|r| r.class.is_emergency_sound())
    }

    /// The emergency of the strongest weighted class, with the scene score
    /// as confidence. `None` when nothing fired.
    pub fn dominant_emergency(&self, embedding: &[f32], rms: f32) -> Option<EmergencyClassification> {
        let readings = self.readings(embedding);
        let top = readings
            .iter()
            .max_by(|a, b| a.weighted.total_cmp(&b.weighted))?;
        Some(EmergencyClassification::new(
            top.class.emergency_type(),
            self.score(embedding, rms),
        ))
    }
}
