use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ambient::{AmbientClass, AmbientDistressScorer};
use crate::types::{EmergencyClassification, EmergencyType, DEFAULT_EMERGENCY_THRESHOLD};

/// Configuration for [`EmergencyTypeResolver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Scream probability above which the acoustic context decides (default: 0.5).
    pub scream_threshold: f32,
    /// RMS at or above which context classes are trusted (default: 0.1).
    pub high_intensity_rms: f32,
    /// Confidence a phrase classification must exceed to win (default: 0.5).
    pub emergency_threshold: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            scream_threshold: 0.5,
            high_intensity_rms: 0.1,
            emergency_threshold: DEFAULT_EMERGENCY_THRESHOLD,
        }
    }
}

/// Labels a triggered episode with one emergency type.
///
/// Sources are consulted in a fixed priority order; the first that
/// produces an answer wins:
///
/// 1. a recent phrase classification that is itself an emergency,
/// 2. the acoustic context around a probable scream,
/// 3. the strongest ambient class,
/// 4. [`EmergencyType::None`].
#[derive(Debug, Clone, Default)]
pub struct EmergencyTypeResolver {
    cfg: ResolverConfig,
    ambient: AmbientDistressScorer,
}

impl EmergencyTypeResolver {
    pub fn new(cfg: ResolverConfig, ambient: AmbientDistressScorer) -> Self {
        let d = ResolverConfig::default();
        let unit = |v: f32, fallback: f32| if (0.0..=1.0).contains(&v) { v } else { fallback };
        Self {
            cfg: ResolverConfig {
                scream_threshold: unit(cfg.scream_threshold, d.scream_threshold),
                high_intensity_rms: unit(cfg.high_intensity_rms, d.high_intensity_rms),
                emergency_threshold: unit(cfg.emergency_threshold, d.emergency_threshold),
            },
            ambient,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.cfg
    }

    pub fn ambient(&self) -> &AmbientDistressScorer {
        &self.ambient
    }

    /// Resolves the episode label. Never fails; returns
    /// [`EmergencyClassification::none`] when no source has an answer.
    pub fn resolve(
        &self,
        phrase: Option<&EmergencyClassification>,
        scream_probability: f32,
        embedding: &[f32],
        rms: f32,
    ) -> EmergencyClassification {
        if let Some(p) = phrase.filter(|p| p.is_emergency_above(self.cfg.emergency_threshold)) {
            debug!(classification = %p, "resolver: phrase");
            return *p;
        }

        if scream_probability > self.cfg.scream_threshold {
            let t = self.scream_context(embedding, rms);
            debug!(emergency_type = %t, scream_probability, "resolver: scream context");
            return EmergencyClassification::new(t, scream_probability);
        }

        if let Some(c) = self.ambient.dominant_emergency(embedding, rms) {
            debug!(classification = %c, "resolver: ambient");
            return c;
        }

        EmergencyClassification::none()
    }

    fn scream_context(&self, embedding: &[f32], rms: f32) -> EmergencyType {
        let a = &self.ambient;
        if rms >= self.cfg.high_intensity_rms {
            if a.is_above(embedding, AmbientClass::GlassBreak) {
                return EmergencyType::Assault;
            }
            if a.is_above(embedding, AmbientClass::Crash) {
                return EmergencyType::RoadAccident;
            }
            if a.is_above(embedding, AmbientClass::Crowd) {
                return EmergencyType::CrowdPanic;
            }
        }

        let loudest_voice = a
            .class_value(embedding, AmbientClass::Scream)
            .max(a.class_value(embedding, AmbientClass::Yell));
        let sobbing = [AmbientClass::Crying, AmbientClass::Whimper]
            .into_iter()
            .any(|c| a.is_above(embedding, c) && a.class_value(embedding, c) >= loudest_voice);
        if sobbing {
            return EmergencyType::Harassment;
        }
        EmergencyType::Assault
    }
}
