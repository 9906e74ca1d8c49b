use std::sync::Arc;

use aegis_distress::{EmergencyClassification, EmergencyType, DEFAULT_EMERGENCY_THRESHOLD};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::{IntentCatalog, IntentPattern};
use crate::normalize::{contains_negation, contains_phrase, count_phrase, normalize, tokenize};
use crate::similarity::{best_similarity, SimilarityThresholds};

/// Scoring weights for [`SemanticIntentClassifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentConfig {
    /// Share of the core score in a pattern score (default: 0.7).
    pub core_weight: f32,
    /// Share of the context score in a pattern score (default: 0.3).
    pub context_weight: f32,
    /// Multiplier when a threat verb is present (default: 1.2).
    pub threat_boost: f32,
    /// Minimum length ratio for containment matches (default: 0.7).
    pub containment_ratio: f32,
    /// Minimum edit-distance similarity (default: 0.8).
    pub edit_similarity: f32,
    /// Distress phrase count that saturates the distress score (default: 3).
    pub distress_saturation: f32,
    /// Distress score above which type scores are boosted (default: 0.3).
    pub distress_boost_floor: f32,
    /// Boost factor: scores are multiplied by `1 + factor * distress`
    /// (default: 0.5).
    pub distress_boost_factor: f32,
    /// Distress score above which unmatched text is general distress
    /// (default: 0.5).
    pub general_distress_threshold: f32,
    /// Confidence a phrase classification must exceed to count as an
    /// emergency (default: 0.5).
    pub emergency_threshold: f32,
    /// Skip patterns whose core tokens all miss, so context words alone
    /// never score (default: false).
    pub require_core_match: bool,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            core_weight: 0.7,
            context_weight: 0.3,
            threat_boost: 1.2,
            containment_ratio: 0.7,
            edit_similarity: 0.8,
            distress_saturation: 3.0,
            distress_boost_floor: 0.3,
            distress_boost_factor: 0.5,
            general_distress_threshold: 0.5,
            emergency_threshold: DEFAULT_EMERGENCY_THRESHOLD,
            require_core_match: false,
        }
    }
}

impl IntentConfig {
    /// Replaces out-of-range values with defaults.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let unit = |v: f32, fallback: f32| if (0.0..=1.0).contains(&v) { v } else { fallback };
        Self {
            core_weight: unit(self.core_weight, d.core_weight),
            context_weight: unit(self.context_weight, d.context_weight),
            threat_boost: if self.threat_boost >= 1.0 { self.threat_boost } else { d.threat_boost },
            containment_ratio: unit(self.containment_ratio, d.containment_ratio),
            edit_similarity: unit(self.edit_similarity, d.edit_similarity),
            distress_saturation: if self.distress_saturation >= 1.0 {
                self.distress_saturation
            } else {
                d.distress_saturation
            },
            distress_boost_floor: unit(self.distress_boost_floor, d.distress_boost_floor),
            distress_boost_factor: if self.distress_boost_factor >= 0.0 {
                self.distress_boost_factor
            } else {
                d.distress_boost_factor
            },
            general_distress_threshold: unit(self.general_distress_threshold, d.general_distress_threshold),
            emergency_threshold: unit(self.emergency_threshold, d.emergency_threshold),
            require_core_match: self.require_core_match,
        }
    }

    fn thresholds(&self) -> SimilarityThresholds {
        SimilarityThresholds {
            containment_ratio: self.containment_ratio,
            edit_similarity: self.edit_similarity,
        }
    }
}

/// Score of one emergency type for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeScore {
    #[serde(rename = "type")]
    pub emergency_type: EmergencyType,
    pub score: f32,
}

/// Full breakdown of a classification, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentAnalysis {
    pub normalized: String,
    pub threat_verb: bool,
    pub distress_phrases: usize,
    pub distress_score: f32,
    /// Types with a nonzero score, highest first.
    pub scores: Vec<TypeScore>,
    pub classification: EmergencyClassification,
}

/// Classifies recognized speech into an emergency type.
///
/// # Scoring
///
/// For every catalog pattern not disqualified by one of its negations:
///
/// ```text
/// core    = mean over core tokens of best similarity against the text
/// context = mean over context tokens (0 if the pattern has none)
/// score   = (0.7 * core + 0.3 * context) * weight  [* 1.2 with a threat verb]
/// ```
///
/// A type scores the maximum of its patterns, capped at 1.0. Help, fear and
/// panic phrases raise a separate distress score that boosts every type and
/// can stand in as [`EmergencyType::GeneralDistress`] when no type matched.
#[derive(Debug, Clone)]
pub struct SemanticIntentClassifier {
    catalog: Arc<IntentCatalog>,
    cfg: IntentConfig,
}

impl Default for SemanticIntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticIntentClassifier {
    /// Creates a classifier over the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(IntentCatalog::builtin(), IntentConfig::default())
    }

    /// Creates a classifier over `catalog`.
    pub fn with_catalog(catalog: Arc<IntentCatalog>, cfg: IntentConfig) -> Self {
        Self {
            catalog,
            cfg: cfg.sanitized(),
        }
    }

    pub fn config(&self) -> &IntentConfig {
        &self.cfg
    }

    pub fn catalog(&self) -> &Arc<IntentCatalog> {
        &self.catalog
    }

    /// Classifies `text`. Empty or unmatched text yields
    /// [`EmergencyClassification::none`].
    pub fn classify_intent(&self, text: &str) -> EmergencyClassification {
        self.analyze(text).classification
    }

    /// Classifies `text` and returns every intermediate score.
    pub fn analyze(&self, text: &str) -> IntentAnalysis {
        let normalized = normalize(text);
        let words = tokenize(&normalized);
        if words.is_empty() {
            return IntentAnalysis {
                normalized,
                threat_verb: false,
                distress_phrases: 0,
                distress_score: 0.0,
                scores: Vec::new(),
                classification: EmergencyClassification::none(),
            };
        }

        let threat_verb = self
            .catalog
            .threat_verbs()
            .iter()
            .any(|v| contains_phrase(&words, v));

        let distress_phrases: usize = self
            .catalog
            .distress_phrases()
            .iter()
            .map(|p| count_phrase(&words, p))
            .sum();
        let distress_score = (distress_phrases as f32 / self.cfg.distress_saturation).min(1.0);

        let mut scores: Vec<TypeScore> = Vec::new();
        for group in self.catalog.types() {
            let best = group
                .patterns
                .iter()
                .map(|p| self.pattern_score(p, &words, threat_verb))
                .fold(0.0f32, f32::max);
            let mut score = best.min(1.0);
            if score > 0.0 && distress_score > self.cfg.distress_boost_floor {
                score = (score * (1.0 + self.cfg.distress_boost_factor * distress_score)).min(1.0);
            }
            if score > 0.0 {
                scores.push(TypeScore {
                    emergency_type: group.emergency_type,
                    score,
                });
            }
        }
        // Stable: ties keep catalog order.
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));

        let classification = match scores.first() {
            Some(top) => EmergencyClassification::new(top.emergency_type, top.score),
            None if distress_score > self.cfg.general_distress_threshold => {
                EmergencyClassification::new(EmergencyType::GeneralDistress, distress_score)
            }
            None => EmergencyClassification::none(),
        };

        debug!(
            classification = %classification,
            distress_score,
            threat_verb,
            "intent: classified"
        );

        IntentAnalysis {
            normalized,
            threat_verb,
            distress_phrases,
            distress_score,
            scores,
            classification,
        }
    }

    fn pattern_score(&self, pattern: &IntentPattern, words: &[&str], threat_verb: bool) -> f32 {
        if pattern
            .negation_tokens
            .iter()
            .any(|n| contains_negation(words, n))
        {
            trace!(core = ?pattern.core_tokens, "intent: pattern negated");
            return 0.0;
        }

        let th = self.cfg.thresholds();
        let core = mean_similarity(&pattern.core_tokens, words, th);
        if self.cfg.require_core_match && core <= 0.0 {
            return 0.0;
        }
        let context = mean_similarity(&pattern.context_tokens, words, th);

        let mut score = (self.cfg.core_weight * core + self.cfg.context_weight * context) * pattern.weight;
        if threat_verb {
            score *= self.cfg.threat_boost;
        }
        score
    }
}

fn mean_similarity(tokens: &[String], words: &[&str], th: SimilarityThresholds) -> f32 {
    if tokens.is_empty() {
        return 0.0;
    }
    let sum: f32 = tokens.iter().map(|t| best_similarity(t, words, th)).sum();
    sum / tokens.len() as f32
}
