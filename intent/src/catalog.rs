use std::path::Path;
use std::sync::Arc;

use aegis_distress::EmergencyType;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builtin;
use crate::error::IntentError;
use crate::normalize::normalize;

/// One way of expressing an emergency.
///
/// Tokens are stored normalized. A token may span several words.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentPattern {
    /// Words that must be present for the pattern to score.
    pub core_tokens: Vec<String>,
    /// Words that raise confidence when present.
    pub context_tokens: Vec<String>,
    /// Words that disqualify the pattern.
    pub negation_tokens: Vec<String>,
    pub weight: f32,
}

impl IntentPattern {
    /// Builds a pattern, normalizing every token and dropping empty ones.
    pub fn new<S: AsRef<str>>(core: &[S], context: &[S], negation: &[S], weight: f32) -> Self {
        Self {
            core_tokens: normalize_all(core),
            context_tokens: normalize_all(context),
            negation_tokens: normalize_all(negation),
            weight,
        }
    }
}

fn normalize_all<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for t in tokens {
        let n = normalize(t.as_ref());
        if !n.is_empty() && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

/// All patterns for one emergency type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypePatterns {
    #[serde(rename = "type")]
    pub emergency_type: EmergencyType,
    pub patterns: Vec<IntentPattern>,
}

/// Immutable vocabulary for [`SemanticIntentClassifier`](crate::SemanticIntentClassifier).
///
/// Built once, then shared by `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentCatalog {
    types: Vec<TypePatterns>,
    threat_verbs: Vec<String>,
    distress_phrases: Vec<String>,
}

static BUILTIN: Lazy<Arc<IntentCatalog>> = Lazy::new(|| {
    let mut catalog = IntentCatalog::empty(builtin::THREAT_VERBS, builtin::DISTRESS_PHRASES);
    let negations = normalize_all(builtin::COMMON_NEGATIONS);
    for (emergency_type, defs) in builtin::TYPES {
        for def in defs.iter() {
            let mut pattern = IntentPattern::new(def.core, def.context, def.negation, def.weight);
            merge_negations(&mut pattern, &negations);
            catalog.push(*emergency_type, pattern);
        }
    }
    Arc::new(catalog)
});

fn merge_negations(pattern: &mut IntentPattern, common: &[String]) {
    for n in common {
        if !pattern.negation_tokens.contains(n) {
            pattern.negation_tokens.push(n.clone());
        }
    }
}

impl IntentCatalog {
    /// The built-in catalog.
    pub fn builtin() -> Arc<IntentCatalog> {
        Arc::clone(&BUILTIN)
    }

    fn empty<S: AsRef<str>>(threat_verbs: &[S], distress_phrases: &[S]) -> Self {
        Self {
            types: Vec::new(),
            threat_verbs: normalize_all(threat_verbs),
            distress_phrases: normalize_all(distress_phrases),
        }
    }

    fn push(&mut self, emergency_type: EmergencyType, pattern: IntentPattern) {
        match self.types.iter_mut().find(|t| t.emergency_type == emergency_type) {
            Some(group) => group.patterns.push(pattern),
            None => self.types.push(TypePatterns {
                emergency_type,
                patterns: vec![pattern],
            }),
        }
    }

    /// Parses a catalog from YAML.
    ///
    /// ```yaml
    /// threat_verbs: [kill, hurt]
    /// distress_phrases: [help me, save me]
    /// common_negations: [movie, game]
    /// types:
    ///   - type: assault
    ///     patterns:
    ///       - core: [attack]
    ///         context: [me, help]
    ///         negation: [heart]
    ///         weight: 1.0
    /// ```
    ///
    /// `common_negations` are merged into every pattern. Types may be written
    /// in snake case or SCREAMING_SNAKE_CASE; a missing weight is 1.0.
    pub fn from_yaml(yaml: &str) -> Result<Self, IntentError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let mut catalog = Self::empty(&file.threat_verbs, &file.distress_phrases);
        let negations = normalize_all(&file.common_negations);

        for entry in file.types {
            let emergency_type = match EmergencyType::parse(&entry.emergency_type) {
                Some(EmergencyType::None) | None => {
                    return Err(IntentError::UnknownType(entry.emergency_type));
                }
                Some(t) => t,
            };
            for (index, def) in entry.patterns.into_iter().enumerate() {
                if !def.weight.is_finite() || def.weight <= 0.0 {
                    return Err(IntentError::InvalidWeight {
                        emergency_type,
                        index,
                        weight: def.weight,
                    });
                }
                let mut pattern = IntentPattern::new(&def.core, &def.context, &def.negation, def.weight);
                if pattern.core_tokens.is_empty() {
                    return Err(IntentError::EmptyPattern {
                        emergency_type,
                        index,
                    });
                }
                merge_negations(&mut pattern, &negations);
                catalog.push(emergency_type, pattern);
            }
        }

        debug!(
            types = catalog.types.len(),
            patterns = catalog.pattern_count(),
            "intent: catalog loaded"
        );
        Ok(catalog)
    }

    /// Reads and parses a YAML catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IntentError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Pattern groups in catalog order.
    pub fn types(&self) -> &[TypePatterns] {
        &self.types
    }

    /// Patterns for one type; empty when the catalog does not cover it.
    pub fn patterns(&self, emergency_type: EmergencyType) -> &[IntentPattern] {
        self.types
            .iter()
            .find(|t| t.emergency_type == emergency_type)
            .map(|t| t.patterns.as_slice())
            .unwrap_or(&[])
    }

    pub fn threat_verbs(&self) -> &[String] {
        &self.threat_verbs
    }

    pub fn distress_phrases(&self) -> &[String] {
        &self.distress_phrases
    }

    /// Total number of patterns across all types.
    pub fn pattern_count(&self) -> usize {
        self.types.iter().map(|t| t.patterns.len()).sum()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    threat_verbs: Vec<String>,
    #[serde(default)]
    distress_phrases: Vec<String>,
    #[serde(default)]
    common_negations: Vec<String>,
    #[serde(default)]
    types: Vec<TypeEntry>,
}

#[derive(Debug, Deserialize)]
struct TypeEntry {
    #[serde(rename = "type")]
    emergency_type: String,
    #[serde(default)]
    patterns: Vec<PatternEntry>,
}

#[derive(Debug, Deserialize)]
struct PatternEntry {
    #[serde(default)]
    core: Vec<String>,
    #[serde(default)]
    context: Vec<String>,
    #[serde(default)]
    negation: Vec<String>,
    #[serde(default = "default_weight")]
    weight: f32,
}

fn default_weight() -> f32 {
    1.0
}
