//! Emergency intent classification over recognized speech.
//!
//! Speech-to-text output is noisy and multilingual. The classifier matches
//! normalized text against an immutable [`IntentCatalog`] of weighted
//! patterns with fuzzy token similarity, so recognition slips such as
//! "kidnappinq" still match.
//!
//! # Example
//!
//! ```
//! use aegis_intent::SemanticIntentClassifier;
//!
//! let classifier = SemanticIntentClassifier::new();
//! let c = classifier.classify_intent("I'm scared, please don't hurt me");
//! assert!(c.is_emergency());
//!
//! let c = classifier.classify_intent("we saw an attack in a movie");
//! assert!(!c.is_emergency());
//! ```
//!
//! The built-in catalog covers English, Hindi (Devanagari), romanized Hindi
//! and Spanish. Deployments can ship their own with
//! [`IntentCatalog::from_yaml`].

mod builtin;
mod catalog;
mod classifier;
mod error;
mod normalize;
mod similarity;

pub use catalog::{IntentCatalog, IntentPattern, TypePatterns};
pub use classifier::{IntentAnalysis, IntentConfig, SemanticIntentClassifier, TypeScore};
pub use error::IntentError;
pub use normalize::{normalize, tokenize};
pub use similarity::{best_similarity, edit_distance, token_similarity, SimilarityThresholds};

#[cfg(test)]
mod tests;
