use std::sync::Arc;
use std::time::{Duration, Instant};

use aegis_distress::{
    AmbientDistressScorer, AudioAnalysisSample, DistressHistory, EmergencyClassification, EmergencyType,
    EmergencyTypeResolver, SustainedDistressAnalyzer,
};
use aegis_intent::{IntentCatalog, SemanticIntentClassifier};
use aegis_voiceprint::{EnrolledVoiceProfile, VoiceIdentityVerifier};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::listener::EmergencyEvent;
use crate::model::Transcript;
use crate::state::{DetectionPath, DetectionStateMachine, Observation, Phase};

/// Detection state of one monitoring session.
///
/// Owns the distress history, the state machine and the last recognized
/// phrase. It is driven by a single owner (the engine worker) and needs no
/// locking. Processing is synchronous; the caller supplies the time.
#[derive(Debug)]
pub struct Session {
    verifier: VoiceIdentityVerifier,
    analyzer: SustainedDistressAnalyzer,
    ambient: AmbientDistressScorer,
    resolver: EmergencyTypeResolver,
    intent: SemanticIntentClassifier,
    state: DetectionStateMachine,
    history: DistressHistory,
    profile: Option<EnrolledVoiceProfile>,
    last_phrase: Option<(EmergencyClassification, Instant)>,

    phrase_ttl: Duration,
    min_transcript_confidence: f32,
    ambient_trigger_score: f32,
    ambient_only_min_rms: f32,
    emergency_threshold: f32,
}

impl Session {
    /// Starts a session in the Idle phase. Without a profile the distress
    /// path runs ambient-only.
    pub fn new(cfg: &EngineConfig, catalog: Arc<IntentCatalog>, profile: Option<EnrolledVoiceProfile>) -> Self {
        let ambient = AmbientDistressScorer::with_config(cfg.ambient.clone());
        Self {
            verifier: VoiceIdentityVerifier::with_config(cfg.verifier.clone()),
            analyzer: SustainedDistressAnalyzer::with_config(cfg.sustained.clone()),
            resolver: EmergencyTypeResolver::new(cfg.resolver.clone(), ambient.clone()),
            ambient,
            intent: SemanticIntentClassifier::with_catalog(catalog, cfg.intent.clone()),
            state: DetectionStateMachine::new(cfg.detection.clone()),
            history: DistressHistory::new(),
            profile,
            last_phrase: None,
            phrase_ttl: Duration::from_secs(cfg.phrase_ttl_secs),
            min_transcript_confidence: cfg.min_transcript_confidence,
            ambient_trigger_score: cfg.ambient_trigger_score,
            ambient_only_min_rms: cfg.ambient_only_min_rms,
            emergency_threshold: cfg.intent.emergency_threshold,
        }
    }

    /// True when distress is gated on the enrolled voice.
    pub fn is_voice_gated(&self) -> bool {
        self.profile.is_some()
    }

    pub fn phase(&self, now: Instant) -> Phase {
        self.state.phase(now)
    }

    pub fn state(&self) -> &DetectionStateMachine {
        &self.state
    }

    pub fn history(&self) -> &DistressHistory {
        &self.history
    }

    /// Runs one analyzed frame through the distress and ambient paths.
    ///
    /// The history is updated even while the cooldown suppresses triggers.
    pub fn process_frame(&mut self, sample: &AudioAnalysisSample, now: Instant) -> Option<EmergencyEvent> {
        let p = sample.scream_probability;
        let distress = self
            .analyzer
            .analyze(&sample.raw_frame, p, sample.rms, &mut self.history);
        let distress_positive = distress > 0.0 && self.passes_identity_gate(sample);

        let ambient_score = self.ambient.score(&sample.embedding, sample.rms);
        let ambient_positive = ambient_score >= self.ambient_trigger_score
            || self.ambient.has_emergency_sounds(&sample.embedding)
            || self.ambient.is_crowd_panic(&sample.embedding, sample.rms);

        trace!(
            p,
            rms = sample.rms,
            distress,
            distress_positive,
            ambient_score,
            ambient_positive,
            "session: frame"
        );

        if self.state.observe(DetectionPath::Distress, distress_positive, now) == Observation::Fire {
            let phrase = self.recent_phrase(now);
            let mut c = self
                .resolver
                .resolve(phrase.as_ref(), p, &sample.embedding, sample.rms);
            if c.emergency_type == EmergencyType::None {
                c = EmergencyClassification::new(EmergencyType::GeneralDistress, distress);
            }
            return Some(EmergencyEvent::new(c, DetectionPath::Distress));
        }

        if self.state.observe(DetectionPath::Ambient, ambient_positive, now) == Observation::Fire {
            let phrase = self.recent_phrase(now);
            let mut c = self
                .resolver
                .resolve(phrase.as_ref(), p, &sample.embedding, sample.rms);
            if c.emergency_type == EmergencyType::None {
                c = self
                    .ambient
                    .dominant_emergency(&sample.embedding, sample.rms)
                    .unwrap_or_else(|| EmergencyClassification::new(EmergencyType::GeneralDistress, ambient_score));
            }
            return Some(EmergencyEvent::new(c, DetectionPath::Ambient));
        }

        None
    }

    /// Runs one recognized-speech candidate through the keyword path.
    ///
    /// Empty text and candidates below the confidence floor are ignored and
    /// do not touch the keyword counter.
    pub fn process_transcript(&mut self, transcript: &Transcript, now: Instant) -> Option<EmergencyEvent> {
        if transcript.text.trim().is_empty() || transcript.confidence < self.min_transcript_confidence {
            trace!(confidence = transcript.confidence, "session: transcript ignored");
            return None;
        }

        let c = self.intent.classify_intent(&transcript.text);
        let positive = c.is_emergency_above(self.emergency_threshold);
        if positive {
            self.last_phrase = Some((c, now));
        }
        debug!(
            classification = %c,
            positive,
            is_final = transcript.is_final,
            "session: transcript"
        );

        if self.state.observe(DetectionPath::Keyword, positive, now) == Observation::Fire {
            return Some(EmergencyEvent::new(c, DetectionPath::Keyword).with_text(transcript.text.clone()));
        }
        None
    }

    fn passes_identity_gate(&self, sample: &AudioAnalysisSample) -> bool {
        match &self.profile {
            Some(profile) => self
                .verifier
                .verify(profile.embedding(), &sample.embedding, &sample.raw_frame),
            None => sample.rms >= self.ambient_only_min_rms,
        }
    }

    fn recent_phrase(&self, now: Instant) -> Option<EmergencyClassification> {
        self.last_phrase
            .filter(|(_, at)| now.saturating_duration_since(*at) <= self.phrase_ttl)
            .map(|(c, _)| c)
    }
}
