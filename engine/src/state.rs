//! Hysteresis and cooldown: decides when a detection path fires.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Independent route by which an emergency can be raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPath {
    /// Sustained vocal distress, voice-gated when a profile is enrolled.
    Distress,
    /// Non-voice acoustic scene.
    Ambient,
    /// Recognized speech.
    Keyword,
}

impl DetectionPath {
    pub const ALL: [DetectionPath; 3] = [
        DetectionPath::Distress,
        DetectionPath::Ambient,
        DetectionPath::Keyword,
    ];

    fn index(self) -> usize {
        match self {
            DetectionPath::Distress => 0,
            DetectionPath::Ambient => 1,
            DetectionPath::Keyword => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionPath::Distress => "distress",
            DetectionPath::Ambient => "ambient",
            DetectionPath::Keyword => "keyword",
        }
    }
}

impl fmt::Display for DetectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for [`DetectionStateMachine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Consecutive positive frames needed on the distress path (default: 2).
    pub distress_required: u32,
    /// Consecutive positive frames needed on the ambient path (default: 3).
    pub ambient_required: u32,
    /// Consecutive positive transcripts needed on the keyword path
    /// (default: 3).
    pub keyword_required: u32,
    /// Quiet period after a trigger, shared by all paths (default: 30).
    pub cooldown_secs: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            distress_required: 2,
            ambient_required: 3,
            keyword_required: 3,
            cooldown_secs: 30,
        }
    }
}

impl DetectionConfig {
    /// Replaces zero counts with defaults.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let count = |v: u32, fallback: u32| if v > 0 { v } else { fallback };
        Self {
            distress_required: count(self.distress_required, d.distress_required),
            ambient_required: count(self.ambient_required, d.ambient_required),
            keyword_required: count(self.keyword_required, d.keyword_required),
            cooldown_secs: self.cooldown_secs,
        }
    }

    pub fn required(&self, path: DetectionPath) -> u32 {
        match path {
            DetectionPath::Distress => self.distress_required,
            DetectionPath::Ambient => self.ambient_required,
            DetectionPath::Keyword => self.keyword_required,
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Lifecycle of one detection episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Accumulating,
    /// A path fired on the most recent observation.
    Triggered,
    Cooldown,
}

/// Outcome of one [`DetectionStateMachine::observe`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Ignored while the cooldown runs.
    Suppressed,
    /// Counter updated without firing.
    Counted { count: u32, required: u32 },
    /// The path reached its required count. Counters are reset and the
    /// cooldown has started.
    Fire,
}

/// Per-session hysteresis counters and the shared cooldown.
///
/// ```text
/// Idle -> Accumulating -> Triggered -> Cooldown -> Idle
/// ```
///
/// A positive observation increments its path counter, a negative one
/// decrements it (never below 0). Reaching the path's required count fires
/// exactly once: every counter resets and the cooldown starts. Time is
/// passed in, so the owner of the machine is also the only owner of the
/// cooldown clock.
#[derive(Debug, Clone)]
pub struct DetectionStateMachine {
    cfg: DetectionConfig,
    counters: [u32; 3],
    cooldown_until: Option<Instant>,
    phase: Phase,
}

impl DetectionStateMachine {
    pub fn new(cfg: DetectionConfig) -> Self {
        Self {
            cfg: cfg.sanitized(),
            counters: [0; 3],
            cooldown_until: None,
            phase: Phase::Idle,
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.cfg
    }

    /// Feeds one observation for `path`.
    pub fn observe(&mut self, path: DetectionPath, positive: bool, now: Instant) -> Observation {
        if let Some(until) = self.cooldown_until {
            if now < until {
                self.phase = Phase::Cooldown;
                return Observation::Suppressed;
            }
            debug!("detection: cooldown over");
            self.cooldown_until = None;
            self.phase = Phase::Idle;
        }

        let required = self.cfg.required(path);
        let counter = &mut self.counters[path.index()];
        *counter = if positive {
            counter.saturating_add(1)
        } else {
            counter.saturating_sub(1)
        };
        let count = *counter;

        if count >= required {
            self.counters = [0; 3];
            self.cooldown_until = Some(now + self.cfg.cooldown());
            self.phase = Phase::Triggered;
            debug!(%path, "detection: fired");
            return Observation::Fire;
        }

        self.phase = if self.counters.iter().any(|&c| c > 0) {
            Phase::Accumulating
        } else {
            Phase::Idle
        };
        Observation::Counted { count, required }
    }

    /// Current phase as of `now`.
    pub fn phase(&self, now: Instant) -> Phase {
        match self.cooldown_until {
            Some(until) if now >= until => Phase::Idle,
            _ => self.phase,
        }
    }

    /// True while triggers are suppressed.
    pub fn in_cooldown(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    pub fn consecutive_positives(&self, path: DetectionPath) -> u32 {
        self.counters[path.index()]
    }

    pub fn cooldown_until(&self) -> Option<Instant> {
        self.cooldown_until
    }

    /// Back to Idle: counters cleared and any cooldown discarded.
    pub fn reset(&mut self) {
        self.counters = [0; 3];
        self.cooldown_until = None;
        self.phase = Phase::Idle;
    }
}

impl Default for DetectionStateMachine {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_required_count() {
        let mut sm = DetectionStateMachine::default();
        let t0 = Instant::now();
        assert_eq!(
            sm.observe(DetectionPath::Distress, true, t0),
            Observation::Counted { count: 1, required: 2 }
        );
        assert_eq!(sm.phase(t0), Phase::Accumulating);
        assert_eq!(sm.observe(DetectionPath::Distress, true, t0), Observation::Fire);
        assert_eq!(sm.phase(t0), Phase::Triggered);
        assert_eq!(sm.consecutive_positives(DetectionPath::Distress), 0);
    }

    #[test]
    fn negatives_decrement_with_floor() {
        let mut sm = DetectionStateMachine::default();
        let t0 = Instant::now();
        sm.observe(DetectionPath::Keyword, true, t0);
        sm.observe(DetectionPath::Keyword, true, t0);
        sm.observe(DetectionPath::Keyword, false, t0);
        assert_eq!(sm.consecutive_positives(DetectionPath::Keyword), 1);
        sm.observe(DetectionPath::Keyword, false, t0);
        sm.observe(DetectionPath::Keyword, false, t0);
        assert_eq!(sm.consecutive_positives(DetectionPath::Keyword), 0);
        assert_eq!(sm.phase(t0), Phase::Idle);
    }

    #[test]
    fn no_second_fire_within_cooldown() {
        let mut sm = DetectionStateMachine::default();
        let t0 = Instant::now();
        sm.observe(DetectionPath::Distress, true, t0);
        assert_eq!(sm.observe(DetectionPath::Distress, true, t0), Observation::Fire);

        for i in 1..=100 {
            let now = t0 + Duration::from_millis(250 * i);
            for path in DetectionPath::ALL {
                assert_eq!(sm.observe(path, true, now), Observation::Suppressed);
            }
        }
        assert!(sm.in_cooldown(t0 + Duration::from_secs(29)));
        assert_eq!(sm.phase(t0 + Duration::from_secs(29)), Phase::Cooldown);
    }

    #[test]
    fn firing_resets_every_path() {
        let mut sm = DetectionStateMachine::default();
        let t0 = Instant::now();
        sm.observe(DetectionPath::Ambient, true, t0);
        sm.observe(DetectionPath::Ambient, true, t0);
        sm.observe(DetectionPath::Keyword, true, t0);
        sm.observe(DetectionPath::Distress, true, t0);
        assert_eq!(sm.observe(DetectionPath::Distress, true, t0), Observation::Fire);
        for path in DetectionPath::ALL {
            assert_eq!(sm.consecutive_positives(path), 0);
        }
    }

    #[test]
    fn rearms_after_cooldown() {
        let mut sm = DetectionStateMachine::default();
        let t0 = Instant::now();
        sm.observe(DetectionPath::Distress, true, t0);
        sm.observe(DetectionPath::Distress, true, t0);

        let later = t0 + Duration::from_secs(30);
        assert_eq!(sm.phase(later), Phase::Idle);
        assert!(!sm.in_cooldown(later));
        assert_eq!(
            sm.observe(DetectionPath::Distress, true, later),
            Observation::Counted { count: 1, required: 2 }
        );
        assert_eq!(sm.observe(DetectionPath::Distress, true, later), Observation::Fire);
    }

    #[test]
    fn reset_discards_cooldown() {
        let mut sm = DetectionStateMachine::default();
        let t0 = Instant::now();
        sm.observe(DetectionPath::Distress, true, t0);
        sm.observe(DetectionPath::Distress, true, t0);
        sm.reset();
        assert!(sm.cooldown_until().is_none());
        assert_eq!(sm.phase(t0), Phase::Idle);
    }

    #[test]
    fn zero_counts_are_sanitized() {
        let sm = DetectionStateMachine::new(DetectionConfig {
            distress_required: 0,
            ambient_required: 5,
            keyword_required: 0,
            cooldown_secs: 10,
        });
        assert_eq!(sm.config().distress_required, 2);
        assert_eq!(sm.config().ambient_required, 5);
        assert_eq!(sm.config().keyword_required, 3);
        assert_eq!(sm.config().cooldown(), Duration::from_secs(10));
    }
}
