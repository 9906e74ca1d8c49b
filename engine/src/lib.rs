//! Real-time emergency detection engine.
//!
//! This crate wires the detection crates into a running service:
//!
//! - [`Engine`]: owns one session worker fed by a frame channel and an
//!   optional transcript channel
//! - [`Session`]: per-session detection state, usable synchronously
//! - [`DetectionStateMachine`]: hysteresis counters and the shared cooldown
//! - [`DetectionListener`]: notifications toward the alerting subsystem
//! - [`AudioClassifier`]: the external embedding and scream model
//! - [`EngineConfig`]: YAML configuration under `~/.aegis/`
//!
//! # Detection paths
//!
//! ```text
//! frame ──► distress (voice-gated) ──► 2 consecutive ─┐
//!      └──► ambient scene          ──► 3 consecutive ─┼─► trigger ─► 30 s cooldown
//! text ───► intent                 ──► 3 consecutive ─┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use aegis_engine::{EngineConfig, Session, Transcript};
//! use aegis_intent::IntentCatalog;
//!
//! let mut session = Session::new(&EngineConfig::default(), IntentCatalog::builtin(), None);
//! let now = Instant::now();
//! let t = Transcript::new("there is a fire in the building");
//! assert!(session.process_transcript(&t, now).is_none());
//! assert!(session.process_transcript(&t, now).is_none());
//! assert!(session.process_transcript(&t, now).is_some());
//! ```

mod config;
mod engine;
mod error;
pub mod listener;
mod model;
mod session;
mod state;
mod stats;

pub use config::{DEFAULT_BASE_DIR, DEFAULT_CONFIG_FILE, EngineConfig};
pub use engine::{Engine, SessionInputs};
pub use error::{ClassifierError, ConfigError, EngineError};
pub use listener::{
    ChannelListener, DetectionListener, EmergencyEvent, ListenerEvent, NopListener, TracingListener,
    default_listener,
};
pub use model::{AudioClassifier, ClassifierOutput, Transcript};
pub use session::Session;
pub use state::{DetectionConfig, DetectionPath, DetectionStateMachine, Observation, Phase};
pub use stats::{EngineStats, StatsSnapshot};
