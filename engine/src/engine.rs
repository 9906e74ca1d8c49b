use std::sync::Arc;
use std::time::Duration;

use aegis_audio::{frame, EMBEDDING_DIM};
use aegis_distress::AudioAnalysisSample;
use aegis_intent::IntentCatalog;
use aegis_voiceprint::{EnrolledVoiceProfile, FileProfileStore, ProfileStore};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::listener::DetectionListener;
use crate::model::{AudioClassifier, Transcript};
use crate::session::Session;
use crate::stats::{EngineStats, StatsSnapshot};

/// Inputs of one monitoring session.
///
/// Closing `frames` ends the session. `transcripts` is optional; closing it
/// only stops the keyword path.
pub struct SessionInputs {
    pub frames: mpsc::Receiver<Vec<i16>>,
    pub transcripts: Option<mpsc::Receiver<Transcript>>,
}

impl SessionInputs {
    pub fn new(frames: mpsc::Receiver<Vec<i16>>) -> Self {
        Self {
            frames,
            transcripts: None,
        }
    }

    pub fn with_transcripts(mut self, transcripts: mpsc::Receiver<Transcript>) -> Self {
        self.transcripts = Some(transcripts);
        self
    }
}

struct Worker {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs monitoring sessions on a dedicated tokio task.
///
/// At most one session runs at a time. Each frame is classified by the
/// external [`AudioClassifier`], analyzed, and fed to the detection state
/// machine; triggers are reported to the [`DetectionListener`].
pub struct Engine {
    config: Arc<EngineConfig>,
    classifier: Arc<dyn AudioClassifier>,
    listener: Arc<dyn DetectionListener>,
    catalog: Arc<IntentCatalog>,
    profiles: Option<Arc<dyn ProfileStore>>,
    stats: Arc<EngineStats>,
    worker: Mutex<Option<Worker>>,
}

impl Engine {
    /// Creates an engine with the built-in intent catalog and no enrolled
    /// profile. The config is validated first.
    pub fn new(
        config: EngineConfig,
        classifier: Arc<dyn AudioClassifier>,
        listener: Arc<dyn DetectionListener>,
    ) -> Self {
        Self {
            config: Arc::new(config.validated()),
            classifier,
            listener,
            catalog: IntentCatalog::builtin(),
            profiles: None,
            stats: Arc::new(EngineStats::default()),
            worker: Mutex::new(None),
        }
    }

    /// Creates an engine, loading the intent catalog and profile store named
    /// in the config.
    pub fn from_config(
        config: EngineConfig,
        classifier: Arc<dyn AudioClassifier>,
        listener: Arc<dyn DetectionListener>,
    ) -> Result<Self, EngineError> {
        let catalog = match &config.intent_catalog {
            Some(path) => Some(IntentCatalog::load(path)?),
            None => None,
        };
        let profile_path = config.profile_path.clone();

        let mut engine = Self::new(config, classifier, listener);
        if let Some(catalog) = catalog {
            engine = engine.with_catalog(Arc::new(catalog));
        }
        if let Some(path) = profile_path {
            engine = engine.with_profile_store(Arc::new(FileProfileStore::new(path)));
        }
        Ok(engine)
    }

    pub fn with_catalog(mut self, catalog: Arc<IntentCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_profile_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.profiles = Some(store);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts a session on a new task of the current tokio runtime. Returns
    /// `false` without side effects when one is already running.
    pub fn start(&self, inputs: SessionInputs) -> bool {
        let mut worker = self.worker.lock();
        if worker.as_ref().is_some_and(|w| !w.handle.is_finished()) {
            debug!("engine: already running");
            return false;
        }

        let profile = self.load_profile();
        let session = Session::new(&self.config, Arc::clone(&self.catalog), profile);
        info!(voice_gated = session.is_voice_gated(), "engine: session starting");

        self.stats.reset();
        let cancel = CancellationToken::new();
        let ctx = WorkerContext {
            classifier: Arc::clone(&self.classifier),
            listener: Arc::clone(&self.listener),
            stats: Arc::clone(&self.stats),
            frame_interval: Duration::from_millis(self.config.frame_interval_ms),
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(run_session(session, inputs, ctx));
        *worker = Some(Worker { cancel, handle });
        true
    }

    /// Stops the running session and waits for the worker to exit. Pending
    /// cooldown is discarded with the session.
    pub async fn stop(&self) {
        let worker = self.worker.lock().take();
        if let Some(w) = worker {
            w.cancel.cancel();
            if let Err(e) = w.handle.await {
                warn!(error = %e, "engine: worker ended abnormally");
            }
        }
    }

    /// Waits for the running session to end on its own, when its frame
    /// channel closes.
    pub async fn wait(&self) {
        let worker = self.worker.lock().take();
        if let Some(w) = worker {
            if let Err(e) = w.handle.await {
                warn!(error = %e, "engine: worker ended abnormally");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn load_profile(&self) -> Option<EnrolledVoiceProfile> {
        let store = self.profiles.as_ref()?;
        match store.load() {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "engine: enrolled profile unusable, running ambient-only");
                None
            }
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(w) = self.worker.get_mut().take() {
            w.cancel.cancel();
        }
    }
}

struct WorkerContext {
    classifier: Arc<dyn AudioClassifier>,
    listener: Arc<dyn DetectionListener>,
    stats: Arc<EngineStats>,
    frame_interval: Duration,
    cancel: CancellationToken,
}

enum Input {
    Cancelled,
    Transcript(Option<Transcript>),
    Frame(Option<Vec<i16>>),
}

async fn next_transcript(rx: &mut Option<mpsc::Receiver<Transcript>>) -> Option<Transcript> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

async fn run_session(mut session: Session, inputs: SessionInputs, ctx: WorkerContext) {
    let SessionInputs {
        mut frames,
        mut transcripts,
    } = inputs;
    ctx.listener.on_status_changed(true);
    info!("engine: listening");

    loop {
        let input = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => Input::Cancelled,
            t = next_transcript(&mut transcripts) => Input::Transcript(t),
            f = frames.recv() => Input::Frame(f),
        };

        match input {
            Input::Cancelled => break,
            Input::Transcript(None) => {
                debug!("engine: transcript channel closed");
                transcripts = None;
            }
            Input::Transcript(Some(t)) => {
                ctx.stats.transcript_processed();
                if let Some(event) = session.process_transcript(&t, now()) {
                    ctx.stats.triggered();
                    info!(
                        emergency_type = %event.classification.emergency_type,
                        path = %event.path,
                        "engine: trigger"
                    );
                    ctx.listener.on_emergency_detected(&event);
                }
            }
            Input::Frame(None) => {
                debug!("engine: frame channel closed");
                break;
            }
            Input::Frame(Some(pcm)) => {
                if let Err(e) = frame::validate_frame(&pcm) {
                    warn!(error = %e, "engine: frame skipped");
                    ctx.stats.frame_skipped();
                    continue;
                }

                let result = tokio::select! {
                    biased;
                    _ = ctx.cancel.cancelled() => break,
                    r = ctx.classifier.classify(&pcm) => r,
                };
                let output = match result {
                    Ok(output) => output,
                    Err(e) => {
                        warn!(error = %e, "engine: inference failed, frame skipped");
                        ctx.stats.inference_failed();
                        continue;
                    }
                };
                if output.embedding.len() != EMBEDDING_DIM || !output.scream_probability.is_finite() {
                    warn!(
                        dim = output.embedding.len(),
                        p = output.scream_probability,
                        "engine: malformed model output, frame skipped"
                    );
                    ctx.stats.frame_skipped();
                    continue;
                }

                let sample = AudioAnalysisSample::new(pcm, output.embedding, output.scream_probability);
                let event = session.process_frame(&sample, now());
                ctx.stats.frame_processed();
                if let Some(event) = event {
                    ctx.stats.triggered();
                    info!(
                        emergency_type = %event.classification.emergency_type,
                        confidence = event.classification.confidence,
                        path = %event.path,
                        "engine: trigger"
                    );
                    ctx.listener.on_emergency_detected(&event);
                }

                if !ctx.frame_interval.is_zero() {
                    tokio::select! {
                        biased;
                        _ = ctx.cancel.cancelled() => break,
                        _ = tokio::time::sleep(ctx.frame_interval) => {}
                    }
                }
            }
        }
    }

    ctx.listener.on_status_changed(false);
    info!("engine: stopped listening");
}
