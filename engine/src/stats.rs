use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Session counters, readable while the worker runs.
#[derive(Debug, Default)]
pub struct EngineStats {
    frames_processed: AtomicU64,
    frames_skipped: AtomicU64,
    inference_failures: AtomicU64,
    transcripts_processed: AtomicU64,
    triggers: AtomicU64,
}

/// Point-in-time copy of [`EngineStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub inference_failures: u64,
    pub transcripts_processed: u64,
    pub triggers: u64,
}

impl EngineStats {
    pub(crate) fn frame_processed(&self) {
        self.frames_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn frame_skipped(&self) {
        self.frames_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inference_failed(&self) {
        self.inference_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn transcript_processed(&self) {
        self.transcripts_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn triggered(&self) {
        self.triggers.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn reset(&self) {
        for counter in [
            &self.frames_processed,
            &self.frames_skipped,
            &self.inference_failures,
            &self.transcripts_processed,
            &self.triggers,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames_processed: self.frames_processed.load(Ordering::Relaxed),
            frames_skipped: self.frames_skipped.load(Ordering::Relaxed),
            inference_failures: self.inference_failures.load(Ordering::Relaxed),
            transcripts_processed: self.transcripts_processed.load(Ordering::Relaxed),
            triggers: self.triggers.load(Ordering::Relaxed),
        }
    }
}
