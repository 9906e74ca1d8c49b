//! Trace replay through the detection engine.
//!
//! A trace is JSON Lines, one record per analysis frame:
//!
//! ```json
//! {"scream_probability": 0.7, "rms": 0.3, "classes": {"394": 0.8}, "text": "help"}
//! ```
//!
//! `classes` is a sparse view of the 521-value embedding. `text`, when
//! present, is delivered as a final transcript just before the frame.

use std::collections::{HashMap, VecDeque};
use std::f32::consts::{PI, SQRT_2};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::Args;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use aegis_audio::{EMBEDDING_DIM, FRAME_SAMPLES, SAMPLE_RATE};
use aegis_engine::{
    AudioClassifier, ChannelListener, ClassifierError, ClassifierOutput, EmergencyEvent, Engine, ListenerEvent,
    SessionInputs, StatsSnapshot, Transcript,
};

use super::{get_config, output_result, print_info, print_verbose};
use crate::Cli;

/// Replay a recorded model trace and report triggered emergencies.
#[derive(Args)]
pub struct ReplayCommand {
    /// JSONL trace file
    file: String,

    /// Pause between records in milliseconds
    #[arg(long, default_value_t = 40)]
    interval_ms: u64,
}

/// One recorded frame.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceRecord {
    pub scream_probability: f32,
    /// Normalized loudness of the synthesized frame.
    #[serde(default)]
    pub rms: f32,
    #[serde(default)]
    pub classes: HashMap<usize, f32>,
    #[serde(default)]
    pub text: Option<String>,
}

impl TraceRecord {
    fn embedding(&self) -> Vec<f32> {
        let mut v = vec![0.0; EMBEDDING_DIM];
        for (&i, &value) in &self.classes {
            if let Some(slot) = v.get_mut(i) {
                *slot = value;
            }
        }
        v
    }
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    records: usize,
    events: Vec<EmergencyEvent>,
    stats: StatsSnapshot,
}

/// Returns recorded outputs in order; fails once the trace is exhausted.
struct TraceClassifier {
    outputs: Mutex<VecDeque<ClassifierOutput>>,
}

#[async_trait]
impl AudioClassifier for TraceClassifier {
    async fn classify(&self, _frame: &[i16]) -> Result<ClassifierOutput, ClassifierError> {
        self.outputs
            .lock()
            .pop_front()
            .ok_or_else(|| ClassifierError::Inference("trace exhausted".into()))
    }
}

impl ReplayCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let records = read_trace(&self.file)?;
        print_verbose(cli, &format!("{} records from {}", records.len(), self.file));

        let mut cfg = get_config(cli)?;
        // Pacing comes from the replay loop.
        cfg.frame_interval_ms = 0;

        let classifier = TraceClassifier {
            outputs: Mutex::new(
                records
                    .iter()
                    .map(|r| ClassifierOutput {
                        embedding: r.embedding(),
                        scream_probability: r.scream_probability,
                    })
                    .collect(),
            ),
        };
        let (listener, mut events_rx) = ChannelListener::new();
        let engine = Engine::from_config(cfg, Arc::new(classifier), Arc::new(listener))?;

        let (frames_tx, frames_rx) = mpsc::channel(1);
        let (text_tx, text_rx) = mpsc::channel(1);
        engine.start(SessionInputs::new(frames_rx).with_transcripts(text_rx));
        debug!(records = records.len(), interval_ms = self.interval_ms, "replay: started");

        let interval = Duration::from_millis(self.interval_ms);
        for record in &records {
            if let Some(text) = &record.text {
                text_tx.send(Transcript::new(text.clone())).await?;
            }
            frames_tx.send(synth_frame(record.rms)).await?;
            if !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
        }
        drop(text_tx);
        drop(frames_tx);
        engine.wait().await;

        let mut events = Vec::new();
        while let Ok(e) = events_rx.try_recv() {
            if let ListenerEvent::Emergency(event) = e {
                events.push(event);
            }
        }
        if events.is_empty() {
            print_info("no emergency detected");
        }

        let report = ReplayReport {
            records: records.len(),
            events,
            stats: engine.stats(),
        };
        output_result(&report, cli.output.as_deref(), cli.json)
    }
}

fn read_trace(path: impl AsRef<Path>) -> anyhow::Result<Vec<TraceRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    parse_trace(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}

fn parse_trace(content: &str) -> anyhow::Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record: TraceRecord =
            serde_json::from_str(line).map_err(|e| anyhow::anyhow!("line {}: {}", n + 1, e))?;
        records.push(record);
    }
    Ok(records)
}

/// A 440 Hz tone whose normalized RMS is `rms`.
fn synth_frame(rms: f32) -> Vec<i16> {
    let amplitude = (rms.clamp(0.0, 1.0) * SQRT_2 * 32767.0).min(32767.0);
    let step = 2.0 * PI * 440.0 / SAMPLE_RATE as f32;
    (0..FRAME_SAMPLES)
        .map(|i| (amplitude * (step * i as f32).sin()) as i16)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_audio::signal;

    #[test]
    fn parses_sparse_records() {
        let trace = "# scream then alarm\n\
            {\"scream_probability\": 0.7, \"rms\": 0.3}\n\
            \n\
            {\"scream_probability\": 0.1, \"classes\": {\"394\": 0.8, \"9999\": 1.0}, \"text\": \"fire\"}\n";
        let records = parse_trace(trace).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rms, 0.3);
        assert!(records[0].text.is_none());

        let embedding = records[1].embedding();
        assert_eq!(embedding.len(), EMBEDDING_DIM);
        assert_eq!(embedding[394], 0.8);
        assert_eq!(records[1].text.as_deref(), Some("fire"));
    }

    #[test]
    fn bad_line_is_reported() {
        let err = parse_trace("{\"rms\": 0.3}\n").unwrap_err();
        assert!(err.to_string().starts_with("line 1"));
    }

    #[test]
    fn synthesized_frame_has_requested_loudness() {
        let frame = synth_frame(0.2);
        assert_eq!(frame.len(), FRAME_SAMPLES);
        assert!((signal::rms(&frame) - 0.2).abs() < 0.01);
        assert!(synth_frame(0.0).iter().all(|&s| s == 0));
    }
}
