//! Callbacks into the alerting subsystem.

use std::sync::Arc;

use aegis_distress::EmergencyClassification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::state::DetectionPath;

/// A triggered emergency episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyEvent {
    pub classification: EmergencyClassification,
    /// Path that reached its trigger count.
    pub path: DetectionPath,
    /// Recognized text that fired the keyword path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggering_text: Option<String>,
    pub detected_at: DateTime<Utc>,
}

impl EmergencyEvent {
    pub fn new(classification: EmergencyClassification, path: DetectionPath) -> Self {
        Self {
            classification,
            path,
            triggering_text: None,
            detected_at: Utc::now(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.triggering_text = Some(text.into());
        self
    }
}

/// Receives engine notifications.
///
/// Called from the session worker; implementations must return quickly.
pub trait DetectionListener: Send + Sync {
    /// At most once per episode.
    fn on_emergency_detected(&self, event: &EmergencyEvent);

    /// `true` when a session starts listening, `false` when it stops.
    fn on_status_changed(&self, listening: bool);
}

/// Returns the default listener that logs through `tracing`.
pub fn default_listener() -> Arc<dyn DetectionListener> {
    Arc::new(TracingListener)
}

/// Logs every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl DetectionListener for TracingListener {
    fn on_emergency_detected(&self, event: &EmergencyEvent) {
        warn!(
            emergency_type = %event.classification.emergency_type,
            confidence = event.classification.confidence,
            path = %event.path,
            text = event.triggering_text.as_deref().unwrap_or(""),
            "engine: emergency detected"
        );
    }

    fn on_status_changed(&self, listening: bool) {
        info!(listening, "engine: status changed");
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopListener;

impl DetectionListener for NopListener {
    fn on_emergency_detected(&self, _event: &EmergencyEvent) {}
    fn on_status_changed(&self, _listening: bool) {}
}

/// A notification forwarded by [`ChannelListener`].
#[derive(Debug, Clone, PartialEq)]
pub enum ListenerEvent {
    Emergency(EmergencyEvent),
    Status(bool),
}

/// Forwards notifications to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: mpsc::UnboundedSender<ListenerEvent>,
}

impl ChannelListener {
    /// Creates the listener and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ListenerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DetectionListener for ChannelListener {
    fn on_emergency_detected(&self, event: &EmergencyEvent) {
        if self.tx.send(ListenerEvent::Emergency(event.clone())).is_err() {
            warn!("engine: listener channel closed, event dropped");
        }
    }

    fn on_status_changed(&self, listening: bool) {
        if self.tx.send(ListenerEvent::Status(listening)).is_err() {
            warn!(listening, "engine: listener channel closed, status dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_distress::EmergencyType;

    #[test]
    fn event_json_shape() {
        let event = EmergencyEvent::new(
            EmergencyClassification::new(EmergencyType::Robbery, 0.8),
            DetectionPath::Keyword,
        )
        .with_text("i just got robbed");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["classification"]["type"], "ROBBERY");
        assert_eq!(json["path"], "keyword");
        assert_eq!(json["triggering_text"], "i just got robbed");
        assert!(json["detected_at"].is_string());

        let plain = EmergencyEvent::new(EmergencyClassification::none(), DetectionPath::Ambient);
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("triggering_text").is_none());
    }

    #[test]
    fn channel_listener_forwards() {
        let (listener, mut rx) = ChannelListener::new();
        listener.on_status_changed(true);
        let event = EmergencyEvent::new(
            EmergencyClassification::new(EmergencyType::Fire, 0.9),
            DetectionPath::Ambient,
        );
        listener.on_emergency_detected(&event);
        assert_eq!(rx.try_recv().unwrap(), ListenerEvent::Status(true));
        assert_eq!(rx.try_recv().unwrap(), ListenerEvent::Emergency(event));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_channel_is_not_fatal() {
        let event = EmergencyEvent::new(
            EmergencyClassification::new(EmergencyType::Fire, 0.9),
            DetectionPath::Ambient,
        );
        let (listener, rx) = ChannelListener::new();
        drop(rx);
        // Both notifications are dropped with a warning.
        listener.on_status_changed(false);
        listener.on_emergency_detected(&event);
        listener.on_status_changed(true);
        NopListener.on_status_changed(true);
        default_listener().on_status_changed(true);
    }
}
