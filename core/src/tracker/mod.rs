//! The lifecycle tracker: map of server keys to owned lifecycle state.
//!
//! The tracker is the only owner of [`ServerState`] instances. State for a
//! key is created lazily on first reference and destroyed only by `reset`
//! (the log-rotation epoch boundary). Classification of close records reads
//! the same state it mutates, so each key's state sits behind its own mutex:
//! one in-flight `apply` per key, independent keys fully concurrent.
//!
//! `apply` is fast and never blocks on I/O. Side effects come back as
//! request objects inside [`Applied`]; hosts execute them after the call
//! returns (see [`crate::sinks`]).

use std::sync::Arc;

use hashbrown::HashMap;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use headcount_types::{LiveCounts, ServerKey, formatting};

use crate::connection_log::classify_line;
use crate::lifecycle::{LifecycleEvent, ServerState, Transition};
use crate::sinks::NotificationPayload;


/// Result of feeding one raw line through the tracker.
///
/// `counts` always reflects the key's current values, even when the line
/// produced no event. `display_label` is present for every applied event,
/// including idempotent re-applies; deduplication belongs to the display
/// sink.
#[derive(Debug, Clone, Serialize)]
pub struct Applied {
    pub counts: LiveCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<LifecycleEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
}

impl Applied {
    fn counts_only(counts: LiveCounts) -> Self {
        Self {
            counts,
            event: None,
            notification: None,
            display_label: None,
        }
    }
}

/// Owns all per-server lifecycle state.
#[derive(Default)]
pub struct LifecycleTracker {
    servers: RwLock<HashMap<ServerKey, Arc<Mutex<ServerState>>>>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one raw log line for `key` and apply the resulting event.
    ///
    /// Lines that match no record shape, and close records for untracked
    /// ids, leave state untouched and produce no side-effect requests.
    pub async fn apply(&self, key: &ServerKey, raw_line: &str) -> Applied {
        let state = self.state_for(key).await;
        let mut state = state.lock().await;

        let Some(matched) = classify_line(raw_line) else {
            return Applied::counts_only(state.live_counts());
        };

        let Some(transition) = state.apply_match(matched) else {
            tracing::debug!(server = %key, "close record for untracked id, dropped");
            return Applied::counts_only(state.live_counts());
        };

        let Transition {
            event,
            first_seen,
            counts,
        } = transition;

        log_transition(key, &event);

        let notification = match &event {
            LifecycleEvent::PlayerJoined { player_id } if first_seen => Some(
                NotificationPayload::join(
                    player_id.clone(),
                    state.display_name(player_id).map(str::to_owned),
                ),
            ),
            LifecycleEvent::DisconnectPostJoin { player_id } if first_seen => Some(
                NotificationPayload::leave(
                    player_id.clone(),
                    state.display_name(player_id).map(str::to_owned),
                ),
            ),
            _ => None,
        };

        tracing::info!(
            server = %key,
            players = counts.player_count,
            queue = counts.queue_count,
            "live counts"
        );

        Applied {
            display_label: Some(formatting::channel_label(
                counts.player_count,
                counts.queue_count,
            )),
            counts,
            event: Some(event),
            notification,
        }
    }

    /// Snapshot of the key's current counters.
    ///
    /// Never errors: a key that was never seen initializes empty and reports
    /// zero activity.
    pub async fn live_counts(&self, key: &ServerKey) -> LiveCounts {
        let state = self.state_for(key).await;
        let state = state.lock().await;
        state.live_counts()
    }

    /// Discard all lifecycle state for the key, ending its epoch.
    ///
    /// No-op for unknown keys. The next event for the key reinitializes
    /// from empty, which is exactly what a log rotation needs.
    pub async fn reset(&self, key: &ServerKey) {
        let mut servers = self.servers.write().await;
        if servers.remove(key).is_some() {
            tracing::info!(server = %key, "lifecycle state reset");
        }
    }

    /// Keys with live state, for host status surfaces.
    pub async fn tracked_keys(&self) -> Vec<ServerKey> {
        self.servers.read().await.keys().cloned().collect()
    }

    async fn state_for(&self, key: &ServerKey) -> Arc<Mutex<ServerState>> {
        {
            let servers = self.servers.read().await;
            if let Some(state) = servers.get(key) {
                return Arc::clone(state);
            }
        }

        let mut servers = self.servers.write().await;
        Arc::clone(servers.entry(key.clone()).or_default())
    }
}

fn log_transition(key: &ServerKey, event: &LifecycleEvent) {
    match event {
        LifecycleEvent::QueueJoin { player_id, .. } => {
            tracing::info!(server = %key, player = %player_id, "queue join");
        }
        LifecycleEvent::PlayerJoined { player_id } => {
            tracing::info!(server = %key, player = %player_id, "player registered");
        }
        LifecycleEvent::DisconnectPostJoin { player_id } => {
            tracing::info!(server = %key, player = %player_id, "post-join disconnect");
        }
        LifecycleEvent::DisconnectPreJoin { player_id } => {
            tracing::info!(server = %key, player = %player_id, "pre-join disconnect");
        }
    }
}
