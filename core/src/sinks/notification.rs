use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the lifecycle a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Join,
    Leave,
}

/// Announcement request handed to a notification sink.
///
/// The tracker's state is already committed when this is produced; delivery
/// failures are the sink's concern and never roll counters back. The sink
/// picks one of `candidate_messages` — selection policy is not prescribed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub kind: EventKind,
    pub player_id: String,
    pub player_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub candidate_messages: Vec<String>,
}

impl NotificationPayload {
    /// Build a join announcement. Falls back to the raw id when no display
    /// name was seen on the player's queue record.
    pub fn join(player_id: String, player_name: Option<String>) -> Self {
        let shown = player_name.as_deref().unwrap_or(&player_id);
        let candidate_messages = join_messages(shown);
        Self {
            kind: EventKind::Join,
            player_id,
            player_name,
            timestamp: Utc::now(),
            candidate_messages,
        }
    }

    /// Build a leave announcement.
    pub fn leave(player_id: String, player_name: Option<String>) -> Self {
        let shown = player_name.as_deref().unwrap_or(&player_id);
        let candidate_messages = leave_messages(shown);
        Self {
            kind: EventKind::Leave,
            player_id,
            player_name,
            timestamp: Utc::now(),
            candidate_messages,
        }
    }
}

fn join_messages(name: &str) -> Vec<String> {
    vec![
        format!("🎮 {name} joined the server!"),
        format!("🌟 Welcome {name} to the battlefield!"),
        format!("⚔️ {name} has entered the game!"),
        format!("🎯 {name} is ready for action!"),
    ]
}

fn leave_messages(name: &str) -> Vec<String> {
    vec![
        format!("👋 {name} left the server"),
        format!("🚪 {name} disconnected from the battlefield"),
        format!("⏰ {name} has ended their session"),
        format!("🔚 {name} signed off"),
    ]
}
