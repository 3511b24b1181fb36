use serde::{Deserialize, Serialize};

/// One classified lifecycle event, fully resolved against server state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// Player entered the pre-game queue.
    QueueJoin {
        player_id: String,
        player_name: Option<String>,
    },
    /// Player completed registration into the active session.
    PlayerJoined { player_id: String },
    /// Player left after having joined.
    DisconnectPostJoin { player_id: String },
    /// Player left the queue without ever joining.
    DisconnectPreJoin { player_id: String },
}

impl LifecycleEvent {
    pub fn player_id(&self) -> &str {
        match self {
            Self::QueueJoin { player_id, .. }
            | Self::PlayerJoined { player_id }
            | Self::DisconnectPostJoin { player_id }
            | Self::DisconnectPreJoin { player_id } => player_id,
        }
    }
}
