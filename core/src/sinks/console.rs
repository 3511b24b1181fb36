use headcount_types::ServerKey;

use super::{DisplaySink, EventKind, NotificationPayload, NotificationSink};

/// Notification sink that writes announcements to the log.
///
/// Rotates through the candidate messages by timestamp so repeated joins
/// don't all read identically.
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn deliver(&self, payload: &NotificationPayload) {
        let picked = payload
            .candidate_messages
            .get(payload.timestamp.timestamp() as usize % payload.candidate_messages.len().max(1))
            .cloned()
            .unwrap_or_default();

        match payload.kind {
            EventKind::Join => {
                tracing::info!(player = %payload.player_id, message = %picked, "player joined")
            }
            EventKind::Leave => {
                tracing::info!(player = %payload.player_id, message = %picked, "player left")
            }
        }
    }
}

/// Display sink that logs the label instead of renaming anything.
pub struct LogDisplaySink;

impl DisplaySink for LogDisplaySink {
    fn update_label(&self, key: &ServerKey, label: &str) {
        tracing::info!(server = %key, label, "display label refresh");
    }
}
