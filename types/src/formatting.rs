//! Centralized label formatting.
//!
//! The counter label rendered into a voice-channel-like display goes through
//! this module so every surface produces the identical string; display sinks
//! compare labels verbatim to suppress no-op renames.

/// Format the live-count display label.
///
/// # Examples
/// ```
/// use headcount_types::formatting::channel_label;
/// assert_eq!(channel_label(12, 3), "Players: 12 / Queue: 3");
/// assert_eq!(channel_label(0, 0), "Players: 0 / Queue: 0");
/// ```
pub fn channel_label(player_count: u32, queue_count: u32) -> String {
    format!("Players: {player_count} / Queue: {queue_count}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LiveCounts;

    #[test]
    fn label_matches_display_contract() {
        let counts = LiveCounts {
            player_count: 48,
            queue_count: 7,
        };
        assert_eq!(
            channel_label(counts.player_count, counts.queue_count),
            "Players: 48 / Queue: 7"
        );
    }
}
