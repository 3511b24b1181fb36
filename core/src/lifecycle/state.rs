use hashbrown::{HashMap, HashSet};
use headcount_types::LiveCounts;

use crate::connection_log::LineMatch;

use super::LifecycleEvent;

/// Lifecycle state for one server within one tracking epoch.
///
/// Pure storage plus the transition function; locking and side-effect
/// assembly live in the tracker. Sets only ever grow until the epoch is
/// discarded by a reset, so `live_counts` is a pure function of set sizes.
#[derive(Debug, Clone, Default)]
pub struct ServerState {
    /// Players who issued a queue-join this epoch.
    queued: HashSet<String>,
    /// Players who completed registration at least once this epoch.
    joined: HashSet<String>,
    /// Players who left while queued, never having joined.
    left_pre_join: HashSet<String>,
    /// Players who left after having joined.
    left_post_join: HashSet<String>,
    /// Display names seen on queue-join records, for notification payloads.
    display_names: HashMap<String, String>,
}

/// Outcome of applying one matched line to server state.
#[derive(Debug, Clone)]
pub struct Transition {
    pub event: LifecycleEvent,
    /// False when the insertion was an idempotent re-apply.
    pub first_seen: bool,
    /// Counts recomputed after the mutation.
    pub counts: LiveCounts,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the live counters from cumulative set sizes.
    ///
    /// `queue = max(0, queued - joined - left_pre_join)`
    /// `players = max(0, joined - left_post_join)`
    pub fn live_counts(&self) -> LiveCounts {
        let queued = self.queued.len() as i64;
        let joined = self.joined.len() as i64;
        let left_pre = self.left_pre_join.len() as i64;
        let left_post = self.left_post_join.len() as i64;

        LiveCounts {
            queue_count: (queued - joined - left_pre).max(0) as u32,
            player_count: (joined - left_post).max(0) as u32,
        }
    }

    /// Whether this player queued at any point in the current epoch.
    pub fn ever_queued(&self, player_id: &str) -> bool {
        self.queued.contains(player_id)
    }

    /// Whether this player joined at any point in the current epoch.
    /// Membership is monotonic; this is not "currently connected".
    pub fn ever_joined(&self, player_id: &str) -> bool {
        self.joined.contains(player_id)
    }

    /// Display name recorded from the player's queue-join record, if any.
    pub fn display_name(&self, player_id: &str) -> Option<&str> {
        self.display_names.get(player_id).map(String::as_str)
    }

    /// Resolve a lexical match into a lifecycle transition and apply it.
    ///
    /// Close records are disambiguated here, under the same borrow that
    /// mutates the sets: the decision between pre- and post-join reads state
    /// that a separate lookup step could see mid-change.
    ///
    /// Returns `None` for close records whose id is tracked in neither
    /// direction (noise from a previous epoch or an untracked connection).
    pub fn apply_match(&mut self, matched: LineMatch) -> Option<Transition> {
        match matched {
            LineMatch::QueueJoin {
                player_id,
                player_name,
            } => {
                self.display_names
                    .insert(player_id.clone(), player_name.clone());
                let first_seen = self.queued.insert(player_id.clone());
                Some(self.transition(
                    LifecycleEvent::QueueJoin {
                        player_id,
                        player_name: Some(player_name),
                    },
                    first_seen,
                ))
            }

            LineMatch::Registered { player_id } => {
                let first_seen = self.joined.insert(player_id.clone());
                Some(self.transition(LifecycleEvent::PlayerJoined { player_id }, first_seen))
            }

            LineMatch::ChannelCloseEos { player_id } => {
                if self.joined.contains(&player_id) {
                    let first_seen = self.left_post_join.insert(player_id.clone());
                    Some(self.transition(
                        LifecycleEvent::DisconnectPostJoin { player_id },
                        first_seen,
                    ))
                } else if self.queued.contains(&player_id) {
                    let first_seen = self.left_pre_join.insert(player_id.clone());
                    Some(self.transition(
                        LifecycleEvent::DisconnectPreJoin { player_id },
                        first_seen,
                    ))
                } else {
                    None
                }
            }

            // The loose form never counts against joined players
            LineMatch::ChannelCloseLoose { player_id } => {
                if self.queued.contains(&player_id) && !self.joined.contains(&player_id) {
                    let first_seen = self.left_pre_join.insert(player_id.clone());
                    Some(self.transition(
                        LifecycleEvent::DisconnectPreJoin { player_id },
                        first_seen,
                    ))
                } else {
                    None
                }
            }
        }
    }

    fn transition(&self, event: LifecycleEvent, first_seen: bool) -> Transition {
        Transition {
            event,
            first_seen,
            counts: self.live_counts(),
        }
    }
}
