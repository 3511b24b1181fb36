use serde::{Deserialize, Serialize};

/// Live player and queue counts for one server.
///
/// Both values are derived from cumulative set sizes and clamp at zero;
/// they are never stored independently of the sets that produce them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveCounts {
    pub player_count: u32,
    pub queue_count: u32,
}

impl LiveCounts {
    pub const ZERO: Self = Self {
        player_count: 0,
        queue_count: 0,
    };
}
