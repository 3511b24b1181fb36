//! Per-server connection lifecycle state machine.
//!
//! Each player moves through an implicit state machine; states are never
//! stored as an enum, only as membership in four monotonic sets:
//!
//! ```text
//! Unknown --QueueJoin--> Queued
//! Queued  --PlayerJoined--> Joined
//! Queued  --DisconnectPreJoin--> LeftBeforeJoin   (terminal for this epoch)
//! Joined  --DisconnectPostJoin--> LeftAfterJoin   (terminal for this epoch)
//! ```
//!
//! Terminal states stay in their sets for the life of the epoch: the live
//! counters subtract cumulative leavers from cumulative joiners/queuers
//! instead of maintaining a "currently connected" set. That keeps every
//! insertion idempotent, which is what makes duplicate and out-of-order log
//! delivery harmless.

mod event;
mod state;

pub use event::LifecycleEvent;
pub use state::{ServerState, Transition};
