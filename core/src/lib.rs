pub mod config;
pub mod connection_log;
pub mod lifecycle;
pub mod sinks;
pub mod tracker;

// Re-exports for convenience
pub use connection_log::{LineMatch, classify_line};
pub use headcount_types::{LiveCounts, ServerKey};
pub use lifecycle::{LifecycleEvent, ServerState};
pub use sinks::{DisplaySink, EventKind, NotificationPayload, NotificationSink, SinkSet};
pub use tracker::{Applied, LifecycleTracker};
