use headcount_core::config::TrackerConfig;
use headcount_core::sinks::{LogDisplaySink, LogNotificationSink, SinkSet};
use headcount_core::tracker::LifecycleTracker;
use headcount_types::ServerKey;

pub struct AppState {
    pub config: TrackerConfig,
    pub tracker: LifecycleTracker,
    pub sinks: SinkSet,
    /// Server that `line`, `counts`, and `reset` act on.
    pub active_server: Option<ServerKey>,
}

impl AppState {
    pub fn new() -> Self {
        let config = TrackerConfig::load().unwrap_or_default();
        let active_server = config.servers.first().map(|s| s.key());

        let mut sinks = SinkSet::new();
        sinks.add_notification_sink(Box::new(LogNotificationSink));
        sinks.add_display_sink(Box::new(LogDisplaySink));

        Self {
            config,
            tracker: LifecycleTracker::new(),
            sinks,
            active_server,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
