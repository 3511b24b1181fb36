//! Side-effect seams between the tracker and its host.
//!
//! The tracker never performs I/O. Each `apply` returns request objects
//! (a notification payload, a display label) and a [`SinkSet`] fans them out
//! to whatever adapters the host registered. Execution timing, retries, rate
//! limits, and no-op suppression all belong to the adapters; by the time a
//! sink runs, tracker state is committed and cannot be rolled back.

mod console;
mod notification;

pub use console::{LogDisplaySink, LogNotificationSink};
pub use notification::{EventKind, NotificationPayload};

use headcount_types::ServerKey;

use crate::tracker::Applied;

/// Delivers join/leave announcements (message selection and formatting
/// included).
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, payload: &NotificationPayload);
}

/// Applies the live-count label to a display surface, e.g. renaming a
/// counter channel. Implementations are expected to skip the rename when the
/// label is unchanged; the tracker re-emits it on every applied event.
pub trait DisplaySink: Send + Sync {
    fn update_label(&self, key: &ServerKey, label: &str);
}

/// Registered adapters for one host.
#[derive(Default)]
pub struct SinkSet {
    notification_sinks: Vec<Box<dyn NotificationSink>>,
    display_sinks: Vec<Box<dyn DisplaySink>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notification_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.notification_sinks.push(sink);
    }

    pub fn add_display_sink(&mut self, sink: Box<dyn DisplaySink>) {
        self.display_sinks.push(sink);
    }

    /// Fan one apply result out to every registered sink.
    pub fn dispatch(&self, key: &ServerKey, applied: &Applied) {
        if let Some(payload) = &applied.notification {
            for sink in &self.notification_sinks {
                sink.deliver(payload);
            }
        }
        if let Some(label) = &applied.display_label {
            for sink in &self.display_sinks {
                sink.update_label(key, label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headcount_types::LiveCounts;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingNotificationSink {
        delivered: Arc<Mutex<Vec<NotificationPayload>>>,
    }

    impl NotificationSink for RecordingNotificationSink {
        fn deliver(&self, payload: &NotificationPayload) {
            self.delivered.lock().unwrap().push(payload.clone());
        }
    }

    #[derive(Clone, Default)]
    struct RecordingDisplaySink {
        labels: Arc<Mutex<Vec<(ServerKey, String)>>>,
    }

    impl DisplaySink for RecordingDisplaySink {
        fn update_label(&self, key: &ServerKey, label: &str) {
            self.labels
                .lock()
                .unwrap()
                .push((key.clone(), label.to_string()));
        }
    }

    fn applied(notification: Option<NotificationPayload>, label: Option<&str>) -> Applied {
        Applied {
            counts: LiveCounts::ZERO,
            event: None,
            notification,
            display_label: label.map(str::to_string),
        }
    }

    #[test]
    fn dispatch_routes_each_request_to_its_sinks() {
        let notes = RecordingNotificationSink::default();
        let labels = RecordingDisplaySink::default();

        let mut sinks = SinkSet::new();
        sinks.add_notification_sink(Box::new(notes.clone()));
        sinks.add_display_sink(Box::new(labels.clone()));

        let key = ServerKey::new(9, "srv");
        let payload = NotificationPayload::join("abc".into(), None);
        sinks.dispatch(&key, &applied(Some(payload), Some("Players: 1 / Queue: 0")));

        assert_eq!(notes.delivered.lock().unwrap().len(), 1);
        let recorded = labels.labels.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].1, "Players: 1 / Queue: 0");
    }

    #[test]
    fn dispatch_without_requests_is_silent() {
        let notes = RecordingNotificationSink::default();
        let labels = RecordingDisplaySink::default();

        let mut sinks = SinkSet::new();
        sinks.add_notification_sink(Box::new(notes.clone()));
        sinks.add_display_sink(Box::new(labels.clone()));

        sinks.dispatch(&ServerKey::new(9, "srv"), &applied(None, None));

        assert!(notes.delivered.lock().unwrap().is_empty());
        assert!(labels.labels.lock().unwrap().is_empty());
    }
}
