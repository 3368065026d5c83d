use metrics_exporter_prometheus::PrometheusHandle;
use registry_taxonomy::config::TaxonomyConfig;
use registry_taxonomy::taxonomy::{
    Dimension, Notification, NotificationKind, NotificationSink, NotifyError, Taxonomy,
};
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

const RECENT_NOTIFICATION_LIMIT: usize = 50;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) notifications: Arc<RecentNotifications>,
}

/// Notification sink that logs every message and keeps the most recent ones for the console.
#[derive(Default)]
pub(crate) struct RecentNotifications {
    events: Mutex<VecDeque<Notification>>,
}

impl RecentNotifications {
    pub(crate) fn recent(&self) -> Vec<Notification> {
        match self.events.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}

impl NotificationSink for RecentNotifications {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        match notification.kind {
            NotificationKind::Success => info!(text = %notification.message, "notification"),
            NotificationKind::Error => warn!(text = %notification.message, "notification"),
        }

        let mut guard = self
            .events
            .lock()
            .map_err(|_| NotifyError::Transport("notification buffer poisoned".to_string()))?;
        if guard.len() == RECENT_NOTIFICATION_LIMIT {
            guard.pop_front();
        }
        guard.push_back(notification);
        Ok(())
    }
}

pub(crate) fn build_taxonomy(config: &TaxonomyConfig) -> Taxonomy {
    if config.seed_defaults {
        Taxonomy::seeded()
    } else {
        Taxonomy::empty()
    }
}

pub(crate) fn parse_dimension(raw: &str) -> Result<Dimension, String> {
    Dimension::from_slug(raw).ok_or_else(|| {
        let known: Vec<&str> = Dimension::ALL.iter().map(|dimension| dimension.slug()).collect();
        format!("unknown dimension '{raw}' (expected one of: {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_notifications_are_bounded() {
        let sink = RecentNotifications::default();
        for index in 0..(RECENT_NOTIFICATION_LIMIT + 5) {
            sink.notify(Notification::success(format!("Category {index} added")))
                .expect("buffer accepts");
        }

        let recent = sink.recent();
        assert_eq!(recent.len(), RECENT_NOTIFICATION_LIMIT);
        assert_eq!(recent[0].message, "Category 5 added");
    }

    #[test]
    fn dimension_parser_lists_known_slugs() {
        assert_eq!(parse_dimension("degrees"), Ok(Dimension::Degree));
        let error = parse_dimension("boards").expect_err("unknown slug");
        assert!(error.contains("sub-categories"));
    }
}
