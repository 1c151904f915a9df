// src/infrastructure/notifier.rs
use crossterm::style::Stylize;
use tracing::{info, warn};

use crate::application::notification::{Notification, NotificationKind, Notifier};

/// Prints notifications as one-line toasts on stderr
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    color: bool,
}

impl ConsoleNotifier {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, notification: &Notification) -> String {
        let (marker, title) = match notification.kind {
            NotificationKind::Success => ("✓", notification.title.as_str()),
            NotificationKind::Error => ("✗", notification.title.as_str()),
        };

        if !self.color {
            return format!("{} {}: {}", marker, title, notification.description);
        }

        match notification.kind {
            NotificationKind::Success => format!(
                "{} {}: {}",
                marker.green(),
                title.green().bold(),
                notification.description
            ),
            NotificationKind::Error => format!(
                "{} {}: {}",
                marker.red(),
                title.red().bold(),
                notification.description
            ),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!(title = %notification.title, "{}", notification.description),
            NotificationKind::Error => warn!(title = %notification.title, "{}", notification.description),
        }
        eprintln!("{}", self.render(&notification));
    }
}
