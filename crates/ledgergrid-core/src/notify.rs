//! Single-slot transient notifications

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

/// Holds at most one notification; a new one replaces the previous
#[derive(Debug)]
pub struct Notifier {
    slot: Option<Notification>,
    auto_hide: Duration,
}

impl Notifier {
    pub fn new(auto_hide: Duration) -> Self {
        Self { slot: None, auto_hide }
    }

    pub fn auto_hide(&self) -> Duration {
        self.auto_hide
    }

    pub fn show(&mut self, severity: Severity, text: impl Into<String>, now: DateTime<Utc>) {
        self.slot = Some(Notification {
            severity,
            text: text.into(),
            shown_at: now,
        });
    }

    pub fn dismiss(&mut self) {
        self.slot = None;
    }

    /// The notification still visible at `now`
    pub fn current_at(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.slot
            .as_ref()
            .filter(|notification| now - notification.shown_at < self.auto_hide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_replaces_previous() {
        let now = Utc::now();
        let mut notifier = Notifier::new(Duration::milliseconds(6000));
        notifier.show(Severity::Success, "New account saved", now);
        notifier.show(Severity::Error, "unavailable", now);

        let current = notifier.current_at(now).unwrap();
        assert_eq!(current.severity, Severity::Error);
        assert_eq!(current.text, "unavailable");
    }

    #[test]
    fn test_auto_hide() {
        let now = Utc::now();
        let mut notifier = Notifier::new(Duration::milliseconds(6000));
        notifier.show(Severity::Success, "saved", now);

        assert!(notifier.current_at(now + Duration::milliseconds(5999)).is_some());
        assert!(notifier.current_at(now + Duration::milliseconds(6000)).is_none());
    }

    #[test]
    fn test_dismiss() {
        let now = Utc::now();
        let mut notifier = Notifier::new(Duration::milliseconds(6000));
        notifier.show(Severity::Success, "saved", now);
        notifier.dismiss();
        assert!(notifier.current_at(now).is_none());
    }
}
