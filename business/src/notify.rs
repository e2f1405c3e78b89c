use std::any::Any;

use chrono::{DateTime, Duration, Utc};
use tablero_states::{State, state_assign_impl};

const TOAST_SECONDS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    expires_at: DateTime<Utc>,
}

/// Transient toast shown by the app shell. One at a time; a new notification
/// replaces the current one. Expiry is checked against the injected clock so
/// tests can fast-forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    current: Option<Notification>,
}

impl NotificationState {
    pub fn success(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with(message, Severity::Success, now)
    }

    pub fn error(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with(message, Severity::Error, now)
    }

    fn with(message: impl Into<String>, severity: Severity, now: DateTime<Utc>) -> Self {
        Self {
            current: Some(Notification {
                message: message.into(),
                severity,
                expires_at: now + Duration::seconds(TOAST_SECONDS),
            }),
        }
    }

    pub fn show_success(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        *self = Self::success(message, now);
    }

    pub fn show_error(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        *self = Self::error(message, now);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the toast once its time is up. Called once per frame.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        if let Some(notification) = &self.current
            && now >= notification.expires_at
        {
            self.current = None;
        }
    }
}

impl State for NotificationState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
