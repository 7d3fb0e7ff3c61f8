use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

/// Severity tag carried by an ephemeral notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Normalizes a severity name. Unknown values become `Info` rather than
    /// being rejected.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" | "warn" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// How long a notification of this severity stays visible by default.
    /// Errors persist longer than routine confirmations.
    pub const fn default_duration(self) -> Duration {
        match self {
            Self::Success | Self::Info => Duration::from_millis(3_000),
            Self::Warning => Duration::from_millis(4_000),
            Self::Error => Duration::from_millis(5_000),
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single active notification, serializable for a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Default)]
struct NotifyState {
    active: Vec<Notification>,
    timers: HashMap<u64, JoinHandle<()>>,
}

/// Manager for ephemeral user-facing notifications.
///
/// The active set preserves insertion order and is updated synchronously by
/// `add`/`remove`. A notification with a positive duration schedules a timer
/// task that removes it once the duration elapses; removing it early aborts
/// the pending timer, and a timer that fires after removal is a no-op.
///
/// Ids are monotonic, so two adds within the same instant still receive
/// distinct ids.
pub struct NotifyCenter {
    next_id: AtomicU64,
    state: Arc<Mutex<NotifyState>>,
}

impl Default for NotifyCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyCenter {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            state: Arc::new(Mutex::new(NotifyState::default())),
        }
    }

    /// Appends a notification and returns its id without blocking.
    ///
    /// A zero duration disables auto-expiry; the entry then persists until an
    /// explicit `remove`. Scheduling a positive duration requires a running
    /// tokio runtime.
    pub fn add(&self, message: impl Into<String>, severity: Severity, duration: Duration) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            message: message.into(),
            severity,
        };

        let mut state = self
            .state
            .lock()
            .expect("notification state lock is not poisoned");
        state.active.push(notification);

        if !duration.is_zero() {
            let shared = Arc::clone(&self.state);
            let handle = tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                remove_entry(&shared, id);
            });
            state.timers.insert(id, handle);
        }

        id
    }

    /// Removes the notification with the given id. Unknown ids are ignored,
    /// so a stale expiry timer firing after an early removal does nothing.
    pub fn remove(&self, id: u64) {
        remove_entry(&self.state, id);
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.add(
            message,
            Severity::Success,
            Severity::Success.default_duration(),
        )
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.add(message, Severity::Error, Severity::Error.default_duration())
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.add(
            message,
            Severity::Warning,
            Severity::Warning.default_duration(),
        )
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.add(message, Severity::Info, Severity::Info.default_duration())
    }

    /// Snapshot of the active set in insertion order.
    pub fn active(&self) -> Vec<Notification> {
        self.state
            .lock()
            .expect("notification state lock is not poisoned")
            .active
            .clone()
    }
}

fn remove_entry(state: &Arc<Mutex<NotifyState>>, id: u64) {
    let mut state = state
        .lock()
        .expect("notification state lock is not poisoned");
    state.active.retain(|notification| notification.id != id);
    if let Some(handle) = state.timers.remove(&id) {
        handle.abort();
    }
}
