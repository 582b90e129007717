//! Transient notifications with a single, replaceable dismissal timer.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, warn};

use crate::view::View;

pub const DEFAULT_NOTIFY_DURATION: Duration = Duration::from_millis(2500);

#[derive(Default)]
struct NotificationState {
    message: Option<String>,
    /// Bumped on every notify/dismiss so a timer that lost the race stays quiet.
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

struct NotifierInner {
    surface: Arc<dyn View>,
    default_duration: Duration,
    state: Mutex<NotificationState>,
}

impl NotifierInner {
    fn lock(&self) -> MutexGuard<'_, NotificationState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn expire(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation != generation {
            return;
        }
        state.pending = None;
        state.message = None;
        self.surface.set_notification(None);
        debug!(generation, "notification dismissed by timer");
    }
}

/// Shows one message at a time; a newer message replaces both the text and the
/// pending dismissal of the older one.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

impl Notifier {
    pub fn new(surface: Arc<dyn View>) -> Self {
        Self::with_default_duration(surface, DEFAULT_NOTIFY_DURATION)
    }

    pub fn with_default_duration(surface: Arc<dyn View>, default_duration: Duration) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                surface,
                default_duration,
                state: Mutex::new(NotificationState::default()),
            }),
        }
    }

    pub fn notify(&self, message: impl Into<String>) {
        self.notify_for(message, self.inner.default_duration);
    }

    pub fn notify_for(&self, message: impl Into<String>, duration: Duration) {
        let message = message.into();
        let mut state = self.inner.lock();
        state.generation = state.generation.wrapping_add(1);
        if let Some(previous) = state.pending.take() {
            previous.abort();
        }
        self.inner.surface.set_notification(Some(&message));
        state.message = Some(message);

        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime available; notification will not auto-dismiss");
            return;
        };
        let generation = state.generation;
        let inner = Arc::clone(&self.inner);
        state.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            inner.expire(generation);
        }));
    }

    pub fn dismiss(&self) {
        let mut state = self.inner.lock();
        state.generation = state.generation.wrapping_add(1);
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
        state.message = None;
        self.inner.surface.set_notification(None);
    }

    pub fn is_visible(&self) -> bool {
        self.inner.lock().message.is_some()
    }

    pub fn current_message(&self) -> Option<String> {
        self.inner.lock().message.clone()
    }

    pub fn has_pending_dismissal(&self) -> bool {
        self.inner
            .lock()
            .pending
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }
}

#[cfg(test)]
#[path = "tests/notifier_tests.rs"]
mod tests;
