//! Reflects gateway outcomes into the view.

use std::sync::{Arc, Mutex, MutexGuard};

use shared::domain::{DeleteOutcome, ShortKey, ShortenResult};

use crate::view::View;

/// Text of the result panel as a single line.
pub fn panel_line(result: &ShortenResult) -> String {
    if result.created {
        format!("URL: {} [new]", result.short_url)
    } else {
        format!("URL: {}", result.short_url)
    }
}

pub struct ResultRenderer {
    view: Arc<dyn View>,
    current: Mutex<Option<ShortenResult>>,
}

impl ResultRenderer {
    pub fn new(view: Arc<dyn View>) -> Self {
        Self {
            view,
            current: Mutex::new(None),
        }
    }

    fn current_slot(&self) -> MutexGuard<'_, Option<ShortenResult>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The result currently on the panel, which copy/delete actions act on.
    pub fn current(&self) -> Option<ShortenResult> {
        self.current_slot().clone()
    }

    pub fn show_result(&self, result: ShortenResult) {
        let mut current = self.current_slot();
        self.view.set_result(Some(&result));
        *current = Some(result);
    }

    /// Clears the panel when `key` is the result on it and the mapping is gone.
    /// Returns whether the panel was cleared.
    pub fn apply_delete(&self, key: &ShortKey, outcome: DeleteOutcome) -> bool {
        let mut current = self.current_slot();
        let on_panel = current.as_ref().is_some_and(|result| &result.key == key);
        if !(on_panel && outcome.clears_panel()) {
            return false;
        }
        *current = None;
        self.view.set_result(None);
        true
    }

    pub fn show_count(&self, count: i64) {
        self.view.set_count(count);
    }
}

#[cfg(test)]
#[path = "tests/renderer_tests.rs"]
mod tests;
