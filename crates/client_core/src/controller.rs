//! Action boundary: every user action runs through here, and every failure
//! ends as a notification instead of an error.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{DeleteOutcome, ShortKey, ShortenResult},
    error::ShortenerError,
};
use tracing::{debug, warn};

use crate::{
    gateway::ShortenerApi,
    notifier::Notifier,
    renderer::ResultRenderer,
    view::{ClipboardWriter, View},
};

pub const MSG_CREATED: &str = "Short URL created";
pub const MSG_EXISTING: &str = "URL was already shortened";
pub const MSG_DELETED: &str = "URL deleted successfully!";
pub const MSG_NOT_FOUND: &str = "URL not found!";
pub const MSG_DELETE_FAILED: &str = "An error occurred while deleting the URL.";
pub const MSG_COPIED: &str = "Copied to clipboard!";
pub const MSG_NOTHING_SELECTED: &str = "Nothing to act on; shorten a URL first.";

pub struct ShortenerController {
    api: Arc<dyn ShortenerApi>,
    clipboard: Arc<dyn ClipboardWriter>,
    renderer: ResultRenderer,
    notifier: Notifier,
}

impl ShortenerController {
    pub fn new(
        api: Arc<dyn ShortenerApi>,
        view: Arc<dyn View>,
        clipboard: Arc<dyn ClipboardWriter>,
        notify_duration: Duration,
    ) -> Self {
        Self {
            api,
            clipboard,
            renderer: ResultRenderer::new(Arc::clone(&view)),
            notifier: Notifier::with_default_duration(view, notify_duration),
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn current_result(&self) -> Option<ShortenResult> {
        self.renderer.current()
    }

    /// Fetches the count and puts it on the badge; failures show as `-1`.
    pub async fn refresh_count(&self) -> i64 {
        let count = self.api.fetch_count().await;
        self.renderer.show_count(count);
        count
    }

    pub async fn shorten(&self, input: &str) -> Option<ShortenResult> {
        let outcome = match self.api.shorten(input).await {
            Ok(result) => {
                self.notifier.notify(if result.created {
                    MSG_CREATED
                } else {
                    MSG_EXISTING
                });
                self.renderer.show_result(result.clone());
                Some(result)
            }
            Err(err @ ShortenerError::Validation(_)) => {
                // Rejected before any request was made; nothing settled, nothing to refresh.
                self.notifier.notify(err.user_message());
                return None;
            }
            Err(err) => {
                warn!(code = ?err.code(), error = %err, "shorten failed");
                self.notifier.notify(err.user_message());
                None
            }
        };
        self.refresh_count().await;
        outcome
    }

    pub async fn delete(&self, key: &ShortKey) -> DeleteOutcome {
        let outcome = self.api.remove(key).await;
        self.renderer.apply_delete(key, outcome);
        self.notifier.notify(match outcome {
            DeleteOutcome::Deleted => MSG_DELETED,
            DeleteOutcome::NotFound => MSG_NOT_FOUND,
            DeleteOutcome::Failed => MSG_DELETE_FAILED,
        });
        debug!(key = %key, ?outcome, "delete settled");
        self.refresh_count().await;
        outcome
    }

    /// Runs the delete action bound to the result on the panel.
    pub async fn delete_current(&self) -> Option<DeleteOutcome> {
        match self.renderer.current() {
            Some(result) => Some(self.delete(&result.key).await),
            None => {
                self.notifier.notify(MSG_NOTHING_SELECTED);
                None
            }
        }
    }

    pub fn copy(&self, text: &str) -> bool {
        match self.clipboard.write_text(text) {
            Ok(()) => {
                self.notifier.notify(MSG_COPIED);
                true
            }
            Err(err) => {
                self.notifier.notify(err.user_message());
                false
            }
        }
    }

    /// Runs the copy action bound to the result on the panel.
    pub fn copy_current(&self) -> bool {
        match self.renderer.current() {
            Some(result) => self.copy(&result.short_url),
            None => {
                self.notifier.notify(MSG_NOTHING_SELECTED);
                false
            }
        }
    }

    pub async fn resolve(&self, key: &ShortKey) -> Option<String> {
        match self.api.resolve(key).await {
            Ok(Some(long_url)) => {
                self.notifier.notify(format!("{key} -> {long_url}"));
                Some(long_url)
            }
            Ok(None) => {
                self.notifier.notify(MSG_NOT_FOUND);
                None
            }
            Err(err) => {
                self.notifier.notify(err.user_message());
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
