//! Seams between the client logic and whatever presents it.

use shared::{domain::ShortenResult, error::ShortenerError};

/// The visible surfaces: count badge, result panel and notification line.
pub trait View: Send + Sync {
    fn set_count(&self, count: i64);
    /// `None` empties the result panel.
    fn set_result(&self, result: Option<&ShortenResult>);
    /// `None` hides the notification surface.
    fn set_notification(&self, message: Option<&str>);
}

pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ShortenerError>;
}
