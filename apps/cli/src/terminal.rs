//! Terminal rendering of the view surfaces and the system clipboard.

use std::{sync::Mutex, thread};

use arboard::Clipboard;
use client_core::{panel_line, ClipboardWriter, View};
use crossbeam_channel::{bounded, unbounded, Sender};
use shared::{
    domain::{ShortenResult, UNKNOWN_COUNT},
    error::ShortenerError,
};
use tracing::debug;

pub fn count_badge(count: i64) -> String {
    if count == UNKNOWN_COUNT {
        "URLs stored: ?".to_string()
    } else {
        format!("URLs stored: {count}")
    }
}

pub fn result_panel(result: &ShortenResult) -> String {
    format!(
        "{}\n  [copy] {}\n  [delete {}]",
        panel_line(result),
        result.short_url,
        result.key
    )
}

/// Prints every surface change as a line on stdout.
#[derive(Default)]
pub struct TerminalView {
    last_notification: Mutex<Option<String>>,
}

impl View for TerminalView {
    fn set_count(&self, count: i64) {
        println!("{}", count_badge(count));
    }

    fn set_result(&self, result: Option<&ShortenResult>) {
        match result {
            Some(result) => println!("{}", result_panel(result)),
            None => println!("(result cleared)"),
        }
    }

    fn set_notification(&self, message: Option<&str>) {
        let mut last = self
            .last_notification
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match message {
            Some(message) => println!(">> {message}"),
            None => debug!(message = ?last.as_deref(), "notification hidden"),
        }
        *last = message.map(str::to_string);
    }
}

/// Something text can be put on; the system clipboard outside of tests.
pub trait TextSink {
    fn set_text(&mut self, text: String) -> Result<(), String>;
}

impl TextSink for Clipboard {
    fn set_text(&mut self, text: String) -> Result<(), String> {
        Clipboard::set_text(self, text).map_err(|err| err.to_string())
    }
}

type CopyRequest = (String, Sender<Result<(), String>>);

/// Owns one clipboard handle on a dedicated thread for the whole session.
///
/// On X11 the copied text only lives as long as the handle that set it, so the
/// handle is opened on first use and kept until the process exits.
pub struct SystemClipboard {
    requests: Sender<CopyRequest>,
}

impl SystemClipboard {
    pub fn spawn() -> Self {
        Self::spawn_with(|| Clipboard::new().map_err(|err| err.to_string()))
    }

    pub fn spawn_with<S, F>(open: F) -> Self
    where
        S: TextSink + 'static,
        F: Fn() -> Result<S, String> + Send + 'static,
    {
        let (requests, rx) = unbounded::<CopyRequest>();
        thread::spawn(move || {
            let mut sink: Option<S> = None;
            for (text, reply) in rx {
                let _ = reply.send(write_with(&mut sink, &open, text));
            }
        });
        Self { requests }
    }
}

fn write_with<S: TextSink>(
    sink: &mut Option<S>,
    open: &impl Fn() -> Result<S, String>,
    text: String,
) -> Result<(), String> {
    if sink.is_none() {
        *sink = Some(open()?);
    }
    match sink.as_mut() {
        Some(sink) => sink.set_text(text),
        None => Err("clipboard unavailable".to_string()),
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ShortenerError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.requests
            .send((text.to_string(), reply_tx))
            .map_err(|_| ShortenerError::Clipboard("clipboard worker stopped".to_string()))?;
        reply_rx
            .recv()
            .map_err(|_| ShortenerError::Clipboard("clipboard worker stopped".to_string()))?
            .map_err(ShortenerError::Clipboard)
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
