//! Headless client for a URL-shortening backend: the HTTP gateway, the
//! transient notifier and the renderer that ties their outcomes to a [`View`].

pub mod controller;
pub mod gateway;
pub mod notifier;
pub mod renderer;
pub mod view;

pub use controller::ShortenerController;
pub use gateway::{HttpShortenerClient, ShortenerApi};
pub use notifier::Notifier;
pub use renderer::{panel_line, ResultRenderer};
pub use view::{ClipboardWriter, View};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
