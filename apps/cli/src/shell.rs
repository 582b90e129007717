//! Line-oriented interactive mode.

use anyhow::Result;
use client_core::ShortenerController;
use shared::domain::ShortKey;
use tokio::io::{AsyncBufReadExt, BufReader};

pub const HELP: &str = "\
commands:
  <url> | shorten <url>   shorten a URL
  delete [key]            delete the shown result, or the given key
  copy                    copy the shown short URL
  resolve <key>           show the long URL behind a key
  count                   refresh the stored URL count
  help                    show this help
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Shorten(String),
    Delete(Option<ShortKey>),
    Copy,
    Resolve(ShortKey),
    Count,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "" => ShellCommand::Empty,
        "shorten" | "s" => ShellCommand::Shorten(rest.to_string()),
        "delete" | "d" | "rm" if rest.is_empty() => ShellCommand::Delete(None),
        "delete" | "d" | "rm" => ShellCommand::Delete(Some(ShortKey::new(rest))),
        "copy" | "c" => ShellCommand::Copy,
        "resolve" | "r" if !rest.is_empty() => ShellCommand::Resolve(ShortKey::new(rest)),
        "count" => ShellCommand::Count,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        _ if rest.is_empty() && looks_like_url(word) => ShellCommand::Shorten(word.to_string()),
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

fn looks_like_url(word: &str) -> bool {
    word.contains('.') || word.contains("://")
}

/// Runs one command; returns `false` once the user asked to leave.
pub async fn dispatch(controller: &ShortenerController, command: ShellCommand) -> bool {
    match command {
        ShellCommand::Shorten(url) => {
            controller.shorten(&url).await;
        }
        ShellCommand::Delete(Some(key)) => {
            controller.delete(&key).await;
        }
        ShellCommand::Delete(None) => {
            controller.delete_current().await;
        }
        ShellCommand::Copy => {
            controller.copy_current();
        }
        ShellCommand::Resolve(key) => {
            controller.resolve(&key).await;
        }
        ShellCommand::Count => {
            controller.refresh_count().await;
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return false,
        ShellCommand::Empty => {}
        ShellCommand::Unknown(line) => {
            controller
                .notifier()
                .notify(format!("Unknown command: {line} (try `help`)"));
        }
    }
    true
}

pub async fn run(controller: &ShortenerController) -> Result<()> {
    println!("{HELP}");
    controller.refresh_count().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !dispatch(controller, parse_line(&line)).await {
            break;
        }
    }
    controller.notifier().dismiss();
    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
