use serde::{Deserialize, Serialize};

/// Count reported when the backend could not be asked how many URLs it holds.
pub const UNKNOWN_COUNT: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortKey(pub String);

impl ShortKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShortKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One successful shorten response, kept only while it is on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenResult {
    pub key: ShortKey,
    pub short_url: String,
    /// `true` when the backend answered 201, i.e. the mapping did not exist before.
    pub created: bool,
    pub long_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Failed,
}

impl DeleteOutcome {
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => Self::Deleted,
            404 => Self::NotFound,
            _ => Self::Failed,
        }
    }

    /// Whether the result panel should be emptied after this outcome.
    pub fn clears_panel(self) -> bool {
        matches!(self, Self::Deleted | Self::NotFound)
    }
}
