use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortenResponse {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub long_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PingResponse {
    #[serde(default)]
    pub count: Option<i64>,
}

/// Extracts a human readable message from an error payload.
///
/// The backend answers failures with a bare JSON string (`"Invalid URL"`), but
/// objects carrying an `error` or `message` field are accepted too. Anything
/// else is shown as compact JSON.
pub fn describe_payload(payload: &Value) -> String {
    match payload {
        Value::String(text) => text.trim().to_string(),
        Value::Object(fields) => ["error", "message"]
            .iter()
            .find_map(|name| fields.get(*name).and_then(Value::as_str))
            .map(|text| text.trim().to_string())
            .unwrap_or_else(|| payload.to_string()),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Like [`describe_payload`] but for a raw response body that may not be JSON.
pub fn describe_body(status: u16, body: &str) -> String {
    let described = match serde_json::from_str::<Value>(body) {
        Ok(payload) => describe_payload(&payload),
        Err(_) => body.trim().to_string(),
    };
    if described.is_empty() {
        format!("HTTP {status}")
    } else {
        described
    }
}
