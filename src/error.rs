// Remote API error types
use serde_json::Value;
use thiserror::Error;

/// Failure of a single call against the Blooms backend
#[derive(Debug, Error)]
pub enum RequestError {
    /// Server answered with a non-2xx status
    #[error("{}", status_message(*.status, .message.as_deref()))]
    Status { status: u16, message: Option<String> },

    /// Connection, TLS or timeout failure before a status was received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was present but not the JSON shape we expected
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

fn status_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(msg) => format!("HTTP {}: {}", status, msg),
        None => format!("HTTP {}", status),
    }
}

impl RequestError {
    /// Build a status error from a raw response body, lifting `{message}` when present
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .or_else(|| {
                let trimmed = body.trim();
                // plain-text error pages are passed through, HTML is not
                if trimmed.is_empty() || trimmed.starts_with('<') {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            });

        RequestError::Status { status, message }
    }

    /// Server-supplied message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RequestError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
