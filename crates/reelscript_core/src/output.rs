//! Output types from model responses.

use serde::{Deserialize, Serialize};

/// Output returned by a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output, possibly containing JSON.
    Text(String),

    /// Structured JSON output already parsed by the driver.
    Json(serde_json::Value),
}

impl Output {
    /// Text form of this output.
    pub fn as_text(&self) -> String {
        match self {
            Output::Text(text) => text.clone(),
            Output::Json(value) => value.to_string(),
        }
    }
}
