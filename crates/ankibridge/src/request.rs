//! Internal request and response types for the AnkiConnect protocol.

use serde::{Deserialize, Serialize};

/// AnkiConnect API version spoken by this client.
pub(crate) const API_VERSION: u8 = 6;

/// The request format expected by AnkiConnect.
#[derive(Debug, Serialize)]
pub(crate) struct AnkiRequest<'a, T> {
    /// The action to perform.
    pub action: &'a str,
    /// The API version.
    pub version: u8,
    /// Optional API key for authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
    /// Optional parameters for the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<T>,
}

impl<'a, T> AnkiRequest<'a, T> {
    pub fn new(action: &'a str, params: Option<T>, key: Option<&'a str>) -> Self {
        Self {
            action,
            version: API_VERSION,
            key,
            params,
        }
    }
}

/// The response format returned by AnkiConnect.
///
/// A `null` result is a valid success for void actions, so both halves stay
/// optional and are interpreted by the client.
#[derive(Debug, Deserialize)]
pub(crate) struct AnkiResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}
