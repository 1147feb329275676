//! Error types for the ankibridge client.
//!
//! Failures fall into two families:
//!
//! - [`Error::ConnectionRefused`]: the AnkiConnect endpoint is unreachable
//!   (Anki is closed or the add-on is missing)
//! - [`Error::Action`]: AnkiConnect ran the action and reported a named
//!   failure such as "deck was not found"
//!
//! # Example
//!
//! ```no_run
//! use ankibridge::{AnkiClient, Error};
//!
//! # async fn example() {
//! let client = AnkiClient::new();
//!
//! match client.invoke("deckNames", None).await {
//!     Ok(decks) => println!("{}", decks),
//!     Err(Error::ConnectionRefused) => eprintln!("Please start Anki"),
//!     Err(e @ Error::Action { .. }) => eprintln!("{}", e),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// The error type for AnkiConnect operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest.
    ///
    /// For connection issues, see [`Error::ConnectionRefused`].
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// AnkiConnect returned an error message for an action.
    ///
    /// Common messages include:
    /// - "deck was not found"
    /// - "model was not found"
    /// - "field not found"
    #[error("AnkiConnect action '{action}' failed: {message}")]
    Action {
        /// The action that was invoked.
        action: String,
        /// The message reported by AnkiConnect.
        message: String,
    },

    /// Response contained neither a result nor an error.
    #[error("AnkiConnect returned empty response for '{0}'")]
    EmptyResponse(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connection refused - Anki is likely not running.
    #[error("Could not connect to Anki. Is Anki running with AnkiConnect installed?")]
    ConnectionRefused,

    /// Permission denied by AnkiConnect (missing or wrong API key).
    #[error("Permission denied. Request permission first or check API key.")]
    PermissionDenied,
}

impl Error {
    pub(crate) fn action(action: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.to_lowercase().contains("permission") {
            Error::PermissionDenied
        } else {
            Error::Action {
                action: action.to_string(),
                message,
            }
        }
    }

    /// Whether this is an action failure reporting a missing deck.
    pub fn is_deck_not_found(&self) -> bool {
        self.action_message_mentions("deck")
    }

    /// Whether this is an action failure reporting a missing note type.
    pub fn is_model_not_found(&self) -> bool {
        self.action_message_mentions("model")
    }

    /// Whether this is an action failure reporting a missing note field.
    pub fn is_field_not_found(&self) -> bool {
        self.action_message_mentions("field")
    }

    fn action_message_mentions(&self, subject: &str) -> bool {
        match self {
            Error::Action { message, .. } => {
                let message = message.to_lowercase();
                message.contains(subject) && message.contains("not found")
            }
            _ => false,
        }
    }
}

/// A specialized Result type for AnkiConnect operations.
pub type Result<T> = std::result::Result<T, Error>;
