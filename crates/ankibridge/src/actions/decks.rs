//! Deck-related AnkiConnect actions.

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to deck-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::decks()`].
#[derive(Debug)]
pub struct DeckActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

impl<'a> DeckActions<'a> {
    /// Get all deck names.
    pub async fn names(&self) -> Result<Vec<String>> {
        self.client.call_without_params("deckNames").await
    }

    /// Check whether a deck with the given name exists.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.names().await?.iter().any(|deck| deck == name))
    }
}
