//! Card-related AnkiConnect actions.

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::CardInfo;

/// Provides access to card-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::cards()`].
#[derive(Debug)]
pub struct CardActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct FindCardsParams<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct CardIdsParams<'a> {
    cards: &'a [i64],
}

impl<'a> CardActions<'a> {
    /// Find card IDs matching an Anki search query.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankibridge::AnkiClient;
    /// # async fn example() -> ankibridge::Result<()> {
    /// let client = AnkiClient::new();
    /// let due = client.cards().find("deck:Japanese is:due").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find(&self, query: &str) -> Result<Vec<i64>> {
        self.client
            .call("findCards", FindCardsParams { query })
            .await
    }

    /// Get detailed information about cards.
    pub async fn info(&self, card_ids: &[i64]) -> Result<Vec<CardInfo>> {
        self.client
            .call("cardsInfo", CardIdsParams { cards: card_ids })
            .await
    }

    /// Get ease factors (permille, 2500 = 250%) for cards.
    ///
    /// Results are in the same order as the input IDs; new cards report 0.
    pub async fn ease_factors(&self, card_ids: &[i64]) -> Result<Vec<i64>> {
        self.client
            .call("getEaseFactors", CardIdsParams { cards: card_ids })
            .await
    }
}
