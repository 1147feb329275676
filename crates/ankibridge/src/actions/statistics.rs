//! Statistics-related AnkiConnect actions.

use std::collections::HashMap;

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::ReviewEntry;

/// Provides access to statistics-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::statistics()`].
#[derive(Debug)]
pub struct StatisticsActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct ReviewsOfCardsParams<'a> {
    cards: &'a [i64],
}

impl<'a> StatisticsActions<'a> {
    /// Get card review counts by day.
    ///
    /// Returns `(date, count)` pairs with dates formatted `YYYY-MM-DD`, most
    /// recent first. Days without reviews are absent.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankibridge::AnkiClient;
    /// # async fn example() -> ankibridge::Result<()> {
    /// let client = AnkiClient::new();
    /// for (date, count) in client.statistics().cards_reviewed_by_day().await? {
    ///     println!("{}: {} reviews", date, count);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn cards_reviewed_by_day(&self) -> Result<Vec<(String, i64)>> {
        self.client
            .call_without_params("getNumCardsReviewedByDay")
            .await
    }

    /// Get the review log for specific cards, keyed by card ID.
    pub async fn reviews_for_cards(
        &self,
        card_ids: &[i64],
    ) -> Result<HashMap<String, Vec<ReviewEntry>>> {
        self.client
            .call(
                "getReviewsOfCards",
                ReviewsOfCardsParams { cards: card_ids },
            )
            .await
    }
}
