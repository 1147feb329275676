//! Card-related types.

use serde::{Deserialize, Serialize};

/// Information about a card, as returned by `cardsInfo`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    /// The card ID.
    pub card_id: i64,
    /// The note ID this card was generated from.
    #[serde(default, alias = "note")]
    pub note_id: i64,
    /// The deck this card belongs to.
    #[serde(default)]
    pub deck_name: String,
    /// The note type (model) name.
    #[serde(default)]
    pub model_name: String,
    /// The card type (0 = new, 1 = learning, 2 = review, 3 = relearning).
    #[serde(default, rename = "type")]
    pub card_type: i32,
    /// The queue the card is in (-1 = suspended, -2/-3 = buried,
    /// 0 = new, 1 = learning, 2 = review, 3 = day learn).
    #[serde(default)]
    pub queue: i32,
    /// Due position/date (meaning depends on card type).
    #[serde(default)]
    pub due: i64,
    /// Current interval in days (negative values are seconds while learning).
    #[serde(default)]
    pub interval: i64,
    /// Ease factor in permille (2500 = 250%).
    #[serde(default, alias = "factor")]
    pub ease_factor: i64,
    /// Number of reviews.
    #[serde(default)]
    pub reps: i64,
    /// Number of lapses.
    #[serde(default)]
    pub lapses: i64,
}

impl CardInfo {
    /// Whether the card is suspended.
    pub fn is_suspended(&self) -> bool {
        self.queue == -1
    }

    /// Whether the card has never been studied.
    pub fn is_new(&self) -> bool {
        self.card_type == 0
    }

    /// Whether the card is in (re)learning.
    pub fn is_learning(&self) -> bool {
        matches!(self.card_type, 1 | 3)
    }

    /// Whether the card has graduated to review.
    pub fn is_review(&self) -> bool {
        self.card_type == 2
    }
}
