//! Review log types.

use serde::{Deserialize, Serialize};

/// A single review log entry, as returned by `getReviewsOfCards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEntry {
    /// Review timestamp (milliseconds since epoch), doubles as the review ID.
    #[serde(rename = "id")]
    pub review_id: i64,
    /// Button pressed: 1 = Again, 2 = Hard, 3 = Good, 4 = Easy.
    pub ease: i64,
    /// Interval after the review (negative = seconds, positive = days).
    #[serde(rename = "ivl", default)]
    pub interval: i64,
    /// Interval before the review.
    #[serde(rename = "lastIvl", default)]
    pub last_interval: i64,
    /// Ease factor after the review.
    #[serde(default)]
    pub factor: i64,
    /// Time spent answering (milliseconds).
    #[serde(default)]
    pub time: i64,
    /// Review type (0 = learning, 1 = review, 2 = relearn, 3 = cram).
    #[serde(rename = "type", default)]
    pub review_type: i32,
}
