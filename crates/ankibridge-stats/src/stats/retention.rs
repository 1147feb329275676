//! Pass/fail rates over review ratings.

use serde::Serialize;

/// Answer button pressed during a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Rating {
    /// Failed; the card lapses.
    Again = 1,
    /// Remembered with difficulty.
    Hard = 2,
    /// Remembered.
    Good = 3,
    /// Remembered effortlessly.
    Easy = 4,
}

impl TryFrom<i64> for Rating {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Rating::Again),
            2 => Ok(Rating::Hard),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::Easy),
            other => Err(other),
        }
    }
}

/// Occurrences of each rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingCounts {
    pub again: usize,
    pub hard: usize,
    pub good: usize,
    pub easy: usize,
}

impl RatingCounts {
    fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Again => self.again += 1,
            Rating::Hard => self.hard += 1,
            Rating::Good => self.good += 1,
            Rating::Easy => self.easy += 1,
        }
    }

    /// Total number of recognized ratings.
    pub fn total(&self) -> usize {
        self.again + self.hard + self.good + self.easy
    }

    /// Ratings other than Again.
    pub fn passed(&self) -> usize {
        self.hard + self.good + self.easy
    }
}

/// Retention over a set of reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RetentionMetrics {
    /// Fraction of recognized ratings that were not Again, 0 when there are none.
    pub overall: f64,
    /// Per-rating counts.
    pub by_rating: RatingCounts,
}

/// Compute retention from raw rating codes.
///
/// Codes outside 1..=4 are ignored entirely: they count toward neither a
/// rating nor the denominator.
///
/// # Example
///
/// ```
/// use ankibridge_stats::stats::compute_retention;
///
/// let metrics = compute_retention(&[1, 2, 3, 4, 0, 5, 99]);
/// assert_eq!(metrics.overall, 0.75);
/// assert_eq!(metrics.by_rating.again, 1);
/// ```
pub fn compute_retention(ratings: &[i64]) -> RetentionMetrics {
    let mut by_rating = RatingCounts::default();
    for rating in ratings.iter().filter_map(|&code| Rating::try_from(code).ok()) {
        by_rating.record(rating);
    }

    let total = by_rating.total();
    let overall = if total == 0 {
        0.0
    } else {
        by_rating.passed() as f64 / total as f64
    };

    RetentionMetrics { overall, by_rating }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ratings() {
        let metrics = compute_retention(&[]);
        assert_eq!(metrics.overall, 0.0);
        assert_eq!(metrics.by_rating, RatingCounts::default());
    }

    #[test]
    fn test_mixed_ratings() {
        let metrics = compute_retention(&[1, 2, 3, 4, 3, 3, 2, 1]);
        assert_eq!(metrics.overall, 0.75);
        assert_eq!(
            metrics.by_rating,
            RatingCounts {
                again: 2,
                hard: 2,
                good: 3,
                easy: 1
            }
        );
    }

    #[test]
    fn test_invalid_codes_are_excluded() {
        let metrics = compute_retention(&[1, 2, 3, 4, 0, 5, 99, -1]);
        assert_eq!(metrics.overall, 0.75);
        assert_eq!(metrics.by_rating.total(), 4);
    }

    #[test]
    fn test_only_invalid_codes() {
        let metrics = compute_retention(&[0, 7, -3]);
        assert_eq!(metrics.overall, 0.0);
        assert_eq!(metrics.by_rating.total(), 0);
    }

    #[test]
    fn test_all_failed() {
        assert_eq!(compute_retention(&[1, 1, 1]).overall, 0.0);
    }

    #[test]
    fn test_rating_conversion() {
        assert_eq!(Rating::try_from(3), Ok(Rating::Good));
        assert_eq!(Rating::try_from(5), Err(5));
    }
}
