//! Pure statistics over data already fetched from AnkiConnect.
//!
//! - [`compute_distribution`]: mean/median/min/max and a labeled histogram
//! - [`compute_retention`]: remembered fraction from rating codes
//! - [`calculate_streak`]: consecutive study days ending today
//!
//! None of these perform I/O or fail on empty input.

mod distribution;
mod retention;
mod streak;

pub use distribution::{
    BucketConfig, Buckets, DistributionMetrics, LabelFormatter, compute_distribution,
    ease_buckets, interval_buckets,
};
pub use retention::{Rating, RatingCounts, RetentionMetrics, compute_retention};
pub use streak::{DailyCount, calculate_streak, calculate_streak_from};
