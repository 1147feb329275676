//! Consecutive-day study streaks.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of reviews on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

impl DailyCount {
    pub fn new(date: NaiveDate, count: u64) -> Self {
        Self { date, count }
    }
}

/// Consecutive days with reviews, ending today (local time).
///
/// See [`calculate_streak_from`].
pub fn calculate_streak(series: &[DailyCount]) -> u32 {
    calculate_streak_from(series, Local::now().date_naive())
}

/// Consecutive days with reviews, ending at `today`.
///
/// The series may be unsorted and sparse. Walking back from `today`, each
/// day extends the streak only if it has a positive count; a missing day or
/// a zero-count day ends the walk. Entries sharing a date are summed first;
/// entries dated after `today` are ignored.
///
/// # Example
///
/// ```
/// use ankibridge_stats::stats::{DailyCount, calculate_streak_from};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
/// let series = [
///     DailyCount::new(day(8), 4),
///     DailyCount::new(day(10), 12),
///     DailyCount::new(day(9), 3),
/// ];
/// assert_eq!(calculate_streak_from(&series, day(10)), 3);
/// assert_eq!(calculate_streak_from(&series, day(11)), 0);
/// ```
pub fn calculate_streak_from(series: &[DailyCount], today: NaiveDate) -> u32 {
    if series.is_empty() {
        return 0;
    }

    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for entry in series {
        let total = by_date.entry(entry.date).or_default();
        *total = total.saturating_add(entry.count);
    }

    let mut streak = 0;
    let mut day = Some(today);
    while let Some(current) = day {
        match by_date.get(&current) {
            Some(&count) if count > 0 => {
                streak += 1;
                day = current.pred_opt();
            }
            _ => break,
        }
    }
    streak
}
