//! Deck analytics built from AnkiConnect data.
//!
//! Each workflow fetches the raw arrays it needs through the client and
//! hands them to the pure functions in [`crate::stats`].

use std::collections::BTreeSet;

use ankibridge::{AnkiClient, CardInfo, QueryBuilder};
use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::stats::{
    DailyCount, DistributionMetrics, RetentionMetrics, calculate_streak_from, compute_distribution,
    compute_retention, ease_buckets, interval_buckets,
};
use crate::{Error, Result};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Retention for a deck over a recent window.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetentionReport {
    /// Deck analyzed.
    pub deck: String,
    /// Window length in days.
    pub days: u32,
    /// Number of cards answered in the window.
    pub cards_reviewed: usize,
    /// Pass/fail rates over the window's reviews.
    pub retention: RetentionMetrics,
}

/// Study streak and activity summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StreakReport {
    /// Consecutive days with reviews, ending today.
    pub current_streak: u32,
    /// Days with at least one review.
    pub active_days: usize,
    /// Reviews across all recorded days.
    pub total_reviews: u64,
    /// Most recent day with reviews.
    pub last_active: Option<NaiveDate>,
}

impl StreakReport {
    /// Build a report from a per-day series as of `today`.
    pub fn from_series(series: &[DailyCount], today: NaiveDate) -> Self {
        let active: BTreeSet<NaiveDate> = series
            .iter()
            .filter(|day| day.count > 0)
            .map(|day| day.date)
            .collect();

        Self {
            current_streak: calculate_streak_from(series, today),
            active_days: active.len(),
            total_reviews: series.iter().map(|day| day.count).sum(),
            last_active: active.last().copied(),
        }
    }
}

/// Card counts and distributions for one deck.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeckStatistics {
    /// Deck name.
    pub deck: String,
    /// Total number of cards.
    pub total_cards: usize,
    /// Cards never studied.
    pub new_cards: usize,
    /// Cards in learning or relearning.
    pub learning_cards: usize,
    /// Graduated review cards.
    pub review_cards: usize,
    /// Suspended cards (also counted in their type).
    pub suspended_cards: usize,
    /// Ease factors (ratio form, 2.5 = 250%) of studied cards.
    pub ease: DistributionMetrics,
    /// Intervals in days of studied cards.
    pub intervals: DistributionMetrics,
}

/// Analysis workflow engine.
#[derive(Debug)]
pub struct AnalyzeEngine<'a> {
    client: &'a AnkiClient,
}

impl<'a> AnalyzeEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient) -> Self {
        Self { client }
    }

    /// Distribution of ease factors for studied cards in a deck.
    ///
    /// Ease factors are reported in ratio form (2500 becomes 2.5) and
    /// bucketed with [`ease_buckets`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankibridge_stats::Engine;
    /// # async fn example() -> ankibridge_stats::Result<()> {
    /// let engine = Engine::new();
    /// let ease = engine.analyze().ease_distribution("Japanese").await?;
    /// println!("Median ease: {:.2}", ease.median);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn ease_distribution(&self, deck: &str) -> Result<DistributionMetrics> {
        self.ensure_deck(deck).await?;

        let query = QueryBuilder::new().deck(deck).not_new().build();
        let card_ids = self.client.cards().find(&query).await?;

        let sample: Vec<f64> = if card_ids.is_empty() {
            Vec::new()
        } else {
            self.client
                .cards()
                .ease_factors(&card_ids)
                .await?
                .into_iter()
                .filter(|&factor| factor > 0)
                .map(ease_ratio)
                .collect()
        };

        debug!(deck, cards = sample.len(), "Computed ease distribution");
        Ok(compute_distribution(&sample, &ease_buckets()))
    }

    /// Distribution of intervals (days) for studied cards in a deck.
    ///
    /// Cards still in learning (interval measured in seconds) are skipped.
    pub async fn interval_distribution(&self, deck: &str) -> Result<DistributionMetrics> {
        self.ensure_deck(deck).await?;

        let query = QueryBuilder::new().deck(deck).not_new().build();
        let cards = self.cards_for(&query).await?;
        let sample = interval_sample(&cards);

        debug!(deck, cards = sample.len(), "Computed interval distribution");
        Ok(compute_distribution(&sample, &interval_buckets()))
    }

    /// Retention for reviews in a deck over the last `days` days.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankibridge_stats::Engine;
    /// # async fn example() -> ankibridge_stats::Result<()> {
    /// let engine = Engine::new();
    /// let report = engine.analyze().retention("Japanese", 30).await?;
    /// println!("Retention: {:.1}%", report.retention.overall * 100.0);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn retention(&self, deck: &str, days: u32) -> Result<RetentionReport> {
        let days = days.max(1);
        self.ensure_deck(deck).await?;

        let query = QueryBuilder::new().deck(deck).rated_within_days(days).build();
        let card_ids = self.client.cards().find(&query).await?;

        let mut report = RetentionReport {
            deck: deck.to_string(),
            days,
            cards_reviewed: card_ids.len(),
            retention: compute_retention(&[]),
        };
        if card_ids.is_empty() {
            return Ok(report);
        }

        let cutoff = Utc::now().timestamp_millis() - i64::from(days) * MILLIS_PER_DAY;
        let reviews = self.client.statistics().reviews_for_cards(&card_ids).await?;
        let ratings: Vec<i64> = reviews
            .values()
            .flatten()
            .filter(|review| review.review_id >= cutoff)
            .map(|review| review.ease)
            .collect();

        report.retention = compute_retention(&ratings);
        debug!(
            deck,
            days,
            reviews = ratings.len(),
            overall = report.retention.overall,
            "Computed retention"
        );
        Ok(report)
    }

    /// Current study streak across the whole collection, as of today.
    pub async fn study_streak(&self) -> Result<StreakReport> {
        self.study_streak_as_of(Local::now().date_naive()).await
    }

    /// Study streak ending at `today`.
    pub async fn study_streak_as_of(&self, today: NaiveDate) -> Result<StreakReport> {
        let by_day = self.client.statistics().cards_reviewed_by_day().await?;

        let series: Vec<DailyCount> = by_day
            .into_iter()
            .filter_map(|(date, count)| {
                match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
                    Ok(date) => Some(DailyCount::new(date, u64::try_from(count).unwrap_or(0))),
                    Err(e) => {
                        warn!(date = %date, error = %e, "Skipping unparseable review date");
                        None
                    }
                }
            })
            .collect();

        let report = StreakReport::from_series(&series, today);
        debug!(
            streak = report.current_streak,
            active_days = report.active_days,
            "Computed study streak"
        );
        Ok(report)
    }

    /// Card counts plus ease and interval distributions for a deck.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankibridge_stats::Engine;
    /// # async fn example() -> ankibridge_stats::Result<()> {
    /// let engine = Engine::new();
    /// let stats = engine.analyze().deck_statistics("Japanese").await?;
    /// println!("{} cards, {} new", stats.total_cards, stats.new_cards);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn deck_statistics(&self, deck: &str) -> Result<DeckStatistics> {
        self.ensure_deck(deck).await?;

        let query = QueryBuilder::new().deck(deck).build();
        let cards = self.cards_for(&query).await?;

        let mut stats = DeckStatistics {
            deck: deck.to_string(),
            total_cards: cards.len(),
            ..Default::default()
        };

        for card in &cards {
            if card.is_new() {
                stats.new_cards += 1;
            } else if card.is_learning() {
                stats.learning_cards += 1;
            } else if card.is_review() {
                stats.review_cards += 1;
            }
            if card.is_suspended() {
                stats.suspended_cards += 1;
            }
        }

        let ease_sample: Vec<f64> = cards
            .iter()
            .filter(|card| !card.is_new() && card.ease_factor > 0)
            .map(|card| ease_ratio(card.ease_factor))
            .collect();

        stats.ease = compute_distribution(&ease_sample, &ease_buckets());
        stats.intervals = compute_distribution(&interval_sample(&cards), &interval_buckets());

        debug!(deck, total = stats.total_cards, "Computed deck statistics");
        Ok(stats)
    }

    async fn ensure_deck(&self, deck: &str) -> Result<()> {
        if self.client.decks().exists(deck).await? {
            Ok(())
        } else {
            Err(Error::DeckNotFound(deck.to_string()))
        }
    }

    async fn cards_for(&self, query: &str) -> Result<Vec<CardInfo>> {
        let card_ids = self.client.cards().find(query).await?;
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.client.cards().info(&card_ids).await?)
    }
}

/// Convert a permille ease factor (2500) to ratio form (2.5).
fn ease_ratio(factor: i64) -> f64 {
    factor as f64 / 1000.0
}

/// Intervals in days; learning cards report negative seconds and are skipped.
fn interval_sample(cards: &[CardInfo]) -> Vec<f64> {
    cards
        .iter()
        .filter(|card| card.interval > 0)
        .map(|card| card.interval as f64)
        .collect()
}
